use crate::prelude::*;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Writes each decoded record as one line of JSON.
#[derive(Clone)]
pub struct RecordWriter {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
    records_written: Arc<Mutex<u64>>,
}

impl RecordWriter {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            records_written: Arc::new(Mutex::new(0)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn write_record(&self, record: &Record) -> Result<()> {
        let json_string = record.to_json()?;

        let mut out = self.out.lock().map_err(|_| anyhow!("Failed to lock record output"))?;
        if let Err(e) = writeln!(out, "{}", json_string).and_then(|_| out.flush()) {
            error!("Failed to write record: {}", e);
            return Err(e.into());
        }

        let mut records_written = self
            .records_written
            .lock()
            .map_err(|_| anyhow!("Failed to lock records counter"))?;
        *records_written += 1;
        debug!("Total records written: {}", *records_written);

        Ok(())
    }

    pub fn records_written(&self) -> u64 {
        self.records_written.lock().map(|n| *n).unwrap_or(0)
    }
}
