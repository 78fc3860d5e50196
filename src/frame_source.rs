use crate::prelude::*;

use {
    async_trait::async_trait,
    tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines},
};

/// Anything that yields completed, checksum-validated raw frames.
#[async_trait]
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted.
    async fn next_frame(&mut self) -> Result<Option<RawFrame>>;
}

pub type BoxedReader = Box<dyn AsyncBufRead + Unpin + Send>;

/// Reads frames captured as JSON objects, one per line:
///
/// ```text
/// {"PID": "0xA053", "V": "12340", "I": "-230", "CS": "3"}
/// ```
///
/// Blank lines are ignored. A line that is not an object of string values is
/// logged and skipped; it never ends the stream.
pub struct JsonLinesSource<R> {
    lines: Lines<R>,
    line_number: u64,
    skipped: u64,
}

impl JsonLinesSource<BoxedReader> {
    /// Open `path`, or stdin when `path` is `-`.
    pub async fn open(path: &str) -> Result<Self> {
        let reader: BoxedReader = if path == "-" {
            info!("Reading frames from stdin");
            Box::new(BufReader::new(tokio::io::stdin()))
        } else {
            info!("Reading frames from {}", path);
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|err| anyhow!("frame_source.rs:error opening {}: {}", path, err))?;
            Box::new(BufReader::new(file))
        };

        Ok(Self::new(reader))
    }
}

impl<R: AsyncBufRead + Unpin> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            skipped: 0,
        }
    }

    /// Number of malformed lines skipped so far.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> FrameSource for JsonLinesSource<R> {
    async fn next_frame(&mut self) -> Result<Option<RawFrame>> {
        while let Some(line) = self.lines.next_line().await? {
            self.line_number += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<RawFrame>(line) {
                Ok(frame) => return Ok(Some(frame)),
                Err(err) => {
                    error!("skipping malformed frame on line {}: {}", self.line_number, err);
                    self.skipped += 1;
                }
            }
        }

        Ok(None)
    }
}
