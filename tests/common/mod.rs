#![allow(dead_code)]

use std::sync::Mutex;
use vedirect_dump::prelude::*;

// Keeps every formatted log line so tests can check what was reported.
struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let line = format!("{} {}", record.level(), record.args());
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};

pub fn common_setup() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
}

/// Log lines captured so far, as `"<LEVEL> <message>"`. Tests in one binary
/// share the logger, so look for specific lines rather than counting.
pub fn captured_logs() -> Vec<String> {
    LOGGER.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
}

pub struct Factory();
impl Factory {
    pub fn frame(fields: &[(&str, &str)]) -> RawFrame {
        fields
            .iter()
            .map(|(code, value)| (code.to_string(), value.to_string()))
            .collect()
    }

    // A full frame as sent by a SmartSolar MPPT with a load output
    pub fn mppt_frame() -> RawFrame {
        Self::frame(&[
            ("PID", "0xA053"),
            ("FW", "159"),
            ("SER#", "HQ2132ABCDE"),
            ("V", "13270"),
            ("I", "2100"),
            ("VPV", "37760"),
            ("PPV", "29"),
            ("CS", "3"),
            ("MPPT", "2"),
            ("OR", "0x00000000"),
            ("ERR", "0"),
            ("LOAD", "0"),
            ("IL", "300"),
            ("H19", "12345"),
            ("H20", "5"),
            ("H21", "61"),
            ("H22", "17"),
            ("H23", "74"),
            ("HSDS", "42"),
        ])
    }

    pub fn fine() -> FrameNormalizer {
        FrameNormalizer::with_profile(ScaleProfile::FINE)
    }

    pub fn coarse() -> FrameNormalizer {
        FrameNormalizer::with_profile(ScaleProfile::COARSE)
    }
}
