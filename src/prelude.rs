pub use anyhow::{anyhow, bail, Result};
pub use log::{debug, error, info, trace, warn};

pub use crate::config::Config;
pub use crate::frame_source::{FrameSource, JsonLinesSource};
pub use crate::options::Options;
pub use crate::record_writer::RecordWriter;
pub use crate::vedirect::{
    FieldDecoder, FrameNormalizer, ProfileName, RawFrame, Record, ScaleProfile, Value,
};
