pub mod field;
pub mod frame;
pub mod scale;
pub mod tables;

pub use field::{DecodedField, FieldDecoder, Value};
pub use frame::{FrameNormalizer, FrameStats, RawFrame, Record};
pub use scale::{ProfileName, Quantity, ScaleOverrides, ScaleProfile};
pub use tables::{EnumTable, UNKNOWN};
