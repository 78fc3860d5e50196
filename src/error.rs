use thiserror::Error;

/// Why a raw value could not be read as the number its field requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("not an integer: {0}")]
    Int(#[from] std::num::ParseIntError),

    #[error("not a number: {0}")]
    Float(#[from] std::num::ParseFloatError),

    #[error("not a finite number")]
    NonFinite,
}

/// A recognised field whose raw value did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field {code} has unparsable value {raw:?}")]
pub struct DecodeError {
    pub code: String,
    pub raw: String,
    #[source]
    pub cause: ParseError,
}

impl DecodeError {
    pub fn new(code: &str, raw: &str, cause: impl Into<ParseError>) -> Self {
        Self {
            code: code.to_string(),
            raw: raw.to_string(),
            cause: cause.into(),
        }
    }
}
