use thiserror::Error;

use crate::ical::expand::ExpansionError;
use crate::ical::parse::ParseError;

/// RFC parsing and expansion errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error(transparent)]
    ExpansionError(#[from] ExpansionError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
