use thiserror::Error;

/// Application-level errors (CLI layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Parse error: {0}")]
    ParseError(#[from] kairos_rfc::ical::ParseError),

    #[error(transparent)]
    ExpansionError(#[from] kairos_rfc::ical::expand::ExpansionError),

    #[error(transparent)]
    ConversionError(#[from] kairos_rfc::ical::expand::ConversionError),

    #[error("Failed to write output: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
