//! Error types for surveyor core.

use std::{error::Error, fmt, io};

use rust_xlsxwriter::XlsxError;

/// Error type for surveyor core operations.
#[derive(Debug)]
pub enum SurveyorError {
    /// An underlying I/O error.
    Io(io::Error),
    /// A spreadsheet rendering error.
    Xlsx(XlsxError),
    /// A catch-all error with a message.
    Other(String),
}

impl fmt::Display for SurveyorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Xlsx(err) => write!(f, "xlsx error: {err}"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for SurveyorError {}

impl From<io::Error> for SurveyorError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<XlsxError> for SurveyorError {
    fn from(value: XlsxError) -> Self {
        Self::Xlsx(value)
    }
}

/// Convenience result type for surveyor core.
pub type Result<T> = std::result::Result<T, SurveyorError>;
