use std::convert::From;
use thiserror;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Generic(String),
    #[error("Length of {field} values ({actual}) does not match expected length {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
    #[error("Degenerate {axis} domain: all values equal {value}")]
    DegenerateDomain { axis: String, value: f64 },
    #[error("Expected {expected} data points but got {actual}")]
    AxisCountMismatch { expected: usize, actual: usize },
    #[error("Parameter not defined: {0}")]
    NotDefined(String),
    #[error("Dataset contains no values")]
    EmptyDataset,
    #[error("Couldn't find a column named {0}")]
    ColumnNotFound(String),
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Image suffix not supported: {0}")]
    InvalidImageSuffix(String),
    #[error("Unable to open file for reading: {0}")]
    ReaderError(String),
    #[error("Unable to process input: {0}")]
    SerdeError(String),
    #[error("Unable to render image: {0}")]
    RenderError(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::FileNotFound(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::ReaderError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerdeError(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerdeError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
