use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("the '{0}' format is not supported")]
    FormatUnsupported(String),

    #[error("malformed MOL data: {details} (at line {line})")]
    FormatMismatch { line: usize, details: String },

    #[error("MOL version '{version}' is not supported (only V2000)")]
    UnsupportedVersion { version: String },

    #[error("atom {atom} has a non-finite {axis} coordinate")]
    NonFiniteCoordinate { atom: usize, axis: char },

    #[error("{field} value '{value}' does not fit in {width} columns")]
    FieldOverflow {
        field: &'static str,
        value: String,
        width: usize,
    },

    #[error("invalid header field: {0}")]
    InvalidHeader(String),
}

impl Error {
    pub fn mismatch(line: usize, details: impl Into<String>) -> Self {
        Self::FormatMismatch {
            line,
            details: details.into(),
        }
    }

    pub fn unsupported_version(version: impl Into<String>) -> Self {
        Self::UnsupportedVersion {
            version: version.into(),
        }
    }

    pub fn overflow(field: &'static str, value: impl ToString, width: usize) -> Self {
        Self::FieldOverflow {
            field,
            value: value.to_string(),
            width,
        }
    }
}
