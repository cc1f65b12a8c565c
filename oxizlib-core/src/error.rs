//! Error types for OxiZlib operations.
//!
//! Every failure reported by the underlying codec carries a symbolic
//! [`ErrorCode`] derived from its numeric status, plus the codec's own
//! diagnostic message. Errors render as `"CODE: message"`.

use crate::constants::{
    Z_BUF_ERROR, Z_DATA_ERROR, Z_MEM_ERROR, Z_NEED_DICT, Z_STREAM_ERROR, Z_VERSION_ERROR,
};
use std::fmt;
use std::io;
use thiserror::Error;

/// Fallback message used when the codec provides no diagnostic string.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Symbolic error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Inconsistent stream state or invalid parameter (`Z_STREAM_ERROR`).
    StreamError,
    /// Corrupted or incomplete input data (`Z_DATA_ERROR`).
    DataError,
    /// Out of memory (`Z_MEM_ERROR`).
    MemError,
    /// No progress was possible (`Z_BUF_ERROR`).
    BufError,
    /// Incompatible codec library version (`Z_VERSION_ERROR`).
    VersionError,
    /// A decompressor stopped at a preset dictionary it was never given
    /// (`Z_NEED_DICT`).
    NeedDict,
    /// Any status without a dedicated code, including `Z_ERRNO`.
    Unknown,
    /// The stream was already finished or is in a terminal state.
    StreamClosed,
}

impl ErrorCode {
    /// Map a negative codec status to its symbolic code.
    pub fn from_status(status: i32) -> Self {
        match status {
            Z_STREAM_ERROR => Self::StreamError,
            Z_DATA_ERROR => Self::DataError,
            Z_MEM_ERROR => Self::MemError,
            Z_BUF_ERROR => Self::BufError,
            Z_VERSION_ERROR => Self::VersionError,
            Z_NEED_DICT => Self::NeedDict,
            _ => Self::Unknown,
        }
    }

    /// The code as it is exposed to callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StreamError => "STREAM_ERROR",
            Self::DataError => "DATA_ERROR",
            Self::MemError => "MEM_ERROR",
            Self::BufError => "BUF_ERROR",
            Self::VersionError => "VERSION_ERROR",
            Self::NeedDict => "NEED_DICT",
            Self::Unknown => "UNKNOWN_ERROR",
            Self::StreamClosed => "STREAM_CLOSED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The main error type for OxiZlib operations.
#[derive(Debug, Error)]
pub enum ZlibError {
    /// The codec rejected its initialization parameters.
    ///
    /// Parameters are fully caller-controlled, so this signals a programming
    /// error rather than a recoverable condition.
    #[error("{code}: {message}")]
    Construction {
        /// Symbolic code of the rejected status.
        code: ErrorCode,
        /// Codec diagnostic.
        message: String,
    },

    /// A transform or reset step failed.
    #[error("{code}: {message}")]
    Codec {
        /// Symbolic code of the failed status.
        code: ErrorCode,
        /// Codec diagnostic.
        message: String,
    },

    /// Finalizing the codec failed. Held references were still released.
    #[error("{code}: {message}")]
    Resource {
        /// Symbolic code of the failed status.
        code: ErrorCode,
        /// Codec diagnostic.
        message: String,
    },

    /// The stream is finished or was left unusable by a failed reset.
    #[error("STREAM_CLOSED: {message}")]
    StreamClosed {
        /// Why the stream is closed.
        message: String,
    },

    /// A configuration value is outside its accepted range.
    #[error("Invalid {name}: {value} is outside {min}..={max}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: i64,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// I/O error from a sink the stream writes into.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for OxiZlib operations.
pub type Result<T> = std::result::Result<T, ZlibError>;

impl ZlibError {
    /// Create a construction error from a codec status.
    pub fn construction(status: i32, message: impl Into<String>) -> Self {
        Self::Construction {
            code: ErrorCode::from_status(status),
            message: message.into(),
        }
    }

    /// Create a codec error from a codec status.
    pub fn codec(status: i32, message: impl Into<String>) -> Self {
        Self::Codec {
            code: ErrorCode::from_status(status),
            message: message.into(),
        }
    }

    /// Create a resource error from a codec status.
    pub fn resource(status: i32, message: impl Into<String>) -> Self {
        Self::Resource {
            code: ErrorCode::from_status(status),
            message: message.into(),
        }
    }

    /// Create a stream closed error.
    pub fn stream_closed(message: impl Into<String>) -> Self {
        Self::StreamClosed {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self::InvalidParameter {
            name,
            value,
            min,
            max,
        }
    }

    /// Symbolic code of this error, if it has one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Construction { code, .. }
            | Self::Codec { code, .. }
            | Self::Resource { code, .. } => Some(*code),
            Self::StreamClosed { .. } => Some(ErrorCode::StreamClosed),
            Self::InvalidParameter { .. } | Self::Io(_) => None,
        }
    }

    /// Whether this is a `BUF_ERROR`, i.e. the codec could make no progress.
    pub fn is_buf_error(&self) -> bool {
        self.code() == Some(ErrorCode::BufError)
    }
}

impl From<ZlibError> for io::Error {
    fn from(err: ZlibError) -> Self {
        match err {
            ZlibError::Io(e) => e,
            ZlibError::InvalidParameter { .. } => io::Error::new(io::ErrorKind::InvalidInput, err),
            ZlibError::Codec {
                code: ErrorCode::DataError,
                ..
            } => io::Error::new(io::ErrorKind::InvalidData, err),
            other => io::Error::other(other),
        }
    }
}
