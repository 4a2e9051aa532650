//! Error types for ColZip codec operations.
//!
//! All recoverable conditions are returned to the immediate caller as
//! [`ColzipError`] values. Backend statuses that the codec contracts declare
//! impossible are not represented here; they panic, since continuing past
//! them risks silent data corruption.

use thiserror::Error;

/// The main error type for ColZip codec operations.
#[derive(Debug, Error)]
pub enum ColzipError {
    /// The output buffer cannot hold the full result of a block operation.
    ///
    /// Retryable: call again with a larger output buffer. Block compress
    /// callers can avoid this entirely by sizing the buffer with
    /// `Codec::max_compressed_len`.
    #[error("output buffer too small: {input_len} input bytes, {output_len} output bytes")]
    BufferTooSmall {
        /// Length of the input buffer supplied to the call.
        input_len: usize,
        /// Length of the output buffer supplied to the call.
        output_len: usize,
    },

    /// The backend rejected the compressed data as malformed.
    ///
    /// Not retryable; carries the backend's diagnostic text.
    #[error("corrupt stream: {message}")]
    CorruptStream {
        /// Diagnostic message from the backend.
        message: String,
    },

    /// The active backend does not implement the requested operation.
    #[error("unsupported operation: {operation}")]
    UnsupportedOperation {
        /// Description of the operation that was requested.
        operation: String,
    },

    /// Backend stream setup failed.
    #[error("backend initialization failed: {message}")]
    BackendInit {
        /// Description of the setup failure.
        message: String,
    },

    /// The stream was already finalized and its native resource released.
    #[error("stream already finalized")]
    StreamFinished,
}

/// Result type alias for ColZip codec operations.
pub type Result<T> = std::result::Result<T, ColzipError>;

impl ColzipError {
    /// Create a buffer-too-small error.
    pub fn buffer_too_small(input_len: usize, output_len: usize) -> Self {
        Self::BufferTooSmall {
            input_len,
            output_len,
        }
    }

    /// Create a corrupt-stream error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptStream {
            message: message.into(),
        }
    }

    /// Create an unsupported-operation error.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Create a backend-initialization error.
    pub fn backend_init(message: impl Into<String>) -> Self {
        Self::BackendInit {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ColzipError::buffer_too_small(1024, 16);
        assert!(err.to_string().contains("1024"));
        assert!(err.to_string().contains("too small"));

        let err = ColzipError::corrupt("invalid block type");
        assert!(err.to_string().contains("invalid block type"));

        let err = ColzipError::unsupported("streaming compression");
        assert!(err.to_string().contains("streaming compression"));
    }

    #[test]
    fn test_stream_finished_display() {
        let err = ColzipError::StreamFinished;
        assert_eq!(err.to_string(), "stream already finalized");
    }
}
