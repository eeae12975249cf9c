//! Error types for the protocol crate.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors raised while framing or decoding messages.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Underlying reader or writer failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A frame declared a zero length and so carries no message code.
    #[error("frame too short: length prefix is zero")]
    FrameTooShort,

    /// A frame declared a length above the configured limit.
    #[error("frame too large: {len} bytes (max {max})")]
    FrameTooLarge {
        /// Declared length.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The message code byte is not one this crate understands.
    #[error("unknown message code: {0}")]
    UnknownMessageCode(u8),

    /// The payload is not a valid protobuf message of the expected type.
    #[error("decoding failed: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl ProtocolError {
    /// Returns true if the error came from the underlying stream.
    pub fn is_io(&self) -> bool {
        matches!(self, ProtocolError::Io(_))
    }
}
