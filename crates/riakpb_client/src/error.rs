//! Error types for the client.

use riakpb_protocol::{MessageCode, ProtocolError};
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Broad classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, disconnection or timeout.
    Channel,
    /// Unexpected message kind or undecodable payload.
    ProtocolMismatch,
    /// The store answered with an error response.
    Server,
    /// An input value could not be encoded; nothing was sent.
    Translation,
}

/// Errors that can occur during a client call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network or transport error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Timed out writing a request or awaiting a response.
    #[error("operation timed out")]
    Timeout,

    /// The peer closed the connection.
    #[error("not connected to server")]
    NotConnected,

    /// A response arrived with the wrong message code.
    #[error("unexpected message: expected {expected}, got code {actual}")]
    UnexpectedMessage {
        /// Code the call was waiting for.
        expected: MessageCode,
        /// Raw code actually received.
        actual: u8,
    },

    /// A response payload could not be decoded or translated.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// The store sent an error response.
    #[error("server error {code}: {message}")]
    Server {
        /// Store-specific error code.
        code: u32,
        /// Error message sent by the store.
        message: String,
    },

    /// A property could not be encoded.
    #[error("translation error: {0}")]
    Translation(#[from] TranslationError),
}

impl ClientError {
    /// Creates a malformed message error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedMessage(message.into())
    }

    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_) | ClientError::Timeout | ClientError::NotConnected => {
                ErrorKind::Channel
            }
            ClientError::UnexpectedMessage { .. } | ClientError::MalformedMessage(_) => {
                ErrorKind::ProtocolMismatch
            }
            ClientError::Server { .. } => ErrorKind::Server,
            ClientError::Translation(_) => ErrorKind::Translation,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind as Io;
        match err.kind() {
            Io::TimedOut | Io::WouldBlock => ClientError::Timeout,
            Io::UnexpectedEof
            | Io::ConnectionReset
            | Io::ConnectionAborted
            | Io::BrokenPipe
            | Io::NotConnected => ClientError::NotConnected,
            _ => ClientError::Transport(err.to_string()),
        }
    }
}

impl From<ProtocolError> for ClientError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Io(io) => io.into(),
            other => ClientError::MalformedMessage(other.to_string()),
        }
    }
}

/// Errors raised while encoding bucket properties for the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// The property name is not a bucket property.
    #[error("unknown bucket property: {0}")]
    UnknownProperty(String),

    /// A quorum value is neither a count nor a known quorum name.
    #[error("unknown quorum value for {property}: {value}")]
    UnknownQuorum {
        /// Property being encoded.
        property: String,
        /// Offending value.
        value: String,
    },

    /// A repl value does not name a replication mode.
    #[error("unknown replication mode: {0}")]
    UnknownReplMode(String),

    /// A commit hook is neither a name nor a module/function record.
    #[error("malformed commit hook in {property}: {reason}")]
    MalformedHook {
        /// Property being encoded.
        property: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A module/function record is missing a key or has extra ones.
    #[error("malformed module/function record in {property}: {reason}")]
    MalformedModFun {
        /// Property being encoded.
        property: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The value has the wrong shape for the property.
    #[error("invalid value for {property}: expected {expected}")]
    InvalidValue {
        /// Property being encoded.
        property: String,
        /// Description of the accepted shape.
        expected: &'static str,
    },
}

impl TranslationError {
    /// Creates an invalid value error.
    pub fn invalid_value(property: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidValue {
            property: property.into(),
            expected,
        }
    }

    /// Creates a malformed hook error.
    pub fn malformed_hook(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedHook {
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Creates a malformed module/function error.
    pub fn malformed_modfun(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedModFun {
            property: property.into(),
            reason: reason.into(),
        }
    }
}
