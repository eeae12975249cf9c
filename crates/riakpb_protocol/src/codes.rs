//! One-byte message codes.

use crate::error::ProtocolError;
use std::fmt;

/// Identifies the message carried by a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageCode {
    /// `RpbErrorResp`, sent in place of any response.
    ErrorResp = 0,
    /// Liveness probe, no payload.
    PingReq = 1,
    /// Reply to `PingReq`, no payload.
    PingResp = 2,
    /// `RpbGetBucketReq`.
    GetBucketReq = 19,
    /// `RpbGetBucketResp`.
    GetBucketResp = 20,
    /// `RpbSetBucketReq`.
    SetBucketReq = 21,
    /// Bare acknowledgement of `SetBucketReq`.
    SetBucketResp = 22,
}

impl MessageCode {
    /// Returns the wire byte.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns true if this code is sent by the store rather than the client.
    pub fn is_response(self) -> bool {
        matches!(
            self,
            MessageCode::ErrorResp
                | MessageCode::PingResp
                | MessageCode::GetBucketResp
                | MessageCode::SetBucketResp
        )
    }

    /// Returns the message name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            MessageCode::ErrorResp => "ErrorResp",
            MessageCode::PingReq => "PingReq",
            MessageCode::PingResp => "PingResp",
            MessageCode::GetBucketReq => "GetBucketReq",
            MessageCode::GetBucketResp => "GetBucketResp",
            MessageCode::SetBucketReq => "SetBucketReq",
            MessageCode::SetBucketResp => "SetBucketResp",
        }
    }
}

impl TryFrom<u8> for MessageCode {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(MessageCode::ErrorResp),
            1 => Ok(MessageCode::PingReq),
            2 => Ok(MessageCode::PingResp),
            19 => Ok(MessageCode::GetBucketReq),
            20 => Ok(MessageCode::GetBucketResp),
            21 => Ok(MessageCode::SetBucketReq),
            22 => Ok(MessageCode::SetBucketResp),
            other => Err(ProtocolError::UnknownMessageCode(other)),
        }
    }
}

impl From<MessageCode> for u8 {
    fn from(code: MessageCode) -> Self {
        code.as_u8()
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.as_u8())
    }
}
