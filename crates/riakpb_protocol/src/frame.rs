//! Length-prefixed frame codec.

use crate::codes::MessageCode;
use crate::error::{ProtocolError, ProtocolResult};
use bytes::{BufMut, Bytes, BytesMut};
use std::io::{Read, Write};

/// Default upper bound on a frame's declared length (64 MiB).
pub const DEFAULT_MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

/// Size of the big-endian length prefix.
const LENGTH_PREFIX_LEN: usize = 4;

/// One message as read off the wire.
///
/// The code is kept as the raw byte so that unexpected or unknown codes can
/// still be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Raw message code.
    pub code: u8,
    /// Protobuf payload, possibly empty.
    pub payload: Bytes,
}

impl Frame {
    /// Creates a frame.
    pub fn new(code: MessageCode, payload: impl Into<Bytes>) -> Self {
        Self {
            code: code.as_u8(),
            payload: payload.into(),
        }
    }

    /// Creates a frame carrying an encoded message.
    pub fn from_message<M: prost::Message>(code: MessageCode, message: &M) -> Self {
        Self::new(code, message.encode_to_vec())
    }

    /// Returns the typed message code.
    pub fn message_code(&self) -> ProtocolResult<MessageCode> {
        MessageCode::try_from(self.code)
    }

    /// Decodes the payload as `M`.
    pub fn decode<M: prost::Message + Default>(&self) -> ProtocolResult<M> {
        Ok(M::decode(self.payload.clone())?)
    }

    /// Encodes this frame, prefix included.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::FrameTooLarge`] if the payload does not fit
    /// the length prefix.
    pub fn to_bytes(&self) -> ProtocolResult<Bytes> {
        put_frame(self.code, &self.payload)
    }
}

/// Returns the length prefix for a payload; it covers the code byte.
fn frame_len(payload_len: usize) -> ProtocolResult<u32> {
    payload_len
        .checked_add(1)
        .and_then(|len| u32::try_from(len).ok())
        .ok_or(ProtocolError::FrameTooLarge {
            len: payload_len.saturating_add(1),
            max: u32::MAX as usize,
        })
}

fn put_frame(code: u8, payload: &[u8]) -> ProtocolResult<Bytes> {
    let len = frame_len(payload.len())?;
    let mut buf = BytesMut::with_capacity(LENGTH_PREFIX_LEN + 1 + payload.len());
    buf.put_u32(len);
    buf.put_u8(code);
    buf.put_slice(payload);
    Ok(buf.freeze())
}

/// Encodes a frame for `code` around `payload`.
///
/// # Errors
///
/// Returns [`ProtocolError::FrameTooLarge`] if the payload does not fit the
/// length prefix.
pub fn encode_frame(code: MessageCode, payload: &[u8]) -> ProtocolResult<Bytes> {
    put_frame(code.as_u8(), payload)
}

/// Writes one frame and flushes the writer.
///
/// # Errors
///
/// Returns an error if the payload does not fit the length prefix or the
/// writer fails.
pub fn write_frame<W: Write>(writer: &mut W, code: MessageCode, payload: &[u8]) -> ProtocolResult<()> {
    writer.write_all(&encode_frame(code, payload)?)?;
    writer.flush()?;
    Ok(())
}

/// Reads one frame.
///
/// # Errors
///
/// Returns an error if the reader fails or ends mid-frame, if the declared
/// length is zero, or if it exceeds `max_len`.
pub fn read_frame<R: Read>(reader: &mut R, max_len: usize) -> ProtocolResult<Frame> {
    let mut prefix = [0u8; LENGTH_PREFIX_LEN];
    reader.read_exact(&mut prefix)?;

    let len = u32::from_be_bytes(prefix) as usize;
    if len == 0 {
        return Err(ProtocolError::FrameTooShort);
    }
    if len > max_len {
        return Err(ProtocolError::FrameTooLarge { len, max: max_len });
    }

    let mut body = BytesMut::zeroed(len);
    reader.read_exact(&mut body)?;

    let payload = body.split_off(1).freeze();
    Ok(Frame {
        code: body[0],
        payload,
    })
}
