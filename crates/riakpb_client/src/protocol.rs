//! Request/response exchange over one connection.

use crate::error::{ClientError, ClientResult};
use riakpb_protocol::{read_frame, write_frame, Frame, Message, MessageCode, RpbErrorResp};
use std::io::{Read, Write};
use tracing::{trace, warn};

/// A channel for one request/response exchange at a time.
///
/// Implementations only move frames; the typed helpers decode them and turn
/// error responses and unexpected codes into [`ClientError`]s. A channel is
/// not shared between concurrent calls.
pub trait Protocol {
    /// Writes one frame.
    fn write_frame(&mut self, code: MessageCode, payload: &[u8]) -> ClientResult<()>;

    /// Blocks until one frame arrives.
    fn read_frame(&mut self) -> ClientResult<Frame>;

    /// Encodes and writes `message`.
    fn write<M: Message>(&mut self, code: MessageCode, message: &M) -> ClientResult<()>
    where
        Self: Sized,
    {
        self.write_frame(code, &message.encode_to_vec())
    }

    /// Awaits a `code` response and decodes it as `M`.
    fn expect<M: Message + Default>(&mut self, code: MessageCode) -> ClientResult<M>
    where
        Self: Sized,
    {
        let frame = self.expect_frame(code)?;
        frame.decode::<M>().map_err(|e| {
            ClientError::malformed(format!("{} payload: {e}", code.name()))
        })
    }

    /// Awaits a bare `code` acknowledgement.
    fn expect_ack(&mut self, code: MessageCode) -> ClientResult<()>
    where
        Self: Sized,
    {
        self.expect_frame(code).map(|_| ())
    }

    /// Awaits a frame with `code`, surfacing error responses.
    fn expect_frame(&mut self, code: MessageCode) -> ClientResult<Frame>
    where
        Self: Sized,
    {
        let frame = self.read_frame()?;

        if frame.code == MessageCode::ErrorResp.as_u8() {
            let error: RpbErrorResp = frame
                .decode()
                .map_err(|e| ClientError::malformed(format!("ErrorResp payload: {e}")))?;
            let message = error.message_text();
            warn!(code = error.errcode, %message, expected = %code, "server returned error");
            return Err(ClientError::Server {
                code: error.errcode,
                message,
            });
        }

        if frame.code != code.as_u8() {
            return Err(ClientError::UnexpectedMessage {
                expected: code,
                actual: frame.code,
            });
        }

        Ok(frame)
    }
}

/// A [`Protocol`] over any byte stream.
#[derive(Debug)]
pub struct StreamProtocol<S> {
    stream: S,
    max_frame_len: usize,
}

impl<S: Read + Write> StreamProtocol<S> {
    /// Wraps a connected stream.
    pub fn new(stream: S, max_frame_len: usize) -> Self {
        Self {
            stream,
            max_frame_len,
        }
    }

    /// Returns the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Unwraps the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> Protocol for StreamProtocol<S> {
    fn write_frame(&mut self, code: MessageCode, payload: &[u8]) -> ClientResult<()> {
        trace!(%code, len = payload.len(), "writing frame");
        write_frame(&mut self.stream, code, payload)?;
        Ok(())
    }

    fn read_frame(&mut self) -> ClientResult<Frame> {
        let frame = read_frame(&mut self.stream, self.max_frame_len)?;
        trace!(code = frame.code, len = frame.payload.len(), "read frame");
        Ok(frame)
    }
}
