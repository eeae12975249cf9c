//! In-memory backend for tests.

use crate::backend::Backend;
use crate::error::{ClientError, ClientResult};
use crate::protocol::Protocol;
use parking_lot::Mutex;
use riakpb_protocol::{Frame, Message, MessageCode};
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<Frame>,
    written: Vec<Frame>,
    opened: usize,
    released: usize,
    refuse_connections: bool,
}

/// A backend replaying queued response frames and recording writes.
///
/// Reading with no response queued fails with [`ClientError::Timeout`].
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Creates a mock backend with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response frame carrying `message`.
    pub fn push_response<M: Message>(&self, code: MessageCode, message: &M) {
        self.push_frame(Frame::from_message(code, message));
    }

    /// Queues a bare response frame.
    pub fn push_ack(&self, code: MessageCode) {
        self.push_frame(Frame::new(code, Vec::new()));
    }

    /// Queues a raw frame.
    pub fn push_frame(&self, frame: Frame) {
        self.state.lock().responses.push_back(frame);
    }

    /// Makes subsequent channel opens fail.
    pub fn set_refuse_connections(&self, refuse: bool) {
        self.state.lock().refuse_connections = refuse;
    }

    /// Returns every frame written so far.
    pub fn written(&self) -> Vec<Frame> {
        self.state.lock().written.clone()
    }

    /// Decodes the written frame at `index` as `M`.
    ///
    /// Returns `None` if there is no such frame or it does not decode.
    pub fn written_message<M: Message + Default>(&self, index: usize) -> Option<M> {
        let state = self.state.lock();
        state.written.get(index).and_then(|f| f.decode().ok())
    }

    /// Returns the number of responses not yet consumed.
    pub fn pending_responses(&self) -> usize {
        self.state.lock().responses.len()
    }

    /// Returns the number of channels opened.
    pub fn opened(&self) -> usize {
        self.state.lock().opened
    }

    /// Returns the number of channels released.
    pub fn released(&self) -> usize {
        self.state.lock().released
    }
}

/// Channel handed out by [`MockBackend`].
#[derive(Debug)]
pub struct MockProtocol {
    state: Arc<Mutex<MockState>>,
}

impl Protocol for MockProtocol {
    fn write_frame(&mut self, code: MessageCode, payload: &[u8]) -> ClientResult<()> {
        self.state
            .lock()
            .written
            .push(Frame::new(code, payload.to_vec()));
        Ok(())
    }

    fn read_frame(&mut self) -> ClientResult<Frame> {
        self.state
            .lock()
            .responses
            .pop_front()
            .ok_or(ClientError::Timeout)
    }
}

impl Drop for MockProtocol {
    fn drop(&mut self) {
        self.state.lock().released += 1;
    }
}

impl Backend for MockBackend {
    type Protocol = MockProtocol;

    fn protocol<T, F>(&self, f: F) -> ClientResult<T>
    where
        F: FnOnce(&mut Self::Protocol) -> ClientResult<T>,
    {
        {
            let mut state = self.state.lock();
            if state.refuse_connections {
                return Err(ClientError::Transport("connection refused".into()));
            }
            state.opened += 1;
        }

        let mut protocol = MockProtocol {
            state: Arc::clone(&self.state),
        };
        f(&mut protocol)
    }
}
