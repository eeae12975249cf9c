//! A fake store node for loopback tests.

use crate::fixtures::default_wire_props;
use parking_lot::Mutex;
use riakpb_protocol::{
    read_frame, write_frame, Frame, Message, MessageCode, ProtocolResult, RpbBucketProps,
    RpbErrorResp, RpbGetBucketReq, RpbGetBucketResp, RpbSetBucketReq, DEFAULT_MAX_FRAME_LEN,
};
use std::collections::HashMap;
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, trace};

const DEFAULT_TYPE: &[u8] = b"default";

/// `(bucket type, bucket name)`.
type BucketKey = (Vec<u8>, Vec<u8>);

#[derive(Debug, Default)]
struct NodeState {
    buckets: HashMap<BucketKey, RpbBucketProps>,
    requests: Vec<Frame>,
    fail_next: Option<RpbErrorResp>,
}

/// A loopback TCP server answering bucket property requests.
///
/// Unknown buckets report [`default_wire_props`]. `SetBucketReq` merges the
/// fields it sets into the stored properties. Every request frame is
/// recorded. The listener stops when the node is dropped.
#[derive(Debug)]
pub struct FakeNode {
    addr: SocketAddr,
    state: Arc<Mutex<NodeState>>,
    shutdown: Arc<AtomicBool>,
    accept_thread: Option<JoinHandle<()>>,
}

impl FakeNode {
    /// Binds to an ephemeral loopback port and starts accepting.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub fn start() -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(NodeState::default()));
        let shutdown = Arc::new(AtomicBool::new(false));

        let accept_thread = {
            let state = Arc::clone(&state);
            let shutdown = Arc::clone(&shutdown);
            std::thread::spawn(move || accept_loop(&listener, &state, &shutdown))
        };

        debug!(%addr, "fake node listening");
        Ok(Self {
            addr,
            state,
            shutdown,
            accept_thread: Some(accept_thread),
        })
    }

    /// Returns the listening address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the listening port.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Stores properties for a bucket, replacing any previous ones.
    pub fn seed(&self, bucket: &str, bucket_type: Option<&str>, props: RpbBucketProps) {
        self.state
            .lock()
            .buckets
            .insert(bucket_key(bucket.as_bytes(), bucket_type.map(str::as_bytes)), props);
    }

    /// Returns the stored properties of a bucket, if it was seeded or set.
    pub fn props(&self, bucket: &str, bucket_type: Option<&str>) -> Option<RpbBucketProps> {
        self.state
            .lock()
            .buckets
            .get(&bucket_key(bucket.as_bytes(), bucket_type.map(str::as_bytes)))
            .cloned()
    }

    /// Returns every request frame received so far.
    pub fn requests(&self) -> Vec<Frame> {
        self.state.lock().requests.clone()
    }

    /// Answers the next request with an error response.
    pub fn fail_next(&self, errcode: u32, errmsg: &str) {
        self.state.lock().fail_next = Some(RpbErrorResp::new(errcode, errmsg));
    }
}

impl Drop for FakeNode {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // wake the blocking accept
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.accept_thread.take() {
            let _ = handle.join();
        }
    }
}

fn bucket_key(bucket: &[u8], bucket_type: Option<&[u8]>) -> BucketKey {
    (
        bucket_type.unwrap_or(DEFAULT_TYPE).to_vec(),
        bucket.to_vec(),
    )
}

fn accept_loop(listener: &TcpListener, state: &Arc<Mutex<NodeState>>, shutdown: &AtomicBool) {
    for stream in listener.incoming() {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        match stream {
            Ok(stream) => {
                let state = Arc::clone(state);
                std::thread::spawn(move || serve_connection(stream, &state));
            }
            Err(e) => debug!(error = %e, "accept failed"),
        }
    }
}

fn serve_connection(mut stream: TcpStream, state: &Mutex<NodeState>) {
    loop {
        let frame = match read_frame(&mut stream, DEFAULT_MAX_FRAME_LEN) {
            Ok(frame) => frame,
            Err(e) => {
                trace!(error = %e, "connection closed");
                return;
            }
        };

        let (code, payload) = handle_frame(&frame, state);
        if write_frame(&mut stream, code, &payload).is_err() {
            return;
        }
    }
}

fn handle_frame(frame: &Frame, state: &Mutex<NodeState>) -> (MessageCode, Vec<u8>) {
    let mut state = state.lock();
    state.requests.push(frame.clone());

    if let Some(error) = state.fail_next.take() {
        return (MessageCode::ErrorResp, error.encode_to_vec());
    }

    let result = match frame.message_code() {
        Ok(MessageCode::PingReq) => Ok((MessageCode::PingResp, Vec::new())),
        Ok(MessageCode::GetBucketReq) => get_bucket(frame, &state),
        Ok(MessageCode::SetBucketReq) => set_bucket(frame, &mut state),
        _ => {
            let error = RpbErrorResp::new(0, format!("unsupported message code {}", frame.code));
            return (MessageCode::ErrorResp, error.encode_to_vec());
        }
    };

    result.unwrap_or_else(|e| {
        let error = RpbErrorResp::new(0, e.to_string());
        (MessageCode::ErrorResp, error.encode_to_vec())
    })
}

fn get_bucket(frame: &Frame, state: &NodeState) -> ProtocolResult<(MessageCode, Vec<u8>)> {
    let request: RpbGetBucketReq = frame.decode()?;
    let key = bucket_key(&request.bucket, request.r#type.as_deref());
    let props = state
        .buckets
        .get(&key)
        .cloned()
        .unwrap_or_else(default_wire_props);

    Ok((
        MessageCode::GetBucketResp,
        RpbGetBucketResp { props }.encode_to_vec(),
    ))
}

fn set_bucket(frame: &Frame, state: &mut NodeState) -> ProtocolResult<(MessageCode, Vec<u8>)> {
    let request: RpbSetBucketReq = frame.decode()?;
    let key = bucket_key(&request.bucket, request.r#type.as_deref());
    let stored = state.buckets.entry(key).or_insert_with(default_wire_props);
    merge_props(stored, request.props);

    Ok((MessageCode::SetBucketResp, Vec::new()))
}

/// Overwrites the fields of `dst` that `src` sets.
fn merge_props(dst: &mut RpbBucketProps, src: RpbBucketProps) {
    macro_rules! merge_optional {
        ($($field:ident),* $(,)?) => {
            $(
                if src.$field.is_some() {
                    dst.$field = src.$field;
                }
            )*
        };
    }

    merge_optional!(
        n_val, allow_mult, last_write_wins, has_precommit, has_postcommit, chash_keyfun,
        linkfun, old_vclock, young_vclock, big_vclock, small_vclock, pr, r, w, pw, dw, rw,
        basic_quorum, notfound_ok, backend, search, repl, search_index, datatype, consistent,
        write_once, hll_precision, ttl,
    );

    // a set flag with an empty list clears the hooks
    if src.has_precommit == Some(true) || !src.precommit.is_empty() {
        dst.has_precommit = Some(true);
        dst.precommit = src.precommit;
    }
    if src.has_postcommit == Some(true) || !src.postcommit.is_empty() {
        dst.has_postcommit = Some(true);
        dst.postcommit = src.postcommit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sample_wire_props, QUORUM_ALL};
    use riakpb_protocol::RpbCommitHook;

    fn exchange(node: &FakeNode, code: MessageCode, payload: &[u8]) -> Frame {
        let mut stream = TcpStream::connect(node.addr()).unwrap();
        write_frame(&mut stream, code, payload).unwrap();
        read_frame(&mut stream, DEFAULT_MAX_FRAME_LEN).unwrap()
    }

    #[test]
    fn answers_ping() {
        let node = FakeNode::start().unwrap();
        let reply = exchange(&node, MessageCode::PingReq, &[]);
        assert_eq!(reply.message_code().unwrap(), MessageCode::PingResp);
    }

    #[test]
    fn unknown_bucket_reports_defaults() {
        let node = FakeNode::start().unwrap();
        let request = RpbGetBucketReq::new("fresh", None).encode_to_vec();
        let reply = exchange(&node, MessageCode::GetBucketReq, &request);

        let response: RpbGetBucketResp = reply.decode().unwrap();
        assert_eq!(response.props, default_wire_props());
    }

    #[test]
    fn set_merges_into_seeded_props() {
        let node = FakeNode::start().unwrap();
        node.seed("b", None, sample_wire_props());

        let update = RpbBucketProps {
            w: Some(2),
            postcommit: vec![RpbCommitHook::named("other")],
            ..Default::default()
        };
        let request = RpbSetBucketReq::new("b", None, update).encode_to_vec();
        let reply = exchange(&node, MessageCode::SetBucketReq, &request);
        assert_eq!(reply.message_code().unwrap(), MessageCode::SetBucketResp);
        assert!(reply.payload.is_empty());

        let stored = node.props("b", None).unwrap();
        assert_eq!(stored.w, Some(2));
        assert_eq!(stored.n_val, Some(3));
        assert_eq!(stored.postcommit, vec![RpbCommitHook::named("other")]);
        assert_eq!(node.requests().len(), 1);
    }

    #[test]
    fn flagged_empty_list_clears_hooks() {
        let node = FakeNode::start().unwrap();
        node.seed("b", None, sample_wire_props());

        let update = RpbBucketProps {
            has_precommit: Some(true),
            ..Default::default()
        };
        let request = RpbSetBucketReq::new("b", None, update).encode_to_vec();
        exchange(&node, MessageCode::SetBucketReq, &request);

        let stored = node.props("b", None).unwrap();
        assert!(stored.precommit.is_empty());
        assert_eq!(stored.has_precommit, Some(true));
        assert_eq!(stored.postcommit, vec![RpbCommitHook::named("piper")]);
    }

    #[test]
    fn types_are_separate_namespaces() {
        let node = FakeNode::start().unwrap();
        let update = RpbBucketProps {
            w: Some(QUORUM_ALL),
            ..Default::default()
        };
        let request = RpbSetBucketReq::new("b", Some(b"maps".to_vec()), update).encode_to_vec();
        exchange(&node, MessageCode::SetBucketReq, &request);

        assert_eq!(node.props("b", Some("maps")).unwrap().w, Some(QUORUM_ALL));
        assert!(node.props("b", None).is_none());
    }

    #[test]
    fn scripted_failure() {
        let node = FakeNode::start().unwrap();
        node.fail_next(3, "overloaded");

        let reply = exchange(&node, MessageCode::PingReq, &[]);
        assert_eq!(reply.message_code().unwrap(), MessageCode::ErrorResp);
        let error: RpbErrorResp = reply.decode().unwrap();
        assert_eq!(error.message_text(), "overloaded");

        // only the next request fails
        let reply = exchange(&node, MessageCode::PingReq, &[]);
        assert_eq!(reply.message_code().unwrap(), MessageCode::PingResp);
    }
}
