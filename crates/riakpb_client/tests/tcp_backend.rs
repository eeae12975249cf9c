//! Bucket property operations over TCP against a fake node.

use riakpb_client::{
    Backend, Bucket, BucketProperties, BucketPropertiesOperator, ClientConfig, ClientError,
    ErrorKind, PropValue, Protocol, TcpBackend,
};
use riakpb_protocol::{MessageCode, RpbSetBucketReq};
use riakpb_testkit::prelude::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn connect(node: &FakeNode) -> BucketPropertiesOperator<TcpBackend> {
    init_tracing();
    let config = ClientConfig::new("127.0.0.1", node.port())
        .with_connect_timeout(Duration::from_secs(2))
        .with_read_timeout(Duration::from_secs(2));
    BucketPropertiesOperator::new(TcpBackend::new(config))
}

#[test]
fn get_seeded_bucket() {
    let node = FakeNode::start().unwrap();
    node.seed("b", None, sample_wire_props());
    let operator = connect(&node);

    let props = operator.get("b").unwrap();
    assert_eq!(props["pr"], PropValue::from("one"));
    assert_eq!(props["w"], PropValue::from("all"));
    assert_eq!(props["postcommit"], PropValue::List(vec!["piper".into()]));
    assert!(!props.contains_key("chash_keyfun"));

    let requests = node.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].code, MessageCode::GetBucketReq.as_u8());
}

#[test]
fn put_then_get() {
    let node = FakeNode::start().unwrap();
    let operator = connect(&node);

    let update = BucketProperties::new()
        .with("n_val", 5)
        .with("r", PropValue::symbol("one"))
        .with("precommit", PropValue::List(vec![PropValue::modfun("validate_json", "validate")]))
        .with("repl", PropValue::symbol("realtime"));
    operator.put("b", &update).unwrap();

    let props = operator.get("b").unwrap();
    assert_eq!(props["n_val"], PropValue::Integer(5));
    assert_eq!(props["r"], PropValue::from("one"));
    assert_eq!(props["has_precommit"], PropValue::Bool(true));
    assert_eq!(
        props["precommit"],
        PropValue::List(vec![PropValue::modfun("validate_json", "validate")])
    );
    assert_eq!(props["repl"], PropValue::from("realtime"));
    // untouched defaults survive
    assert_eq!(props["w"], PropValue::from("quorum"));

    let stored = node.props("b", None).unwrap();
    assert_eq!(stored.r, Some(QUORUM_ONE));
}

#[test]
fn put_empty_list_clears_hooks() {
    let node = FakeNode::start().unwrap();
    node.seed("b", None, sample_wire_props());
    let operator = connect(&node);

    operator
        .put("b", &BucketProperties::new().with("precommit", PropValue::List(vec![])))
        .unwrap();

    let props = operator.get("b").unwrap();
    assert_eq!(props["precommit"], PropValue::List(vec![]));
    assert_eq!(props["has_precommit"], PropValue::Bool(true));
    assert_eq!(props["postcommit"], PropValue::List(vec!["piper".into()]));
    assert!(node.props("b", None).unwrap().precommit.is_empty());
}

#[test]
fn typed_buckets_are_separate() {
    let node = FakeNode::start().unwrap();
    let operator = connect(&node);

    operator
        .put(&Bucket::typed("maps", "b"), &BucketProperties::new().with("n_val", 1))
        .unwrap();

    let sent: RpbSetBucketReq = node.requests()[0].decode().unwrap();
    assert_eq!(sent.r#type, Some(b"maps".to_vec()));

    assert_eq!(operator.get(&Bucket::typed("maps", "b")).unwrap()["n_val"], PropValue::Integer(1));
    assert_eq!(operator.get("b").unwrap()["n_val"], PropValue::Integer(3));
}

#[test]
fn default_type_is_not_sent() {
    let node = FakeNode::start().unwrap();
    let operator = connect(&node);

    operator
        .put(&Bucket::typed("default", "b"), &BucketProperties::new().with("n_val", 2))
        .unwrap();

    let sent: RpbSetBucketReq = node.requests()[0].decode().unwrap();
    assert_eq!(sent.r#type, None);
    assert_eq!(node.props("b", None).unwrap().n_val, Some(2));
}

#[test]
fn zero_timeouts_mean_no_timeout() {
    init_tracing();
    let node = FakeNode::start().unwrap();
    node.seed("b", None, sample_wire_props());
    let config = ClientConfig::new("127.0.0.1", node.port())
        .with_connect_timeout(Duration::ZERO)
        .with_read_timeout(Duration::ZERO)
        .with_write_timeout(Duration::ZERO);
    let operator = BucketPropertiesOperator::new(TcpBackend::new(config));

    let props = operator.get("b").unwrap();
    assert_eq!(props["n_val"], PropValue::Integer(3));
}

#[test]
fn server_error() {
    let node = FakeNode::start().unwrap();
    node.fail_next(1, "no_type");
    let operator = connect(&node);

    let err = operator
        .put(&Bucket::typed("missing", "b"), &BucketProperties::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    match err {
        ClientError::Server { code, message } => {
            assert_eq!(code, 1);
            assert_eq!(message, "no_type");
        }
        other => panic!("expected server error, got {other:?}"),
    }

    // the next call gets a fresh connection and succeeds
    assert!(operator.get("b").is_ok());
}

#[test]
fn translation_failure_never_connects() {
    let node = FakeNode::start().unwrap();
    let operator = connect(&node);

    let err = operator
        .put("b", &BucketProperties::new().with("repl", "sometimes"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Translation);
    assert!(node.requests().is_empty());
}

#[test]
fn ping_over_raw_channel() {
    let node = FakeNode::start().unwrap();
    let operator = connect(&node);

    operator
        .backend()
        .protocol(|p| {
            p.write_frame(MessageCode::PingReq, &[])?;
            p.expect_ack(MessageCode::PingResp)
        })
        .unwrap();
    assert_eq!(node.requests()[0].code, MessageCode::PingReq.as_u8());
}
