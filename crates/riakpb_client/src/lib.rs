//! # riakpb client
//!
//! Bucket property operations over the Riak protocol buffers interface.
//!
//! This crate provides:
//! - The `Protocol` channel abstraction and a stream implementation
//! - Backends: one TCP connection per call, or an in-memory mock
//! - Bucket references with optional bucket types
//! - Application-facing `BucketProperties` and the wire translation rules
//! - `BucketPropertiesOperator` with `get` and `put`
//!
//! ## Translation
//!
//! The store encodes several properties compactly: quorums use reserved
//! integers, commit hooks are a name-or-modfun union, and the replication
//! mode is an enum. The operator exposes them as names, lists and
//! `{mod, fun}` records instead, and converts back exactly on `put`.
//!
//! ## Key Invariants
//!
//! - One request and one response per call
//! - Channels are released on every path, including errors
//! - Nothing is written if any property fails to encode
//! - Fields absent on the wire are absent from the result

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod bucket;
mod config;
mod error;
mod mock;
mod operator;
mod props;
mod protocol;
pub mod translate;

pub use backend::{Backend, TcpBackend};
pub use bucket::{Bucket, BucketRef, BucketType};
pub use config::{ClientConfig, DEFAULT_PB_PORT};
pub use error::{ClientError, ClientResult, ErrorKind, TranslationError};
pub use mock::{MockBackend, MockProtocol};
pub use operator::BucketPropertiesOperator;
pub use props::{BucketProperties, PropValue};
pub use protocol::{Protocol, StreamProtocol};
pub use translate::Quorum;
