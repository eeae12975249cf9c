//! # riakpb protocol
//!
//! Wire types and framing for the Riak protocol buffers client (PBC)
//! interface, limited to the bucket property exchanges.
//!
//! This crate provides:
//! - Protobuf messages (`RpbGetBucketReq`, `RpbSetBucketReq`, `RpbBucketProps`, ...)
//! - One-byte message codes
//! - The length-prefixed frame codec
//!
//! This is a pure protocol crate with no socket handling.
//!
//! ## Frame layout
//!
//! ```text
//! +----------------+------+-----------------+
//! | length (u32be) | code | protobuf bytes  |
//! +----------------+------+-----------------+
//! ```
//!
//! `length` counts the code byte plus the payload.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod codes;
mod error;
mod frame;
mod messages;

pub use codes::MessageCode;
pub use error::{ProtocolError, ProtocolResult};
pub use frame::{encode_frame, read_frame, write_frame, Frame, DEFAULT_MAX_FRAME_LEN};
pub use messages::{
    rpb_commit_hook, RpbBucketProps, RpbCommitHook, RpbErrorResp, RpbGetBucketReq,
    RpbGetBucketResp, RpbModFun, RpbReplMode, RpbSetBucketReq,
};

/// Re-exported so downstream crates encode and decode with the same version.
pub use prost::Message;
