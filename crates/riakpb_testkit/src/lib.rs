//! # riakpb testkit
//!
//! Test utilities for the riakpb crates.
//!
//! This crate provides:
//! - `FakeNode`, a loopback TCP server answering the bucket property messages
//! - Wire fixtures shared across test suites
//!
//! ## Usage
//!
//! ```rust,ignore
//! use riakpb_testkit::prelude::*;
//!
//! let node = FakeNode::start().unwrap();
//! node.seed("bucket_name", None, sample_wire_props());
//! // point a TcpBackend at node.port()
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod node;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::node::FakeNode;
}
