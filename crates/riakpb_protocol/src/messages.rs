//! Protobuf messages for the bucket property exchanges.
//!
//! Field numbers follow `riak.proto`; only the bucket messages and the
//! generic error response are modelled here.

/// Replication mode carried in `RpbBucketProps.repl`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum RpbReplMode {
    /// Replication disabled.
    False = 0,
    /// Real-time replication only.
    Realtime = 1,
    /// Full-sync replication only.
    Fullsync = 2,
    /// Both real-time and full-sync replication.
    True = 3,
}

/// A module/function pair naming an Erlang function on the store.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct RpbModFun {
    /// Module name.
    #[prost(bytes = "vec", required, tag = "1")]
    pub module: Vec<u8>,
    /// Function name.
    #[prost(bytes = "vec", required, tag = "2")]
    pub function: Vec<u8>,
}

impl RpbModFun {
    /// Creates a module/function pair.
    pub fn new(module: impl Into<Vec<u8>>, function: impl Into<Vec<u8>>) -> Self {
        Self {
            module: module.into(),
            function: function.into(),
        }
    }
}

/// A pre- or post-commit hook.
///
/// On the wire this is two optional fields; exactly one of them is set, so
/// it is carried as a oneof.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct RpbCommitHook {
    /// The populated arm, `None` only for malformed input.
    #[prost(oneof = "rpb_commit_hook::Hook", tags = "1, 2")]
    pub hook: Option<rpb_commit_hook::Hook>,
}

/// Arms of [`RpbCommitHook`].
pub mod rpb_commit_hook {
    /// Either an explicit module/function or a registered hook name.
    #[derive(Clone, PartialEq, Eq, ::prost::Oneof)]
    pub enum Hook {
        /// Explicit module/function pointer.
        #[prost(message, tag = "1")]
        Modfun(super::RpbModFun),
        /// Name of a hook registered on the store.
        #[prost(bytes, tag = "2")]
        Name(Vec<u8>),
    }
}

impl RpbCommitHook {
    /// Creates a hook referring to a registered name.
    pub fn named(name: impl Into<Vec<u8>>) -> Self {
        Self {
            hook: Some(rpb_commit_hook::Hook::Name(name.into())),
        }
    }

    /// Creates a hook pointing at a module/function pair.
    pub fn modfun(modfun: RpbModFun) -> Self {
        Self {
            hook: Some(rpb_commit_hook::Hook::Modfun(modfun)),
        }
    }
}

/// Bucket properties as exchanged with the store.
///
/// Every field is optional; an unset field on `SetBucketReq` leaves the
/// server-side value untouched.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpbBucketProps {
    /// Number of replicas.
    #[prost(uint32, optional, tag = "1")]
    pub n_val: Option<u32>,
    /// Whether siblings are allowed.
    #[prost(bool, optional, tag = "2")]
    pub allow_mult: Option<bool>,
    /// Whether the last write wins on conflict.
    #[prost(bool, optional, tag = "3")]
    pub last_write_wins: Option<bool>,
    /// Pre-commit hooks.
    #[prost(message, repeated, tag = "4")]
    pub precommit: Vec<RpbCommitHook>,
    /// Set by the store when pre-commit hooks exist.
    #[prost(bool, optional, tag = "5")]
    pub has_precommit: Option<bool>,
    /// Post-commit hooks.
    #[prost(message, repeated, tag = "6")]
    pub postcommit: Vec<RpbCommitHook>,
    /// Set by the store when post-commit hooks exist.
    #[prost(bool, optional, tag = "7")]
    pub has_postcommit: Option<bool>,
    /// Consistent-hashing key function.
    #[prost(message, optional, tag = "8")]
    pub chash_keyfun: Option<RpbModFun>,
    /// Link-walking function.
    #[prost(message, optional, tag = "9")]
    pub linkfun: Option<RpbModFun>,
    /// Vector clock pruning: old threshold.
    #[prost(uint32, optional, tag = "10")]
    pub old_vclock: Option<u32>,
    /// Vector clock pruning: young threshold.
    #[prost(uint32, optional, tag = "11")]
    pub young_vclock: Option<u32>,
    /// Vector clock pruning: big threshold.
    #[prost(uint32, optional, tag = "12")]
    pub big_vclock: Option<u32>,
    /// Vector clock pruning: small threshold.
    #[prost(uint32, optional, tag = "13")]
    pub small_vclock: Option<u32>,
    /// Primary read quorum.
    #[prost(uint32, optional, tag = "14")]
    pub pr: Option<u32>,
    /// Read quorum.
    #[prost(uint32, optional, tag = "15")]
    pub r: Option<u32>,
    /// Write quorum.
    #[prost(uint32, optional, tag = "16")]
    pub w: Option<u32>,
    /// Primary write quorum.
    #[prost(uint32, optional, tag = "17")]
    pub pw: Option<u32>,
    /// Durable write quorum.
    #[prost(uint32, optional, tag = "18")]
    pub dw: Option<u32>,
    /// Delete quorum.
    #[prost(uint32, optional, tag = "19")]
    pub rw: Option<u32>,
    /// Whether reads return early once a basic quorum reports not-found.
    #[prost(bool, optional, tag = "20")]
    pub basic_quorum: Option<bool>,
    /// Whether not-found counts towards the read quorum.
    #[prost(bool, optional, tag = "21")]
    pub notfound_ok: Option<bool>,
    /// Storage backend name.
    #[prost(bytes = "vec", optional, tag = "22")]
    pub backend: Option<Vec<u8>>,
    /// Legacy search flag.
    #[prost(bool, optional, tag = "23")]
    pub search: Option<bool>,
    /// Replication mode, see [`RpbReplMode`].
    #[prost(enumeration = "RpbReplMode", optional, tag = "24")]
    pub repl: Option<i32>,
    /// Search index name.
    #[prost(bytes = "vec", optional, tag = "25")]
    pub search_index: Option<Vec<u8>>,
    /// Convergent data type of the bucket type.
    #[prost(bytes = "vec", optional, tag = "26")]
    pub datatype: Option<Vec<u8>>,
    /// Whether the bucket uses strong consistency.
    #[prost(bool, optional, tag = "27")]
    pub consistent: Option<bool>,
    /// Whether writes skip the read-before-write.
    #[prost(bool, optional, tag = "28")]
    pub write_once: Option<bool>,
    /// HyperLogLog precision.
    #[prost(uint32, optional, tag = "29")]
    pub hll_precision: Option<u32>,
    /// Object time-to-live.
    #[prost(uint32, optional, tag = "30")]
    pub ttl: Option<u32>,
}

/// Request for the properties of one bucket.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct RpbGetBucketReq {
    /// Bucket name.
    #[prost(bytes = "vec", required, tag = "1")]
    pub bucket: Vec<u8>,
    /// Bucket type, omitted for the default type.
    #[prost(bytes = "vec", optional, tag = "2")]
    pub r#type: Option<Vec<u8>>,
}

impl RpbGetBucketReq {
    /// Creates a get request.
    pub fn new(bucket: impl Into<Vec<u8>>, bucket_type: Option<Vec<u8>>) -> Self {
        Self {
            bucket: bucket.into(),
            r#type: bucket_type,
        }
    }
}

/// Response carrying the properties of one bucket.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpbGetBucketResp {
    /// The bucket's properties.
    #[prost(message, required, tag = "1")]
    pub props: RpbBucketProps,
}

/// Request replacing some properties of one bucket.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpbSetBucketReq {
    /// Bucket name.
    #[prost(bytes = "vec", required, tag = "1")]
    pub bucket: Vec<u8>,
    /// Properties to set; unset fields are left alone.
    #[prost(message, required, tag = "2")]
    pub props: RpbBucketProps,
    /// Bucket type, omitted for the default type.
    #[prost(bytes = "vec", optional, tag = "3")]
    pub r#type: Option<Vec<u8>>,
}

impl RpbSetBucketReq {
    /// Creates a set request.
    pub fn new(
        bucket: impl Into<Vec<u8>>,
        bucket_type: Option<Vec<u8>>,
        props: RpbBucketProps,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            props,
            r#type: bucket_type,
        }
    }
}

/// Error sent by the store in place of the expected response.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct RpbErrorResp {
    /// Human-readable error message.
    #[prost(bytes = "vec", required, tag = "1")]
    pub errmsg: Vec<u8>,
    /// Store-specific error code.
    #[prost(uint32, required, tag = "2")]
    pub errcode: u32,
}

impl RpbErrorResp {
    /// Creates an error response.
    pub fn new(errcode: u32, errmsg: impl Into<Vec<u8>>) -> Self {
        Self {
            errmsg: errmsg.into(),
            errcode,
        }
    }

    /// Returns the error message, replacing invalid UTF-8.
    pub fn message_text(&self) -> String {
        String::from_utf8_lossy(&self.errmsg).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn get_request_omits_type_when_unset() {
        let plain = RpbGetBucketReq::new("b", None).encode_to_vec();
        assert_eq!(plain, vec![0x0a, 0x01, b'b']);

        let typed = RpbGetBucketReq::new("b", Some(b"t".to_vec())).encode_to_vec();
        assert_eq!(typed, vec![0x0a, 0x01, b'b', 0x12, 0x01, b't']);
    }

    #[test]
    fn commit_hook_arms_use_their_own_tags() {
        let named = RpbCommitHook::named("piper").encode_to_vec();
        assert_eq!(named[0], 0x12);

        let modfun = RpbCommitHook::modfun(RpbModFun::new("m", "f")).encode_to_vec();
        assert_eq!(modfun[0], 0x0a);
    }

    #[test]
    fn commit_hook_decodes_from_plain_optional_fields() {
        // name = 2, as a peer without oneof support would write it
        let bytes = [0x12, 0x03, b'a', b'b', b'c'];
        let hook = RpbCommitHook::decode(&bytes[..]).unwrap();
        assert_eq!(hook, RpbCommitHook::named("abc"));
    }

    #[test]
    fn bucket_props_sentinels_survive_encoding() {
        let props = RpbBucketProps {
            pr: Some(u32::MAX - 1),
            dw: Some(0),
            precommit: vec![RpbCommitHook::named("piper")],
            repl: Some(RpbReplMode::Fullsync as i32),
            ..Default::default()
        };

        let decoded = RpbBucketProps::decode(props.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.pr, Some(0xffff_fffe));
        assert_eq!(decoded.dw, Some(0));
        assert_eq!(decoded.r, None);
        assert_eq!(decoded.repl(), RpbReplMode::Fullsync);
        assert_eq!(decoded, props);
    }

    #[test]
    fn repl_mode_values_match_wire_enum() {
        assert_eq!(RpbReplMode::False as i32, 0);
        assert_eq!(RpbReplMode::Realtime as i32, 1);
        assert_eq!(RpbReplMode::Fullsync as i32, 2);
        assert_eq!(RpbReplMode::True as i32, 3);
        assert!(RpbReplMode::try_from(4).is_err());
    }

    #[test]
    fn error_response_text() {
        let resp = RpbErrorResp::new(1, "no such bucket");
        let decoded = RpbErrorResp::decode(resp.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.errcode, 1);
        assert_eq!(decoded.message_text(), "no such bucket");
    }
}
