//! Wire fixtures.

use riakpb_protocol::{RpbBucketProps, RpbCommitHook, RpbModFun, RpbReplMode};

/// Sentinel for the `one` quorum.
pub const QUORUM_ONE: u32 = u32::MAX - 1;
/// Sentinel for the `quorum` quorum.
pub const QUORUM_QUORUM: u32 = u32::MAX - 2;
/// Sentinel for the `all` quorum.
pub const QUORUM_ALL: u32 = u32::MAX - 3;
/// Sentinel for the `default` quorum.
pub const QUORUM_DEFAULT: u32 = u32::MAX - 4;

/// Properties exercising every translation rule once.
///
/// Quorums use each sentinel plus two literals, `precommit` holds a
/// module/function hook, `postcommit` a named hook, and `linkfun` is set
/// while `chash_keyfun` is not.
pub fn sample_wire_props() -> RpbBucketProps {
    RpbBucketProps {
        n_val: Some(3),
        pr: Some(QUORUM_ONE),
        r: Some(QUORUM_QUORUM),
        w: Some(QUORUM_ALL),
        pw: Some(QUORUM_DEFAULT),
        dw: Some(0),
        rw: Some(1),
        precommit: vec![RpbCommitHook::modfun(RpbModFun::new(
            "validate_json",
            "validate",
        ))],
        postcommit: vec![RpbCommitHook::named("piper")],
        linkfun: Some(RpbModFun::new("nachos", "galacticos")),
        ..Default::default()
    }
}

/// Properties a fresh bucket of the default type reports.
pub fn default_wire_props() -> RpbBucketProps {
    RpbBucketProps {
        n_val: Some(3),
        allow_mult: Some(false),
        last_write_wins: Some(false),
        has_precommit: Some(false),
        has_postcommit: Some(false),
        chash_keyfun: Some(RpbModFun::new("riak_core_util", "chash_std_keyfun")),
        linkfun: Some(RpbModFun::new(
            "riak_kv_wm_link_walker",
            "mapreduce_linkfun",
        )),
        old_vclock: Some(86_400),
        young_vclock: Some(20),
        big_vclock: Some(50),
        small_vclock: Some(50),
        pr: Some(0),
        r: Some(QUORUM_QUORUM),
        w: Some(QUORUM_QUORUM),
        pw: Some(0),
        dw: Some(QUORUM_QUORUM),
        rw: Some(QUORUM_QUORUM),
        basic_quorum: Some(false),
        notfound_ok: Some(true),
        repl: Some(RpbReplMode::True as i32),
        ..Default::default()
    }
}
