//! Translation between wire and application bucket properties.
//!
//! `decode_props` runs on responses, `encode_props` on requests. Every wire
//! field has exactly one rule:
//!
//! | fields | application form |
//! |---|---|
//! | `pr`, `r`, `w`, `pw`, `dw`, `rw` | quorum name or count |
//! | `precommit`, `postcommit` | list of names and `{mod, fun}` records |
//! | `linkfun`, `chash_keyfun` | `{mod, fun}` record |
//! | `repl` | replication mode name |
//! | `backend`, `search_index`, `datatype` | text |
//! | remaining integers and flags | unchanged |

mod hook;
mod modfun;
mod quorum;
mod repl;

pub use hook::{decode_hooks, encode_hooks, HOOK_PROPERTIES};
pub use modfun::{decode_modfun, encode_modfun, MODFUN_PROPERTIES};
pub use quorum::{decode_quorum, encode_quorum, Quorum, QUORUM_PROPERTIES};
pub use repl::{decode_repl, encode_repl, repl_mode_from_name, repl_mode_name, REPL_PROPERTY};

use crate::error::{ClientError, ClientResult, TranslationError};
use crate::props::{BucketProperties, PropValue};
use riakpb_protocol::RpbBucketProps;

/// Decodes wire text, failing the response on invalid UTF-8.
pub(crate) fn wire_text(property: &str, bytes: &[u8]) -> ClientResult<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|_| ClientError::malformed(format!("{property}: invalid UTF-8")))
}

/// Converts wire bucket properties into their application form.
///
/// Fields absent on the wire are absent from the result. An empty hook list
/// counts as absent unless its `has_precommit`/`has_postcommit` flag is set.
///
/// # Errors
///
/// Returns [`ClientError::MalformedMessage`] for non-UTF-8 text or a commit
/// hook with no arm set.
pub fn decode_props(wire: &RpbBucketProps) -> ClientResult<BucketProperties> {
    let mut props = BucketProperties::new();

    let integers = [
        ("n_val", wire.n_val),
        ("old_vclock", wire.old_vclock),
        ("young_vclock", wire.young_vclock),
        ("big_vclock", wire.big_vclock),
        ("small_vclock", wire.small_vclock),
        ("hll_precision", wire.hll_precision),
        ("ttl", wire.ttl),
    ];
    for (key, value) in integers {
        if let Some(n) = value {
            props.insert(key, n);
        }
    }

    let flags = [
        ("allow_mult", wire.allow_mult),
        ("last_write_wins", wire.last_write_wins),
        ("has_precommit", wire.has_precommit),
        ("has_postcommit", wire.has_postcommit),
        ("basic_quorum", wire.basic_quorum),
        ("notfound_ok", wire.notfound_ok),
        ("search", wire.search),
        ("consistent", wire.consistent),
        ("write_once", wire.write_once),
    ];
    for (key, value) in flags {
        if let Some(b) = value {
            props.insert(key, b);
        }
    }

    let texts = [
        ("backend", &wire.backend),
        ("search_index", &wire.search_index),
        ("datatype", &wire.datatype),
    ];
    for (key, value) in texts {
        if let Some(bytes) = value {
            props.insert(key, wire_text(key, bytes)?);
        }
    }

    let quorums = [wire.pr, wire.r, wire.w, wire.pw, wire.dw, wire.rw];
    for (key, value) in QUORUM_PROPERTIES.into_iter().zip(quorums) {
        if let Some(raw) = value {
            props.insert(key, decode_quorum(raw));
        }
    }

    let hooks = [
        (&wire.precommit, wire.has_precommit),
        (&wire.postcommit, wire.has_postcommit),
    ];
    for (key, (value, flagged)) in HOOK_PROPERTIES.into_iter().zip(hooks) {
        if !value.is_empty() || flagged == Some(true) {
            props.insert(key, decode_hooks(key, value)?);
        }
    }

    let modfuns = [&wire.linkfun, &wire.chash_keyfun];
    for (key, value) in MODFUN_PROPERTIES.into_iter().zip(modfuns) {
        if let Some(modfun) = value {
            props.insert(key, decode_modfun(key, modfun)?);
        }
    }

    if let Some(raw) = wire.repl {
        props.insert(REPL_PROPERTY, decode_repl(raw));
    }

    Ok(props)
}

/// Converts application bucket properties into their wire form.
///
/// Only the keys present in `props` are set on the result. A hook key also
/// sets its `has_*` flag, so an empty list clears the bucket's hooks.
///
/// # Errors
///
/// Fails on the first unknown key or unencodable value. Nothing is sent
/// when this fails.
pub fn encode_props(props: &BucketProperties) -> Result<RpbBucketProps, TranslationError> {
    let mut wire = RpbBucketProps::default();

    for (key, value) in props {
        let key = key.as_str();
        match key {
            "n_val" => wire.n_val = Some(encode_u32(key, value)?),
            "old_vclock" => wire.old_vclock = Some(encode_u32(key, value)?),
            "young_vclock" => wire.young_vclock = Some(encode_u32(key, value)?),
            "big_vclock" => wire.big_vclock = Some(encode_u32(key, value)?),
            "small_vclock" => wire.small_vclock = Some(encode_u32(key, value)?),
            "hll_precision" => wire.hll_precision = Some(encode_u32(key, value)?),
            "ttl" => wire.ttl = Some(encode_u32(key, value)?),

            "allow_mult" => wire.allow_mult = Some(encode_bool(key, value)?),
            "last_write_wins" => wire.last_write_wins = Some(encode_bool(key, value)?),
            "has_precommit" => wire.has_precommit = Some(encode_bool(key, value)?),
            "has_postcommit" => wire.has_postcommit = Some(encode_bool(key, value)?),
            "basic_quorum" => wire.basic_quorum = Some(encode_bool(key, value)?),
            "notfound_ok" => wire.notfound_ok = Some(encode_bool(key, value)?),
            "search" => wire.search = Some(encode_bool(key, value)?),
            "consistent" => wire.consistent = Some(encode_bool(key, value)?),
            "write_once" => wire.write_once = Some(encode_bool(key, value)?),

            "backend" => wire.backend = Some(encode_text(key, value)?),
            "search_index" => wire.search_index = Some(encode_text(key, value)?),
            "datatype" => wire.datatype = Some(encode_text(key, value)?),

            "pr" => wire.pr = Some(encode_quorum(key, value)?),
            "r" => wire.r = Some(encode_quorum(key, value)?),
            "w" => wire.w = Some(encode_quorum(key, value)?),
            "pw" => wire.pw = Some(encode_quorum(key, value)?),
            "dw" => wire.dw = Some(encode_quorum(key, value)?),
            "rw" => wire.rw = Some(encode_quorum(key, value)?),

            "precommit" => {
                wire.precommit = encode_hooks(key, value)?;
                wire.has_precommit = Some(true);
            }
            "postcommit" => {
                wire.postcommit = encode_hooks(key, value)?;
                wire.has_postcommit = Some(true);
            }

            "linkfun" => wire.linkfun = Some(encode_modfun(key, value)?),
            "chash_keyfun" => wire.chash_keyfun = Some(encode_modfun(key, value)?),

            "repl" => wire.repl = Some(encode_repl(value)?),

            unknown => return Err(TranslationError::UnknownProperty(unknown.to_string())),
        }
    }

    Ok(wire)
}

fn encode_u32(key: &str, value: &PropValue) -> Result<u32, TranslationError> {
    value
        .as_integer()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| TranslationError::invalid_value(key, "non-negative 32-bit integer"))
}

fn encode_bool(key: &str, value: &PropValue) -> Result<bool, TranslationError> {
    value
        .as_bool()
        .ok_or_else(|| TranslationError::invalid_value(key, "boolean"))
}

fn encode_text(key: &str, value: &PropValue) -> Result<Vec<u8>, TranslationError> {
    value
        .as_name()
        .map(|s| s.as_bytes().to_vec())
        .ok_or_else(|| TranslationError::invalid_value(key, "text"))
}
