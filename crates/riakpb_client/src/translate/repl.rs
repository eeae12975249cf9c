//! Replication mode.

use crate::error::TranslationError;
use crate::props::PropValue;
use riakpb_protocol::RpbReplMode;

/// Property holding the replication mode.
pub const REPL_PROPERTY: &str = "repl";

/// Returns the application name of a wire replication mode.
pub fn repl_mode_name(mode: RpbReplMode) -> &'static str {
    match mode {
        RpbReplMode::False => "false",
        RpbReplMode::Realtime => "realtime",
        RpbReplMode::Fullsync => "fullsync",
        RpbReplMode::True => "true",
    }
}

/// Matches a replication mode name, ignoring ASCII case.
pub fn repl_mode_from_name(name: &str) -> Option<RpbReplMode> {
    [
        RpbReplMode::False,
        RpbReplMode::Realtime,
        RpbReplMode::Fullsync,
        RpbReplMode::True,
    ]
    .into_iter()
    .find(|mode| repl_mode_name(*mode).eq_ignore_ascii_case(name))
}

/// Converts a wire replication mode into its name.
///
/// Values outside the enum are kept as integers.
pub fn decode_repl(raw: i32) -> PropValue {
    match RpbReplMode::try_from(raw) {
        Ok(mode) => PropValue::Text(repl_mode_name(mode).to_string()),
        Err(_) => PropValue::Integer(i64::from(raw)),
    }
}

/// Converts a replication mode into its wire value.
///
/// # Errors
///
/// Fails on unknown names and on integers that are not enum values.
pub fn encode_repl(value: &PropValue) -> Result<i32, TranslationError> {
    let mode = match value {
        PropValue::Text(name) | PropValue::Symbol(name) => repl_mode_from_name(name),
        PropValue::Bool(true) => Some(RpbReplMode::True),
        PropValue::Bool(false) => Some(RpbReplMode::False),
        PropValue::Integer(n) => i32::try_from(*n)
            .ok()
            .and_then(|n| RpbReplMode::try_from(n).ok()),
        PropValue::List(_) | PropValue::Record(_) => {
            return Err(TranslationError::invalid_value(
                REPL_PROPERTY,
                "replication mode name",
            ))
        }
    };

    mode.map(|m| m as i32)
        .ok_or_else(|| TranslationError::UnknownReplMode(describe(value)))
}

fn describe(value: &PropValue) -> String {
    match value {
        PropValue::Text(s) | PropValue::Symbol(s) => s.clone(),
        PropValue::Integer(n) => n.to_string(),
        other => other.shape().to_string(),
    }
}
