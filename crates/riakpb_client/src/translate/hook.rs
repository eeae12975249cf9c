//! Commit hooks.
//!
//! Hooks are always sequences in both directions; a bare hook given to
//! `encode_hooks` is treated as a one-element list.

use super::modfun::{decode_modfun, encode_modfun};
use super::wire_text;
use crate::error::{ClientError, ClientResult, TranslationError};
use crate::props::PropValue;
use riakpb_protocol::rpb_commit_hook::Hook;
use riakpb_protocol::RpbCommitHook;

/// Properties holding commit hook lists.
pub const HOOK_PROPERTIES: [&str; 2] = ["precommit", "postcommit"];

const NAME_KEY: &str = "name";

/// Converts wire hooks into a list of names and `{mod, fun}` records.
pub fn decode_hooks(property: &str, hooks: &[RpbCommitHook]) -> ClientResult<PropValue> {
    hooks
        .iter()
        .map(|hook| match &hook.hook {
            Some(Hook::Name(name)) => Ok(PropValue::Text(wire_text(property, name)?)),
            Some(Hook::Modfun(modfun)) => decode_modfun(property, modfun),
            None => Err(ClientError::malformed(format!(
                "{property}: commit hook has neither name nor modfun"
            ))),
        })
        .collect::<ClientResult<Vec<_>>>()
        .map(PropValue::List)
}

/// Converts a hook or list of hooks into wire hooks.
///
/// # Errors
///
/// Fails on the first entry that is neither a name, a `{name}` record nor a
/// `{mod, fun}` record.
pub fn encode_hooks(property: &str, value: &PropValue) -> Result<Vec<RpbCommitHook>, TranslationError> {
    match value {
        PropValue::List(items) => items.iter().map(|item| encode_hook(property, item)).collect(),
        single => Ok(vec![encode_hook(property, single)?]),
    }
}

fn encode_hook(property: &str, item: &PropValue) -> Result<RpbCommitHook, TranslationError> {
    match item {
        PropValue::Text(name) | PropValue::Symbol(name) => Ok(RpbCommitHook::named(name.as_str())),
        PropValue::Record(record) if record.contains_key(NAME_KEY) => {
            if record.len() > 1 {
                return Err(TranslationError::malformed_hook(
                    property,
                    "a named hook takes no other keys",
                ));
            }
            record[NAME_KEY]
                .as_name()
                .map(RpbCommitHook::named)
                .ok_or_else(|| TranslationError::malformed_hook(property, "\"name\" must be a name"))
        }
        PropValue::Record(_) => encode_modfun(property, item).map(RpbCommitHook::modfun),
        other => Err(TranslationError::malformed_hook(
            property,
            format!("expected name or record, got {}", other.shape()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riakpb_protocol::RpbModFun;

    #[test]
    fn single_named_hook_decodes_to_list() {
        let value = decode_hooks("postcommit", &[RpbCommitHook::named("piper")]).unwrap();
        assert_eq!(value, PropValue::List(vec![PropValue::from("piper")]));
    }

    #[test]
    fn modfun_hook_decodes_to_record() {
        let hooks = [RpbCommitHook::modfun(RpbModFun::new("validate_json", "validate"))];
        let value = decode_hooks("precommit", &hooks).unwrap();

        let first = &value.as_list().unwrap()[0];
        assert_eq!(first.get("mod"), Some(&PropValue::from("validate_json")));
        assert_eq!(first.get("fun"), Some(&PropValue::from("validate")));
    }

    #[test]
    fn decode_keeps_order_and_mixes_shapes() {
        let hooks = [
            RpbCommitHook::named("first"),
            RpbCommitHook::modfun(RpbModFun::new("m", "f")),
            RpbCommitHook::named("last"),
        ];
        let value = decode_hooks("precommit", &hooks).unwrap();
        assert_eq!(
            value,
            PropValue::List(vec![
                PropValue::from("first"),
                PropValue::modfun("m", "f"),
                PropValue::from("last"),
            ])
        );
    }

    #[test]
    fn empty_hook_is_malformed() {
        let err = decode_hooks("precommit", &[RpbCommitHook { hook: None }]).unwrap_err();
        assert!(matches!(err, ClientError::MalformedMessage(_)));
    }

    #[test]
    fn bare_record_is_wrapped() {
        let wire = encode_hooks("precommit", &PropValue::modfun("validate_json", "validate")).unwrap();
        assert_eq!(
            wire,
            vec![RpbCommitHook::modfun(RpbModFun::new("validate_json", "validate"))]
        );
    }

    #[test]
    fn bare_name_is_wrapped() {
        let wire = encode_hooks("postcommit", &PropValue::symbol("piper")).unwrap();
        assert_eq!(wire, vec![RpbCommitHook::named("piper")]);
    }

    #[test]
    fn list_entries_pick_their_arm() {
        let value = PropValue::List(vec![
            PropValue::from("piper"),
            PropValue::modfun("m", "f"),
            PropValue::record([("name", "registered")]),
        ]);
        let wire = encode_hooks("postcommit", &value).unwrap();
        assert_eq!(
            wire,
            vec![
                RpbCommitHook::named("piper"),
                RpbCommitHook::modfun(RpbModFun::new("m", "f")),
                RpbCommitHook::named("registered"),
            ]
        );
    }

    #[test]
    fn malformed_entries_rejected() {
        assert!(matches!(
            encode_hooks("precommit", &PropValue::Integer(1)),
            Err(TranslationError::MalformedHook { .. })
        ));
        assert!(matches!(
            encode_hooks("precommit", &PropValue::List(vec![PropValue::from("ok"), PropValue::Bool(false)])),
            Err(TranslationError::MalformedHook { .. })
        ));
        assert!(matches!(
            encode_hooks("precommit", &PropValue::record([("mod", "only")])),
            Err(TranslationError::MalformedModFun { .. })
        ));
        assert!(encode_hooks(
            "precommit",
            &PropValue::record([("name", "x"), ("mod", "y")])
        )
        .is_err());
    }

    #[test]
    fn empty_list_encodes_no_hooks() {
        assert_eq!(encode_hooks("precommit", &PropValue::List(vec![])).unwrap(), vec![]);
    }
}
