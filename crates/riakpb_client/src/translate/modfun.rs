//! Module/function records.

use super::wire_text;
use crate::error::{ClientResult, TranslationError};
use crate::props::PropValue;
use riakpb_protocol::RpbModFun;

/// Properties holding a single module/function record.
pub const MODFUN_PROPERTIES: [&str; 2] = ["linkfun", "chash_keyfun"];

const MOD_KEY: &str = "mod";
const FUN_KEY: &str = "fun";

/// Converts a wire module/function pair into a `{mod, fun}` record.
pub fn decode_modfun(property: &str, modfun: &RpbModFun) -> ClientResult<PropValue> {
    Ok(PropValue::modfun(
        wire_text(property, &modfun.module)?,
        wire_text(property, &modfun.function)?,
    ))
}

/// Converts a `{mod, fun}` record into its wire form.
///
/// # Errors
///
/// Fails unless the value is a record with exactly the `mod` and `fun` keys,
/// both holding names.
pub fn encode_modfun(property: &str, value: &PropValue) -> Result<RpbModFun, TranslationError> {
    let record = value.as_record().ok_or_else(|| {
        TranslationError::malformed_modfun(property, format!("expected record, got {}", value.shape()))
    })?;

    if let Some(extra) = record.keys().find(|k| *k != MOD_KEY && *k != FUN_KEY) {
        return Err(TranslationError::malformed_modfun(
            property,
            format!("unexpected key {extra:?}"),
        ));
    }

    let field = |key: &str| {
        record
            .get(key)
            .ok_or_else(|| TranslationError::malformed_modfun(property, format!("missing {key:?}")))?
            .as_name()
            .ok_or_else(|| TranslationError::malformed_modfun(property, format!("{key:?} must be a name")))
    };

    Ok(RpbModFun::new(field(MOD_KEY)?, field(FUN_KEY)?))
}
