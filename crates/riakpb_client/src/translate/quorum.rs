//! Quorum values.
//!
//! The store reserves the top four `u32` values for symbolic quorums. Any
//! other value is a literal replica count.

use crate::error::TranslationError;
use crate::props::PropValue;
use std::fmt;

/// Properties holding a quorum.
pub const QUORUM_PROPERTIES: [&str; 6] = ["pr", "r", "w", "pw", "dw", "rw"];

/// A symbolic quorum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quorum {
    /// A single replica.
    One,
    /// A majority of replicas.
    Quorum,
    /// Every replica.
    All,
    /// The bucket's default.
    Default,
}

impl Quorum {
    /// Every symbolic quorum, in sentinel order.
    pub const VARIANTS: [Quorum; 4] = [Quorum::One, Quorum::Quorum, Quorum::All, Quorum::Default];

    /// Returns the canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Quorum::One => "one",
            Quorum::Quorum => "quorum",
            Quorum::All => "all",
            Quorum::Default => "default",
        }
    }

    /// Returns the reserved wire value.
    pub fn sentinel(self) -> u32 {
        match self {
            Quorum::One => u32::MAX - 1,
            Quorum::Quorum => u32::MAX - 2,
            Quorum::All => u32::MAX - 3,
            Quorum::Default => u32::MAX - 4,
        }
    }

    /// Matches a reserved wire value.
    pub fn from_sentinel(raw: u32) -> Option<Self> {
        Self::VARIANTS.into_iter().find(|q| q.sentinel() == raw)
    }

    /// Matches a name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS
            .into_iter()
            .find(|q| q.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Quorum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts a wire quorum into its application form.
pub fn decode_quorum(raw: u32) -> PropValue {
    match Quorum::from_sentinel(raw) {
        Some(q) => PropValue::Text(q.name().to_string()),
        None => PropValue::Integer(i64::from(raw)),
    }
}

/// Converts an application quorum into its wire form.
///
/// # Errors
///
/// Fails on names other than the four quorums, on integers outside the
/// `u32` range, and on any other shape.
pub fn encode_quorum(property: &str, value: &PropValue) -> Result<u32, TranslationError> {
    match value {
        PropValue::Integer(n) => u32::try_from(*n).map_err(|_| TranslationError::UnknownQuorum {
            property: property.to_string(),
            value: n.to_string(),
        }),
        PropValue::Text(name) | PropValue::Symbol(name) => Quorum::from_name(name)
            .map(Quorum::sentinel)
            .ok_or_else(|| TranslationError::UnknownQuorum {
                property: property.to_string(),
                value: name.clone(),
            }),
        other => Err(TranslationError::UnknownQuorum {
            property: property.to_string(),
            value: other.shape().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sentinels_count_down_from_max() {
        assert_eq!(Quorum::One.sentinel(), 0xffff_ffff - 1);
        assert_eq!(Quorum::Quorum.sentinel(), 0xffff_ffff - 2);
        assert_eq!(Quorum::All.sentinel(), 0xffff_ffff - 3);
        assert_eq!(Quorum::Default.sentinel(), 0xffff_ffff - 4);
    }

    #[test]
    fn decode_names_sentinels() {
        assert_eq!(decode_quorum(u32::MAX - 1), PropValue::from("one"));
        assert_eq!(decode_quorum(u32::MAX - 2), PropValue::from("quorum"));
        assert_eq!(decode_quorum(u32::MAX - 3), PropValue::from("all"));
        assert_eq!(decode_quorum(u32::MAX - 4), PropValue::from("default"));
    }

    #[test]
    fn decode_passes_literals_through() {
        assert_eq!(decode_quorum(0), PropValue::Integer(0));
        assert_eq!(decode_quorum(1), PropValue::Integer(1));
        assert_eq!(decode_quorum(u32::MAX), PropValue::Integer(i64::from(u32::MAX)));
        assert_eq!(
            decode_quorum(u32::MAX - 5),
            PropValue::Integer(i64::from(u32::MAX - 5))
        );
    }

    #[test]
    fn encode_accepts_any_spelling() {
        let exact = encode_quorum("r", &PropValue::from("quorum")).unwrap();
        let shouted = encode_quorum("r", &PropValue::from("QuOrUm")).unwrap();
        let symbol = encode_quorum("r", &PropValue::symbol("quorum")).unwrap();

        assert_eq!(exact, u32::MAX - 2);
        assert_eq!(shouted, exact);
        assert_eq!(symbol, exact);
    }

    #[test]
    fn encode_rejects_unknown_names() {
        let err = encode_quorum("pr", &PropValue::from("bogus")).unwrap_err();
        assert_eq!(
            err,
            TranslationError::UnknownQuorum {
                property: "pr".into(),
                value: "bogus".into()
            }
        );

        assert!(encode_quorum("pr", &PropValue::from("3")).is_err());
        assert!(encode_quorum("pr", &PropValue::Bool(true)).is_err());
        assert!(encode_quorum("pr", &PropValue::Integer(-1)).is_err());
        assert!(encode_quorum("pr", &PropValue::Integer(i64::from(u32::MAX) + 1)).is_err());
    }

    #[test]
    fn named_round_trip() {
        for q in Quorum::VARIANTS {
            let wire = encode_quorum("w", &PropValue::from(q.name())).unwrap();
            assert_eq!(decode_quorum(wire), PropValue::from(q.name()));
            assert_eq!(encode_quorum("w", &decode_quorum(q.sentinel())).unwrap(), q.sentinel());
        }
    }

    proptest! {
        #[test]
        fn literal_quorums_are_identity(n in any::<u32>()) {
            prop_assume!(Quorum::from_sentinel(n).is_none());

            let decoded = decode_quorum(n);
            prop_assert_eq!(&decoded, &PropValue::Integer(i64::from(n)));
            prop_assert_eq!(encode_quorum("dw", &decoded).unwrap(), n);
        }
    }
}
