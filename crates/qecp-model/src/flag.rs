// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Lenient boolean flags: the playground emits `true`/`false` in some places
//! and `0`/`1` in others.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl From<FlagRepr> for bool {
    #[allow(clippy::float_cmp)]
    fn from(value: FlagRepr) -> Self {
        match value {
            FlagRepr::Bool(b) => b,
            FlagRepr::Int(n) => n != 0,
            FlagRepr::Float(x) => x != 0.0,
        }
    }
}

/// `bool`, number, or `null` (false).
pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<FlagRepr>::deserialize(deserializer)?.is_some_and(bool::from))
}

/// Optional flag: absent or `null` stays `None`.
pub(crate) fn deserialize_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    Ok(Option::<FlagRepr>::deserialize(deserializer)?.map(bool::from))
}

/// Tuple element form used inside blossom boundary pairs.
pub(crate) struct Flag(pub(crate) bool);

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize(deserializer).map(Flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize")]
        a: bool,
    }

    #[test]
    fn accepts_bool_int_and_null() {
        let cases = [
            (r#"{"a": true}"#, true),
            (r#"{"a": 1}"#, true),
            (r#"{"a": 0}"#, false),
            (r#"{"a": null}"#, false),
            ("{}", false),
        ];
        for (json, want) in cases {
            let p: Probe = serde_json::from_str(json).unwrap();
            assert_eq!(p.a, want, "{json}");
        }
    }
}
