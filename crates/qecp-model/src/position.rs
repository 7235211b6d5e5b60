// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Reference to a simulator node by `(t, i, j)`.
///
/// On the wire this is the token `"[t][i][j]"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionRef {
    /// Time layer.
    pub t: usize,
    /// Row.
    pub i: usize,
    /// Column.
    pub j: usize,
}

impl PositionRef {
    /// Creates a position reference.
    #[must_use]
    pub const fn new(t: usize, i: usize, j: usize) -> Self {
        Self { t, i, j }
    }
}

/// Failure to parse a `"[t][i][j]"` token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed position token {token:?}: {reason}")]
pub struct PositionParseError {
    /// Offending token.
    pub token: String,
    /// What went wrong.
    pub reason: &'static str,
}

impl fmt::Display for PositionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}][{}]", self.t, self.i, self.j)
    }
}

impl FromStr for PositionRef {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| PositionParseError {
            token: s.to_owned(),
            reason,
        };
        let mut parts = [0usize; 3];
        let mut rest = s;
        for slot in &mut parts {
            rest = rest.strip_prefix('[').ok_or_else(|| fail("expected '['"))?;
            let close = rest.find(']').ok_or_else(|| fail("expected ']'"))?;
            let digits = &rest[..close];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(fail("expected decimal digits"));
            }
            *slot = digits.parse().map_err(|_| fail("index out of range"))?;
            rest = &rest[close + 1..];
        }
        if !rest.is_empty() {
            return Err(fail("trailing characters"));
        }
        let [t, i, j] = parts;
        Ok(Self { t, i, j })
    }
}

impl Serialize for PositionRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PositionRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_token() {
        let p: PositionRef = "[3][10][0]".parse().unwrap();
        assert_eq!(p, PositionRef::new(3, 10, 0));
        assert_eq!(p.to_string(), "[3][10][0]");
    }

    #[test]
    fn rejects_malformed_tokens() {
        for bad in ["", "[1][2]", "[1][2][3]x", "(1)(2)(3)", "[a][2][3]", "[][1][2]", "[-1][0][0]"] {
            assert!(bad.parse::<PositionRef>().is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn deserialize_fails_loudly() {
        let err = serde_json::from_str::<PositionRef>("\"[1][x][3]\"").unwrap_err();
        assert!(err.to_string().contains("malformed position token"));
    }
}
