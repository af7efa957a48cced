//! Class identifiers from the YOLO side of a label-mapping run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A class identifier as it appears in a YOLO label file.
///
/// Numeric tokens are stored as the decimal form of their integer value, so
/// `"3"`, `"3.0"` and `"03"` all become `"3"`. Anything else is kept verbatim.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    /// Wraps an already-normalized identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Normalizes a raw class token.
    ///
    /// The second element is true when the token had a fractional part that
    /// was truncated away (for example `"3.5"` becomes `"3"`).
    pub fn from_token(token: &str) -> (Self, bool) {
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                let truncated = value.fract() != 0.0;
                (Self(integer_string(value.trunc())), truncated)
            }
            _ => (Self(token.to_string()), false),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The integer value, when the identifier is numeric.
    pub fn as_integer(&self) -> Option<i64> {
        self.0.parse::<i64>().ok()
    }
}

/// Decimal digits of an integral float, without a sign on zero.
fn integer_string(value: f64) -> String {
    if value >= i64::MIN as f64 && value < i64::MAX as f64 {
        (value as i64).to_string()
    } else {
        format!("{value:.0}")
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({:?})", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
