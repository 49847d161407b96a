//! Option value types shared by effect configurations.
//!
//! Every type parses from command-line text (`FromStr`) and deserializes from JSON, and both
//! paths reject bad values with [`TermfxError::Config`] before any engine work starts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::color::gradient::Gradient;
use crate::foundation::error::{TermfxError, TermfxResult};

/// Inclusive `lo-hi` range of positive floats, e.g. `0.1-0.2`. A single number means `lo == hi`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatRange {
    /// Lower bound.
    pub lo: f64,
    /// Upper bound.
    pub hi: f64,
}

impl FloatRange {
    /// Check `0 < lo <= hi`, both finite.
    pub fn new(lo: f64, hi: f64) -> TermfxResult<Self> {
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo <= hi) {
            return Err(TermfxError::config(format!(
                "range must satisfy 0 < lo <= hi, got {lo}-{hi}"
            )));
        }
        Ok(Self { lo, hi })
    }
}

impl FromStr for FloatRange {
    type Err = TermfxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn num(s: &str, whole: &str) -> TermfxResult<f64> {
            s.trim()
                .parse::<f64>()
                .map_err(|_| TermfxError::config(format!("invalid float range \"{whole}\"")))
        }

        match s.split_once('-') {
            Some((lo, hi)) => Self::new(num(lo, s)?, num(hi, s)?),
            None => {
                let v = num(s, s)?;
                Self::new(v, v)
            }
        }
    }
}

impl fmt::Display for FloatRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

impl Serialize for FloatRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.lo, self.hi].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FloatRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Pair([f64; 2]),
            Single(f64),
            Text(String),
        }

        let parsed = match Repr::deserialize(deserializer)? {
            Repr::Pair([lo, hi]) => Self::new(lo, hi),
            Repr::Single(v) => Self::new(v, v),
            Repr::Text(s) => s.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

/// Exactly one grapheme.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// The grapheme.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = TermfxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.graphemes(true).count() != 1 {
            return Err(TermfxError::config(format!(
                "symbol must be a single character, got \"{s}\""
            )));
        }
        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<String> for Symbol {
    type Error = TermfxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reject an empty option list.
pub fn require_non_empty<T>(option: &str, values: &[T]) -> TermfxResult<()> {
    if values.is_empty() {
        return Err(TermfxError::config(format!("{option} must not be empty")));
    }
    Ok(())
}

/// Upper bound for `--final-gradient-steps` style options.
pub const MAX_GRADIENT_STEPS: u32 = Gradient::MAX_STEPS as u32;

/// Reject a count outside `1..=max`.
pub fn require_count(option: &str, value: u32, max: u32) -> TermfxResult<()> {
    if value == 0 || value > max {
        return Err(TermfxError::config(format!(
            "{option} must be in 1..={max}, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
