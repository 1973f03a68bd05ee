//! Named request parameters and their typed accessors.
//!
//! A parameter value is raw text. Every accessor parses that text on demand
//! and can fail independently: `"30"` is a valid `i64`, `u64` and `f64`, but
//! not a `bool`.

use std::fmt;

use thiserror::Error;

/// A `(name, value)` pair taken from the query string, a form body, or
/// supplied by the HTTP layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    name: String,
    value: ParamValue,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: ParamValue(value.into()) }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn value(&self) -> &ParamValue { &self.value }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Param {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// Raw text of a parameter with fallible conversions to native scalars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamValue(String);

/// A parameter value that does not parse as the requested scalar.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid {kind} value {raw:?}")]
pub struct CoerceError {
    kind: &'static str,
    raw: String,
}

impl CoerceError {
    fn new(kind: &'static str, raw: &str) -> Self {
        Self { kind, raw: raw.to_owned() }
    }

    /// Name of the scalar the value was parsed as (`"bool"`, `"int"`, …).
    pub fn kind(&self) -> &'static str { self.kind }
}

impl ParamValue {
    /// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
    pub fn as_bool(&self) -> Result<bool, CoerceError> {
        match self.0.as_str() {
            "1" | "t" | "T" | "TRUE" | "true" | "True"     => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            other => Err(CoerceError::new("bool", other)),
        }
    }

    /// Base-10 signed integer.
    pub fn as_i64(&self) -> Result<i64, CoerceError> {
        self.0.parse().map_err(|_| CoerceError::new("int", &self.0))
    }

    /// Base-10 unsigned integer.
    pub fn as_u64(&self) -> Result<u64, CoerceError> {
        self.0.parse().map_err(|_| CoerceError::new("uint", &self.0))
    }

    pub fn as_f64(&self) -> Result<f64, CoerceError> {
        self.0.parse().map_err(|_| CoerceError::new("float", &self.0))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
