//! Dynamic values handed to template functions at render time.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset};

/// A complex number. Only compared for equality, never ordered.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

/// A value looked up by the template engine and passed to a template
/// function.
///
/// Scalars (`Bool`, `Int`, `Uint`, `Float`, `Complex`, `Str`, `Html`) can be
/// compared; the rest are render data only.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(Complex),
    Str(String),
    /// Trusted markup; rendered without escaping.
    Html(String),
    Time(DateTime<FixedOffset>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// The text of a `Str` or `Html` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) | Self::Html(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Nil        => "nil",
            Self::Bool(_)    => "bool",
            Self::Int(_)     => "int",
            Self::Uint(_)    => "uint",
            Self::Float(_)   => "float",
            Self::Complex(_) => "complex",
            Self::Str(_)     => "string",
            Self::Html(_)    => "html",
            Self::Time(_)    => "time",
            Self::List(_)    => "list",
            Self::Map(_)     => "map",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil        => Ok(()),
            Self::Bool(b)    => write!(f, "{b}"),
            Self::Int(n)     => write!(f, "{n}"),
            Self::Uint(n)    => write!(f, "{n}"),
            Self::Float(n)   => write!(f, "{n}"),
            Self::Complex(c) => write!(f, "({}{:+}i)", c.re, c.im),
            Self::Str(s) | Self::Html(s) => f.write_str(s),
            Self::Time(t)    => write!(f, "{}", t.to_rfc3339()),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("map[")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                f.write_str("]")
            }
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

macro_rules! from_scalar {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self { Self::$variant(<$target>::from(v)) }
            }
        )*
    };
}

from_scalar! {
    bool => Bool as bool,
    i8   => Int as i64,
    i16  => Int as i64,
    i32  => Int as i64,
    i64  => Int as i64,
    u8   => Uint as u64,
    u16  => Uint as u64,
    u32  => Uint as u64,
    u64  => Uint as u64,
    f32  => Float as f64,
    f64  => Float as f64,
}

impl From<Complex> for Value {
    fn from(c: Complex) -> Self { Self::Complex(c) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Self::Str(s.to_owned()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Self::Str(s) }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(t: DateTime<FixedOffset>) -> Self { Self::Time(t) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// JSON numbers become `Int` when they fit in `i64`, then `Uint`, then
/// `Float`.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match v {
            Json::Null      => Self::Nil,
            Json::Bool(b)   => Self::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Uint(u)
                } else {
                    n.as_f64().map_or(Self::Nil, Self::Float)
                }
            }
            Json::String(s) => Self::Str(s),
            Json::Array(a)  => Self::List(a.into_iter().map(Self::from).collect()),
            Json::Object(o) => Self::Map(o.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}
