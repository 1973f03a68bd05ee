//! Comparison predicates for templates: `eq ne lt le gt ge`.
//!
//! Every operand is first sorted into a [`Category`]. Operands of different
//! categories never compare; there is no implicit conversion between an
//! `Int` and a `Uint`, or a number and a string. Within a category the native
//! comparison applies.
//!
//! | Category | `eq` | `lt` |
//! |---|---|---|
//! | `Bool`, `Complex` | yes | error |
//! | `Int`, `Uint`, `Float`, `String` | yes | yes |
//! | `Invalid` | error | error |
//!
//! Floats follow IEEE 754: `NaN` is neither equal to nor less than anything.

use std::fmt;

use thiserror::Error;

use crate::value::{Complex, Value};

/// Why two values could not be compared.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum CompareError {
    /// An operand is not a comparable scalar, or its category is not
    /// ordered (`bool`, `complex`) and an ordering was asked for.
    #[error("invalid type for comparison")]
    BadComparisonType,

    #[error("incompatible types for comparison")]
    BadComparison,

    #[error("missing argument for comparison")]
    NoComparison,
}

/// The comparison category of a value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
    Invalid,
    Int,
    Uint,
    Float,
    Complex,
    Bool,
    String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Invalid => "invalid",
            Self::Int     => "int",
            Self::Uint    => "uint",
            Self::Float   => "float",
            Self::Complex => "complex",
            Self::Bool    => "bool",
            Self::String  => "string",
        })
    }
}

/// A value that passed classification, borrowed from its [`Value`].
#[derive(Clone, Copy, Debug)]
enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(Complex),
    Str(&'a str),
}

impl<'a> Scalar<'a> {
    fn of(value: &'a Value) -> Result<Self, CompareError> {
        match value {
            Value::Bool(b)    => Ok(Self::Bool(*b)),
            Value::Int(n)     => Ok(Self::Int(*n)),
            Value::Uint(n)    => Ok(Self::Uint(*n)),
            Value::Float(n)   => Ok(Self::Float(*n)),
            Value::Complex(c) => Ok(Self::Complex(*c)),
            Value::Str(s) | Value::Html(s) => Ok(Self::Str(s)),
            Value::Nil | Value::Time(_) | Value::List(_) | Value::Map(_) => {
                Err(CompareError::BadComparisonType)
            }
        }
    }

    fn category(self) -> Category {
        match self {
            Self::Bool(_)    => Category::Bool,
            Self::Int(_)     => Category::Int,
            Self::Uint(_)    => Category::Uint,
            Self::Float(_)   => Category::Float,
            Self::Complex(_) => Category::Complex,
            Self::Str(_)     => Category::String,
        }
    }
}

/// Sorts `value` into its comparison category.
///
/// Non-scalars (`Nil`, `Time`, `List`, `Map`) are [`Category::Invalid`] and
/// reported as [`CompareError::BadComparisonType`].
pub fn classify(value: &Value) -> Result<Category, CompareError> {
    Scalar::of(value).map(Scalar::category)
}

/// `a == b || a == c || …`
///
/// Candidates are checked in order; the first equal one ends the scan, so an
/// invalid candidate after a match is never looked at.
///
/// ```rust
/// use tsu_bind::{compare, CompareError, Value};
///
/// assert_eq!(compare::eq(&Value::from(5), &[Value::from(5), Value::from(7)]), Ok(true));
/// assert_eq!(compare::eq(&Value::from("a"), &[Value::from(1)]), Err(CompareError::BadComparison));
/// assert_eq!(compare::eq(&Value::from(true), &[]), Err(CompareError::NoComparison));
/// ```
pub fn eq(a: &Value, rest: &[Value]) -> Result<bool, CompareError> {
    let lhs = Scalar::of(a)?;
    if rest.is_empty() {
        return Err(CompareError::NoComparison);
    }

    for arg in rest {
        let rhs = Scalar::of(arg)?;
        let truth = match (lhs, rhs) {
            (Scalar::Bool(x),    Scalar::Bool(y))    => x == y,
            (Scalar::Complex(x), Scalar::Complex(y)) => x == y,
            (Scalar::Float(x),   Scalar::Float(y))   => x == y,
            (Scalar::Int(x),     Scalar::Int(y))     => x == y,
            (Scalar::Str(x),     Scalar::Str(y))     => x == y,
            (Scalar::Uint(x),    Scalar::Uint(y))    => x == y,
            _ => return Err(CompareError::BadComparison),
        };
        if truth {
            return Ok(true);
        }
    }

    Ok(false)
}

/// `a != b && a != c && …`
pub fn ne(a: &Value, rest: &[Value]) -> Result<bool, CompareError> {
    eq(a, rest).map(|equal| !equal)
}

/// `a < b`. Booleans and complex numbers have no order.
pub fn lt(a: &Value, b: &Value) -> Result<bool, CompareError> {
    let lhs = Scalar::of(a)?;
    let rhs = Scalar::of(b)?;

    match (lhs, rhs) {
        (Scalar::Float(x), Scalar::Float(y)) => Ok(x < y),
        (Scalar::Int(x),   Scalar::Int(y))   => Ok(x < y),
        (Scalar::Str(x),   Scalar::Str(y))   => Ok(x < y),
        (Scalar::Uint(x),  Scalar::Uint(y))  => Ok(x < y),
        (Scalar::Bool(_), Scalar::Bool(_)) | (Scalar::Complex(_), Scalar::Complex(_)) => {
            Err(CompareError::BadComparisonType)
        }
        _ => Err(CompareError::BadComparison),
    }
}

/// `a <= b`, computed as `lt`, then `eq` if `lt` was false.
///
/// An error from `lt` is returned before `eq` runs.
pub fn le(a: &Value, b: &Value) -> Result<bool, CompareError> {
    if lt(a, b)? {
        return Ok(true);
    }
    eq(a, std::slice::from_ref(b))
}

/// `a > b`, the negation of `le`.
pub fn gt(a: &Value, b: &Value) -> Result<bool, CompareError> {
    le(a, b).map(|less_or_equal| !less_or_equal)
}

/// `a >= b`, the negation of `lt`.
pub fn ge(a: &Value, b: &Value) -> Result<bool, CompareError> {
    lt(a, b).map(|less| !less)
}
