//! Functions exposed to templates by name.
//!
//! A [`FuncMap`] is plain configuration: build one, hand it to whatever owns
//! rendering, and the template engine looks functions up by name while it
//! evaluates expressions. [`FuncMap::default`] holds the standard set:
//!
//! | Name | Arguments | Result |
//! |---|---|---|
//! | `eq`, `ne` | `a, b, …` | `Bool` |
//! | `lt`, `le`, `gt`, `ge` | `a, b` | `Bool` |
//! | `strlen` | `s` | `Int`, number of characters |
//! | `substr` | `s, start, length` | `Str` |
//! | `html2str` | `html` | `Str`, markup stripped |
//! | `str2html` | `s` | `Html`, trusted markup |
//! | `datefmt` | `time, layout` | `Str`, strftime layout |

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::compare::{self, CompareError};
use crate::value::Value;

/// Why a template function call failed. The template engine treats any of
/// these as a failed expression.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FuncError {
    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error("{name}: expected {expected} argument(s), got {got}")]
    Arity { name: String, expected: &'static str, got: usize },

    #[error("{name}: argument {index} must be {expected}, got {got}")]
    Argument { name: &'static str, index: usize, expected: &'static str, got: &'static str },

    #[error("datefmt: invalid layout {0:?}")]
    Layout(String),

    #[error("function {0:?} is not defined")]
    Unknown(String),
}

/// A template function, tagged by its calling shape.
#[derive(Clone, Copy, Debug)]
pub enum Func {
    /// `f(a, rest…)`, at least one argument; returns a boolean.
    Variadic(fn(&Value, &[Value]) -> Result<bool, CompareError>),
    /// `f(a, b)`, exactly two arguments; returns a boolean.
    Binary(fn(&Value, &Value) -> Result<bool, CompareError>),
    /// Any other function; checks its own arguments.
    Helper(fn(&[Value]) -> Result<Value, FuncError>),
}

impl Func {
    /// Calls the function. `name` is used in arity errors only.
    pub fn call(self, name: &str, args: &[Value]) -> Result<Value, FuncError> {
        match self {
            Self::Variadic(f) => {
                let (first, rest) = args.split_first().ok_or_else(|| arity(name, "at least 1", 0))?;
                Ok(Value::Bool(f(first, rest)?))
            }
            Self::Binary(f) => match args {
                [a, b] => Ok(Value::Bool(f(a, b)?)),
                _ => Err(arity(name, "2", args.len())),
            },
            Self::Helper(f) => f(args),
        }
    }
}

fn arity(name: &str, expected: &'static str, got: usize) -> FuncError {
    FuncError::Arity { name: name.to_owned(), expected, got }
}

// ── FuncMap ───────────────────────────────────────────────────────────────────

/// Named template functions.
///
/// ```rust
/// use tsu_bind::{FuncMap, Value};
///
/// let funcs = FuncMap::default();
/// let ok = funcs.call("lt", &[Value::from(1), Value::from(2)]).unwrap();
/// assert_eq!(ok, Value::Bool(true));
/// assert!(funcs.call("lt", &[Value::from(true), Value::from(false)]).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct FuncMap {
    funcs: BTreeMap<String, Func>,
}

impl FuncMap {
    /// An empty table.
    pub fn new() -> Self {
        Self { funcs: BTreeMap::new() }
    }

    /// Adds or replaces a function. Returns `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, func: Func) -> Self {
        self.insert(name, func);
        self
    }

    /// Adds or replaces a function, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, func: Func) -> Option<Func> {
        self.funcs.insert(name.into(), func)
    }

    pub fn remove(&mut self, name: &str) -> Option<Func> {
        self.funcs.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<Func> {
        self.funcs.get(name).copied()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.funcs.keys().map(String::as_str)
    }

    /// Looks `name` up and calls it with `args`.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, FuncError> {
        let func = self.get(name).ok_or_else(|| FuncError::Unknown(name.to_owned()))?;
        func.call(name, args)
    }
}

/// The standard set of template functions.
impl Default for FuncMap {
    fn default() -> Self {
        Self::new()
            .with("strlen",   Func::Helper(strlen))
            .with("substr",   Func::Helper(substr))
            .with("str2html", Func::Helper(str2html))
            .with("html2str", Func::Helper(html2str))
            .with("datefmt",  Func::Helper(datefmt))
            .with("eq",       Func::Variadic(compare::eq))
            .with("ne",       Func::Variadic(compare::ne))
            .with("lt",       Func::Binary(compare::lt))
            .with("le",       Func::Binary(compare::le))
            .with("gt",       Func::Binary(compare::gt))
            .with("ge",       Func::Binary(compare::ge))
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn args<'a, const N: usize>(name: &'static str, given: &'a [Value]) -> Result<&'a [Value; N], FuncError> {
    let expected = match N {
        1 => "1",
        2 => "2",
        _ => "3",
    };
    given.try_into().map_err(|_| arity(name, expected, given.len()))
}

fn str_arg<'a>(name: &'static str, index: usize, v: &'a Value) -> Result<&'a str, FuncError> {
    v.as_str().ok_or(FuncError::Argument { name, index, expected: "a string", got: v.kind() })
}

fn int_arg(name: &'static str, index: usize, v: &Value) -> Result<i64, FuncError> {
    match *v {
        Value::Int(n) => Ok(n),
        Value::Uint(n) => i64::try_from(n)
            .map_err(|_| FuncError::Argument { name, index, expected: "an int", got: "uint" }),
        _ => Err(FuncError::Argument { name, index, expected: "an int", got: v.kind() }),
    }
}

/// Number of characters in `s`.
fn strlen(a: &[Value]) -> Result<Value, FuncError> {
    let [s] = args::<1>("strlen", a)?;
    let n = str_arg("strlen", 0, s)?.chars().count();
    Ok(Value::Int(i64::try_from(n).unwrap_or(i64::MAX)))
}

/// Up to `length` characters of `s` from `start`.
///
/// A negative `start` counts as 0; a `start` past the end wraps around the
/// string length. The end is clamped to the string and never before `start`.
fn substr(a: &[Value]) -> Result<Value, FuncError> {
    let [s, start, length] = args::<3>("substr", a)?;
    let chars: Vec<char> = str_arg("substr", 0, s)?.chars().collect();
    let start = int_arg("substr", 1, start)?;
    let length = int_arg("substr", 2, length)?;

    let len = chars.len() as i64;
    if len == 0 {
        return Ok(Value::Str(String::new()));
    }

    let mut start = start.max(0);
    if start > len {
        start %= len;
    }
    let end = start.saturating_add(length).clamp(start, len);

    Ok(Value::Str(chars[start as usize..end as usize].iter().collect()))
}

/// Marks `s` as trusted markup.
fn str2html(a: &[Value]) -> Result<Value, FuncError> {
    let [s] = args::<1>("str2html", a)?;
    Ok(Value::Html(str_arg("str2html", 0, s)?.to_owned()))
}

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[\S\s]+?>").expect("valid regex"));
static STYLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<style[\S\s]+?</style>").expect("valid regex"));
static SCRIPT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<script[\S\s]+?</script>").expect("valid regex"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Plain text from markup: tags become line breaks, `<style>` and `<script>`
/// blocks vanish, and whitespace runs collapse to one line break.
fn html2str(a: &[Value]) -> Result<Value, FuncError> {
    let [html] = args::<1>("html2str", a)?;
    let src = str_arg("html2str", 0, html)?;

    let src = TAG.replace_all(src, |caps: &regex::Captures<'_>| caps[0].to_lowercase());
    let src = STYLE.replace_all(&src, "");
    let src = SCRIPT.replace_all(&src, "");
    let src = TAG.replace_all(&src, "\n");
    let src = SPACES.replace_all(&src, "\n");

    Ok(Value::Str(src.trim().to_owned()))
}

/// Formats a time with a strftime layout such as `"%Y-%m-%d"`.
fn datefmt(a: &[Value]) -> Result<Value, FuncError> {
    let [t, layout] = args::<2>("datefmt", a)?;
    let Value::Time(t) = t else {
        return Err(FuncError::Argument { name: "datefmt", index: 0, expected: "a time", got: t.kind() });
    };
    let layout = str_arg("datefmt", 1, layout)?;

    let mut out = String::new();
    write!(out, "{}", t.format(layout)).map_err(|_| FuncError::Layout(layout.to_owned()))?;
    Ok(Value::Str(out))
}
