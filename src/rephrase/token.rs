//! Core token types shared across the lexer, the rewrite engine, and tooling.
//!
//!     A [Token] is an opaque value carrying a declared [Shape] (its type
//!     identity) and a [Value] payload. Shapes form a closed union: every
//!     shape knows its canonical identifier, the `\w+` word used as the
//!     matching alphabet when sentences are rendered to text. Payloads are a
//!     closed variant container so that combinators can match exhaustively
//!     instead of downcasting.
//!
//! Special forms:
//!     Unmatched: a raw substring the lexer could not classify. Rewriting
//!     refuses to run over sentences that still contain one.
//!     Absent: the placeholder substituted for a declared parameter position
//!     that a rule variant intentionally omits (the "at least one present"
//!     expansion).

use serde::Serialize;

/// The declared shape of a token: its type identity for matching purposes.
///
/// Shapes are a closed union rather than live type metadata, so canonical
/// names are known at construction time. One collision remains possible:
/// `Named("Numbers")` and `Sequence(Named("Number"))` canonicalize
/// identically. Callers own the uniqueness of identifiers across the shapes
/// they register; a collision silently conflates the shapes during matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Shape {
    /// A simple named shape, e.g. `Named("Number")`.
    Named(String),
    /// A run of tokens of one shape, collected by a list rule.
    Sequence(Box<Shape>),
    /// A key/value pair, produced by dictionary rules.
    Pair(Box<Shape>, Box<Shape>),
    /// A key → value mapping, produced by dictionary rules.
    Mapping(Box<Shape>, Box<Shape>),
    /// Placeholder shape for omitted parameter positions.
    Absent,
    /// Raw text the lexer could not classify.
    Unmatched,
}

impl Shape {
    pub fn named(name: &str) -> Shape {
        Shape::Named(name.to_owned())
    }

    pub fn sequence(inner: Shape) -> Shape {
        Shape::Sequence(Box::new(inner))
    }

    pub fn pair(key: Shape, value: Shape) -> Shape {
        Shape::Pair(Box::new(key), Box::new(value))
    }

    pub fn mapping(key: Shape, value: Shape) -> Shape {
        Shape::Mapping(Box::new(key), Box::new(value))
    }

    /// Canonical identifier for this shape: a single `\w+` word, safe as
    /// both a matching-alphabet symbol and a regex group name.
    ///
    /// Parametric shapes join `BaseName`, `Of`, and the hyphen-joined
    /// identifiers of their parameters, then normalization strips the
    /// hyphens along with any other separator character. A sequence is the
    /// element identifier with an `s` suffix.
    pub fn identifier(&self) -> String {
        match self {
            Shape::Named(name) => normalize(name),
            Shape::Sequence(inner) => format!("{}s", inner.identifier()),
            Shape::Pair(key, value) => {
                normalize(&format!("PairOf{}-{}", key.identifier(), value.identifier()))
            }
            Shape::Mapping(key, value) => {
                normalize(&format!("MapOf{}-{}", key.identifier(), value.identifier()))
            }
            Shape::Absent => "Absent".to_owned(),
            Shape::Unmatched => "Unmatched".to_owned(),
        }
    }
}

/// Strip every character that is not a word character: namespace separators,
/// brackets, hyphens. The result must stay usable as a `\w+` regex word.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Payload container for tokens.
///
/// Combinators receive and produce these; exhaustive matching replaces the
/// runtime type tests a reflective design would need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// No payload (marker tokens such as operators).
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Payloads of a collected run, in sentence order.
    List(Vec<Value>),
    /// A key/value pair; either side may be [Value::Absent].
    Pair(Box<Value>, Box<Value>),
    /// Association list with unique keys; insertion order is preserved.
    Map(Vec<(Value, Value)>),
    /// The payload of an omitted parameter position.
    Absent,
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view: floats as-is, integers widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<(&Value, &Value)> {
        match self {
            Value::Pair(key, value) => Some((key, value)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Value {
        Value::Str(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Value {
        Value::Str(text)
    }
}

/// A classified unit of input or an intermediate rewrite result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    shape: Shape,
    payload: Value,
}

impl Token {
    pub fn new(shape: Shape, payload: Value) -> Token {
        Token { shape, payload }
    }

    /// A raw substring the lexer could not classify.
    pub fn unmatched(raw: impl Into<String>) -> Token {
        Token {
            shape: Shape::Unmatched,
            payload: Value::Str(raw.into()),
        }
    }

    /// The sentinel filling an omitted parameter position.
    pub fn absent() -> Token {
        Token {
            shape: Shape::Absent,
            payload: Value::Absent,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }

    pub fn is_unmatched(&self) -> bool {
        matches!(self.shape, Shape::Unmatched)
    }

    /// The raw text of an unmatched token, if this is one.
    pub fn as_unmatched(&self) -> Option<&str> {
        match (&self.shape, &self.payload) {
            (Shape::Unmatched, Value::Str(raw)) => Some(raw),
            _ => None,
        }
    }
}

/// An ordered sequence of tokens: the unit the engine rewrites.
///
/// Sentences are never mutated in place; every successful rewrite step
/// builds a new one.
pub type Sentence = Vec<Token>;
