//! Value conversion.
//!
//! The engine hands each detected argument's raw text (or a boolean for flags,
//! or a list for infinite sequences) to the argument's [`Schema`], which
//! returns a JSON value or an [`Issue`]. The first issue aborts the parse.

use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

use crate::error::PathSegment;

/// Raw input handed to a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Raw<'a> {
    Bool(bool),
    Text(&'a str),
    List(&'a [String]),
}

impl Raw<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Text(_) => "string",
            Self::List(_) => "array",
        }
    }
}

/// A rejected conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub code: String,
    pub message: String,
    /// Location inside the raw input, e.g. the list position that failed.
    pub path: Vec<PathSegment>,
}

impl Issue {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Append a path segment.
    pub fn at(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.push(segment.into());
        self
    }

    fn invalid_type(expected: &str, raw: &Raw<'_>) -> Self {
        Self::new(
            "invalid_type",
            format!("Expected {expected}, received {}", raw.describe()),
        )
    }
}

/// Converts raw argument input into a typed value.
pub trait Validate: fmt::Debug + Send + Sync {
    fn validate(&self, raw: Raw<'_>) -> Result<Value, Issue>;
}

/// Shared handle to a [`Validate`] implementation.
#[derive(Clone)]
pub struct Schema(Arc<dyn Validate>);

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Schema {
    pub fn new(validate: impl Validate + 'static) -> Self {
        Self(Arc::new(validate))
    }

    /// Wrap a closure as a schema.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Raw<'_>) -> Result<Value, Issue> + Send + Sync + 'static,
    {
        Self::new(FnSchema(f))
    }

    /// Accepts booleans and the strings `true`/`false`.
    pub fn boolean() -> Self {
        Self::new(Builtin::Boolean)
    }

    pub fn string() -> Self {
        Self::new(Builtin::String)
    }

    /// Parses a string as a signed 64-bit integer.
    pub fn integer() -> Self {
        Self::new(Builtin::Integer)
    }

    /// Parses a string as a finite floating point number.
    pub fn number() -> Self {
        Self::new(Builtin::Number)
    }

    /// Accepts one of a fixed set of strings.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Builtin::OneOf(values.into_iter().map(Into::into).collect()))
    }

    pub fn string_list() -> Self {
        Self::new(Builtin::StringList)
    }

    /// Passes any input through unchanged.
    pub fn any() -> Self {
        Self::new(Builtin::Any)
    }

    pub fn validate(&self, raw: Raw<'_>) -> Result<Value, Issue> {
        self.0.validate(raw)
    }
}

struct FnSchema<F>(F);

impl<F> fmt::Debug for FnSchema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSchema")
    }
}

impl<F> Validate for FnSchema<F>
where
    F: Fn(Raw<'_>) -> Result<Value, Issue> + Send + Sync,
{
    fn validate(&self, raw: Raw<'_>) -> Result<Value, Issue> {
        (self.0)(raw)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Builtin {
    Boolean,
    String,
    Integer,
    Number,
    OneOf(Vec<String>),
    StringList,
    Any,
}

impl Validate for Builtin {
    fn validate(&self, raw: Raw<'_>) -> Result<Value, Issue> {
        match (self, raw) {
            (Self::Any, raw) => Ok(passthrough(raw)),

            (Self::Boolean, Raw::Bool(b)) => Ok(Value::Bool(b)),
            (Self::Boolean, Raw::Text("true")) => Ok(Value::Bool(true)),
            (Self::Boolean, Raw::Text("false")) => Ok(Value::Bool(false)),
            (Self::Boolean, raw) => Err(Issue::invalid_type("boolean", &raw)),

            (Self::String, Raw::Text(s)) => Ok(Value::String(s.to_string())),
            (Self::String, raw) => Err(Issue::invalid_type("string", &raw)),

            (Self::Integer, Raw::Text(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| Issue::new("invalid_type", format!("Expected integer, received '{s}'"))),
            (Self::Integer, raw) => Err(Issue::invalid_type("integer", &raw)),

            (Self::Number, Raw::Text(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| Issue::new("invalid_type", format!("Expected number, received '{s}'"))),
            (Self::Number, raw) => Err(Issue::invalid_type("number", &raw)),

            (Self::OneOf(values), Raw::Text(s)) => {
                if values.iter().any(|v| v == s) {
                    Ok(Value::String(s.to_string()))
                } else {
                    let expected: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
                    Err(Issue::new(
                        "invalid_enum_value",
                        format!(
                            "Invalid enum value. Expected {}, received '{s}'",
                            expected.join(" | ")
                        ),
                    ))
                }
            }
            (Self::OneOf(_), raw) => Err(Issue::invalid_type("string", &raw)),

            (Self::StringList, Raw::List(items)) => Ok(Value::Array(
                items.iter().map(|s| Value::String(s.clone())).collect(),
            )),
            (Self::StringList, raw) => Err(Issue::invalid_type("array", &raw)),
        }
    }
}

fn passthrough(raw: Raw<'_>) -> Value {
    match raw {
        Raw::Bool(b) => Value::Bool(b),
        Raw::Text(s) => Value::String(s.to_string()),
        Raw::List(items) => Value::Array(items.iter().map(|s| Value::String(s.clone())).collect()),
    }
}
