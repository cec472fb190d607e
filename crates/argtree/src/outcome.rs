//! Parse results.
//!
//! Every declared argument and command gets an entry, detected or not, so
//! callers can index into results without checking for presence first (unless
//! `keep_only_detected` is set).

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

pub(crate) fn serialize_index<S: Serializer>(
    index: &Option<usize>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match index {
        Some(i) => serializer.serialize_u64(*i as u64),
        None => serializer.serialize_i64(-1),
    }
}

/// Value of an argument outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Output of the argument's schema.
    Value(Value),
    /// Member outcomes of a sequence, in declaration order.
    Members(IndexMap<String, Outcome>),
}

/// What happened to one declared argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub value: Option<ArgValue>,
    /// Input text the argument claimed, space-joined when it spans tokens.
    pub raw: Option<String>,
    /// Absolute index of the first claimed token.
    #[serde(serialize_with = "serialize_index")]
    pub index: Option<usize>,
    pub detected: bool,
    /// Declaration path the outcome belongs to.
    pub parser: String,
}

impl Outcome {
    pub(crate) fn undetected(parser: &str, value: Option<Value>) -> Self {
        Self {
            value: value.map(ArgValue::Value),
            raw: None,
            index: None,
            detected: false,
            parser: parser.to_string(),
        }
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.value {
            Some(ArgValue::Value(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.json().and_then(Value::as_bool)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.json().and_then(Value::as_str)
    }

    /// String items of a list value.
    pub fn as_strings(&self) -> Option<Vec<&str>> {
        self.json()?.as_array()?.iter().map(Value::as_str).collect()
    }

    pub fn members(&self) -> Option<&IndexMap<String, Outcome>> {
        match &self.value {
            Some(ArgValue::Members(m)) => Some(m),
            _ => None,
        }
    }
}

/// Result for one nested command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandResult {
    pub detected: bool,
    /// Absolute index of the token that named the command.
    #[serde(serialize_with = "serialize_index")]
    pub index: Option<usize>,
    pub arguments: IndexMap<String, Outcome>,
    pub commands: IndexMap<String, CommandResult>,
}

/// Result of a top-level parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    /// The scanned input after slicing and case normalization.
    pub argv: Vec<String>,
    pub arguments: IndexMap<String, Outcome>,
    pub commands: IndexMap<String, CommandResult>,
}

macro_rules! lookups {
    ($ty:ty) => {
        impl $ty {
            pub fn argument(&self, name: &str) -> Option<&Outcome> {
                self.arguments.get(name)
            }

            pub fn command(&self, name: &str) -> Option<&CommandResult> {
                self.commands.get(name)
            }

            /// The detected command at this level, if any.
            pub fn active_command(&self) -> Option<(&str, &CommandResult)> {
                self.commands
                    .iter()
                    .find(|(_, c)| c.detected)
                    .map(|(name, c)| (name.as_str(), c))
            }
        }
    };
}

lookups!(CommandResult);
lookups!(ParseResult);
