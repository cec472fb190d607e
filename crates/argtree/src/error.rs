//! Structured errors raised while declaring or parsing.
//!
//! Every failure, whether it comes from a bad declaration, an unclaimed token,
//! or a value schema rejecting its input, is reported as a single
//! [`ParserError`]. A parse that fails produces no partial result.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::outcome::serialize_index;
use crate::schema::Issue;

pub type Result<T> = std::result::Result<T, ParserError>;

/// Classifies a [`ParserError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    /// Duplicate names or spellings, or a positional declared after an
    /// infinite sequence.
    AmbiguousArguments,
    /// A token in the scanned slice was not claimed by any declaration.
    InvalidType,
    /// An option was given in `--name value` form while `require_equals` is on.
    InvalidArguments,
    /// A declaration uses a kind that is not valid where it appears.
    UnrecognizedKeys,
    /// Code forwarded verbatim from a value schema.
    Schema(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::AmbiguousArguments => "ambiguous_arguments",
            Self::InvalidType => "invalid_type",
            Self::InvalidArguments => "invalid_arguments",
            Self::UnrecognizedKeys => "unrecognized_keys",
            Self::Schema(code) => code.as_str(),
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Which layer produced a [`ParserError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Parser,
    Schema,
}

/// One segment of an error path: a declaration path or key, or a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ParserError {
    pub message: String,
    /// Dotted path of the parser or command the error belongs to.
    pub parser: String,
    pub origin: Origin,
    pub code: ErrorCode,
    /// Absolute input index of the offending token, when there is one.
    #[serde(serialize_with = "serialize_index")]
    pub index: Option<usize>,
    /// Name of the offending argument, or the offending raw token.
    pub argument: String,
    pub path: Vec<PathSegment>,
}

impl ParserError {
    pub(crate) fn declaration(
        parser: &str,
        argument: &str,
        code: ErrorCode,
        message: String,
    ) -> Self {
        Self {
            message,
            parser: parser.to_string(),
            origin: Origin::Parser,
            code,
            index: None,
            argument: argument.to_string(),
            path: vec![PathSegment::from(parser)],
        }
    }

    pub(crate) fn unhandled(parser: &str, token: &str, local: usize, offset: usize) -> Self {
        Self {
            message: format!("Unhandled argument: {token}"),
            parser: parser.to_string(),
            origin: Origin::Parser,
            code: ErrorCode::InvalidType,
            index: Some(offset + local),
            argument: token.to_string(),
            path: vec![PathSegment::from(parser), PathSegment::Index(local)],
        }
    }

    pub(crate) fn requires_equals(parser: &str, name: &str, index: usize) -> Self {
        Self {
            message: format!(
                "Option '{name}' requires equals format (--{name}=value) when requireEquals setting is enabled"
            ),
            parser: parser.to_string(),
            origin: Origin::Parser,
            code: ErrorCode::InvalidArguments,
            index: Some(index),
            argument: name.to_string(),
            path: vec![PathSegment::from(parser), PathSegment::from(name)],
        }
    }

    pub(crate) fn from_issue(issue: Issue, parser: &str, name: &str) -> Self {
        let mut path = vec![PathSegment::from(parser), PathSegment::from(name)];
        path.extend(issue.path);
        Self {
            message: issue.message,
            parser: parser.to_string(),
            origin: Origin::Schema,
            code: ErrorCode::Schema(issue.code),
            index: None,
            argument: name.to_string(),
            path,
        }
    }

    /// Whether the error was raised by a value schema rather than the parser.
    pub fn is_schema_error(&self) -> bool {
        self.origin == Origin::Schema
    }
}
