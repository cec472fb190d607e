//! Per-kind token consumers.
//!
//! Each consumer receives its own copy of the level's [`Claims`], claims zero
//! or more tokens, and hands back the outcome together with the updated set.

mod flag;
mod infinite;
mod option;
mod positional;
mod sequence;

use serde_json::Value;

use crate::claims::Claims;
use crate::decl::{Arg, ArgKind};
use crate::error::{ParserError, Result};
use crate::outcome::Outcome;
use crate::schema::{Raw, Schema};
use crate::settings::Settings;

/// The part of the input visible to one nesting level.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope<'a> {
    /// Case-normalized tokens, used for matching.
    pub tokens: &'a [String],
    /// Original tokens, used for values and raw text.
    pub raw: &'a [String],
    /// Absolute index of `tokens[0]` in the scanned input.
    pub offset: usize,
    /// Declaration path reported on outcomes.
    pub path: &'a str,
}

impl Scope<'_> {
    pub fn absolute(&self, local: usize) -> usize {
        self.offset + local
    }

    pub fn raw_at(&self, local: usize) -> String {
        self.raw[local].clone()
    }
}

pub(crate) struct Claimed {
    pub outcome: Outcome,
    pub claims: Claims,
}

/// Routes an argument to the consumer for its kind.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Dispatcher<'s> {
    settings: &'s Settings,
}

impl<'s> Dispatcher<'s> {
    pub fn new(settings: &'s Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &'s Settings {
        self.settings
    }

    pub fn consume(&self, arg: &Arg, scope: &Scope<'_>, claims: Claims) -> Result<Claimed> {
        let claimed = match &arg.kind {
            ArgKind::Flag(spellings) => flag::consume(arg, spellings, scope, claims)?,
            ArgKind::Option(spellings) => {
                option::consume(self.settings, arg, spellings, scope, claims)?
            }
            ArgKind::Positional => positional::consume(arg, scope, claims)?,
            ArgKind::Sequence(members) => sequence::consume(self, members, scope, claims)?,
            ArgKind::InfiniteSequence => infinite::consume(arg, scope, claims)?,
        };
        if claimed.outcome.detected {
            tracing::trace!(
                parser = scope.path,
                argument = %arg.name,
                index = ?claimed.outcome.index,
                raw = ?claimed.outcome.raw,
                "claimed"
            );
        }
        Ok(claimed)
    }
}

/// Run an argument's schema, tagging failures with the declaration path.
fn convert(arg: &Arg, scope: &Scope<'_>, raw: Raw<'_>) -> Result<Value> {
    let converted = match &arg.schema {
        Some(schema) => schema.validate(raw),
        None => Schema::any().validate(raw),
    };
    converted.map_err(|issue| ParserError::from_issue(issue, scope.path, &arg.name))
}

/// Tokens starting with `-` are never taken by position.
fn is_dashed(token: &str) -> bool {
    token.starts_with('-')
}
