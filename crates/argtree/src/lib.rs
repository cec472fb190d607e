//! Declarative command-line parsing over a tree of commands.
//!
//! A [`Parser`] is built from argument declarations ([`flag`], [`option`],
//! [`positional`], [`sequence`], [`infinite_sequence`]) and nested
//! [`command`]s. Parsing reports every declared item, detected or not, with its
//! converted value, the raw text it claimed and its index in the input:
//!
//! ```
//! use argtree::{Parser, command, flag, infinite_sequence, option};
//!
//! let parser = Parser::builder("app")
//!     .arg(flag("force"))
//!     .arg(option("config"))
//!     .command(command("install").alias("i").arg(infinite_sequence("packages")))
//!     .build()
//!     .unwrap();
//!
//! let result = parser.parse(&["--force", "i", "serde", "tokio"]).unwrap();
//! assert_eq!(result.argument("force").unwrap().as_bool(), Some(true));
//! assert!(!result.argument("config").unwrap().detected);
//!
//! let install = result.command("install").unwrap();
//! assert_eq!(install.index, Some(1));
//! assert_eq!(
//!     install.argument("packages").unwrap().as_strings(),
//!     Some(vec!["serde", "tokio"])
//! );
//! ```
//!
//! Every token in the scanned input has to be claimed by some declaration;
//! anything left over fails the whole parse.

mod claims;
mod consume;
mod decl;
mod engine;
mod error;
mod outcome;
mod prepare;
mod read;
mod schema;
mod search;
mod settings;

pub use decl::{
    Arg, ArgKind, Command, Spellings, command, flag, infinite_sequence, option, positional,
    sequence,
};
pub use error::{ErrorCode, Origin, ParserError, PathSegment, Result};
pub use outcome::{ArgValue, CommandResult, Outcome, ParseResult};
pub use schema::{Issue, Raw, Schema, Validate};
pub use settings::{NameMode, Settings};

use consume::Dispatcher;
use prepare::Node;

/// A validated declaration tree, ready to parse input.
///
/// Parsers hold no per-parse state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Parser {
    root: Node,
    settings: Settings,
}

impl Parser {
    pub fn builder(name: impl Into<String>) -> ParserBuilder {
        ParserBuilder {
            name: name.into(),
            args: Vec::new(),
            commands: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// Validate a declaration tree.
    ///
    /// Fails with [`ErrorCode::AmbiguousArguments`] on duplicate names or
    /// spellings, or on anything declared after an infinite sequence.
    pub fn new(
        name: &str,
        args: &[Arg],
        commands: &[Command],
        settings: Settings,
    ) -> Result<Self> {
        let root = Node::root(name, args, commands, &settings)?;
        tracing::debug!(
            parser = name,
            arguments = root.args.len(),
            commands = root.commands.len(),
            "parser ready"
        );
        Ok(Self { root, settings })
    }

    pub fn name(&self) -> &str {
        &self.root.name
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The part of `argv` that [`Parser::parse`] scans.
    pub fn read<'a, S>(&self, argv: &'a [S]) -> &'a [S] {
        read::read(&self.settings, argv)
    }

    /// Parse `argv` against the declaration.
    ///
    /// Indices in the result are positions in the scanned slice, so with a
    /// nonzero `start_index` they are shifted relative to `argv`.
    pub fn parse<S: AsRef<str>>(&self, argv: &[S]) -> Result<ParseResult> {
        let raw: Vec<String> = self
            .read(argv)
            .iter()
            .map(|token| token.as_ref().to_string())
            .collect();
        let tokens: Vec<String> = raw
            .iter()
            .map(|token| self.settings.normalize(token).into_owned())
            .collect();
        tracing::debug!(parser = %self.root.name, tokens = tokens.len(), "parsing");

        let dispatcher = Dispatcher::new(&self.settings);
        let (arguments, commands) = engine::parse_level(&dispatcher, &self.root, &tokens, &raw, 0)?;

        Ok(ParseResult {
            argv: tokens,
            arguments,
            commands,
        })
    }
}

/// Collects a top-level declaration for [`Parser`].
#[derive(Debug, Clone)]
pub struct ParserBuilder {
    name: String,
    args: Vec<Arg>,
    commands: Vec<Command>,
    settings: Settings,
}

impl ParserBuilder {
    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = Arg>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn commands(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.commands.extend(commands);
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> Result<Parser> {
        Parser::new(&self.name, &self.args, &self.commands, self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn parser_is_shareable() {
        assert_send_sync::<Parser>();
    }

    #[test]
    fn read_applies_bounds_before_parsing() {
        let parser = Parser::builder("app")
            .arg(positional("target"))
            .settings(Settings::new().start_index(1).stop_index(2))
            .build()
            .unwrap();

        assert_eq!(parser.read(&["node", "x", "y"]), &["x"]);
        let result = parser.parse(&["node", "x", "y"]).unwrap();
        assert_eq!(result.argv, vec!["x"]);
        assert_eq!(result.argument("target").unwrap().index, Some(0));
    }
}
