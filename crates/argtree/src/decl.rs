//! Declarations and the builder functions that create them.
//!
//! Declarations are plain values: build them once, hand them to
//! [`Parser::builder`](crate::Parser::builder), and reuse the resulting parser
//! for any number of inputs.

use crate::schema::Schema;

/// Accepted spellings of a flag or option, without leading dashes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spellings {
    pub short: Vec<String>,
    pub long: Vec<String>,
}

/// The five argument kinds.
#[derive(Debug, Clone)]
pub enum ArgKind {
    /// Boolean switch: `-v`, `--verbose`.
    Flag(Spellings),
    /// Named value: `--out file`, `--out=file`, `-o=file`.
    Option(Spellings),
    /// The next free token that does not start with `-`.
    Positional,
    /// Ordered group of positionals that matches all-or-nothing.
    Sequence(Vec<Arg>),
    /// Every remaining free token that does not start with `-`.
    InfiniteSequence,
}

impl ArgKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Flag(_) => "flag",
            Self::Option(_) => "option",
            Self::Positional => "positional",
            Self::Sequence(_) => "sequence",
            Self::InfiniteSequence => "infiniteSequence",
        }
    }

    /// Whether this kind claims tokens by position rather than by name.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Positional | Self::Sequence(_) | Self::InfiniteSequence
        )
    }
}

#[derive(Debug, Clone)]
pub struct Arg {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) kind: ArgKind,
    pub(crate) schema: Option<Schema>,
}

/// Declare a boolean flag.
///
/// Defaults: long spelling is the name, short spelling is its first character,
/// schema is [`Schema::boolean`].
pub fn flag(name: impl Into<String>) -> Arg {
    Arg::new(name, ArgKind::Flag(Spellings::default()))
}

/// Declare a value option.
///
/// Spelling defaults match [`flag`]; schema is [`Schema::string`].
pub fn option(name: impl Into<String>) -> Arg {
    Arg::new(name, ArgKind::Option(Spellings::default()))
}

/// Declare a positional argument with a [`Schema::string`] default.
pub fn positional(name: impl Into<String>) -> Arg {
    Arg::new(name, ArgKind::Positional)
}

/// Declare an ordered group of positionals.
///
/// The group's value is the map of its members' outcomes, so a schema set on
/// the sequence itself is not applied.
pub fn sequence(name: impl Into<String>, members: impl IntoIterator<Item = Arg>) -> Arg {
    Arg::new(name, ArgKind::Sequence(members.into_iter().collect()))
}

/// Declare an open-ended trailing sequence with a [`Schema::string_list`]
/// default.
pub fn infinite_sequence(name: impl Into<String>) -> Arg {
    Arg::new(name, ArgKind::InfiniteSequence)
}

impl Arg {
    fn new(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
            schema: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ArgKind {
        &self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// Accepted spellings, for flags and options.
    pub fn spellings(&self) -> Option<&Spellings> {
        match &self.kind {
            ArgKind::Flag(spellings) | ArgKind::Option(spellings) => Some(spellings),
            _ => None,
        }
    }

    /// Add a short spelling. Ignored for arguments matched by position.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        if let ArgKind::Flag(spellings) | ArgKind::Option(spellings) = &mut self.kind {
            spellings.short.push(short.into());
        }
        self
    }

    /// Add a long spelling. The name stays accepted as well. Ignored for
    /// arguments matched by position.
    pub fn long(mut self, long: impl Into<String>) -> Self {
        if let ArgKind::Flag(spellings) | ArgKind::Option(spellings) = &mut self.kind {
            spellings.long.push(long.into());
        }
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Command {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) aliases: Vec<String>,
    pub(crate) args: Vec<Arg>,
    pub(crate) commands: Vec<Command>,
}

/// Declare a command.
pub fn command(name: impl Into<String>) -> Command {
    Command {
        name: name.into(),
        description: None,
        aliases: Vec::new(),
        args: Vec::new(),
        commands: Vec::new(),
    }
}

impl Command {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn args_from(mut self, args: impl IntoIterator<Item = Arg>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn commands_from(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.commands.extend(commands);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
