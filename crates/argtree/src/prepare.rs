//! Declaration normalization.
//!
//! Runs once per parser: validates every level of the declaration tree and
//! resolves spellings, case and default schemas so parsing never has to.

use std::collections::HashSet;

use crate::decl::{Arg, ArgKind, Command, Spellings};
use crate::error::{ErrorCode, ParserError, Result};
use crate::schema::Schema;
use crate::settings::Settings;

/// A validated parser or command level.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub name: String,
    /// Dotted declaration path, e.g. `app.ui.install`.
    pub path: String,
    /// Name and aliases after case normalization.
    pub names: Vec<String>,
    pub args: Vec<Arg>,
    pub commands: Vec<Node>,
}

impl Node {
    pub fn root(name: &str, args: &[Arg], commands: &[Command], settings: &Settings) -> Result<Self> {
        build(name, name.to_string(), &[], args, commands, settings)
    }
}

fn build(
    name: &str,
    path: String,
    aliases: &[String],
    args: &[Arg],
    commands: &[Command],
    settings: &Settings,
) -> Result<Node> {
    let args = prepare_args(&path, args, settings)?;
    check_commands(&path, commands, settings)?;

    let commands = commands
        .iter()
        .map(|c| {
            build(
                &c.name,
                format!("{path}.{}", c.name),
                &c.aliases,
                &c.args,
                &c.commands,
                settings,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    let names = std::iter::once(name)
        .chain(aliases.iter().map(|a| a.trim()))
        .filter(|n| !n.is_empty())
        .map(|n| settings.normalize(n).into_owned())
        .collect();

    Ok(Node {
        name: name.to_string(),
        path,
        names,
        args,
        commands,
    })
}

fn ambiguous(path: &str, argument: &str, message: String) -> ParserError {
    ParserError::declaration(path, argument, ErrorCode::AmbiguousArguments, message)
}

fn strip_dashes(spelling: &str) -> &str {
    spelling.trim().trim_start_matches('-')
}

fn prepare_args(path: &str, args: &[Arg], settings: &Settings) -> Result<Vec<Arg>> {
    let mut names: HashSet<&str> = HashSet::new();
    let mut shorts: HashSet<String> = HashSet::new();
    let mut longs: HashSet<String> = HashSet::new();
    let mut after_infinite = false;
    let mut out = Vec::with_capacity(args.len());

    for arg in args {
        if !names.insert(arg.name.as_str()) {
            return Err(ambiguous(
                path,
                &arg.name,
                format!("Duplicate argument name: \"{}\"", arg.name),
            ));
        }

        if after_infinite && arg.kind.is_structural() {
            return Err(ambiguous(
                path,
                &arg.name,
                format!(
                    "Cannot define {} \"{}\" after an infiniteSequence",
                    arg.kind.label(),
                    arg.name
                ),
            ));
        }

        let kind = match &arg.kind {
            ArgKind::Flag(given) => {
                ArgKind::Flag(resolve_spellings(path, arg, given, settings, &mut shorts, &mut longs)?)
            }
            ArgKind::Option(given) => ArgKind::Option(resolve_spellings(
                path,
                arg,
                given,
                settings,
                &mut shorts,
                &mut longs,
            )?),
            ArgKind::Positional => ArgKind::Positional,
            ArgKind::Sequence(members) => ArgKind::Sequence(prepare_members(path, arg, members)?),
            ArgKind::InfiniteSequence => {
                after_infinite = true;
                ArgKind::InfiniteSequence
            }
        };

        let schema = arg.schema.clone().or_else(|| default_schema(&kind));
        out.push(Arg {
            name: arg.name.clone(),
            description: arg.description.clone(),
            kind,
            schema,
        });
    }

    Ok(out)
}

fn default_schema(kind: &ArgKind) -> Option<Schema> {
    match kind {
        ArgKind::Flag(_) => Some(Schema::boolean()),
        ArgKind::Option(_) | ArgKind::Positional => Some(Schema::string()),
        ArgKind::InfiniteSequence => Some(Schema::string_list()),
        ArgKind::Sequence(_) => None,
    }
}

fn prepare_members(path: &str, sequence: &Arg, members: &[Arg]) -> Result<Vec<Arg>> {
    let mut names: HashSet<&str> = HashSet::new();
    let mut out = Vec::with_capacity(members.len());
    for member in members {
        if !matches!(member.kind, ArgKind::Positional) {
            return Err(ParserError::declaration(
                path,
                &member.name,
                ErrorCode::UnrecognizedKeys,
                format!(
                    "Sequence \"{}\" only accepts positionals, found {} \"{}\"",
                    sequence.name,
                    member.kind.label(),
                    member.name
                ),
            ));
        }
        if !names.insert(member.name.as_str()) {
            return Err(ambiguous(
                path,
                &member.name,
                format!(
                    "Duplicate argument name in sequence \"{}\": \"{}\"",
                    sequence.name, member.name
                ),
            ));
        }
        out.push(Arg {
            name: member.name.clone(),
            description: member.description.clone(),
            kind: ArgKind::Positional,
            schema: member.schema.clone().or_else(|| Some(Schema::string())),
        });
    }
    Ok(out)
}

/// Resolve the accepted spellings of a flag or option.
///
/// Long spellings are the given ones followed by the name. Without an
/// explicit short spelling the first character of the name is used, unless
/// an earlier argument at this level already claims it.
fn resolve_spellings(
    path: &str,
    arg: &Arg,
    given: &Spellings,
    settings: &Settings,
    shorts: &mut HashSet<String>,
    longs: &mut HashSet<String>,
) -> Result<Spellings> {
    let mut resolved = Spellings::default();

    if given.short.is_empty() {
        let derived = strip_dashes(&arg.name)
            .chars()
            .next()
            .map(|c| settings.normalize(&c.to_string()).into_owned());
        match derived {
            Some(short) if shorts.insert(short.clone()) => resolved.short.push(short),
            Some(short) => {
                tracing::debug!(parser = path, argument = %arg.name, short = %short, "derived short spelling already taken, skipping");
            }
            None => {}
        }
    } else {
        for short in &given.short {
            let short = settings.normalize(strip_dashes(short)).into_owned();
            if short.is_empty() || resolved.short.contains(&short) {
                continue;
            }
            if !shorts.insert(short.clone()) {
                return Err(ambiguous(
                    path,
                    &arg.name,
                    format!("Duplicate short argument: {short}"),
                ));
            }
            resolved.short.push(short);
        }
    }

    let candidates = given
        .long
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(arg.name.as_str()));
    for long in candidates {
        let long = settings.normalize(strip_dashes(long)).into_owned();
        if long.is_empty() || resolved.long.contains(&long) {
            continue;
        }
        if !longs.insert(long.clone()) {
            return Err(ambiguous(
                path,
                &arg.name,
                format!("Duplicate long argument: {long}"),
            ));
        }
        resolved.long.push(long);
    }

    Ok(resolved)
}

/// Reject duplicate command names and aliases that collide across siblings.
fn check_commands(path: &str, commands: &[Command], settings: &Settings) -> Result<()> {
    let mut names: HashSet<String> = HashSet::new();
    for command in commands {
        if !names.insert(settings.normalize(&command.name).into_owned()) {
            return Err(ambiguous(
                path,
                &command.name,
                format!("Duplicate command name: \"{}\"", command.name),
            ));
        }
    }

    let mut aliases: HashSet<String> = HashSet::new();
    for command in commands {
        let own = settings.normalize(&command.name).into_owned();
        for alias in &command.aliases {
            let alias = settings.normalize(alias.trim()).into_owned();
            if alias.is_empty() || alias == own {
                continue;
            }
            if names.contains(&alias) {
                return Err(ambiguous(
                    path,
                    &command.name,
                    format!(
                        "alias conflict: '{alias}' is both a command name and an alias (command: {})",
                        command.name
                    ),
                ));
            }
            if !aliases.insert(alias.clone()) {
                return Err(ambiguous(
                    path,
                    &command.name,
                    format!("alias conflict: '{alias}' is used by more than one command"),
                ));
            }
        }
    }

    Ok(())
}
