//! The per-level parse loop.
//!
//! A level finds the leftmost token naming one of its commands, parses the
//! tokens before it against its own arguments, then hands the tokens after it
//! to the command's level. Absolute indices compose by passing the offset
//! down.

use indexmap::IndexMap;
use serde_json::{Value, json};

use crate::claims::Claims;
use crate::consume::{Dispatcher, Scope};
use crate::decl::ArgKind;
use crate::error::{ParserError, Result};
use crate::outcome::{CommandResult, Outcome};
use crate::prepare::Node;
use crate::search::{Target, matches};

pub(crate) type Arguments = IndexMap<String, Outcome>;
pub(crate) type Commands = IndexMap<String, CommandResult>;

/// Parse one level.
///
/// `tokens` are case-normalized and `raw` holds the same tokens as given.
/// `offset` is the absolute index of `tokens[0]`.
pub(crate) fn parse_level(
    dispatcher: &Dispatcher<'_>,
    node: &Node,
    tokens: &[String],
    raw: &[String],
    offset: usize,
) -> Result<(Arguments, Commands)> {
    let boundary = resolve_command(node, tokens);
    let end = boundary.map_or(tokens.len(), |(b, _)| b);

    let scope = Scope {
        tokens: &tokens[..end],
        raw: &raw[..end],
        offset,
        path: &node.path,
    };
    let arguments = consume_arguments(dispatcher, node, &scope)?;

    let mut commands = Commands::with_capacity(node.commands.len());
    for (position, command) in node.commands.iter().enumerate() {
        let result = match boundary {
            Some((b, winner)) if winner == position => {
                tracing::debug!(parser = %node.path, command = %command.name, index = offset + b, "entering command");
                let (arguments, commands) = parse_level(
                    dispatcher,
                    command,
                    &tokens[b + 1..],
                    &raw[b + 1..],
                    offset + b + 1,
                )?;
                CommandResult {
                    detected: true,
                    index: Some(offset + b),
                    arguments,
                    commands,
                }
            }
            _ => skeleton(command),
        };
        commands.insert(command.name.clone(), result);
    }

    if dispatcher.settings().keep_only_detected {
        commands.retain(|_, c| c.detected);
    }

    Ok((arguments, commands))
}

/// Leftmost token naming a command at this level, with the command's
/// position. Declaration order breaks ties between commands.
fn resolve_command(node: &Node, tokens: &[String]) -> Option<(usize, usize)> {
    tokens.iter().enumerate().find_map(|(i, token)| {
        node.commands
            .iter()
            .position(|c| matches(token, Target::Command(c)))
            .map(|position| (i, position))
    })
}

/// Run the level's consumers in kind priority and check that every token was
/// claimed.
fn consume_arguments(dispatcher: &Dispatcher<'_>, node: &Node, scope: &Scope<'_>) -> Result<Arguments> {
    let passes: [fn(&ArgKind) -> bool; 3] = [
        |kind: &ArgKind| matches!(kind, ArgKind::Flag(_) | ArgKind::Option(_)),
        |kind: &ArgKind| matches!(kind, ArgKind::Positional | ArgKind::Sequence(_)),
        |kind: &ArgKind| matches!(kind, ArgKind::InfiniteSequence),
    ];

    let mut claims = Claims::default();
    let mut found: IndexMap<&str, Outcome> = IndexMap::with_capacity(node.args.len());
    for pass in passes {
        for arg in node.args.iter().filter(|a| pass(&a.kind)) {
            let claimed = dispatcher.consume(arg, scope, claims.clone())?;
            claims.merge(&claimed.claims);
            found.insert(&arg.name, claimed.outcome);
        }
    }

    if let Some(local) = claims.first_unclaimed(scope.tokens.len()) {
        return Err(ParserError::unhandled(
            scope.path,
            &scope.raw[local],
            local,
            scope.offset,
        ));
    }

    let keep_only_detected = dispatcher.settings().keep_only_detected;
    let mut arguments = Arguments::with_capacity(node.args.len());
    for arg in &node.args {
        if let Some(outcome) = found.swap_remove(arg.name.as_str())
            && (outcome.detected || !keep_only_detected)
        {
            arguments.insert(arg.name.clone(), outcome);
        }
    }
    Ok(arguments)
}

/// Result for a command that was not named in the input.
///
/// Schemas do not run here: flags read `false`, infinite sequences `[]` and
/// everything else has no value.
fn skeleton(node: &Node) -> CommandResult {
    let arguments = node
        .args
        .iter()
        .map(|arg| {
            let value = match arg.kind {
                ArgKind::Flag(_) => Some(Value::Bool(false)),
                ArgKind::InfiniteSequence => Some(json!([])),
                _ => None,
            };
            (arg.name.clone(), Outcome::undetected(&node.path, value))
        })
        .collect();

    CommandResult {
        detected: false,
        index: None,
        arguments,
        commands: node
            .commands
            .iter()
            .map(|c| (c.name.clone(), skeleton(c)))
            .collect(),
    }
}
