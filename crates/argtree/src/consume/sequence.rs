use indexmap::IndexMap;

use super::{Claimed, Dispatcher, Scope};
use crate::claims::Claims;
use crate::decl::Arg;
use crate::error::Result;
use crate::outcome::{ArgValue, Outcome};

/// Run each member in order against a tentative copy of `claims`.
///
/// The group is all or nothing: if any member goes undetected the caller's
/// claims come back untouched.
pub(super) fn consume(
    dispatcher: &Dispatcher<'_>,
    members: &[Arg],
    scope: &Scope<'_>,
    claims: Claims,
) -> Result<Claimed> {
    let mut tentative = claims.clone();
    let mut outcomes: IndexMap<String, Outcome> = IndexMap::with_capacity(members.len());

    for member in members {
        let member_path = format!("{}.{}", scope.path, member.name);
        let member_scope = Scope {
            path: &member_path,
            ..*scope
        };
        let attempt = dispatcher.consume(member, &member_scope, tentative)?;
        if !attempt.outcome.detected {
            tracing::trace!(
                parser = scope.path,
                member = %member.name,
                "sequence member missing, rolling back"
            );
            return Ok(Claimed {
                outcome: Outcome::undetected(scope.path, None),
                claims,
            });
        }
        tentative = attempt.claims;
        outcomes.insert(member.name.clone(), attempt.outcome);
    }

    let Some(index) = outcomes.values().filter_map(|o| o.index).min() else {
        return Ok(Claimed {
            outcome: Outcome::undetected(scope.path, None),
            claims,
        });
    };
    let raw = outcomes
        .values()
        .filter_map(|o| o.raw.as_deref())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(Claimed {
        outcome: Outcome {
            value: Some(ArgValue::Members(outcomes)),
            raw: Some(raw),
            index: Some(index),
            detected: true,
            parser: scope.path.to_string(),
        },
        claims: tentative,
    })
}
