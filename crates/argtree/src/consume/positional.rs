use super::{Claimed, Scope, convert, is_dashed};
use crate::claims::Claims;
use crate::decl::Arg;
use crate::error::Result;
use crate::outcome::{ArgValue, Outcome};
use crate::schema::Raw;

/// Claim the earliest unclaimed token that does not start with `-`.
pub(super) fn consume(arg: &Arg, scope: &Scope<'_>, mut claims: Claims) -> Result<Claimed> {
    let found = scope
        .tokens
        .iter()
        .enumerate()
        .find(|(i, token)| !claims.contains(*i) && !is_dashed(token))
        .map(|(i, _)| i);

    let Some(i) = found else {
        return Ok(Claimed {
            outcome: Outcome::undetected(scope.path, None),
            claims,
        });
    };

    let raw = scope.raw_at(i);
    let value = convert(arg, scope, Raw::Text(&raw))?;
    claims.claim(i);

    Ok(Claimed {
        outcome: Outcome {
            value: Some(ArgValue::Value(value)),
            raw: Some(raw),
            index: Some(scope.absolute(i)),
            detected: true,
            parser: scope.path.to_string(),
        },
        claims,
    })
}
