use super::{Claimed, Scope, convert, is_dashed};
use crate::claims::Claims;
use crate::decl::Arg;
use crate::error::Result;
use crate::outcome::{ArgValue, Outcome};
use crate::schema::Raw;

/// Collect every unclaimed, undashed token left in the slice.
///
/// An empty collection still converts, so the value is `[]` rather than
/// absent.
pub(super) fn consume(arg: &Arg, scope: &Scope<'_>, mut claims: Claims) -> Result<Claimed> {
    let collected: Vec<usize> = scope
        .tokens
        .iter()
        .enumerate()
        .filter(|(i, token)| !claims.contains(*i) && !is_dashed(token))
        .map(|(i, _)| i)
        .collect();

    let Some(&first) = collected.first() else {
        let value = convert(arg, scope, Raw::List(&[]))?;
        return Ok(Claimed {
            outcome: Outcome::undetected(scope.path, Some(value)),
            claims,
        });
    };

    let items: Vec<String> = collected.iter().map(|&i| scope.raw_at(i)).collect();
    let value = convert(arg, scope, Raw::List(&items))?;
    for &i in &collected {
        claims.claim(i);
    }

    Ok(Claimed {
        outcome: Outcome {
            value: Some(ArgValue::Value(value)),
            raw: Some(items.join(" ")),
            index: Some(scope.absolute(first)),
            detected: true,
            parser: scope.path.to_string(),
        },
        claims,
    })
}
