use super::{Claimed, Scope, convert};
use crate::claims::Claims;
use crate::decl::{Arg, Spellings};
use crate::error::Result;
use crate::outcome::{ArgValue, Outcome};
use crate::schema::Raw;
use crate::search::{Target, search_unclaimed};

/// Claim the first unclaimed `-f`/`--flag` token.
///
/// Flags always resolve: an absent flag converts `false`.
pub(super) fn consume(
    arg: &Arg,
    spellings: &Spellings,
    scope: &Scope<'_>,
    mut claims: Claims,
) -> Result<Claimed> {
    let found = search_unclaimed(scope.tokens, Target::Named(spellings), &claims);
    let value = convert(arg, scope, Raw::Bool(found.is_some()))?;

    let outcome = match found {
        Some(i) => {
            claims.claim(i);
            Outcome {
                value: Some(ArgValue::Value(value)),
                raw: Some(scope.raw_at(i)),
                index: Some(scope.absolute(i)),
                detected: true,
                parser: scope.path.to_string(),
            }
        }
        None => Outcome::undetected(scope.path, Some(value)),
    };

    Ok(Claimed { outcome, claims })
}
