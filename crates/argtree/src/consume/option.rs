use super::{Claimed, Scope, convert, is_dashed};
use crate::claims::Claims;
use crate::decl::{Arg, Spellings};
use crate::error::{ParserError, Result};
use crate::outcome::{ArgValue, Outcome};
use crate::schema::Raw;
use crate::search::{Target, search_unclaimed};
use crate::settings::Settings;

/// Claim an option and its value.
///
/// Accepted shapes, tried in order:
/// - `--name=value` (one token; `--name=` gives no value)
/// - `--name value` when the next token is unclaimed and not dashed
/// - `--name` alone, which uses its own text as the value
///
/// With `require_equals` only the first shape is allowed.
pub(super) fn consume(
    settings: &Settings,
    arg: &Arg,
    spellings: &Spellings,
    scope: &Scope<'_>,
    mut claims: Claims,
) -> Result<Claimed> {
    let Some(i) = search_unclaimed(scope.tokens, Target::Named(spellings), &claims) else {
        return Ok(Claimed {
            outcome: Outcome::undetected(scope.path, None),
            claims,
        });
    };

    let matched = &scope.raw[i];
    claims.claim(i);

    let (raw, text) = if let Some((_, value)) = matched.split_once('=') {
        (matched.clone(), (!value.is_empty()).then(|| value.to_string()))
    } else if settings.require_equals {
        return Err(ParserError::requires_equals(
            scope.path,
            &arg.name,
            scope.absolute(i),
        ));
    } else {
        let next = i + 1;
        match scope.tokens.get(next) {
            Some(token) if !claims.contains(next) && !is_dashed(token) => {
                claims.claim(next);
                let value = scope.raw_at(next);
                (format!("{matched} {value}"), Some(value))
            }
            _ => (matched.clone(), Some(matched.clone())),
        }
    };

    let value = match &text {
        Some(text) => Some(ArgValue::Value(convert(arg, scope, Raw::Text(text))?)),
        None => None,
    };

    Ok(Claimed {
        outcome: Outcome {
            value,
            raw: Some(raw),
            index: Some(scope.absolute(i)),
            detected: true,
            parser: scope.path.to_string(),
        },
        claims,
    })
}
