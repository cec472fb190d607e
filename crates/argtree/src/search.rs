//! Name matching for commands, flags and options.
//!
//! Tokens and spellings are compared after case normalization, which happens
//! once up front, so matching here is plain string comparison.

use crate::claims::Claims;
use crate::decl::Spellings;
use crate::prepare::Node;

/// Something that is matched by name.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Target<'a> {
    Command(&'a Node),
    Named(&'a Spellings),
}

/// Whether `token` is one of the target's accepted forms.
///
/// Commands match their name or an alias exactly. Flags and options match
/// `-{short}` or `--{long}` exactly, or the same followed by `=...`.
pub(crate) fn matches(token: &str, target: Target<'_>) -> bool {
    match target {
        Target::Command(node) => node.names.iter().any(|n| n == token),
        Target::Named(spellings) => {
            let shorts = spellings
                .short
                .iter()
                .filter_map(|s| token.strip_prefix('-')?.strip_prefix(s.as_str()));
            let longs = spellings
                .long
                .iter()
                .filter_map(|l| token.strip_prefix("--")?.strip_prefix(l.as_str()));
            shorts
                .chain(longs)
                .any(|rest| rest.is_empty() || rest.starts_with('='))
        }
    }
}

/// Lowest index at or after `from` whose token matches the target.
pub(crate) fn search(tokens: &[String], from: usize, target: Target<'_>) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, token)| matches(token, target))
        .map(|(i, _)| i)
}

/// Lowest unclaimed index whose token matches the target.
pub(crate) fn search_unclaimed(tokens: &[String], target: Target<'_>, claims: &Claims) -> Option<usize> {
    let mut from = 0;
    while let Some(i) = search(tokens, from, target) {
        if !claims.contains(i) {
            return Some(i);
        }
        from = i + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn spellings(short: &[&str], long: &[&str]) -> Spellings {
        Spellings {
            short: short.iter().map(|s| s.to_string()).collect(),
            long: long.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn exact_and_equals_forms_match() {
        let s = spellings(&["o"], &["output"]);
        assert!(matches("-o", Target::Named(&s)));
        assert!(matches("--output", Target::Named(&s)));
        assert!(matches("-o=x", Target::Named(&s)));
        assert!(matches("--output=a=b", Target::Named(&s)));
        assert!(!matches("--out", Target::Named(&s)));
        assert!(!matches("--outputs", Target::Named(&s)));
        assert!(!matches("-output", Target::Named(&s)));
        assert!(!matches("output", Target::Named(&s)));
    }

    #[test]
    fn lowest_index_wins_regardless_of_spelling_order() {
        let s = spellings(&["v"], &["verbose"]);
        let argv = tokens(&["a", "--verbose", "-v"]);
        assert_eq!(search(&argv, 0, Target::Named(&s)), Some(1));
        assert_eq!(search(&argv, 2, Target::Named(&s)), Some(2));
        assert_eq!(search(&argv, 3, Target::Named(&s)), None);
    }

    #[test]
    fn claimed_matches_are_skipped() {
        let s = spellings(&["v"], &["verbose"]);
        let argv = tokens(&["-v", "x", "--verbose"]);
        let mut claims = Claims::default();
        claims.claim(0);
        assert_eq!(search_unclaimed(&argv, Target::Named(&s), &claims), Some(2));
        claims.claim(2);
        assert_eq!(search_unclaimed(&argv, Target::Named(&s), &claims), None);
    }
}
