use std::collections::BTreeSet;

/// Offsets into the current slice that have been claimed by a declaration.
///
/// Consumers receive their own copy and return it; the caller merges it back
/// only when the attempt should stick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Claims(BTreeSet<usize>);

impl Claims {
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn claim(&mut self, index: usize) {
        self.0.insert(index);
    }

    pub fn merge(&mut self, other: &Claims) {
        self.0.extend(other.0.iter().copied());
    }

    /// First index in `0..len` nobody claimed.
    pub fn first_unclaimed(&self, len: usize) -> Option<usize> {
        (0..len).find(|i| !self.contains(*i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_a_union() {
        let mut a = Claims::default();
        a.claim(0);
        let mut b = a.clone();
        b.claim(2);
        a.merge(&b);
        assert!(a.contains(0) && a.contains(2) && !a.contains(1));
        assert_eq!(a.first_unclaimed(3), Some(1));
        a.claim(1);
        assert_eq!(a.first_unclaimed(3), None);
    }
}
