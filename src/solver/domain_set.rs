//! Bit set over the domain pool.
//!
//! Used both as the pool of values still available (pairwise-disjunct mode)
//! and as the legal-value set of each unassigned variable. Copying a set is
//! a block copy, so every search frame owns private snapshots.

use fixedbitset::FixedBitSet;

use crate::model::DomainId;

/// A set of [`DomainId`]s over a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSet {
    bits: FixedBitSet,
    /// Number of set bits (cached for O(1) `len()`)
    count: usize,
}

impl DomainSet {
    /// Creates a set containing domains `0..capacity`.
    pub fn full(capacity: usize) -> Self {
        let mut bits = FixedBitSet::with_capacity(capacity);
        bits.insert_range(..);
        Self {
            bits,
            count: capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Removes `id`. Returns true if it was present.
    pub fn remove(&mut self, id: DomainId) -> bool {
        if !self.bits.contains(id.index()) {
            return false;
        }
        self.bits.set(id.index(), false);
        self.count -= 1;
        true
    }

    /// Keeps only the members for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(DomainId) -> bool) {
        let dropped: Vec<DomainId> = self.iter().filter(|&id| !keep(id)).collect();
        for id in dropped {
            self.remove(id);
        }
    }

    /// Members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.bits.ones().map(DomainId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full() {
        let full = DomainSet::full(70);
        assert_eq!(full.len(), 70);
        assert_eq!(full.iter().count(), 70);
        assert_eq!(full.iter().last(), Some(DomainId(69)));
        assert_eq!(DomainSet::full(64).iter().last(), Some(DomainId(63)));

        let none = DomainSet::full(0);
        assert!(none.is_empty());
        assert_eq!(none.iter().next(), None);
    }

    #[test]
    fn test_remove() {
        let mut set = DomainSet::full(4);
        assert!(set.remove(DomainId(2)));
        assert!(!set.remove(DomainId(2)));
        assert!(!set.remove(DomainId(500)));
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![DomainId(0), DomainId(1), DomainId(3)]
        );
    }

    #[test]
    fn test_retain() {
        let mut set = DomainSet::full(10);
        set.retain(|d| d.index() % 3 == 0);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![DomainId(0), DomainId(3), DomainId(6), DomainId(9)]
        );
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_clones_are_independent() {
        let pool = DomainSet::full(3);
        let mut child = pool.clone();
        child.remove(DomainId(0));
        assert_eq!(pool.len(), 3);
        assert_eq!(child.len(), 2);
        assert_ne!(pool, child);
    }
}
