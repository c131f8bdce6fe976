use std::sync::atomic::{AtomicU64, Ordering};

const BITS: usize = u64::BITS as usize;

/// Number of words required to store `len` bits.
fn words(len: usize) -> usize {
    (len + BITS - 1) / BITS
}

/// An atomic set indicating wakeup interest, one bit per candidate.
pub(crate) struct Set {
    words: Box<[AtomicU64]>,
}

impl Set {
    /// Construct a set of the given length where every bit is set, so that
    /// every candidate is polled at least once.
    pub(crate) fn filled(len: usize) -> Self {
        let filled = Snapshot::filled(len);

        Self {
            words: filled.words.iter().map(|w| AtomicU64::new(*w)).collect(),
        }
    }

    /// Set the given bit in the set.
    pub(crate) fn set(&self, index: usize) {
        let word = &self.words[index / BITS];
        word.fetch_or(1u64 << (index % BITS), Ordering::SeqCst);
    }

    /// Take everything in the set which is covered by `mask` and merge it into
    /// `snapshot`, leaving the set empty.
    pub(crate) fn drain_into(&self, snapshot: &mut Snapshot, mask: &Snapshot) {
        let iter = self.words.iter().zip(mask.words.iter());

        for (out, (word, mask)) in snapshot.words.iter_mut().zip(iter) {
            *out |= word.swap(0, Ordering::SeqCst) & *mask;
        }
    }
}

/// A plain bitset that can be iterated over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Snapshot {
    words: Box<[u64]>,
}

impl Snapshot {
    /// Construct an empty snapshot able to hold `len` bits.
    pub(crate) fn empty(len: usize) -> Self {
        Self {
            words: vec![0; words(len)].into(),
        }
    }

    /// Construct a snapshot with the first `len` bits set.
    pub(crate) fn filled(len: usize) -> Self {
        let mut words = vec![u64::MAX; words(len)];
        let rest = len % BITS;

        if rest != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << rest) - 1;
            }
        }

        Self {
            words: words.into(),
        }
    }

    /// Test if the snapshot is empty.
    pub(crate) fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Test if the given index is set.
    #[cfg(test)]
    pub(crate) fn contains(&self, index: usize) -> bool {
        self.words[index / BITS] & (1u64 << (index % BITS)) != 0
    }

    /// Clear the given index.
    #[inline]
    pub(crate) fn clear(&mut self, index: usize) {
        self.words[index / BITS] &= !(1u64 << (index % BITS));
    }

    /// Merge this snapshot with another snapshot.
    #[cfg(test)]
    pub(crate) fn merge(&mut self, other: &Self) {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a |= *b;
        }
    }

    /// Unset the next index at or after `start` and return it, wrapping around
    /// to the beginning of the set once the end has been reached.
    pub(crate) fn unset_next(&mut self, start: usize) -> Option<usize> {
        let index = match self.next_from(start) {
            Some(index) => index,
            None => self.next_from(0)?,
        };

        self.clear(index);
        Some(index)
    }

    fn next_from(&self, start: usize) -> Option<usize> {
        let mut word = start / BITS;
        let mut bits = *self.words.get(word)? & (u64::MAX << (start % BITS));

        loop {
            if bits != 0 {
                return Some(word * BITS + bits.trailing_zeros() as usize);
            }

            word += 1;
            bits = *self.words.get(word)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Set, Snapshot};

    fn drain(snapshot: &mut Snapshot, start: usize) -> Vec<usize> {
        let mut out = Vec::new();

        while let Some(index) = snapshot.unset_next(start) {
            out.push(index);
        }

        out
    }

    #[test]
    fn test_filled() {
        let mut snapshot = Snapshot::filled(3);
        assert_eq!(drain(&mut snapshot, 0), [0, 1, 2]);
        assert!(snapshot.is_empty());

        let mut snapshot = Snapshot::filled(64);
        assert_eq!(drain(&mut snapshot, 0).len(), 64);

        let mut snapshot = Snapshot::filled(130);
        let all = drain(&mut snapshot, 0);
        assert_eq!(all.len(), 130);
        assert_eq!(all.last(), Some(&129));

        assert!(Snapshot::filled(0).is_empty());
    }

    #[test]
    fn test_unset_next_wraps() {
        let mut snapshot = Snapshot::empty(200);

        for index in [1, 6, 70, 128, 199] {
            snapshot.merge(&{
                let mut s = Snapshot::empty(200);
                s.words[index / 64] |= 1 << (index % 64);
                s
            });
        }

        assert!(snapshot.contains(70));
        assert_eq!(drain(&mut snapshot.clone(), 0), [1, 6, 70, 128, 199]);
        assert_eq!(drain(&mut snapshot.clone(), 70), [70, 128, 199, 1, 6]);
        assert_eq!(drain(&mut snapshot.clone(), 71), [128, 199, 1, 6, 70]);
        assert_eq!(drain(&mut snapshot, 199), [199, 1, 6, 70, 128]);
    }

    #[test]
    fn test_drain_into_masks() {
        let set = Set::filled(0);
        let mut snapshot = Snapshot::empty(0);
        set.drain_into(&mut snapshot, &Snapshot::filled(0));
        assert!(snapshot.is_empty());

        let set = Set::filled(100);
        let mut mask = Snapshot::filled(100);
        mask.clear(3);
        mask.clear(99);

        let mut snapshot = Snapshot::empty(100);
        set.drain_into(&mut snapshot, &mask);

        assert!(!snapshot.contains(3));
        assert!(!snapshot.contains(99));
        assert!(snapshot.contains(98));

        // the set is left empty.
        let mut again = Snapshot::empty(100);
        set.drain_into(&mut again, &mask);
        assert!(again.is_empty());

        set.set(42);
        set.set(3);
        set.drain_into(&mut again, &mask);
        assert_eq!(drain(&mut again, 0), [42]);
    }
}
