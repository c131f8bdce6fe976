/// Trait that implements bias in the order candidates are visited.
///
/// When several candidates become ready between two polls of a [Pick], they
/// are visited one after another and the first one whose value satisfies the
/// selector wins. The bias decides where that walk starts. The walk wraps
/// around, so every ready candidate is still visited.
///
/// [Pick]: crate::Pick
pub trait Bias {
    /// Return the index in `0..len` at which the next walk should start.
    ///
    /// `len` is never zero.
    fn start(&mut self, len: usize) -> usize;
}

/// An unbiased selector which starts from the top and works its way to the
/// bottom.
///
/// Candidates which are ready at the same time are visited in the order they
/// were given, so out of a collection of already available values the first
/// matching one in sequence order is picked.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unbiased;

impl Bias for Unbiased {
    #[inline]
    fn start(&mut self, _: usize) -> usize {
        0
    }
}

/// A biased selector which starts every walk at a random position.
///
/// This gives every ready candidate a fair chance of being visited first.
#[cfg(feature = "random")]
#[derive(Debug, Default, Clone, Copy)]
pub struct Random;

#[cfg(feature = "random")]
impl Random {
    /// Construct a new random bias.
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(feature = "random")]
impl Bias for Random {
    fn start(&mut self, len: usize) -> usize {
        let len = u32::try_from(len).unwrap_or(u32::MAX);
        crate::rand::thread_rng_n(len) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{Bias, Unbiased};
    use crate::set::Snapshot;

    #[test]
    fn test_unbiased() {
        let mut snapshot = Snapshot::filled(4);
        let mut bias = Unbiased;
        let mut it = Vec::new();

        while let Some(index) = snapshot.unset_next(bias.start(4)) {
            it.push(index);
        }

        assert_eq!(it, [0, 1, 2, 3]);
    }

    #[test]
    #[cfg(feature = "random")]
    fn test_random_bias() {
        let mut bias = super::Random::new();
        let mut seen = [false; 8];

        for _ in 0..1000 {
            let start = bias.start(8);
            assert!(start < 8);
            seen[start] = true;
        }

        assert!(seen.iter().all(|s| *s));

        let mut snapshot = Snapshot::filled(5);
        let start = bias.start(5);
        let mut it = Vec::new();

        while let Some(index) = snapshot.unset_next(start) {
            it.push(index);
        }

        let expected = (0..5).map(|n| (n + start) % 5).collect::<Vec<_>>();
        assert_eq!(it, expected);
    }
}
