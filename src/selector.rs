use std::convert::Infallible;

/// The predicate applied by a [Pick][crate::Pick] to every value produced by
/// its candidates.
///
/// The selector is called at most once per successfully completed candidate
/// and never on a candidate's error.
pub trait Selector<T> {
    /// Error raised by the selector, which aborts the whole pick.
    type Error;

    /// Test if `value` is the one being looked for.
    fn select(&mut self, value: &T) -> Result<bool, Self::Error>;
}

/// A selector from an infallible closure, constructed by
/// [pick][crate::pick()].
#[derive(Debug, Clone, Copy)]
pub struct Predicate<P>(pub(crate) P);

impl<T, P> Selector<T> for Predicate<P>
where
    P: FnMut(&T) -> bool,
{
    type Error = Infallible;

    #[inline]
    fn select(&mut self, value: &T) -> Result<bool, Self::Error> {
        Ok((self.0)(value))
    }
}

/// A selector from a fallible closure, constructed by
/// [try_pick][crate::try_pick()].
#[derive(Debug, Clone, Copy)]
pub struct TryPredicate<P>(pub(crate) P);

impl<T, P, E> Selector<T> for TryPredicate<P>
where
    P: FnMut(&T) -> Result<bool, E>,
{
    type Error = E;

    #[inline]
    fn select(&mut self, value: &T) -> Result<bool, Self::Error> {
        (self.0)(value)
    }
}
