use std::convert::Infallible;
use std::fmt;
use std::future::Ready;

use futures::future::TryFuture;

/// The future type of a [Candidate] built with [Candidate::value].
pub type Immediate<T> = Ready<Result<T, Infallible>>;

/// A single input to [pick][crate::pick()].
///
/// A candidate is either a value which is already available, or a fallible
/// future which will produce one later. Both kinds can be mixed in the same
/// collection.
///
/// # Examples
///
/// ```
/// use std::future::ready;
///
/// use pickme::Candidate;
///
/// # #[tokio::main] async fn main() {
/// let items = vec![
///     Candidate::Value(1),
///     Candidate::Future(ready(Err("failed"))),
///     Candidate::Future(ready(Ok(3))),
/// ];
///
/// let output = pickme::pick(items, |v| *v > 1).await;
/// assert_eq!(output, Ok(3));
/// # }
/// ```
pub enum Candidate<F>
where
    F: TryFuture,
{
    /// A value which is immediately available.
    Value(F::Ok),
    /// A future which will either produce a value or fail.
    Future(F),
}

impl<T> Candidate<Immediate<T>> {
    /// Construct a candidate from a plain value.
    ///
    /// Unlike [Candidate::Value] this fixes the future type, so a collection of
    /// nothing but plain values needs no type annotations.
    ///
    /// ```
    /// use pickme::Candidate;
    ///
    /// # #[tokio::main] async fn main() {
    /// let output = pickme::pick([1, 2, 3].map(Candidate::value), |v| *v == 3).await;
    /// assert_eq!(output, Ok(3));
    /// # }
    /// ```
    pub fn value(value: T) -> Self {
        Candidate::Value(value)
    }
}

impl<F> fmt::Debug for Candidate<F>
where
    F: TryFuture + fmt::Debug,
    F::Ok: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Candidate::Future(fut) => f.debug_tuple("Future").field(fut).finish(),
        }
    }
}

/// Conversion into a [Candidate].
///
/// This is implemented for every fallible future and for [Candidate] itself.
pub trait IntoCandidate {
    /// The future type of the candidate.
    type Future: TryFuture;

    /// Convert into a candidate.
    fn into_candidate(self) -> Candidate<Self::Future>;
}

impl<F> IntoCandidate for F
where
    F: TryFuture,
{
    type Future = F;

    #[inline]
    fn into_candidate(self) -> Candidate<F> {
        Candidate::Future(self)
    }
}

impl<F> IntoCandidate for Candidate<F>
where
    F: TryFuture,
{
    type Future = F;

    #[inline]
    fn into_candidate(self) -> Candidate<F> {
        self
    }
}

/// A normalized candidate as it is stored inside of a pick.
pub(crate) enum Slot<F>
where
    F: TryFuture,
{
    /// An immediately fulfilled candidate which has not been observed yet.
    Value(F::Ok),
    /// A candidate still waiting on its future.
    Pending(F),
    /// The candidate has completed and has been observed.
    Done,
}

impl<F> From<Candidate<F>> for Slot<F>
where
    F: TryFuture,
{
    fn from(candidate: Candidate<F>) -> Self {
        match candidate {
            Candidate::Value(value) => Slot::Value(value),
            Candidate::Future(fut) => Slot::Pending(fut),
        }
    }
}
