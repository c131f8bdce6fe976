use std::fmt;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use futures::future::TryFuture;

use crate::bias::{Bias, Unbiased};
use crate::candidate::{IntoCandidate, Slot};
use crate::candidate_waker;
use crate::error::Error;
use crate::selector::{Predicate, Selector, TryPredicate};
use crate::set::Snapshot;
use crate::shared::Shared;

/// The candidate future type of the items in `I`.
type CandidateOf<I> = <<I as IntoIterator>::Item as IntoCandidate>::Future;

/// The value type produced by the candidates in `I`.
type ValueOf<I> = <CandidateOf<I> as TryFuture>::Ok;

/// Pick the first value produced by `items` which satisfies `selector`.
///
/// Every item is either a fallible future (anything implementing
/// [TryFuture], such as `Future<Output = Result<T, E>>`) or a
/// [Candidate][crate::Candidate]. All of them are driven concurrently on the
/// task awaiting the returned [Pick]. Each time one of them completes with a
/// value, `selector` is called with it exactly once. The first value for which
/// it returns `true` becomes the output of the pick.
///
/// Errors from individual candidates are ignored. If every candidate completes
/// without producing a matching value the pick fails with
/// [Error::Exhausted], and if there are no candidates at all it fails with
/// [Error::EmptyInput].
///
/// Selection follows the order in which candidates complete, not the order in
/// which they are given.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use tokio::time;
///
/// async fn lookup(value: u32, delay: u64) -> Result<u32, &'static str> {
///     time::sleep(Duration::from_millis(delay)).await;
///     Ok(value)
/// }
///
/// # #[tokio::main] async fn main() {
/// let output = pickme::pick(
///     vec![
///         Box::pin(lookup(10, 50)),
///         Box::pin(lookup(20, 10)),
///     ],
///     |v| *v == 10,
/// )
/// .await;
///
/// // The slower candidate wins since it is the one that matches.
/// assert_eq!(output, Ok(10));
/// # }
/// ```
pub fn pick<I, P>(items: I, selector: P) -> Pick<CandidateOf<I>, Predicate<P>>
where
    I: IntoIterator,
    I::Item: IntoCandidate,
    P: FnMut(&ValueOf<I>) -> bool,
{
    Pick::new(items, Predicate(selector))
}

/// Pick the first value produced by `items` which satisfies a fallible
/// `selector`.
///
/// This behaves like [pick()], except that the selector may fail. The first
/// error it returns immediately fails the whole pick with
/// [Error::Selector], even if some other candidate would have matched later.
///
/// # Examples
///
/// ```
/// use pickme::{Candidate, Error};
///
/// # #[tokio::main] async fn main() {
/// let output = pickme::try_pick([1, 2, 3].map(Candidate::value), |v| {
///     if *v == 2 {
///         return Err("boom");
///     }
///
///     Ok(*v == 3)
/// })
/// .await;
///
/// assert_eq!(output, Err(Error::Selector("boom")));
/// # }
/// ```
pub fn try_pick<I, P, E>(items: I, selector: P) -> Pick<CandidateOf<I>, TryPredicate<P>>
where
    I: IntoIterator,
    I::Item: IntoCandidate,
    P: FnMut(&ValueOf<I>) -> Result<bool, E>,
{
    Pick::new(items, TryPredicate(selector))
}

/// The future produced by [pick()] and [try_pick()].
///
/// It resolves exactly once, and must not be polled again after that.
///
/// # Examples
///
/// A [Pick] can be embedded in a hand-written future.
///
/// ```
/// use std::future::{ready, Future, Ready};
/// use std::pin::Pin;
/// use std::task::{Context, Poll};
///
/// use pin_project::pin_project;
/// use pickme::{Pick, Predicate};
///
/// type Lookup = Ready<Result<u32, ()>>;
///
/// #[pin_project]
/// struct FirstEven {
///     #[pin]
///     pick: Pick<Lookup, Predicate<fn(&u32) -> bool>>,
/// }
///
/// impl Future for FirstEven {
///     type Output = Option<u32>;
///
///     fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
///         let this = self.project();
///         this.pick.poll(cx).map(Result::ok)
///     }
/// }
///
/// # #[tokio::main] async fn main() {
/// let is_even: fn(&u32) -> bool = |v| *v % 2 == 0;
///
/// let first_even = FirstEven {
///     pick: pickme::pick([ready(Ok(1)), ready(Err(())), ready(Ok(4))], is_even),
/// };
///
/// assert_eq!(first_even.await, Some(4));
/// # }
/// ```
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Pick<F, S, B = Unbiased>
where
    F: TryFuture,
{
    /// Normalized candidates.
    slots: Box<[Slot<F>]>,
    /// One waker per candidate.
    wakers: Box<[Waker]>,
    /// State shared with the candidate wakers.
    shared: Arc<Shared>,
    /// Mask of candidates which have not completed yet.
    mask: Snapshot,
    /// Candidates to visit during the current poll.
    snapshot: Snapshot,
    /// Number of candidates which have not completed yet.
    remaining: usize,
    /// Set once the pick has produced its output.
    done: bool,
    selector: S,
    bias: B,
}

// NB: candidates are only ever pinned through the boxed slice, which does not
// move when the pick does.
impl<F, S, B> Unpin for Pick<F, S, B> where F: TryFuture {}

impl<F, S> Pick<F, S>
where
    F: TryFuture,
{
    pub(crate) fn new<I>(items: I, selector: S) -> Self
    where
        I: IntoIterator,
        I::Item: IntoCandidate<Future = F>,
    {
        let slots = items
            .into_iter()
            .map(|item| Slot::from(item.into_candidate()))
            .collect::<Box<[_]>>();

        let len = slots.len();
        let shared = Arc::new(Shared::new(len));

        Self {
            slots,
            wakers: candidate_waker::wakers(&shared, len),
            shared,
            mask: Snapshot::filled(len),
            snapshot: Snapshot::empty(len),
            remaining: len,
            done: false,
            selector,
            bias: Unbiased,
        }
    }
}

impl<F, S, B> Pick<F, S, B>
where
    F: TryFuture,
{
    /// Change the order in which candidates that are ready at the same time
    /// are visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use pickme::{Candidate, Random};
    ///
    /// # #[tokio::main] async fn main() {
    /// let output = pickme::pick([1, 2, 3, 4].map(Candidate::value), |v| *v % 2 == 0)
    ///     .with_bias(Random::new())
    ///     .await;
    ///
    /// assert!(matches!(output, Ok(2 | 4)));
    /// # }
    /// ```
    pub fn with_bias<C>(self, bias: C) -> Pick<F, S, C>
    where
        C: Bias,
    {
        Pick {
            slots: self.slots,
            wakers: self.wakers,
            shared: self.shared,
            mask: self.mask,
            snapshot: self.snapshot,
            remaining: self.remaining,
            done: self.done,
            selector: self.selector,
            bias,
        }
    }

    /// The number of candidates in this pick.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Test if this pick has no candidates.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The number of candidates which have not completed yet.
    ///
    /// ```
    /// use pickme::Candidate;
    ///
    /// let pick = pickme::pick([1, 2].map(Candidate::value), |_| true);
    /// assert_eq!(pick.len(), 2);
    /// assert_eq!(pick.remaining(), 2);
    /// ```
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Register interest in wakeups and merge every candidate which has been
    /// woken since the last poll into the current snapshot.
    ///
    /// Returns `true` if there is nothing to poll.
    fn merge(&mut self, cx: &mut Context<'_>) -> bool {
        // NB: register before draining, so a wakeup arriving while the snapshot
        // is walked schedules another poll instead of being lost.
        self.shared.parent.register(cx.waker());
        self.shared.set.drain_into(&mut self.snapshot, &self.mask);
        self.snapshot.is_empty()
    }
}

impl<F, S, B> Pick<F, S, B>
where
    F: TryFuture,
    S: Selector<F::Ok>,
{
    /// Settle the pick.
    fn finish(
        &mut self,
        output: Result<F::Ok, Error<S::Error>>,
    ) -> Poll<Result<F::Ok, Error<S::Error>>> {
        self.done = true;
        Poll::Ready(output)
    }
}

impl<F, S, B> Future for Pick<F, S, B>
where
    F: TryFuture,
    S: Selector<F::Ok>,
    B: Bias,
{
    type Output = Result<F::Ok, Error<S::Error>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        assert!(!this.done, "`Pick` polled after completion");

        if this.slots.is_empty() {
            log::debug!("No candidates to pick from");
            return this.finish(Err(Error::EmptyInput));
        }

        if this.merge(cx) {
            return Poll::Pending;
        }

        let start = this.bias.start(this.slots.len());

        while let Some(index) = this.snapshot.unset_next(start) {
            let value = match poll_slot(&mut this.slots[index], &this.wakers[index]) {
                Poll::Ready(value) => value,
                Poll::Pending => continue,
            };

            this.mask.clear(index);
            this.remaining -= 1;

            match value {
                Some(value) => match this.selector.select(&value) {
                    Ok(true) => {
                        log::debug!("Candidate {} matched ({} remaining)", index, this.remaining);
                        return this.finish(Ok(value));
                    }
                    Ok(false) => {
                        log::trace!("Candidate {} did not match", index);
                    }
                    Err(error) => {
                        log::debug!("Selector failed on candidate {}", index);
                        return this.finish(Err(Error::Selector(error)));
                    }
                },
                None => {
                    log::trace!("Candidate {} failed", index);
                }
            }

            if this.remaining == 0 {
                log::debug!("All {} candidates completed without a match", this.slots.len());
                return this.finish(Err(Error::Exhausted));
            }
        }

        Poll::Pending
    }
}

/// Poll a single slot using the waker of its candidate, returning the value it
/// completed with, or `None` if it failed.
fn poll_slot<F>(slot: &mut Slot<F>, waker: &Waker) -> Poll<Option<F::Ok>>
where
    F: TryFuture,
{
    let output = match slot {
        Slot::Value(..) => match mem::replace(slot, Slot::Done) {
            Slot::Value(value) => return Poll::Ready(Some(value)),
            _ => unreachable!(),
        },
        Slot::Pending(fut) => {
            // SAFETY: The slot lives in a boxed slice which is never moved
            // out of, and the future is only ever dropped in place.
            let fut = unsafe { Pin::new_unchecked(fut) };
            let mut cx = Context::from_waker(waker);

            match fut.try_poll(&mut cx) {
                Poll::Ready(output) => output.ok(),
                Poll::Pending => return Poll::Pending,
            }
        }
        Slot::Done => return Poll::Pending,
    };

    *slot = Slot::Done;
    Poll::Ready(output)
}

impl<F, S, B> fmt::Debug for Pick<F, S, B>
where
    F: TryFuture,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pick")
            .field("len", &self.slots.len())
            .field("remaining", &self.remaining)
            .field("done", &self.done)
            .finish()
    }
}
