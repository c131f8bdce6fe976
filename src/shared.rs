use futures::task::AtomicWaker;

use crate::set::Set;

/// Wake state shared between a [Pick][crate::Pick] and the wakers handed out
/// to its candidates.
pub(crate) struct Shared {
    /// The waker of the task awaiting the pick.
    pub(crate) parent: AtomicWaker,
    /// The bitset which is marked by candidates when they are woken.
    pub(crate) set: Set,
}

impl Shared {
    /// Construct shared state for `len` candidates, all of which are marked
    /// for an initial poll.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            parent: AtomicWaker::new(),
            set: Set::filled(len),
        }
    }
}
