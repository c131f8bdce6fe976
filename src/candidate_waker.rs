use std::sync::Arc;
use std::task::{Wake, Waker};

use crate::shared::Shared;

/// The waker handed to a single candidate.
///
/// Waking it is how a candidate reports that it has made progress: its index
/// is marked in the shared set and the task awaiting the pick is woken.
struct CandidateWaker {
    shared: Arc<Shared>,
    index: usize,
}

impl Wake for CandidateWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.shared.set.set(self.index);
        self.shared.parent.wake();
    }
}

/// Construct one waker per candidate.
pub(crate) fn wakers(shared: &Arc<Shared>, len: usize) -> Box<[Waker]> {
    (0..len)
        .map(|index| {
            Waker::from(Arc::new(CandidateWaker {
                shared: shared.clone(),
                index,
            }))
        })
        .collect()
}
