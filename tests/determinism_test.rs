use std::future::ready;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::FutureExt;
use pickme::{Candidate, Error};
use tokio::time;

#[tokio::test]
async fn resolves_once() {
    let resolved = AtomicUsize::new(0);

    let output = pickme::pick([ready(Ok::<_, ()>(1)), ready(Ok(1))], |v| *v == 1)
        .map(|output| {
            resolved.fetch_add(1, Ordering::SeqCst);
            output
        })
        .await;

    assert_eq!(output, Ok(1));
    assert_eq!(resolved.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn shared_outcome() {
    let shared = pickme::pick([1, 2, 3].map(Candidate::value), |v| *v > 1).shared();

    let (a, b) = tokio::join!(shared.clone(), shared.clone());
    assert_eq!(a, Ok(2));
    assert_eq!(b, Ok(2));
    assert_eq!(shared.await, Ok(2));

    let shared = pickme::pick([1, 2, 3].map(Candidate::value), |v| *v > 3).shared();
    let (a, b) = tokio::join!(shared.clone(), shared);
    assert_eq!(a, Err(Error::Exhausted));
    assert_eq!(b, Err(Error::Exhausted));
}

#[tokio::test]
async fn early_exit_leaves_tasks_running() {
    let executed = Arc::new(AtomicBool::new(false));

    let slow = tokio::spawn({
        let executed = executed.clone();

        async move {
            time::sleep(Duration::from_millis(50)).await;
            executed.store(true, Ordering::SeqCst);
            999
        }
    });

    let fast = tokio::spawn(async { 5 });

    let output = pickme::pick(vec![slow, fast], |v| *v == 5).await;
    assert_eq!(output, Ok(5));
    assert!(!executed.load(Ordering::SeqCst));

    // The pick no longer reacts to the slow task, but the task itself runs to
    // completion.
    time::sleep(Duration::from_millis(100)).await;
    assert!(executed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn selector_not_called_after_match() {
    let calls = AtomicUsize::new(0);

    let output = pickme::pick([1, 2, 3, 4].map(Candidate::value), |v| {
        calls.fetch_add(1, Ordering::SeqCst);
        *v == 2
    })
    .await;

    assert_eq!(output, Ok(2));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn chained_picks() {
    let first = pickme::pick([ready(Ok::<_, ()>(10)), ready(Ok(20))], |v| *v == 20)
        .await
        .unwrap();

    let second = pickme::pick([ready(Ok::<_, ()>(first)), ready(Ok(99))], |v| *v == 20).await;
    assert_eq!(second, Ok(20));
}

#[tokio::test]
async fn no_cross_call_contamination() {
    let a = pickme::pick([ready(Ok::<_, ()>("A"))], |v| *v == "A");
    let b = pickme::pick([ready(Ok::<_, ()>("B"))], |v| *v == "B");

    let (a, b) = tokio::join!(a, b);
    assert_eq!(a, Ok("A"));
    assert_eq!(b, Ok("B"));
}

#[tokio::test]
async fn selector_on_structs() {
    #[derive(Debug, PartialEq)]
    struct Entry {
        value: u32,
    }

    let output = pickme::pick(
        [Entry { value: 10 }, Entry { value: 20 }].map(Candidate::value),
        |entry| entry.value > 15,
    )
    .await;

    assert_eq!(output, Ok(Entry { value: 20 }));
}
