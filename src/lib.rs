//! Pick the first value out of a collection of futures which satisfies a
//! predicate.
//!
//! Where a `select!` or a race resolves with whichever branch completes first,
//! [pick()] resolves with the first value *that is correct*. Every candidate
//! is driven concurrently, and each value a candidate completes with is handed
//! to a selector. The first value it accepts is the output. Candidates which
//! fail are tolerated, and only once every candidate has completed without a
//! match does the pick fail.
//!
//! See [pick()] and [try_pick()] for documentation.
//!
//! <br>
//!
//! ## Usage
//!
//! Add the following to your `Cargo.toml`:
//!
//! ```toml
//! pickme = "0.1.0"
//! ```
//!
//! <br>
//!
//! ## Examples
//!
//! Values and futures can be freely mixed through [Candidate]. Failing
//! candidates never cause the pick to fail on their own.
//!
//! ```
//! use std::time::Duration;
//!
//! use pickme::Candidate;
//! use tokio::time;
//!
//! async fn fetch(value: u32, delay: u64) -> Result<u32, &'static str> {
//!     time::sleep(Duration::from_millis(delay)).await;
//!
//!     if value == 0 {
//!         return Err("nothing here");
//!     }
//!
//!     Ok(value)
//! }
//!
//! # #[tokio::main] async fn main() {
//! let output = pickme::pick(
//!     vec![
//!         Candidate::Value(1),
//!         Candidate::Future(Box::pin(fetch(0, 10))),
//!         Candidate::Future(Box::pin(fetch(42, 20))),
//!     ],
//!     |v| *v > 10,
//! )
//! .await;
//!
//! assert_eq!(output, Ok(42));
//! # }
//! ```
//!
//! If nothing matches, the pick fails once every candidate has completed.
//!
//! ```
//! use std::future::ready;
//!
//! use pickme::Error;
//!
//! # #[tokio::main] async fn main() {
//! let output = pickme::pick([ready(Err("A")), ready(Ok(1)), ready(Err("B"))], |v| *v == 2).await;
//! assert_eq!(output, Err(Error::Exhausted));
//! # }
//! ```
//!
//! <br>
//!
//! ## Ordering
//!
//! Values are considered in the order their candidates complete. When several
//! candidates are ready at the same time, for example a number of plain values,
//! they are visited according to the [Bias] of the pick. The default,
//! [Unbiased], visits them in the order they were given, so the first matching
//! one wins. [Random] starts from a random position instead. This ordering is
//! best effort and only applies to candidates observed within the same poll.
//!
//! <br>
//!
//! ## Features
//!
//! * `random` (default) - enables the [Random] bias.

// This project contains code and documentation licensed under the MIT license
// from the Tokio project.
//
// See: https://github.com/tokio-rs/tokio/blob/986b88b/LICENSE

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod bias;
#[cfg(feature = "random")]
pub use self::bias::Random;
pub use self::bias::{Bias, Unbiased};

#[cfg(feature = "random")]
mod rand;

mod candidate;
pub use self::candidate::{Candidate, Immediate, IntoCandidate};

mod candidate_waker;

mod error;
pub use self::error::Error;

mod pick;
pub use self::pick::{pick, try_pick, Pick};

mod selector;
pub use self::selector::{Predicate, Selector, TryPredicate};

mod set;

mod shared;
