use std::error;
use std::fmt;

/// The error produced when a [Pick][crate::Pick] does not find a value.
///
/// Errors of individual candidates are never reported. They only count
/// towards [Error::Exhausted].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The pick was constructed from an empty collection.
    EmptyInput,
    /// The selector failed on one of the values.
    Selector(E),
    /// Every candidate completed, either with a value which did not satisfy the
    /// selector or with an error.
    Exhausted,
}

impl<E> Error<E> {
    /// Access the selector error, if this is [Error::Selector].
    pub fn into_selector(self) -> Option<E> {
        match self {
            Error::Selector(error) => Some(error),
            _ => None,
        }
    }
}

impl<E> fmt::Display for Error<E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "no candidates to pick from"),
            Error::Selector(error) => write!(f, "selector failed: {}", error),
            Error::Exhausted => write!(f, "all candidates completed without a match"),
        }
    }
}

impl<E> error::Error for Error<E>
where
    E: 'static + error::Error,
{
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Selector(error) => Some(error),
            _ => None,
        }
    }
}
