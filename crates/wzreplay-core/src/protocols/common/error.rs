use thiserror::Error;

/// Errors returned by primitive wire reads.
///
/// Note: this error type lives in an internal module; the example is
/// illustrative and not compiled as a public doctest.
///
/// # Examples
/// ```text
/// use wzreplay_core::protocols::common::error::WireError;
///
/// let err = WireError::ShortRead { offset: 3, needed: 2, available: 1 };
/// assert!(err.to_string().contains("short read"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("short read at offset {offset}: need {needed} bytes, {available} available")]
    ShortRead {
        offset: usize,
        needed: usize,
        available: usize,
    },
}
