use thiserror::Error;

use crate::protocols::common::WireError;

/// Errors returned by packet decoding.
///
/// Unknown type codes and trailing bytes are not errors: the first decodes
/// to `Packet::Unknown`, the second is reported by `Decoded::trailing_bytes`.
///
/// # Examples
/// ```text
/// use wzreplay_core::protocols::netplay::error::DecodeError;
/// use wzreplay_core::protocols::common::WireError;
///
/// let err = DecodeError::Truncated {
///     type_code: 113,
///     field: "struct_id",
///     source: WireError::ShortRead { offset: 1, needed: 1, available: 0 },
/// };
/// assert!(err.to_string().contains("struct_id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("packet type {type_code} truncated while reading {field}: {source}")]
    Truncated {
        type_code: u8,
        field: &'static str,
        #[source]
        source: WireError,
    },
}

impl DecodeError {
    pub fn type_code(&self) -> u8 {
        match self {
            DecodeError::Truncated { type_code, .. } => *type_code,
        }
    }
}
