use std::fmt;

use serde::Serialize;

use super::error::ParseStep;

/// Non-fatal finding recorded while parsing a replay.
///
/// Message indices count framed messages from zero in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Type code outside every registered range; decoded as `Unknown`.
    UnknownPacketType {
        index: usize,
        sender: u8,
        type_code: u8,
    },
    /// Decoder finished before the declared payload length.
    TrailingBytes {
        index: usize,
        type_code: u8,
        trailing: usize,
    },
    /// Header or embedded map version differs from the supported one.
    VersionMismatch {
        step: ParseStep,
        found: i64,
        expected: i64,
    },
    InvariantViolation { index: usize, message: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownPacketType {
                index,
                sender,
                type_code,
            } => write!(
                f,
                "message {index}: unknown packet type {type_code} from player {sender}"
            ),
            Diagnostic::TrailingBytes {
                index,
                type_code,
                trailing,
            } => write!(
                f,
                "message {index}: {trailing} trailing bytes after packet type {type_code}"
            ),
            Diagnostic::VersionMismatch {
                step,
                found,
                expected,
            } => write!(f, "{step}: version {found}, expected {expected}"),
            Diagnostic::InvariantViolation { index, message } => {
                write!(f, "message {index}: {message}")
            }
        }
    }
}
