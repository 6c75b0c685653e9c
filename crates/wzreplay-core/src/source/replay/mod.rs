//! Warzone 2100 replay container (`.wzrp`).
//!
//! A replay is a fixed sequence of sections: the `WZrp` magic, a
//! length-prefixed JSON header, a versioned embedded map blob, the framed
//! message stream closed by the sentinel, a length-prefixed JSON end chunk
//! and a 4-byte footer. The parser walks these in order and never goes back.
//!
//! Fatal conditions end the parse with a `ReplayError` naming the step and
//! carrying the messages decoded so far. Non-fatal findings are collected as
//! `Diagnostic`s on the result.

pub mod diagnostic;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod settings;

pub use diagnostic::Diagnostic;
pub use error::{ParseStep, ReplayError, ReplayErrorKind};
pub use parser::{
    ParseOptions, Replay, ReplayFileSource, ReplayMessage, ReplayReader, ReplayTail, read_replay,
};
pub use settings::{EndChunk, PlayerSlot, ReplaySettings};
