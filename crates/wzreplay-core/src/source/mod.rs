//! Input sources.
//!
//! A source frames raw messages out of a byte stream without decoding their
//! payloads; decoding happens in `protocols::netplay`.

pub mod replay;

pub use replay::{ReplayError, ReplayFileSource, ReplayReader, read_replay};

/// One framed message, payload still encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub sender: u8,
    pub type_code: u8,
    /// Declared payload length; always equals `payload.len()`.
    pub length: u32,
    pub payload: Vec<u8>,
}

pub trait MessageSource {
    fn next_message(&mut self) -> Result<Option<RawMessage>, ReplayError>;
}
