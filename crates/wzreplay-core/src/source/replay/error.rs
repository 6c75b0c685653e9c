use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::protocols::netplay::DecodeError;

use super::diagnostic::Diagnostic;
use super::parser::ReplayMessage;

/// Container state in which a parse failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStep {
    Magic,
    Header,
    EmbeddedMap,
    MessageStream,
    EndChunk,
}

impl fmt::Display for ParseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseStep::Magic => "magic",
            ParseStep::Header => "header",
            ParseStep::EmbeddedMap => "embedded map",
            ParseStep::MessageStream => "message stream",
            ParseStep::EndChunk => "end chunk",
        };
        f.write_str(name)
    }
}

/// Fatal container conditions.
#[derive(Debug, Error)]
pub enum ReplayErrorKind {
    #[error("unexpected end of input at byte {offset}: need {needed} bytes, {available} available")]
    ShortRead {
        offset: u64,
        needed: u64,
        available: u64,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad magic {found:02x?}, expected \"WZrp\"")]
    BadMagic { found: [u8; 4] },
    #[error("unsupported replay format version {found}, expected {expected}")]
    UnsupportedVersion { found: i64, expected: i64 },
    #[error("unsupported embedded map version {found}, expected {expected}")]
    BadEmbeddedMapVersion { found: u32, expected: u32 },
    #[error("malformed {what} JSON: {source}")]
    MalformedJson {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("message {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: DecodeError,
    },
}

impl ReplayErrorKind {
    /// True when the input ended early, either at the container level or
    /// inside a packet payload.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            ReplayErrorKind::ShortRead { .. } | ReplayErrorKind::Decode { .. }
        )
    }
}

/// A failed parse: the step, the cause, and everything decoded before it.
///
/// `partial` holds the messages appended before the failure, in arrival
/// order. `diagnostics` holds the non-fatal findings recorded so far.
///
/// # Examples
/// ```text
/// use wzreplay_core::source::replay::{read_replay, ParseOptions, ParseStep};
///
/// let err = read_replay(&b"NOPE"[..], &ParseOptions::default()).unwrap_err();
/// assert_eq!(err.step, ParseStep::Magic);
/// assert!(err.partial.is_empty());
/// ```
#[derive(Debug, Error)]
#[error("replay parse failed in {step}: {kind}")]
pub struct ReplayError {
    pub step: ParseStep,
    pub kind: ReplayErrorKind,
    pub partial: Vec<ReplayMessage>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ReplayError {
    pub fn new(step: ParseStep, kind: ReplayErrorKind) -> Self {
        Self {
            step,
            kind,
            partial: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn with_diagnostics(mut self, diagnostics: &[Diagnostic]) -> Self {
        self.diagnostics = diagnostics.to_vec();
        self
    }

    pub(crate) fn with_partial(mut self, partial: Vec<ReplayMessage>) -> Self {
        self.partial = partial;
        self
    }
}
