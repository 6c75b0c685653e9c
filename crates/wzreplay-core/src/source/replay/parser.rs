use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::protocols::netplay::{Decoded, Packet, decode_packet, layout as netplay_layout};
use crate::source::{MessageSource, RawMessage};

use super::diagnostic::Diagnostic;
use super::error::{ParseStep, ReplayError, ReplayErrorKind};
use super::layout;
use super::reader::StreamReader;
use super::settings::{EndChunk, ReplaySettings};

/// Caller-selected parse policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail on header or embedded map version mismatches instead of
    /// recording a diagnostic.
    pub strict_versions: bool,
}

/// A decoded message with the player slot that sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayMessage {
    pub sender: u8,
    /// Declared payload length in bytes.
    pub length: u32,
    pub packet: Packet,
}

/// A fully parsed replay.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    pub settings: ReplaySettings,
    pub embedded_map: Option<Vec<u8>>,
    /// Arrival order; the last entry is the end-of-replay sentinel.
    pub messages: Vec<ReplayMessage>,
    pub end: EndChunk,
    pub footer: u32,
    pub diagnostics: Vec<Diagnostic>,
}

impl Replay {
    /// Game time of the last `GameTime` packet in arrival order, in
    /// milliseconds.
    pub fn last_game_time(&self) -> Option<u32> {
        self.messages
            .iter()
            .rev()
            .find_map(|message| match &message.packet {
                Packet::GameTime(time) => Some(time.game_time),
                _ => None,
            })
    }
}

/// Everything a finished reader holds apart from the messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayTail {
    pub settings: ReplaySettings,
    pub embedded_map: Option<Vec<u8>>,
    pub end: EndChunk,
    pub footer: u32,
    pub diagnostics: Vec<Diagnostic>,
}

/// Streaming replay reader.
///
/// Construction consumes the magic, the JSON header and the embedded map.
/// `next_message` then yields framed messages up to and including the
/// sentinel, and `finish` reads the end chunk and footer.
///
/// # Examples
/// ```text
/// use wzreplay_core::source::replay::{ParseOptions, ReplayReader};
///
/// let mut reader = ReplayReader::new(file, &ParseOptions::default())?;
/// while let Some(message) = reader.next_message()? {
///     println!("{} from {}", message.type_code, message.sender);
/// }
/// let tail = reader.finish()?;
/// ```
pub struct ReplayReader<R> {
    stream: StreamReader<R>,
    settings: ReplaySettings,
    embedded_map: Option<Vec<u8>>,
    diagnostics: Vec<Diagnostic>,
    message_count: usize,
    reached_sentinel: bool,
}

impl<R: Read> ReplayReader<R> {
    pub fn new(inner: R, options: &ParseOptions) -> Result<Self, ReplayError> {
        let mut stream = StreamReader::new(inner);
        let mut diagnostics = Vec::new();

        read_magic(&mut stream).map_err(|kind| ReplayError::new(ParseStep::Magic, kind))?;
        let settings = read_settings(&mut stream, options, &mut diagnostics)
            .map_err(|kind| fail(ParseStep::Header, kind, &diagnostics))?;
        let embedded_map = read_embedded_map(&mut stream, options, &mut diagnostics)
            .map_err(|kind| fail(ParseStep::EmbeddedMap, kind, &diagnostics))?;

        Ok(Self {
            stream,
            settings,
            embedded_map,
            diagnostics,
            message_count: 0,
            reached_sentinel: false,
        })
    }

    pub fn settings(&self) -> &ReplaySettings {
        &self.settings
    }

    pub fn embedded_map(&self) -> Option<&[u8]> {
        self.embedded_map.as_deref()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of framed messages read so far, sentinel included.
    pub fn message_count(&self) -> usize {
        self.message_count
    }

    /// Read the next framed message.
    ///
    /// Returns the sentinel once, then `None` without touching the stream.
    pub fn next_message(&mut self) -> Result<Option<RawMessage>, ReplayError> {
        if self.reached_sentinel {
            return Ok(None);
        }
        let message = read_raw_message(&mut self.stream)
            .map_err(|kind| fail(ParseStep::MessageStream, kind, &self.diagnostics))?;
        debug!(
            index = self.message_count,
            sender = message.sender,
            type_code = message.type_code,
            length = message.length,
            "replay message"
        );
        self.message_count += 1;
        if message.type_code == netplay_layout::REPLAY_ENDED {
            self.reached_sentinel = true;
            info!(messages = self.message_count, "replay message stream ended");
        }
        Ok(Some(message))
    }

    /// Read the end chunk and footer.
    ///
    /// Messages not yet pulled with `next_message` are read and dropped
    /// first, so the sentinel must still be present.
    pub fn finish(mut self) -> Result<ReplayTail, ReplayError> {
        while self.next_message()?.is_some() {}

        let (end, footer) = read_end_chunk(&mut self.stream)
            .map_err(|kind| fail(ParseStep::EndChunk, kind, &self.diagnostics))?;
        debug!(footer, offset = self.stream.offset(), "replay end chunk read");

        Ok(ReplayTail {
            settings: self.settings,
            embedded_map: self.embedded_map,
            end,
            footer,
            diagnostics: self.diagnostics,
        })
    }

    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        warn!(%diagnostic, "replay diagnostic");
        self.diagnostics.push(diagnostic);
    }
}

impl<R: Read> MessageSource for ReplayReader<R> {
    fn next_message(&mut self) -> Result<Option<RawMessage>, ReplayError> {
        ReplayReader::next_message(self)
    }
}

/// Buffered replay file exposed as a [`MessageSource`].
pub struct ReplayFileSource {
    reader: ReplayReader<BufReader<File>>,
}

impl ReplayFileSource {
    pub fn open(path: &Path, options: &ParseOptions) -> Result<Self, ReplayError> {
        let file = File::open(path)
            .map_err(|err| ReplayError::new(ParseStep::Magic, ReplayErrorKind::Io(err)))?;
        let reader = ReplayReader::new(BufReader::new(file), options)?;
        Ok(Self { reader })
    }

    pub fn settings(&self) -> &ReplaySettings {
        self.reader.settings()
    }

    pub fn into_reader(self) -> ReplayReader<BufReader<File>> {
        self.reader
    }
}

impl MessageSource for ReplayFileSource {
    fn next_message(&mut self) -> Result<Option<RawMessage>, ReplayError> {
        self.reader.next_message()
    }
}

/// Parse a complete replay and decode every message.
///
/// The first fatal error aborts the parse. The returned error carries the
/// failing step, the messages decoded before it and the diagnostics so far.
/// Unknown packet types, trailing payload bytes and droid designs with too
/// many weapons are recorded as diagnostics.
///
/// # Examples
/// ```text
/// use wzreplay_core::source::replay::{read_replay, ParseOptions};
///
/// let replay = read_replay(std::fs::File::open("game.wzrp")?, &ParseOptions::default())?;
/// println!("{} messages", replay.messages.len());
/// ```
pub fn read_replay<R: Read>(inner: R, options: &ParseOptions) -> Result<Replay, ReplayError> {
    let mut reader = ReplayReader::new(inner, options)?;
    let mut messages = Vec::new();

    loop {
        let raw = match reader.next_message() {
            Ok(Some(raw)) => raw,
            Ok(None) => break,
            Err(err) => return Err(err.with_partial(messages)),
        };
        let index = messages.len();
        let decoded = match decode_packet(raw.type_code, &raw.payload) {
            Ok(decoded) => decoded,
            Err(source) => {
                let kind = ReplayErrorKind::Decode { index, source };
                return Err(fail(ParseStep::MessageStream, kind, reader.diagnostics())
                    .with_partial(messages));
            }
        };
        for diagnostic in inspect(index, &raw, &decoded) {
            reader.record(diagnostic);
        }
        messages.push(ReplayMessage {
            sender: raw.sender,
            length: raw.length,
            packet: decoded.packet,
        });
    }

    let tail = match reader.finish() {
        Ok(tail) => tail,
        Err(err) => return Err(err.with_partial(messages)),
    };
    info!(
        messages = messages.len(),
        diagnostics = tail.diagnostics.len(),
        "replay parsed"
    );

    Ok(Replay {
        settings: tail.settings,
        embedded_map: tail.embedded_map,
        messages,
        end: tail.end,
        footer: tail.footer,
        diagnostics: tail.diagnostics,
    })
}

fn inspect(index: usize, raw: &RawMessage, decoded: &Decoded) -> Vec<Diagnostic> {
    let mut found = Vec::new();
    if let Packet::Unknown { type_code } = decoded.packet {
        found.push(Diagnostic::UnknownPacketType {
            index,
            sender: raw.sender,
            type_code,
        });
    }
    if decoded.trailing_bytes > 0 {
        found.push(Diagnostic::TrailingBytes {
            index,
            type_code: raw.type_code,
            trailing: decoded.trailing_bytes,
        });
    }
    if let Packet::StructureInfo(info) = &decoded.packet {
        if let Some(droid) = &info.manufactured_droid {
            if droid.has_too_many_weapons() {
                found.push(Diagnostic::InvariantViolation {
                    index,
                    message: format!(
                        "droid design {:?} has {} weapons",
                        droid.name,
                        droid.weapons.len()
                    ),
                });
            }
        }
    }
    found
}

fn fail(step: ParseStep, kind: ReplayErrorKind, diagnostics: &[Diagnostic]) -> ReplayError {
    ReplayError::new(step, kind).with_diagnostics(diagnostics)
}

fn read_magic<R: Read>(stream: &mut StreamReader<R>) -> Result<(), ReplayErrorKind> {
    let found = stream.read_magic()?;
    if found != layout::MAGIC {
        return Err(ReplayErrorKind::BadMagic { found });
    }
    Ok(())
}

fn read_settings<R: Read>(
    stream: &mut StreamReader<R>,
    options: &ParseOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ReplaySettings, ReplayErrorKind> {
    let len = stream.read_be_u32()?;
    let body = stream.read_block(len)?;
    let settings: ReplaySettings = serde_json::from_slice(&body)
        .map_err(|source| ReplayErrorKind::MalformedJson {
            what: "header",
            source,
        })?;

    let found = settings.replay_format_version;
    if found != layout::HEADER_FORMAT_VERSION {
        if options.strict_versions {
            return Err(ReplayErrorKind::UnsupportedVersion {
                found,
                expected: layout::HEADER_FORMAT_VERSION,
            });
        }
        let diagnostic = Diagnostic::VersionMismatch {
            step: ParseStep::Header,
            found,
            expected: layout::HEADER_FORMAT_VERSION,
        };
        warn!(%diagnostic, "replay diagnostic");
        diagnostics.push(diagnostic);
    }
    info!(
        format_version = found,
        major = settings.major,
        minor = settings.minor,
        map = settings.map_name(),
        "replay header read"
    );
    Ok(settings)
}

fn read_embedded_map<R: Read>(
    stream: &mut StreamReader<R>,
    options: &ParseOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<Vec<u8>>, ReplayErrorKind> {
    let version = stream.read_be_u32()?;
    if version != layout::EMBEDDED_MAP_VERSION {
        if options.strict_versions {
            return Err(ReplayErrorKind::BadEmbeddedMapVersion {
                found: version,
                expected: layout::EMBEDDED_MAP_VERSION,
            });
        }
        let diagnostic = Diagnostic::VersionMismatch {
            step: ParseStep::EmbeddedMap,
            found: i64::from(version),
            expected: i64::from(layout::EMBEDDED_MAP_VERSION),
        };
        warn!(%diagnostic, "replay diagnostic");
        diagnostics.push(diagnostic);
    }

    let len = stream.read_be_u32()?;
    info!(bytes = len, "replay embedded map");
    if len == 0 {
        return Ok(None);
    }
    Ok(Some(stream.read_block(len)?))
}

fn read_raw_message<R: Read>(stream: &mut StreamReader<R>) -> Result<RawMessage, ReplayErrorKind> {
    let sender = stream.read_u8()?;
    let type_code = stream.read_u8()?;
    let length = stream.read_varint()?;
    let payload = stream.read_block(length)?;
    Ok(RawMessage {
        sender,
        type_code,
        length,
        payload,
    })
}

fn read_end_chunk<R: Read>(stream: &mut StreamReader<R>) -> Result<(EndChunk, u32), ReplayErrorKind> {
    let len = stream.read_be_u32()?;
    let body = stream.read_block(len)?;
    let end = serde_json::from_slice(&body).map_err(|source| ReplayErrorKind::MalformedJson {
        what: "end chunk",
        source,
    })?;
    let footer = stream.read_be_u32()?;
    Ok((end, footer))
}
