//! Warzone 2100 netplay message decoding.
//!
//! Messages carry a one-byte type code. The registry names every code in the
//! NET range (33..=72), the GAME range (111..=132) and the replay sentinel
//! (133). The parser gives a structured layout to the game messages that
//! matter for replay analysis: game time, structure info, research status,
//! droid orders, gifts, LasSat fire, player departures and debug mode.
//!
//! Decoding is total over the type-code space. Unregistered codes and
//! registered codes without a layout are returned as packets, not errors;
//! only a payload that ends before its layout is complete fails. Wire-format
//! constants live in `layout`, field access in `reader`.
//!
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod reader;
pub mod registry;

pub use error::DecodeError;
pub use model::Packet;
pub use parser::{Decoded, decode, decode_packet};
pub use registry::{PacketClass, classify, packet_name};
