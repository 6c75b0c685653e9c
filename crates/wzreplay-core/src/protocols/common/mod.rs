//! Primitives shared by every decoder: the varint codec, a bounded
//! sequential reader, and the short-read error they report.

pub mod error;
pub mod reader;
pub mod varint;

pub use error::WireError;
pub use reader::WireReader;
