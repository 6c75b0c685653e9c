//! Stats dictionaries and stat references.
//!
//! Packets identify components, research topics and structures by dense
//! index. `StatsCatalog` turns those indices back into names using the
//! game's per-category JSON files; `refs` decodes the tagged references
//! carried by build orders.

pub mod catalog;
pub mod category;
pub mod error;
pub mod refs;

pub use catalog::{StatEntry, StatsCatalog};
pub use category::{NameLookup, StatCategory};
pub use error::StatsError;
pub use refs::{StatKind, StatRef, StructureRef, decode_stat_ref, resolve_structure_ref};
