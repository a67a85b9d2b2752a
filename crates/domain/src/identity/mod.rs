//! Stable identities for entries of a mutating tree.
//!
//! Callers address children by opaque identifiers; adapters translate them to
//! live positions in the backing arrays.

mod index;
mod map;

pub use index::{EntryIndex, IndexRegistry};
pub use map::{IdentityMap, IndexShiftingMap};
