//! An Adaptive Radix Tree index over fixed-width 8-byte keys.
//!
//! The indexing core of a larger data-management system: an in-memory,
//! ordered map from byte keys of up to 8 bytes to `u64` values. Inner nodes
//! adapt their representation to their fan-out (4, 16, 48 or 256 children),
//! common byte runs are path-compressed into per-node prefixes, and
//! single-key paths stay unmaterialized until a second key diverges (lazy
//! expansion). The 16-wide class finds children with a byte-parallel SIMD
//! compare where the target supports it.
//!
//! ```rust
//! use art_index::{ArtIndex, Key, INVALID_VALUE};
//!
//! let mut index = ArtIndex::new();
//! index.insert(&Key::from(1u64), 10);
//! index.insert(&Key::from_slice(b"fooo0"), 20);
//!
//! assert_eq!(index.lookup(&Key::from(1u64)), 10);
//! assert_eq!(index.lookup(&Key::from_slice(b"fooo0")), 20);
//! assert_eq!(index.lookup(&Key::from(2u64)), INVALID_VALUE);
//! ```

pub mod key;
mod mapping;
pub mod node;
mod prefix;
pub mod stats;
pub mod tree;
mod utils;

#[cfg(test)]
mod proptests;

pub use key::{Key, INVALID_VALUE, MAX_KEY_LEN};
pub use tree::ArtIndex;
