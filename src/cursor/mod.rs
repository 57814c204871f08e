//! Cursor codec
//!
//! Encodes and decodes the opaque navigation tokens handed out by cursor pages.
//!
//! # Format
//!
//! A token is `[prev_]<key>`, where `<key>` is the canonical string form of the
//! primary key of a boundary item:
//! - `"10"` - continue forward, after key `10`
//! - `"prev_10"` - continue backward, before key `10`
//!
//! A token whose key part does not parse as the key type is rejected as a whole.

mod key;
mod types;

pub use key::CursorKey;
pub use types::{boundary_token, Cursor, Direction, BACKWARD_PREFIX};

#[cfg(test)]
mod tests;
