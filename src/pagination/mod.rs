//! Pagination engine
//!
//! Supports: Limit-Offset, Cursor (keyset on a primary-key field)
//!
//! # Overview
//!
//! One call to [`Paginator::paginate`] runs four steps:
//!
//! 1. [`rewrite`] validates the params, decodes the cursor and derives the
//!    window query from a clone of the caller's query
//! 2. [`QueryDescriptor::fetch`](crate::query::QueryDescriptor::fetch) executes
//!    it against the [`DocumentSource`](crate::source::DocumentSource)
//! 3. [`assemble`] trims the lookahead, restores display order and derives the
//!    navigation tokens
//! 4. the items are decoded, passed through the transformer and wrapped in a
//!    [`Page`](crate::page::Page)
//!
//! Invalid cursors fail in step 1, so they never cost a round trip.

mod assemble;
mod engine;
mod rewrite;

pub use assemble::{apply_transformer, assemble, decode_items, Assembled, Navigation};
pub use engine::Paginator;
pub use rewrite::{keyset_filter, rewrite, Rewritten, WindowPlan};

#[cfg(test)]
mod tests;
