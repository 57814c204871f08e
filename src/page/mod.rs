//! Page output
//!
//! # Overview
//!
//! A [`Page`] carries the items of one window, the optional total, the
//! mode-specific navigation metadata ([`PageInfo`]), and whatever extra keys
//! the caller passed in as [`AdditionalData`]. It serializes flat:
//!
//! ```json
//! { "items": [...], "total": 25, "current_page": null,
//!   "next_page": "10", "previous_page": "prev_1", "request_id": "abc" }
//! ```

mod builder;
mod types;

pub use builder::build_page;
pub use types::{
    AdditionalData, Page, PageInfo, NEXT_PAGE_KEY, PREVIOUS_PAGE_KEY, RESERVED_KEYS,
};
