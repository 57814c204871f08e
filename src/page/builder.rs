//! Page assembly

use super::types::{AdditionalData, Page, PageInfo, RESERVED_KEYS};
use crate::params::PaginationParams;
use crate::types::JsonObject;
use tracing::warn;

/// Combine transformed items, total, params and extra data into a page
pub fn build_page<T>(
    items: Vec<T>,
    total: Option<u64>,
    params: &PaginationParams,
    mut additional_data: AdditionalData,
) -> Page<T> {
    let info = match params {
        PaginationParams::LimitOffset(p) => {
            let limit = p.limit.max(1);
            PageInfo::LimitOffset {
                limit: p.limit,
                offset: p.offset,
                page: p.page(),
                size: p.limit,
                pages: total.map(|t| t.div_ceil(limit)),
            }
        }
        PaginationParams::Cursor(p) => {
            let (next_page, previous_page) = additional_data.take_navigation();
            PageInfo::Cursor {
                current_page: p.cursor.clone(),
                next_page,
                previous_page,
            }
        }
    };

    Page {
        items,
        total,
        info,
        extra: without_reserved(additional_data.into_inner()),
    }
}

fn without_reserved(mut extra: JsonObject) -> JsonObject {
    for key in RESERVED_KEYS {
        if extra.remove(*key).is_some() {
            warn!("Dropping additional data key '{}': it is a page field", key);
        }
    }
    extra
}
