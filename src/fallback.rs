//! Graceful degradation when the backend fails.
//!
//! Rather than leaving a table blank, a failed fetch substitutes the
//! resource's bounded seed dataset, re-applies the active filters
//! client-side, and reports a locally derived pagination summary. The
//! result is filter-consistent with what the operator asked for, just
//! sourced from stale local data. This can mask a real outage behind
//! populated rows; the error message that travels with the degraded state
//! is the only outage signal the view gets.

use teller_core::Pagination;

use crate::envelope::Listing;
use crate::filters::Filters;
use crate::resources::Resource;

/// Produce a degraded listing from the seed dataset.
///
/// Total function: any filter state yields a displayable result. The
/// requested page is clamped into the filtered set's page range so the
/// degraded view shows rows whenever anything matches; `total_results` is
/// always the filtered subset's real length.
pub fn degrade<R: Resource>(filters: &Filters<R::Facets>) -> Listing<R::Item> {
    let matched: Vec<&R::Item> = R::seed()
        .iter()
        .filter(|item| R::matches(item, filters))
        .collect();

    let total = matched.len() as u64;
    let limit = filters.limit.max(1);
    let total_pages = (total.div_ceil(limit as u64)) as u32;
    let page = filters.page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * limit) as usize;
    let items = matched
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect();

    Listing {
        items,
        pagination: Pagination::derive(total, page, limit),
    }
}
