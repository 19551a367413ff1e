//! Per-resource adapters.
//!
//! Every back-office table is one implementation of [`Resource`]: the base
//! path of its list endpoint, its facet set, and the predicates the server
//! applies (re-applied client-side on the fallback path). The controller is
//! generic over this trait; nothing resource-specific leaks into it.

use serde::de::DeserializeOwned;

use crate::filters::{FacetSet, Filters};

pub mod bulk;
pub mod funding;
pub mod investors;
pub mod referrals;
pub mod transactions;

pub use bulk::BulkTransactions;
pub use funding::FundingRequests;
pub use investors::Investors;
pub use referrals::Referrals;
pub use transactions::Transactions;

/// A listable back-office resource.
pub trait Resource: Send + Sync + 'static {
    /// The record type rows decode into.
    type Item: Clone + PartialEq + DeserializeOwned + Send + Sync + 'static;
    /// The resource-specific facet filters.
    type Facets: FacetSet;

    /// Base path of the list endpoint, e.g. `"/api/v1/investors"`.
    const BASE_PATH: &'static str;
    /// Short name used in logs and notices.
    const NAME: &'static str;

    /// Bounded local dataset substituted when the backend fails.
    fn seed() -> &'static [Self::Item];

    /// The filter predicate the server applies: substring match against the
    /// record's text fields for `search`, equality for facets.
    fn matches(item: &Self::Item, filters: &Filters<Self::Facets>) -> bool;
}

/// Case-insensitive substring match across a record's searchable fields.
/// An empty needle matches everything.
pub(crate) fn search_matches(needle: &str, haystacks: &[&str]) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
}

/// Equality match for one facet; an unset or empty facet matches everything.
pub(crate) fn facet_matches(facet: &Option<String>, value: &str) -> bool {
    match facet {
        Some(f) if !f.is_empty() => f.eq_ignore_ascii_case(value),
        _ => true,
    }
}
