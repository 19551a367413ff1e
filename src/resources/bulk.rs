//! Bulk transaction batch adapter.

use jiff::Timestamp;
use once_cell::sync::Lazy;
use teller_core::BulkTransaction;

use crate::filters::{merge_facet, push_facet, FacetSet, Filters};
use crate::resources::{facet_matches, search_matches, Resource};

/// Facets the bulk batches table exposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkFacets {
    /// Batch status filter.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BulkFacetPatch {
    pub status: Option<Option<String>>,
}

impl FacetSet for BulkFacets {
    type Patch = BulkFacetPatch;

    fn apply(&mut self, patch: &Self::Patch) -> bool {
        merge_facet(&mut self.status, &patch.status)
    }

    fn query_pairs(&self, out: &mut Vec<(&'static str, String)>) {
        push_facet(out, "status", &self.status);
    }
}

pub struct BulkTransactions;

impl Resource for BulkTransactions {
    type Item = BulkTransaction;
    type Facets = BulkFacets;

    const BASE_PATH: &'static str = "/api/v1/bulk-transactions";
    const NAME: &'static str = "bulk transactions";

    fn seed() -> &'static [BulkTransaction] {
        &SEED
    }

    fn matches(item: &BulkTransaction, filters: &Filters<BulkFacets>) -> bool {
        search_matches(&filters.search, &[&item.label, &item.initiated_by])
            && facet_matches(&filters.facets.status, &item.status)
    }
}

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

static SEED: Lazy<Vec<BulkTransaction>> = Lazy::new(|| {
    vec![
        BulkTransaction {
            id: "blk-301".into(),
            label: "Q1 interest run".into(),
            entries: 412,
            total_amount: 18_407.22,
            status: "applied".into(),
            initiated_by: "ops.daniela".into(),
            created_at: ts("2025-04-01T02:00:00Z"),
        },
        BulkTransaction {
            id: "blk-302".into(),
            label: "Starter plan migration".into(),
            entries: 58,
            total_amount: 0.0,
            status: "applied".into(),
            initiated_by: "ops.daniela".into(),
            created_at: ts("2025-04-17T13:26:00Z"),
        },
        BulkTransaction {
            id: "blk-303".into(),
            label: "Q2 interest run".into(),
            entries: 437,
            total_amount: 19_880.10,
            status: "pending".into(),
            initiated_by: "ops.kwame".into(),
            created_at: ts("2025-07-01T02:00:00Z"),
        },
        BulkTransaction {
            id: "blk-304".into(),
            label: "Dormancy fee reversal".into(),
            entries: 12,
            total_amount: 144.00,
            status: "rejected".into(),
            initiated_by: "ops.kwame".into(),
            created_at: ts("2025-07-09T10:51:00Z"),
        },
        BulkTransaction {
            id: "blk-305".into(),
            label: "Promo bonus credit".into(),
            entries: 203,
            total_amount: 5_075.00,
            status: "pending".into(),
            initiated_by: "ops.daniela".into(),
            created_at: ts("2025-07-22T09:18:00Z"),
        },
    ]
});
