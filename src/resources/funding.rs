//! Add-funds request adapter.

use jiff::Timestamp;
use once_cell::sync::Lazy;
use teller_core::FundingRequest;

use crate::filters::{merge_facet, push_facet, FacetSet, Filters};
use crate::resources::{facet_matches, search_matches, Resource};

/// Facets the add-funds table exposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FundingFacets {
    /// Review status filter.
    pub status: Option<String>,
    /// Payment method filter (bank, card, crypto).
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FundingFacetPatch {
    pub status: Option<Option<String>>,
    pub method: Option<Option<String>>,
}

impl FacetSet for FundingFacets {
    type Patch = FundingFacetPatch;

    fn apply(&mut self, patch: &Self::Patch) -> bool {
        let status = merge_facet(&mut self.status, &patch.status);
        let method = merge_facet(&mut self.method, &patch.method);
        status || method
    }

    fn query_pairs(&self, out: &mut Vec<(&'static str, String)>) {
        push_facet(out, "status", &self.status);
        push_facet(out, "method", &self.method);
    }
}

pub struct FundingRequests;

impl Resource for FundingRequests {
    type Item = FundingRequest;
    type Facets = FundingFacets;

    const BASE_PATH: &'static str = "/api/v1/funding-requests";
    const NAME: &'static str = "add-funds requests";

    fn seed() -> &'static [FundingRequest] {
        &SEED
    }

    fn matches(item: &FundingRequest, filters: &Filters<FundingFacets>) -> bool {
        search_matches(&filters.search, &[&item.investor_name, &item.id])
            && facet_matches(&filters.facets.status, &item.status)
            && facet_matches(&filters.facets.method, &item.method)
    }
}

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

static SEED: Lazy<Vec<FundingRequest>> = Lazy::new(|| {
    vec![
        FundingRequest {
            id: "fund-501".into(),
            investor_id: "inv-1003".into(),
            investor_name: "Lena Okafor".into(),
            amount: 2_000.00,
            method: "bank".into(),
            status: "pending".into(),
            note: Some("First deposit after KYC".into()),
            requested_at: ts("2025-06-12T08:44:00Z"),
        },
        FundingRequest {
            id: "fund-502".into(),
            investor_id: "inv-1001".into(),
            investor_name: "Asha Patel".into(),
            amount: 7_500.00,
            method: "card".into(),
            status: "approved".into(),
            note: None,
            requested_at: ts("2025-06-15T19:03:00Z"),
        },
        FundingRequest {
            id: "fund-503".into(),
            investor_id: "inv-1007".into(),
            investor_name: "Hannah Birch".into(),
            amount: 500.00,
            method: "crypto".into(),
            status: "declined".into(),
            note: Some("Unsupported asset".into()),
            requested_at: ts("2025-07-01T21:37:00Z"),
        },
        FundingRequest {
            id: "fund-504".into(),
            investor_id: "inv-1006".into(),
            investor_name: "Tomás Rivera".into(),
            amount: 3_250.00,
            method: "bank".into(),
            status: "pending".into(),
            note: None,
            requested_at: ts("2025-07-18T07:29:00Z"),
        },
        FundingRequest {
            id: "fund-505".into(),
            investor_id: "inv-1005".into(),
            investor_name: "Priya Patel".into(),
            amount: 1_000.00,
            method: "card".into(),
            status: "approved".into(),
            note: Some("Recurring top-up".into()),
            requested_at: ts("2025-07-25T12:58:00Z"),
        },
    ]
});
