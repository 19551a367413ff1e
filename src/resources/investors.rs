//! Investor list adapter.

use jiff::Timestamp;
use once_cell::sync::Lazy;
use teller_core::Investor;

use crate::filters::{merge_facet, push_facet, FacetSet, Filters};
use crate::resources::{facet_matches, search_matches, Resource};

/// Facets the investors table exposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvestorFacets {
    /// Account status filter.
    pub status: Option<String>,
    /// Investment plan filter.
    pub plan: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InvestorFacetPatch {
    pub status: Option<Option<String>>,
    pub plan: Option<Option<String>>,
}

impl FacetSet for InvestorFacets {
    type Patch = InvestorFacetPatch;

    fn apply(&mut self, patch: &Self::Patch) -> bool {
        let status = merge_facet(&mut self.status, &patch.status);
        let plan = merge_facet(&mut self.plan, &patch.plan);
        status || plan
    }

    fn query_pairs(&self, out: &mut Vec<(&'static str, String)>) {
        push_facet(out, "status", &self.status);
        push_facet(out, "plan", &self.plan);
    }
}

pub struct Investors;

impl Resource for Investors {
    type Item = Investor;
    type Facets = InvestorFacets;

    const BASE_PATH: &'static str = "/api/v1/investors";
    const NAME: &'static str = "investors";

    fn seed() -> &'static [Investor] {
        &SEED
    }

    fn matches(item: &Investor, filters: &Filters<InvestorFacets>) -> bool {
        search_matches(&filters.search, &[&item.name, &item.email])
            && facet_matches(&filters.facets.status, &item.status)
            && facet_matches(&filters.facets.plan, item.plan.as_deref().unwrap_or(""))
    }
}

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

static SEED: Lazy<Vec<Investor>> = Lazy::new(|| {
    vec![
        Investor {
            id: "inv-1001".into(),
            name: "Asha Patel".into(),
            email: "asha.patel@example.com".into(),
            status: "active".into(),
            plan: Some("growth".into()),
            balance: 48_250.00,
            joined_at: ts("2024-03-11T09:14:00Z"),
            referral_code: Some("ASHA10".into()),
        },
        Investor {
            id: "inv-1002".into(),
            name: "Marcus Webb".into(),
            email: "m.webb@example.com".into(),
            status: "active".into(),
            plan: Some("income".into()),
            balance: 12_900.50,
            joined_at: ts("2024-06-02T15:40:00Z"),
            referral_code: None,
        },
        Investor {
            id: "inv-1003".into(),
            name: "Lena Okafor".into(),
            email: "lena.okafor@example.com".into(),
            status: "pending".into(),
            plan: None,
            balance: 0.0,
            joined_at: ts("2025-01-19T11:05:00Z"),
            referral_code: Some("MWEBB5".into()),
        },
        Investor {
            id: "inv-1004".into(),
            name: "Dmitri Sokolov".into(),
            email: "d.sokolov@example.com".into(),
            status: "suspended".into(),
            plan: Some("growth".into()),
            balance: 7_340.75,
            joined_at: ts("2023-11-27T08:22:00Z"),
            referral_code: None,
        },
        Investor {
            id: "inv-1005".into(),
            name: "Priya Patel".into(),
            email: "priya.p@example.com".into(),
            status: "active".into(),
            plan: Some("starter".into()),
            balance: 3_125.00,
            joined_at: ts("2025-04-08T17:55:00Z"),
            referral_code: Some("ASHA10".into()),
        },
        Investor {
            id: "inv-1006".into(),
            name: "Tomás Rivera".into(),
            email: "tomas.rivera@example.com".into(),
            status: "active".into(),
            plan: Some("income".into()),
            balance: 21_600.00,
            joined_at: ts("2024-09-14T12:31:00Z"),
            referral_code: None,
        },
        Investor {
            id: "inv-1007".into(),
            name: "Hannah Birch".into(),
            email: "h.birch@example.com".into(),
            status: "pending".into(),
            plan: Some("starter".into()),
            balance: 500.00,
            joined_at: ts("2025-06-30T10:09:00Z"),
            referral_code: None,
        },
    ]
});
