//! Referral tracking adapter.

use jiff::Timestamp;
use once_cell::sync::Lazy;
use teller_core::Referral;

use crate::filters::{merge_facet, push_facet, FacetSet, Filters};
use crate::resources::{facet_matches, search_matches, Resource};

/// Facets the referrals table exposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferralFacets {
    /// Referral status filter.
    pub status: Option<String>,
    /// Referral depth filter (1 = direct).
    pub level: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct ReferralFacetPatch {
    pub status: Option<Option<String>>,
    pub level: Option<Option<u32>>,
}

impl FacetSet for ReferralFacets {
    type Patch = ReferralFacetPatch;

    fn apply(&mut self, patch: &Self::Patch) -> bool {
        let status = merge_facet(&mut self.status, &patch.status);
        let level = merge_facet(&mut self.level, &patch.level);
        status || level
    }

    fn query_pairs(&self, out: &mut Vec<(&'static str, String)>) {
        push_facet(out, "status", &self.status);
        if let Some(level) = self.level {
            out.push(("level", level.to_string()));
        }
    }
}

pub struct Referrals;

impl Resource for Referrals {
    type Item = Referral;
    type Facets = ReferralFacets;

    const BASE_PATH: &'static str = "/api/v1/referrals";
    const NAME: &'static str = "referrals";

    fn seed() -> &'static [Referral] {
        &SEED
    }

    fn matches(item: &Referral, filters: &Filters<ReferralFacets>) -> bool {
        search_matches(
            &filters.search,
            &[&item.referrer_name, &item.referee_name, &item.referee_email],
        ) && facet_matches(&filters.facets.status, &item.status)
            && filters.facets.level.map_or(true, |l| l == item.level)
    }
}

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

static SEED: Lazy<Vec<Referral>> = Lazy::new(|| {
    vec![
        Referral {
            id: "ref-701".into(),
            referrer_name: "Asha Patel".into(),
            referee_name: "Priya Patel".into(),
            referee_email: "priya.p@example.com".into(),
            level: 1,
            bonus: 50.00,
            status: "credited".into(),
            created_at: ts("2025-04-08T18:00:00Z"),
        },
        Referral {
            id: "ref-702".into(),
            referrer_name: "Marcus Webb".into(),
            referee_name: "Lena Okafor".into(),
            referee_email: "lena.okafor@example.com".into(),
            level: 1,
            bonus: 50.00,
            status: "pending".into(),
            created_at: ts("2025-01-19T11:20:00Z"),
        },
        Referral {
            id: "ref-703".into(),
            referrer_name: "Asha Patel".into(),
            referee_name: "Hannah Birch".into(),
            referee_email: "h.birch@example.com".into(),
            level: 2,
            bonus: 20.00,
            status: "pending".into(),
            created_at: ts("2025-06-30T10:30:00Z"),
        },
        Referral {
            id: "ref-704".into(),
            referrer_name: "Tomás Rivera".into(),
            referee_name: "Noor Haddad".into(),
            referee_email: "n.haddad@example.com".into(),
            level: 1,
            bonus: 50.00,
            status: "credited".into(),
            created_at: ts("2025-05-21T15:47:00Z"),
        },
        Referral {
            id: "ref-705".into(),
            referrer_name: "Priya Patel".into(),
            referee_name: "Jon Aldous".into(),
            referee_email: "j.aldous@example.com".into(),
            level: 2,
            bonus: 20.00,
            status: "pending".into(),
            created_at: ts("2025-07-03T09:02:00Z"),
        },
    ]
});
