//! Transaction list adapter.

use jiff::Timestamp;
use once_cell::sync::Lazy;
use teller_core::Transaction;

use crate::filters::{merge_facet, push_facet, FacetSet, Filters};
use crate::resources::{facet_matches, search_matches, Resource};

/// Facets the transactions table exposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFacets {
    /// Processing status filter.
    pub status: Option<String>,
    /// Transaction kind filter (deposit, withdrawal, interest).
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFacetPatch {
    pub status: Option<Option<String>>,
    pub kind: Option<Option<String>>,
}

impl FacetSet for TransactionFacets {
    type Patch = TransactionFacetPatch;

    fn apply(&mut self, patch: &Self::Patch) -> bool {
        let status = merge_facet(&mut self.status, &patch.status);
        let kind = merge_facet(&mut self.kind, &patch.kind);
        status || kind
    }

    fn query_pairs(&self, out: &mut Vec<(&'static str, String)>) {
        push_facet(out, "status", &self.status);
        push_facet(out, "kind", &self.kind);
    }
}

pub struct Transactions;

impl Resource for Transactions {
    type Item = Transaction;
    type Facets = TransactionFacets;

    const BASE_PATH: &'static str = "/api/v1/transactions";
    const NAME: &'static str = "transactions";

    fn seed() -> &'static [Transaction] {
        &SEED
    }

    fn matches(item: &Transaction, filters: &Filters<TransactionFacets>) -> bool {
        search_matches(&filters.search, &[&item.reference, &item.investor_name])
            && facet_matches(&filters.facets.status, &item.status)
            && facet_matches(&filters.facets.kind, &item.kind)
    }
}

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

static SEED: Lazy<Vec<Transaction>> = Lazy::new(|| {
    vec![
        Transaction {
            id: "txn-9001".into(),
            investor_id: "inv-1001".into(),
            investor_name: "Asha Patel".into(),
            kind: "deposit".into(),
            amount: 5_000.00,
            status: "completed".into(),
            reference: "DEP-2025-0114".into(),
            created_at: ts("2025-01-14T10:02:00Z"),
        },
        Transaction {
            id: "txn-9002".into(),
            investor_id: "inv-1002".into(),
            investor_name: "Marcus Webb".into(),
            kind: "withdrawal".into(),
            amount: 1_200.00,
            status: "pending".into(),
            reference: "WDR-2025-0198".into(),
            created_at: ts("2025-02-03T16:45:00Z"),
        },
        Transaction {
            id: "txn-9003".into(),
            investor_id: "inv-1001".into(),
            investor_name: "Asha Patel".into(),
            kind: "interest".into(),
            amount: 312.40,
            status: "completed".into(),
            reference: "INT-2025-Q1-077".into(),
            created_at: ts("2025-03-31T00:10:00Z"),
        },
        Transaction {
            id: "txn-9004".into(),
            investor_id: "inv-1006".into(),
            investor_name: "Tomás Rivera".into(),
            kind: "deposit".into(),
            amount: 10_000.00,
            status: "completed".into(),
            reference: "DEP-2025-0231".into(),
            created_at: ts("2025-04-11T09:37:00Z"),
        },
        Transaction {
            id: "txn-9005".into(),
            investor_id: "inv-1004".into(),
            investor_name: "Dmitri Sokolov".into(),
            kind: "withdrawal".into(),
            amount: 2_500.00,
            status: "failed".into(),
            reference: "WDR-2025-0255".into(),
            created_at: ts("2025-04-29T14:20:00Z"),
        },
        Transaction {
            id: "txn-9006".into(),
            investor_id: "inv-1005".into(),
            investor_name: "Priya Patel".into(),
            kind: "deposit".into(),
            amount: 750.00,
            status: "completed".into(),
            reference: "DEP-2025-0260".into(),
            created_at: ts("2025-05-02T11:12:00Z"),
        },
        Transaction {
            id: "txn-9007".into(),
            investor_id: "inv-1002".into(),
            investor_name: "Marcus Webb".into(),
            kind: "interest".into(),
            amount: 98.15,
            status: "pending".into(),
            reference: "INT-2025-Q2-031".into(),
            created_at: ts("2025-06-30T00:05:00Z"),
        },
    ]
});
