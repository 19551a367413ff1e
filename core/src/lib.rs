//! Core wire types for the meridian back-office API.
//!
//! This crate provides the data types shared by the teller list controller
//! and anything that speaks the back-office wire format (including the test
//! backend).
//!
//! # Overview
//!
//! The main types are:
//!
//! - [`Pagination`] - The canonical pagination summary every list view shows
//! - [`Investor`] - An investor record
//! - [`Transaction`] - A single ledger transaction
//! - [`BulkTransaction`] - A bulk transaction batch
//! - [`FundingRequest`] - An add-funds request awaiting review
//! - [`Referral`] - A referral tracking entry
//!
//! All record types serialize with camelCase field names, matching the JSON
//! the platform API emits.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Pagination summary for a list view.
///
/// The two constructors correspond to the two ways a summary comes into
/// existence: [`Pagination::from_server`] takes the four scalars the API
/// reports verbatim, while [`Pagination::derive`] computes `total_pages`
/// locally as `ceil(total_results / limit)`. `has_next` and `has_prev` are
/// always recomputed from `current_page` and `total_pages`, never trusted
/// from the wire.
///
/// # Example
///
/// ```
/// use teller_core::Pagination;
///
/// let p = Pagination::derive(45, 2, 20);
/// assert_eq!(p.total_pages, 3);
/// assert!(p.has_next);
/// assert!(p.has_prev);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-indexed).
    pub current_page: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results across all pages.
    pub total_results: u64,
    /// Number of items per page.
    pub limit: u32,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

impl Pagination {
    /// Builds a summary from locally known totals.
    ///
    /// `limit` is clamped to at least 1 before the division.
    pub fn derive(total_results: u64, current_page: u32, limit: u32) -> Self {
        let limit = limit.max(1);
        let total_pages = (total_results.div_ceil(limit as u64)) as u32;
        Self::from_server(current_page, limit, total_pages, total_results)
    }

    /// Builds a summary from the four scalars a server envelope reports.
    ///
    /// The page counts are taken verbatim; only the `has_next`/`has_prev`
    /// flags are computed here.
    pub fn from_server(page: u32, limit: u32, total_pages: u32, total_results: u64) -> Self {
        Self {
            current_page: page,
            total_pages,
            total_results,
            limit,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// An investor record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    /// Unique investor identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Account status (e.g. `"active"`, `"suspended"`, `"pending"`).
    pub status: String,
    /// Investment plan the investor is enrolled in, if any.
    #[serde(default)]
    pub plan: Option<String>,
    /// Current account balance.
    pub balance: f64,
    /// When the account was created.
    pub joined_at: Timestamp,
    /// Referral code this investor signed up with, if any.
    #[serde(default)]
    pub referral_code: Option<String>,
}

/// A single ledger transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier.
    pub id: String,
    /// Owning investor's identifier.
    pub investor_id: String,
    /// Owning investor's display name.
    pub investor_name: String,
    /// Transaction kind (e.g. `"deposit"`, `"withdrawal"`, `"interest"`).
    pub kind: String,
    /// Transaction amount.
    pub amount: f64,
    /// Processing status (e.g. `"completed"`, `"pending"`, `"failed"`).
    pub status: String,
    /// Human-readable reference string.
    pub reference: String,
    /// When the transaction was recorded.
    pub created_at: Timestamp,
}

/// A bulk transaction batch.
///
/// Bulk batches group many individual postings (interest runs, plan
/// migrations) under one reviewable unit; the list view shows the batch,
/// not its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTransaction {
    /// Unique batch identifier.
    pub id: String,
    /// Operator-facing batch label.
    pub label: String,
    /// Number of postings in the batch.
    pub entries: u32,
    /// Sum of all posting amounts.
    pub total_amount: f64,
    /// Batch status (e.g. `"applied"`, `"pending"`, `"rejected"`).
    pub status: String,
    /// Operator who initiated the batch.
    pub initiated_by: String,
    /// When the batch was created.
    pub created_at: Timestamp,
}

/// An add-funds request awaiting review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRequest {
    /// Unique request identifier.
    pub id: String,
    /// Requesting investor's identifier.
    pub investor_id: String,
    /// Requesting investor's display name.
    pub investor_name: String,
    /// Requested amount.
    pub amount: f64,
    /// Payment method (e.g. `"bank"`, `"card"`, `"crypto"`).
    pub method: String,
    /// Review status (e.g. `"approved"`, `"pending"`, `"declined"`).
    pub status: String,
    /// Free-form note from the investor, if any.
    #[serde(default)]
    pub note: Option<String>,
    /// When the request was submitted.
    pub requested_at: Timestamp,
}

/// A referral tracking entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    /// Unique referral identifier.
    pub id: String,
    /// Referring investor's display name.
    pub referrer_name: String,
    /// Referred investor's display name.
    pub referee_name: String,
    /// Referred investor's email address.
    pub referee_email: String,
    /// Referral depth (1 = direct).
    pub level: u32,
    /// Bonus credited for this referral.
    pub bonus: f64,
    /// Referral status (e.g. `"credited"`, `"pending"`).
    pub status: String,
    /// When the referral was registered.
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn derive_rounds_up() {
        let p = Pagination::derive(41, 1, 20);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.total_results, 41);
    }

    #[test]
    fn derive_empty_set_has_no_pages() {
        let p = Pagination::derive(0, 1, 20);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn from_server_recomputes_flags() {
        let p = Pagination::from_server(3, 10, 5, 42);
        assert!(p.has_next);
        assert!(p.has_prev);

        let first = Pagination::from_server(1, 10, 5, 42);
        assert!(!first.has_prev);
        let last = Pagination::from_server(5, 10, 5, 42);
        assert!(!last.has_next);
    }

    proptest! {
        #[test]
        fn derive_arithmetic_holds(total in 0u64..100_000, page in 1u32..500, limit in 1u32..500) {
            let p = Pagination::derive(total, page, limit);
            prop_assert_eq!(p.total_pages as u64, total.div_ceil(limit as u64));
            prop_assert_eq!(p.has_next, page < p.total_pages);
            prop_assert_eq!(p.has_prev, page > 1);
        }
    }
}
