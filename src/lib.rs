//! List-query engine for the meridian investment back office.
//!
//! Every admin table (investors, transactions, bulk transactions,
//! add-funds requests, referrals) is fed by the same generic
//! [`ListController`]: a mutable filter set in, a debounced,
//! generation-tagged, degrade-gracefully data feed out.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use teller::resources::Investors;
//! use teller::{Config, FilterPatch, HttpSource, ListController};
//!
//! let config = Config::default();
//! let source = Arc::new(HttpSource::from_config(&config)?);
//! let investors: ListController<Investors> = ListController::new(source, &config);
//!
//! // Debounced free-text search; resets to page 1.
//! investors.set_search("patel");
//!
//! // Immediate filter changes.
//! investors.set_filters(FilterPatch::page(2));
//!
//! // The view reads one state snapshot, even when the backend is down:
//! let state = investors.state();
//! for row in &state.items {
//!     println!("{} <{}>", row.name, row.email);
//! }
//! ```

pub mod config;
pub mod controller;
pub mod debounce;
pub mod envelope;
pub mod error;
pub mod fallback;
pub mod filters;
pub mod resources;
pub mod source;

pub use config::Config;
pub use controller::{ListController, ListState, Notice, NoticeKind, Phase};
pub use envelope::Listing;
pub use error::{Error, Result};
pub use filters::{FacetSet, FilterPatch, Filters};
pub use source::{HttpSource, Source};
