//! Server envelope normalization.
//!
//! The back-office endpoints do not agree on a wrapper shape: some return
//! `{results, page, limit, totalPages, totalResults}` at the top level,
//! some nest the whole thing under `data`, and some keep the items under
//! `data.results`. [`normalize`] accepts any of the three and produces one
//! canonical [`Listing`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use teller_core::Pagination;

use crate::error::{Error, Result};

/// The canonical shape every envelope normalizes to.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Returns the server-supplied failure message when the envelope carries an
/// explicit `success: false` flag. Checked before [`normalize`] so an
/// application-level rejection is never misread as a malformed envelope.
pub fn application_failure(envelope: &Value) -> Option<String> {
    match envelope.get("success") {
        Some(Value::Bool(false)) => Some(
            envelope
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("request rejected by server")
                .to_string(),
        ),
        _ => None,
    }
}

/// Normalize a raw envelope into items plus a pagination summary.
///
/// `has_next`/`has_prev` are always recomputed from `page`/`totalPages`,
/// even when the server supplies its own flags. A missing items array or a
/// missing/mistyped pagination scalar is a malformed response.
pub fn normalize<T: DeserializeOwned>(envelope: &Value) -> Result<Listing<T>> {
    let (scope, raw_items) = locate_items(envelope)?;

    let page = scalar(scope, envelope, "page")?;
    let limit = scalar(scope, envelope, "limit")?;
    let total_pages = scalar(scope, envelope, "totalPages")?;
    let total_results = scalar_u64(scope, envelope, "totalResults")?;

    let mut items = Vec::with_capacity(raw_items.len());
    for raw in raw_items {
        let item = serde_json::from_value(raw.clone())
            .map_err(|e| Error::Malformed(format!("undecodable item: {e}")))?;
        items.push(item);
    }

    Ok(Listing {
        items,
        pagination: Pagination::from_server(page, limit, total_pages, total_results),
    })
}

/// Find the items array and the object the pagination scalars live next to.
fn locate_items(envelope: &Value) -> Result<(&Value, &Vec<Value>)> {
    if let Some(Value::Array(items)) = envelope.get("results") {
        return Ok((envelope, items));
    }
    match envelope.get("data") {
        Some(Value::Array(items)) => Ok((envelope, items)),
        Some(data @ Value::Object(_)) => match data.get("results") {
            Some(Value::Array(items)) => Ok((data, items)),
            _ => Err(Error::Malformed("no items array under `data`".into())),
        },
        _ => Err(Error::Malformed("no items array in envelope".into())),
    }
}

fn scalar(scope: &Value, root: &Value, key: &str) -> Result<u32> {
    let raw = scalar_u64(scope, root, key)?;
    u32::try_from(raw).map_err(|_| Error::Malformed(format!("`{key}` out of range")))
}

fn scalar_u64(scope: &Value, root: &Value, key: &str) -> Result<u64> {
    scope
        .get(key)
        .or_else(|| root.get(key))
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::Malformed(format!("missing or invalid `{key}`")))
}
