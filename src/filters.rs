//! Filter state for list queries.
//!
//! Every list view is driven by a [`Filters`] value: the pagination cursor,
//! the page size, the free-text search string, and a resource-specific
//! [`FacetSet`]. Updates go through [`Filters::apply`], which implements the
//! merge semantics the tables rely on: touching anything other than `page`
//! starts a fresh result set on page 1.

/// Resource-specific facet filters (status codes, categories, methods).
///
/// Facets are structurally uniform across resources: optional scalars that
/// are serialized into the outbound query when present and omitted entirely
/// when absent.
pub trait FacetSet: Clone + Default + PartialEq + Send + Sync + 'static {
    /// Partial update; fields left at `None` keep their current value.
    type Patch: std::fmt::Debug + Clone + Default + Send;

    /// Merge `patch` into `self`. Returns true when any facet changed value.
    fn apply(&mut self, patch: &Self::Patch) -> bool;

    /// Append defined, non-empty facets as query parameters.
    fn query_pairs(&self, out: &mut Vec<(&'static str, String)>);
}

/// Facet set for resources with no extra filters.
impl FacetSet for () {
    type Patch = ();

    fn apply(&mut self, _patch: &()) -> bool {
        false
    }

    fn query_pairs(&self, _out: &mut Vec<(&'static str, String)>) {}
}

/// The full filter state of one list view.
#[derive(Debug, Clone, PartialEq)]
pub struct Filters<F: FacetSet> {
    /// Current page (1-indexed).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Free-text search string. Empty means no search.
    pub search: String,
    /// Resource-specific facets.
    pub facets: F,
}

impl<F: FacetSet> Filters<F> {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            search: String::new(),
            facets: F::default(),
        }
    }

    /// Merge `patch` into the current filters.
    ///
    /// If the patch does not set `page` explicitly and any other key changes
    /// value, `page` resets to 1: a new filter combination starts a fresh
    /// result set. Out-of-range `page`/`limit` values are not rejected here;
    /// they are clamped at the points of use.
    pub fn apply(&mut self, patch: &FilterPatch<F>) {
        let mut other_changed = false;

        if let Some(limit) = patch.limit {
            if limit != self.limit {
                other_changed = true;
            }
            self.limit = limit;
        }
        if let Some(search) = &patch.search {
            if *search != self.search {
                other_changed = true;
            }
            self.search = search.clone();
        }
        if self.facets.apply(&patch.facets) {
            other_changed = true;
        }

        match patch.page {
            Some(page) => self.page = page,
            None if other_changed => self.page = 1,
            None => {}
        }
    }

    /// Serialize into outbound query parameters.
    ///
    /// `page` and `limit` are always included (clamped to at least 1);
    /// `search` is always included, even when empty, so the request shape
    /// stays uniform. Facets appear only when set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("page", self.page.max(1).to_string()),
            ("limit", self.limit.max(1).to_string()),
            ("search", self.search.clone()),
        ];
        self.facets.query_pairs(&mut out);
        out
    }
}

/// A partial filter update, merged via [`Filters::apply`].
#[derive(Debug, Clone)]
pub struct FilterPatch<F: FacetSet> {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub facets: F::Patch,
}

impl<F: FacetSet> Default for FilterPatch<F> {
    fn default() -> Self {
        Self {
            page: None,
            limit: None,
            search: None,
            facets: F::Patch::default(),
        }
    }
}

impl<F: FacetSet> FilterPatch<F> {
    /// Patch that moves to `page` and changes nothing else.
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    /// Patch that changes the page size.
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// Patch that replaces the search string.
    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Default::default()
        }
    }

    /// Patch that updates resource facets.
    pub fn facets(facets: F::Patch) -> Self {
        Self {
            facets,
            ..Default::default()
        }
    }
}

/// Merge one tri-state facet field (`None` = leave alone, `Some(None)` =
/// clear, `Some(Some(v))` = set). Returns true when the value changed.
pub(crate) fn merge_facet<T: PartialEq + Clone>(
    slot: &mut Option<T>,
    patch: &Option<Option<T>>,
) -> bool {
    match patch {
        Some(next) if *slot != *next => {
            *slot = next.clone();
            true
        }
        _ => false,
    }
}

/// Append a string facet as a query parameter when it is set and non-empty.
pub(crate) fn push_facet(
    out: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: &Option<String>,
) {
    if let Some(v) = value {
        if !v.is_empty() {
            out.push((key, v.clone()));
        }
    }
}
