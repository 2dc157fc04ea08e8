//! Search orchestration: keyword, facet selection and shared result state.
//!
//! [`SearchOrchestrator`] owns the current keyword, the selected facets and the
//! observable streams the view subscribes to. A search only produces an
//! [`OutboundRequest`]; the response is fed back through
//! [`SearchOrchestrator::on_response`] or [`SearchOrchestrator::on_timeout`].
//!
//! Every search bumps a generation counter. Only the response for the latest
//! generation commits to shared state, so an out-of-order stale response cannot
//! overwrite a newer one.

use super::adapter::adapt_response;
use super::backend::Backend;
use super::observable::Observable;
use super::request::{OutboundRequest, RequestKind, RequestTicket};
use crate::domain::error::{ApidexError, Result};
use crate::domain::{
    EntriesResponse, FacetGroup, ResultEntry, SearchResultMeta, SelectedFacet, SelectedFacets,
};

/// Owner of the search state shared with the view.
#[derive(Debug)]
pub struct SearchOrchestrator {
    backend: Backend,
    keyword: String,
    selected: SelectedFacets,
    generation: u64,
    issued_at_ms: i64,
    facets: Observable<Vec<FacetGroup>>,
    results: Observable<Vec<ResultEntry>>,
    meta: Observable<SearchResultMeta>,
    loading: Observable<bool>,
    error: Observable<Option<String>>,
}

impl SearchOrchestrator {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            keyword: String::new(),
            selected: SelectedFacets::new(),
            generation: 0,
            issued_at_ms: 0,
            facets: Observable::new(vec![]),
            results: Observable::new(vec![]),
            meta: Observable::new(SearchResultMeta::initial()),
            loading: Observable::new(false),
            error: Observable::new(None),
        }
    }

    #[must_use]
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// The keyword of the latest search; empty before the first one.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub fn selected_facets(&self) -> &SelectedFacets {
        &self.selected
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn facets(&self) -> &Observable<Vec<FacetGroup>> {
        &self.facets
    }

    pub const fn results(&self) -> &Observable<Vec<ResultEntry>> {
        &self.results
    }

    pub const fn meta(&self) -> &Observable<SearchResultMeta> {
        &self.meta
    }

    pub const fn loading(&self) -> &Observable<bool> {
        &self.loading
    }

    pub const fn error(&self) -> &Observable<Option<String>> {
        &self.error
    }

    /// Adds the facet if absent, removes it if present.
    ///
    /// Does not search; callers re-issue the search themselves.
    pub fn toggle_facet(&mut self, facet: SelectedFacet) -> bool {
        let selected = self.selected.toggle(facet);
        tracing::debug!(selected, total = self.selected.len(), "facet toggled");
        self.publish_selection();
        selected
    }

    /// Clears all facet selections and unmarks the published facet entries.
    pub fn reset_facets(&mut self) {
        tracing::debug!(cleared = self.selected.len(), "facets reset");
        self.selected.clear();
        self.publish_selection();
    }

    /// Replaces the selection, e.g. from query parameters.
    pub fn set_selected_facets(&mut self, selected: SelectedFacets) {
        self.selected = selected;
        self.publish_selection();
    }

    /// Republishes the facet groups with `selected` matching the selection set.
    fn publish_selection(&self) {
        let mut groups = self.facets.get();
        let mut changed = false;
        for group in &mut groups {
            for entry in &mut group.entries {
                let selected = self.selected.contains(&group.name, &entry.name);
                changed |= entry.selected != selected;
                entry.selected = selected;
            }
        }
        if changed {
            self.facets.publish(groups);
        }
    }

    /// Starts a search for `keyword` with the current facet selection.
    ///
    /// Signals loading and returns the request to send. If no request URL can be
    /// built, the failure is published and `None` is returned.
    pub fn search(&mut self, keyword: &str, now_ms: i64) -> Option<OutboundRequest> {
        let _span = tracing::debug_span!(
            "search",
            keyword = %keyword,
            facets = self.selected.len()
        )
        .entered();

        self.keyword = keyword.to_string();
        self.generation += 1;
        self.issued_at_ms = now_ms;

        match self.backend.entries_url(keyword, &self.selected) {
            Ok(url) => {
                tracing::debug!(generation = self.generation, url = %url, "search dispatched");
                self.loading.publish(true);
                Some(OutboundRequest {
                    url,
                    ticket: RequestTicket::new(RequestKind::Search, self.generation),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot build search request");
                self.fail(&e);
                None
            }
        }
    }

    /// Commits a search response.
    ///
    /// Returns `false` if the response belongs to a superseded search and was
    /// discarded.
    pub fn on_response(&mut self, generation: u64, status: u16, body: &[u8], now_ms: i64) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                latest = self.generation,
                "discarding stale search response"
            );
            return false;
        }

        let elapsed_ms = now_ms.saturating_sub(self.issued_at_ms);
        let _span = tracing::debug_span!("search_response", generation, status, elapsed_ms).entered();

        match Self::decode(status, body) {
            Ok(response) => {
                let adapted = adapt_response(&response, &self.keyword, &mut self.selected);
                tracing::debug!(
                    results = adapted.results.len(),
                    facet_groups = adapted.facets.len(),
                    "search response committed"
                );
                self.results.publish(adapted.results);
                self.facets.publish(adapted.facets);
                self.meta.publish(adapted.meta);
                self.error.publish(None);
                self.loading.publish(false);
            }
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                self.fail(&e);
            }
        }
        true
    }

    /// Resolves a search whose deadline passed without a response.
    ///
    /// Returns `false` for superseded searches.
    pub fn on_timeout(&mut self, generation: u64, timeout_secs: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        tracing::warn!(generation, timeout_secs, keyword = %self.keyword, "search timed out");
        self.fail(&ApidexError::Timeout {
            seconds: timeout_secs,
        });
        true
    }

    fn decode(status: u16, body: &[u8]) -> Result<EntriesResponse> {
        if !(200..300).contains(&status) {
            return Err(ApidexError::Http { status });
        }
        EntriesResponse::decode(body)
    }

    fn fail(&mut self, error: &ApidexError) {
        self.results.publish(vec![]);
        self.facets.publish(vec![]);
        self.meta.publish(SearchResultMeta::failed(&self.keyword));
        self.error.publish(Some(error.to_string()));
        self.loading.publish(false);
    }
}
