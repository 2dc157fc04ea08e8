//! Autocomplete suggestions.
//!
//! Suggestions query the same entries endpoint as a search, without facets, and
//! keep the API names of the first `max` entries in backend order. Any failure
//! degrades to an empty list; nothing on this path is surfaced to the user.

use super::backend::Backend;
use super::observable::Observable;
use super::request::{OutboundRequest, RequestKind, RequestTicket};
use crate::domain::error::{ApidexError, Result};
use crate::domain::{EntriesResponse, SelectedFacets};

#[derive(Debug)]
pub struct SuggestionProvider {
    generation: u64,
    max: usize,
    suggestions: Observable<Vec<String>>,
}

impl SuggestionProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: 0,
            max: 0,
            suggestions: Observable::new(vec![]),
        }
    }

    pub const fn suggestions(&self) -> &Observable<Vec<String>> {
        &self.suggestions
    }

    /// Requests up to `max` suggestions for `partial`.
    ///
    /// Supersedes any pending suggestion request. Returns `None`, with the
    /// suggestions cleared, when no request can be built.
    pub fn suggest(
        &mut self,
        backend: &Backend,
        partial: &str,
        max: usize,
    ) -> Option<OutboundRequest> {
        self.generation += 1;
        self.max = max;

        if max == 0 {
            self.suggestions.publish(vec![]);
            return None;
        }

        match backend.entries_url(partial, &SelectedFacets::new()) {
            Ok(url) => Some(OutboundRequest {
                url,
                ticket: RequestTicket::new(RequestKind::Suggest, self.generation),
            }),
            Err(e) => {
                tracing::debug!(error = %e, "cannot build suggestion request");
                self.suggestions.publish(vec![]);
                None
            }
        }
    }

    /// Resolves a suggestion response.
    ///
    /// Returns the published suggestions, or `None` if the response was stale.
    pub fn on_response(&mut self, generation: u64, status: u16, body: &[u8]) -> Option<Vec<String>> {
        if generation != self.generation {
            tracing::debug!(generation, latest = self.generation, "discarding stale suggestions");
            return None;
        }

        let suggestions = Self::decode(status, body, self.max).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "suggestions unavailable");
            vec![]
        });
        self.suggestions.publish(suggestions.clone());
        Some(suggestions)
    }

    /// A suggestion request timed out; the latest one resolves to empty.
    pub fn on_timeout(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        tracing::debug!(generation, "suggestion request timed out");
        self.suggestions.publish(vec![]);
        true
    }

    /// Drops visible suggestions and invalidates any pending request.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.suggestions.publish(vec![]);
    }

    fn decode(status: u16, body: &[u8], max: usize) -> Result<Vec<String>> {
        if !(200..300).contains(&status) {
            return Err(ApidexError::Http { status });
        }
        let response = EntriesResponse::decode(body)?;
        if response.count == 0 {
            return Ok(vec![]);
        }
        Ok(response
            .entries
            .into_iter()
            .take(max)
            .map(|entry| entry.api)
            .collect())
    }
}

impl Default for SuggestionProvider {
    fn default() -> Self {
        Self::new()
    }
}
