//! Category catalog used for "did you mean" alternatives.

use super::backend::Backend;
use super::observable::Observable;
use super::request::{OutboundRequest, RequestKind, RequestTicket};
use crate::domain::decode_categories;
use crate::domain::error::{ApidexError, Result};

#[derive(Debug)]
pub struct CategoryCatalog {
    generation: u64,
    categories: Observable<Vec<String>>,
}

impl CategoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: 0,
            categories: Observable::new(vec![]),
        }
    }

    pub const fn categories(&self) -> &Observable<Vec<String>> {
        &self.categories
    }

    /// Requests the category list; `None` if the backend URL is unusable.
    pub fn request(&mut self, backend: &Backend) -> Option<OutboundRequest> {
        self.generation += 1;
        match backend.categories_url() {
            Ok(url) => Some(OutboundRequest {
                url,
                ticket: RequestTicket::new(RequestKind::Categories, self.generation),
            }),
            Err(e) => {
                tracing::debug!(error = %e, "cannot build categories request");
                None
            }
        }
    }

    /// Publishes the decoded categories, or an empty list on any failure.
    pub fn on_response(&mut self, generation: u64, status: u16, body: &[u8]) -> bool {
        if generation != self.generation {
            return false;
        }
        let categories = Self::decode(status, body).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "categories unavailable");
            vec![]
        });
        tracing::debug!(count = categories.len(), "categories loaded");
        self.categories.publish(categories);
        true
    }

    pub fn on_timeout(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        tracing::debug!("categories request timed out");
        self.categories.publish(vec![]);
        true
    }

    fn decode(status: u16, body: &[u8]) -> Result<Vec<String>> {
        if !(200..300).contains(&status) {
            return Err(ApidexError::Http { status });
        }
        decode_categories(body)
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_categories() {
        let mut catalog = CategoryCatalog::new();
        let request = catalog.request(&Backend::default()).unwrap();
        assert_eq!(request.ticket.kind, RequestKind::Categories);

        assert!(catalog.on_response(request.ticket.generation, 200, br#"["Animals","Anime"]"#));
        assert_eq!(catalog.categories().get(), vec!["Animals", "Anime"]);
    }

    #[test]
    fn failure_is_empty() {
        let mut catalog = CategoryCatalog::new();
        let request = catalog.request(&Backend::default()).unwrap();
        catalog.on_response(request.ticket.generation, 404, b"[]");
        assert!(catalog.categories().get().is_empty());

        let request = catalog.request(&Backend::default()).unwrap();
        catalog.on_response(request.ticket.generation, 200, br#"{"not":"a list"}"#);
        assert!(catalog.categories().get().is_empty());
    }

    #[test]
    fn timeout_is_empty() {
        let mut catalog = CategoryCatalog::new();
        let request = catalog.request(&Backend::default()).unwrap();
        assert!(catalog.on_timeout(request.ticket.generation));
        assert!(catalog.categories().get().is_empty());
    }
}
