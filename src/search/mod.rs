//! Search layer: backend requests, response adaptation and shared state.
//!
//! Nothing here performs I/O. Providers return [`OutboundRequest`]s that the
//! plugin runtime sends, and responses come back through `on_response` keyed by
//! the [`RequestTicket`] stored in the request context.
//!
//! # Organization
//!
//! - [`backend`]: Endpoint URLs
//! - [`adapter`]: Backend payload to view models
//! - [`orchestrator`]: Keyword, facet selection and result streams
//! - [`suggest`]: Autocomplete
//! - [`categories`]: Category catalog
//! - [`request`]: Request tickets and deadlines
//! - [`observable`]: Last-value-wins cells and subscriptions

pub mod adapter;
pub mod backend;
pub mod categories;
pub mod observable;
pub mod orchestrator;
pub mod request;
pub mod suggest;

pub use adapter::{adapt_response, AdaptedResponse};
pub use backend::{Backend, DEFAULT_BACKEND_URL};
pub use categories::CategoryCatalog;
pub use observable::{Observable, Subscription};
pub use orchestrator::SearchOrchestrator;
pub use request::{Deadlines, OutboundRequest, RequestKind, RequestTicket};
pub use suggest::SuggestionProvider;
