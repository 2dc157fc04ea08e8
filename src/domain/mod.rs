//! Domain layer for the apidex plugin.
//!
//! Core types independent of Zellij APIs: backend records, facet selections,
//! result view models and the error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`entry`]: Backend wire records and payload validation
//! - [`facet`]: Facet buckets, groups and selections
//! - [`result`]: Result entries and search metadata

pub mod entry;
pub mod error;
pub mod facet;
pub mod result;

pub use entry::{decode_categories, EntriesResponse, RawEntry};
pub use error::{ApidexError, Result};
pub use facet::{
    FacetBucket, FacetEntry, FacetGroup, SelectedFacet, SelectedFacets, AUTH_BUCKETS,
    AUTH_FACET, AUTH_FACET_LABEL, KNOWN_FACETS, NO_AUTH_BUCKET,
};
pub use result::{EntryAction, ResultEntry, SearchResultMeta, SubTitle, TIME_TAKEN_PLACEHOLDER_MS};
