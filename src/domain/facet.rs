//! Facet model: selectable filter dimensions and their counted buckets.
//!
//! Only the `auth` dimension is implemented. Its buckets are fixed and ordered;
//! entries without an authentication scheme fall into the `"null"` bucket.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Name of the authentication facet, also used as its query parameter.
pub const AUTH_FACET: &str = "auth";

/// Display label of the authentication facet group.
pub const AUTH_FACET_LABEL: &str = "Authentication";

/// Bucket name for entries without an authentication scheme.
pub const NO_AUTH_BUCKET: &str = "null";

/// Facet names accepted from query parameters.
pub const KNOWN_FACETS: &[&str] = &[AUTH_FACET];

/// A fixed facet bucket: wire value and display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetBucket {
    pub name: &'static str,
    pub view_name: &'static str,
}

/// Authentication buckets in display order.
pub const AUTH_BUCKETS: [FacetBucket; 3] = [
    FacetBucket {
        name: "OAuth",
        view_name: "OAuth",
    },
    FacetBucket {
        name: "apiKey",
        view_name: "API Key",
    },
    FacetBucket {
        name: NO_AUTH_BUCKET,
        view_name: "No Authentication needed",
    },
];

/// A `(facet name, facet entry name)` selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SelectedFacet {
    pub facet_name: String,
    pub facet_entry_name: String,
}

impl SelectedFacet {
    pub fn new(facet_name: impl Into<String>, facet_entry_name: impl Into<String>) -> Self {
        Self {
            facet_name: facet_name.into(),
            facet_entry_name: facet_entry_name.into(),
        }
    }
}

/// The set of active facet selections.
///
/// Backed by an ordered set so that generated query strings are deterministic;
/// selection order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedFacets(BTreeSet<SelectedFacet>);

impl SelectedFacets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds selections from query parameters.
    ///
    /// Only keys naming a known facet are considered. A value may carry several
    /// comma-separated entries (`auth=OAuth,apiKey`).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use apidex::domain::SelectedFacets;
    ///
    /// let mut params = BTreeMap::new();
    /// params.insert("q".to_string(), "weather".to_string());
    /// params.insert("auth".to_string(), "OAuth,null".to_string());
    ///
    /// let selected = SelectedFacets::from_params(&params);
    /// assert_eq!(selected.len(), 2);
    /// assert!(selected.contains("auth", "null"));
    /// ```
    #[must_use]
    pub fn from_params(params: &BTreeMap<String, String>) -> Self {
        let selections = params
            .iter()
            .filter(|(key, _)| KNOWN_FACETS.contains(&key.as_str()))
            .flat_map(|(key, value)| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(move |entry| SelectedFacet::new(key.as_str(), entry))
            })
            .collect();
        Self(selections)
    }

    /// Adds the facet if absent, removes it if present.
    ///
    /// Returns `true` if the facet is selected afterwards.
    pub fn toggle(&mut self, facet: SelectedFacet) -> bool {
        if self.0.remove(&facet) {
            false
        } else {
            self.0.insert(facet);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, facet_name: &str, facet_entry_name: &str) -> bool {
        self.0
            .iter()
            .any(|f| f.facet_name == facet_name && f.facet_entry_name == facet_entry_name)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedFacet> {
        self.0.iter()
    }
}

impl FromIterator<SelectedFacet> for SelectedFacets {
    fn from_iter<I: IntoIterator<Item = SelectedFacet>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One counted bucket within a facet group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetEntry {
    pub name: String,
    pub view_name: String,
    pub number_of_results: usize,
    pub selected: bool,
}

/// A facet dimension with its non-empty buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetGroup {
    pub name: String,
    pub screen_name: String,
    pub entries: Vec<FacetEntry>,
}
