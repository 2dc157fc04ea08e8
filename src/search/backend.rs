//! Backend endpoint construction.

use crate::domain::error::{ApidexError, Result};
use crate::domain::SelectedFacets;
use url::Url;

/// Default public API directory backend.
pub const DEFAULT_BACKEND_URL: &str = "https://api.publicapis.org/";

/// The configured REST backend.
///
/// The base is kept as text and parsed per request; an invalid base therefore
/// surfaces as a request error instead of failing plugin startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backend {
    base: String,
}

impl Backend {
    /// Creates a backend, ensuring the base ends with a slash so that endpoint
    /// paths are joined below it.
    #[must_use]
    pub fn new(base: &str) -> Self {
        let base = base.trim();
        let base = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        Self { base }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Checks that the base is an absolute `http`/`https` URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApidexError::Url`] if it does not parse and
    /// [`ApidexError::Config`] for other schemes.
    pub fn validate(&self) -> Result<()> {
        self.endpoint("").map(|_| ())
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = Url::parse(&self.base)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ApidexError::Config(format!(
                "backend_url must be http or https, got {}",
                self.base
            )));
        }
        Ok(base.join(path)?)
    }

    /// `GET {base}/entries?title={keyword}&{facet}={entry}...`
    ///
    /// # Errors
    ///
    /// Fails if the base URL is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use apidex::domain::{SelectedFacet, SelectedFacets};
    /// use apidex::search::Backend;
    ///
    /// let backend = Backend::new("https://api.publicapis.org");
    /// let facets: SelectedFacets = [SelectedFacet::new("auth", "OAuth")].into_iter().collect();
    /// let url = backend.entries_url("open data", &facets).unwrap();
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://api.publicapis.org/entries?title=open+data&auth=OAuth"
    /// );
    /// ```
    pub fn entries_url(&self, keyword: &str, facets: &SelectedFacets) -> Result<Url> {
        let mut url = self.endpoint("entries")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("title", keyword);
            for facet in facets.iter() {
                query.append_pair(&facet.facet_name, &facet.facet_entry_name);
            }
        }
        Ok(url)
    }

    /// `GET {base}/categories`
    ///
    /// # Errors
    ///
    /// Fails if the base URL is invalid.
    pub fn categories_url(&self) -> Result<Url> {
        self.endpoint("categories")
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
