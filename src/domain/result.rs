//! Result view models produced by the response adapter.

use url::Url;

/// Placeholder reported as the time taken by a search, in milliseconds.
///
/// The backend does not report timing; the real round-trip is logged instead.
pub const TIME_TAKEN_PLACEHOLDER_MS: i64 = 500;

/// A badge shown under a result title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTitle {
    pub name: String,
    pub icon: String,
    pub description: String,
}

/// An action offered on a result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryAction {
    pub icon: String,
    pub name: String,
}

impl EntryAction {
    /// The single fixed action of every result: open the API's link.
    #[must_use]
    pub fn open_link() -> Self {
        Self {
            icon: "launch".to_string(),
            name: "Go to API".to_string(),
        }
    }
}

/// One displayable search result.
///
/// `id` holds the entry's external link. It is only set when the link parses as
/// an absolute URL, and it is opened directly rather than used for a follow-up
/// lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub title: String,
    pub description: String,
    pub sub_titles: Vec<SubTitle>,
    pub tags: Vec<String>,
    pub actions: Vec<EntryAction>,
    pub id: Option<String>,
}

impl ResultEntry {
    /// Returns the link if it is a well-formed `http`/`https` URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use apidex::domain::ResultEntry;
    ///
    /// let mut entry = ResultEntry {
    ///     title: "Cat Facts".into(),
    ///     description: String::new(),
    ///     sub_titles: vec![],
    ///     tags: vec![],
    ///     actions: vec![],
    ///     id: Some("https://catfact.ninja".into()),
    /// };
    /// assert!(entry.link().is_some());
    ///
    /// entry.id = Some("javascript:alert(1)".into());
    /// assert!(entry.link().is_none());
    /// ```
    #[must_use]
    pub fn link(&self) -> Option<Url> {
        let url = Url::parse(self.id.as_deref()?).ok()?;
        matches!(url.scheme(), "http" | "https").then_some(url)
    }
}

/// Summary of the last search.
///
/// All counters are `-1` before the first search completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultMeta {
    pub num_found: i64,
    pub keyword: String,
    pub time_taken: i64,
    pub num_showed: i64,
}

impl SearchResultMeta {
    /// Sentinel state before any search.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            num_found: -1,
            keyword: String::new(),
            time_taken: -1,
            num_showed: -1,
        }
    }

    /// Meta for a completed search with `count` results.
    #[must_use]
    pub fn completed(keyword: &str, count: u64) -> Self {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        Self {
            num_found: count,
            keyword: keyword.to_string(),
            time_taken: TIME_TAKEN_PLACEHOLDER_MS,
            num_showed: count,
        }
    }

    /// Meta for a search that failed or timed out.
    #[must_use]
    pub fn failed(keyword: &str) -> Self {
        Self {
            num_found: 0,
            keyword: keyword.to_string(),
            time_taken: -1,
            num_showed: 0,
        }
    }

    /// Whether a search has completed (successfully or not).
    #[must_use]
    pub const fn has_searched(&self) -> bool {
        self.num_found >= 0
    }
}

impl Default for SearchResultMeta {
    fn default() -> Self {
        Self::initial()
    }
}
