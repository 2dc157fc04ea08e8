//! Response adapter: backend payload → result entries, facet groups and meta.
//!
//! The adapter is a pure transform over a validated [`EntriesResponse`]. It keeps
//! backend order, buckets entries by authentication scheme and marks buckets that
//! are present in the current selection. An empty response clears the selection,
//! since facets cannot be browsed without results.

use crate::domain::{
    EntriesResponse, EntryAction, FacetEntry, FacetGroup, RawEntry, ResultEntry,
    SearchResultMeta, SelectedFacets, SubTitle, AUTH_BUCKETS, AUTH_FACET, AUTH_FACET_LABEL,
    NO_AUTH_BUCKET,
};
use url::Url;

/// Output of [`adapt_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptedResponse {
    pub results: Vec<ResultEntry>,
    pub facets: Vec<FacetGroup>,
    pub meta: SearchResultMeta,
}

/// Shapes a backend response into view models.
///
/// `selected` is cleared when the response has no results.
///
/// # Examples
///
/// ```
/// use apidex::domain::{EntriesResponse, SelectedFacets};
/// use apidex::search::adapt_response;
///
/// let body = br#"{"count":2,"entries":[
///     {"API":"A","Description":"","Auth":"","HTTPS":true,"Cors":"no","Link":"https://a.dev","Category":"X"},
///     {"API":"B","Description":"","Auth":"apiKey","HTTPS":false,"Cors":"no","Link":"https://b.dev","Category":"Y"}
/// ]}"#;
/// let response = EntriesResponse::decode(body).unwrap();
/// let mut selected = SelectedFacets::new();
///
/// let adapted = adapt_response(&response, "demo", &mut selected);
/// assert_eq!(adapted.results.len(), 2);
/// let names: Vec<_> = adapted.facets[0].entries.iter().map(|e| e.name.as_str()).collect();
/// assert_eq!(names, ["apiKey", "null"]);
/// ```
pub fn adapt_response(
    response: &EntriesResponse,
    keyword: &str,
    selected: &mut SelectedFacets,
) -> AdaptedResponse {
    let _span = tracing::debug_span!(
        "adapt_response",
        count = response.count,
        entries = response.entries.len(),
        keyword = %keyword
    )
    .entered();

    let meta = SearchResultMeta::completed(keyword, response.count);

    if response.count == 0 {
        tracing::debug!(cleared_facets = selected.len(), "empty response, clearing selection");
        selected.clear();
        return AdaptedResponse {
            results: vec![],
            facets: vec![],
            meta,
        };
    }

    let results = response.entries.iter().map(to_result_entry).collect();
    let facets = vec![auth_facet_group(&response.entries, selected)];

    AdaptedResponse {
        results,
        facets,
        meta,
    }
}

fn to_result_entry(entry: &RawEntry) -> ResultEntry {
    let mut sub_titles = Vec::with_capacity(2);
    if entry.https {
        sub_titles.push(SubTitle {
            name: "https".to_string(),
            icon: "https".to_string(),
            description: "Secured via HTTPS".to_string(),
        });
    }
    sub_titles.push(SubTitle {
        name: "auth".to_string(),
        icon: "password".to_string(),
        description: entry.auth_scheme().map_or_else(
            || "No authentication needed".to_string(),
            |scheme| format!("Authentication via {scheme}"),
        ),
    });

    let id = Url::parse(&entry.link).ok().map(|_| entry.link.clone());
    if id.is_none() {
        tracing::debug!(api = %entry.api, link = %entry.link, "entry link is not a URL");
    }

    ResultEntry {
        title: entry.api.clone(),
        description: entry.description.clone(),
        sub_titles,
        tags: vec![entry.category.clone()],
        actions: vec![EntryAction::open_link()],
        id,
    }
}

fn auth_bucket(entry: &RawEntry) -> &str {
    entry.auth_scheme().unwrap_or(NO_AUTH_BUCKET)
}

fn auth_facet_group(entries: &[RawEntry], selected: &SelectedFacets) -> FacetGroup {
    let entries = AUTH_BUCKETS
        .iter()
        .filter_map(|bucket| {
            let count = entries
                .iter()
                .filter(|entry| auth_bucket(entry) == bucket.name)
                .count();
            (count > 0).then(|| FacetEntry {
                name: bucket.name.to_string(),
                view_name: bucket.view_name.to_string(),
                number_of_results: count,
                selected: selected.contains(AUTH_FACET, bucket.name),
            })
        })
        .collect();

    FacetGroup {
        name: AUTH_FACET.to_string(),
        screen_name: AUTH_FACET_LABEL.to_string(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SelectedFacet;

    fn entry(api: &str, auth: Option<&str>, https: bool) -> RawEntry {
        RawEntry {
            api: api.to_string(),
            description: format!("{api} description"),
            auth: auth.map(str::to_string),
            https,
            cors: Some("unknown".to_string()),
            link: format!("https://{}.example", api.to_lowercase()),
            category: "Testing".to_string(),
        }
    }

    fn response(entries: Vec<RawEntry>) -> EntriesResponse {
        EntriesResponse {
            count: entries.len() as u64,
            entries,
        }
    }

    fn auth_description(result: &ResultEntry) -> &str {
        &result
            .sub_titles
            .iter()
            .find(|s| s.name == "auth")
            .unwrap()
            .description
    }

    #[test]
    fn empty_response_clears_everything() {
        let mut selected: SelectedFacets =
            [SelectedFacet::new(AUTH_FACET, "OAuth")].into_iter().collect();

        let adapted = adapt_response(&EntriesResponse::default(), "nothing", &mut selected);

        assert!(adapted.results.is_empty());
        assert!(adapted.facets.is_empty());
        assert!(selected.is_empty());
        assert_eq!(adapted.meta.num_found, 0);
        assert_eq!(adapted.meta.num_showed, 0);
    }

    #[test]
    fn missing_auth_maps_to_null_bucket() {
        let mut selected = SelectedFacets::new();
        let adapted = adapt_response(
            &response(vec![entry("Empty", Some(""), false), entry("Absent", None, false)]),
            "x",
            &mut selected,
        );

        for result in &adapted.results {
            assert_eq!(auth_description(result), "No authentication needed");
        }
        let group = &adapted.facets[0];
        assert_eq!(group.entries.len(), 1);
        assert_eq!(group.entries[0].name, "null");
        assert_eq!(group.entries[0].view_name, "No Authentication needed");
        assert_eq!(group.entries[0].number_of_results, 2);
    }

    #[test]
    fn oauth_counts_and_describes() {
        let mut selected = SelectedFacets::new();
        let adapted = adapt_response(
            &response(vec![
                entry("One", Some("OAuth"), true),
                entry("Two", Some("OAuth"), true),
                entry("Three", Some("apiKey"), true),
            ]),
            "x",
            &mut selected,
        );

        assert_eq!(auth_description(&adapted.results[0]), "Authentication via OAuth");
        let oauth = &adapted.facets[0].entries[0];
        assert_eq!((oauth.name.as_str(), oauth.number_of_results), ("OAuth", 2));
    }

    #[test]
    fn scenario_two_entries() {
        let mut selected = SelectedFacets::new();
        let adapted = adapt_response(
            &response(vec![entry("A", Some(""), true), entry("B", Some("apiKey"), false)]),
            "scenario",
            &mut selected,
        );

        assert_eq!(adapted.results.len(), 2);
        assert_eq!(adapted.results[0].title, "A");
        assert_eq!(adapted.results[0].sub_titles[0].name, "https");
        assert_eq!(adapted.results[1].sub_titles.len(), 1);

        let group = &adapted.facets[0];
        assert_eq!(group.name, "auth");
        assert_eq!(group.screen_name, "Authentication");
        let buckets: Vec<_> = group
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.number_of_results))
            .collect();
        assert_eq!(buckets, vec![("apiKey", 1), ("null", 1)]);
        assert_eq!(adapted.meta.num_found, 2);
        assert_eq!(adapted.meta.num_showed, 2);
        assert_eq!(adapted.meta.keyword, "scenario");
    }

    #[test]
    fn unknown_schemes_have_no_bucket() {
        let mut selected = SelectedFacets::new();
        let adapted = adapt_response(
            &response(vec![entry("Mashape", Some("X-Mashape-Key"), true)]),
            "x",
            &mut selected,
        );

        assert_eq!(auth_description(&adapted.results[0]), "Authentication via X-Mashape-Key");
        assert!(adapted.facets[0].entries.is_empty());
    }

    #[test]
    fn selection_is_reflected_and_kept() {
        let mut selected: SelectedFacets =
            [SelectedFacet::new(AUTH_FACET, "apiKey")].into_iter().collect();
        let adapted = adapt_response(
            &response(vec![entry("K", Some("apiKey"), true), entry("N", None, true)]),
            "x",
            &mut selected,
        );

        let flags: Vec<_> = adapted.facets[0].entries.iter().map(|e| e.selected).collect();
        assert_eq!(flags, vec![true, false]);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn result_carries_tags_action_and_link() {
        let mut selected = SelectedFacets::new();
        let mut broken = entry("Broken", None, false);
        broken.link = "not a link".to_string();

        let adapted = adapt_response(
            &response(vec![entry("Good", None, true), broken]),
            "x",
            &mut selected,
        );

        let good = &adapted.results[0];
        assert_eq!(good.tags, vec!["Testing"]);
        assert_eq!(good.actions, vec![EntryAction::open_link()]);
        assert_eq!(good.id.as_deref(), Some("https://good.example"));
        assert_eq!(adapted.results[1].id, None);
    }
}
