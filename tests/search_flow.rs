use std::collections::BTreeMap;

use apidex::app::{Focus, ResultViewType};
use apidex::{handle_event, initialize, Action, Config, Event, InputMode};

const WEATHER: &[u8] = br#"{"count":3,"entries":[
    {"API":"Open-Meteo","Description":"Global weather forecast","Auth":"","HTTPS":true,"Cors":"yes","Link":"https://open-meteo.com","Category":"Weather"},
    {"API":"Weatherbit","Description":"Weather and air quality","Auth":"apiKey","HTTPS":true,"Cors":"unknown","Link":"https://www.weatherbit.io/api","Category":"Weather"},
    {"API":"AccuWeather","Description":"Forecasts and alerts","Auth":"apiKey","HTTPS":false,"Cors":"unknown","Link":"not a link","Category":"Weather"}
]}"#;

const WEATHER_API_KEY: &[u8] = br#"{"count":2,"entries":[
    {"API":"Weatherbit","Description":"Weather and air quality","Auth":"apiKey","HTTPS":true,"Cors":"unknown","Link":"https://www.weatherbit.io/api","Category":"Weather"},
    {"API":"AccuWeather","Description":"Forecasts and alerts","Auth":"apiKey","HTTPS":false,"Cors":"unknown","Link":"not a link","Category":"Weather"}
]}"#;

const EMPTY: &[u8] = br#"{"count":0,"entries":null}"#;

const CATEGORIES: &[u8] = br#"["Animals","Books","Weather","Sports"]"#;

fn config(pairs: &[(&str, &str)]) -> Config {
    let map: BTreeMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    Config::from_zellij(&map)
}

fn requests(actions: &[Action]) -> Vec<(String, BTreeMap<String, String>)> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::WebRequest { url, context } => Some((url.clone(), context.clone())),
            _ => None,
        })
        .collect()
}

fn respond(
    state: &mut apidex::AppState,
    context: &BTreeMap<String, String>,
    body: &[u8],
    now_ms: i64,
) -> (bool, Vec<Action>) {
    handle_event(
        state,
        &Event::WebResponse {
            status: 200,
            body: body.to_vec(),
            context: context.clone(),
        },
        now_ms,
    )
    .unwrap()
}

fn type_and_submit(state: &mut apidex::AppState, text: &str, now_ms: i64) -> Vec<Action> {
    handle_event(state, &Event::SearchMode, now_ms).unwrap();
    state.search_input.clear();
    for c in text.chars() {
        handle_event(state, &Event::Char(c), now_ms).unwrap();
    }
    handle_event(state, &Event::Submit, now_ms).unwrap().1
}

#[test]
fn configured_query_runs_after_permission_grant() {
    let mut state = initialize(&config(&[("q", "weather"), ("auth", "apiKey")]));

    let (_, actions) =
        handle_event(&mut state, &Event::PermissionsResult { granted: true }, 1_000).unwrap();
    let sent = requests(&actions);
    assert_eq!(sent.len(), 2);
    assert!(sent[0].0.ends_with("/categories"));
    assert!(sent[1].0.contains("/entries?title=weather"));
    assert!(sent[1].0.contains("auth=apiKey"));
    assert!(actions
        .iter()
        .any(|a| matches!(a, Action::ScheduleTimeout { seconds: 10 })));

    respond(&mut state, &sent[0].1, CATEGORIES, 1_100);
    let (render, _) = respond(&mut state, &sent[1].1, WEATHER_API_KEY, 1_200);

    assert!(render);
    assert_eq!(state.categories().len(), 4);
    assert_eq!(state.results().len(), 2);
    assert_eq!(state.search_input, "weather");
    assert!(!state.is_loading());
    assert!(state.deadlines.is_empty());
}

#[test]
fn denied_permission_never_requests() {
    let mut state = initialize(&config(&[("q", "weather")]));
    let (_, actions) =
        handle_event(&mut state, &Event::PermissionsResult { granted: false }, 0).unwrap();
    assert!(actions.is_empty());

    let actions = type_and_submit(&mut state, "weather", 10);
    assert!(requests(&actions).is_empty());
}

#[test]
fn search_facet_toggle_and_open_link() {
    let mut state = initialize(&Config::default());
    handle_event(&mut state, &Event::PermissionsResult { granted: true }, 0).unwrap();

    let sent = requests(&type_and_submit(&mut state, "weather", 100));
    let search = sent.last().unwrap().1.clone();
    respond(&mut state, &search, WEATHER, 200);

    assert_eq!(state.input_mode, InputMode::Normal);
    assert_eq!(state.results().len(), 3);
    let auth = &state.facets()[0];
    let names: Vec<(&str, usize)> = auth
        .entries
        .iter()
        .map(|e| (e.name.as_str(), e.number_of_results))
        .collect();
    assert_eq!(names, vec![("apiKey", 2), ("null", 1)]);

    // The first result has a valid link.
    let (_, actions) = handle_event(&mut state, &Event::Activate, 300).unwrap();
    assert_eq!(
        actions,
        vec![Action::OpenLink {
            url: "https://open-meteo.com/".to_string()
        }]
    );

    handle_event(&mut state, &Event::SwitchFocus, 400).unwrap();
    assert_eq!(state.focus, Focus::Facets);
    let (_, actions) = handle_event(&mut state, &Event::ToggleFacet, 500).unwrap();
    let sent = requests(&actions);
    assert_eq!(sent.len(), 1);
    assert!(sent[0].0.contains("auth=apiKey"));
    assert!(state.is_loading());

    respond(&mut state, &sent[0].1, WEATHER_API_KEY, 600);
    assert_eq!(state.results().len(), 2);
    assert_eq!(state.search.selected_facets().len(), 1);

    let vm = state.compute_viewmodel(40, 120);
    assert_eq!(vm.header.badge, 1);
    assert!(vm.header.location.contains("auth=apiKey"));
}

#[test]
fn stale_search_response_is_ignored() {
    let mut state = initialize(&Config::default());
    handle_event(&mut state, &Event::PermissionsResult { granted: true }, 0).unwrap();

    let first = requests(&type_and_submit(&mut state, "weather", 100));
    let second = requests(&type_and_submit(&mut state, "nothing", 200));

    respond(&mut state, &second.last().unwrap().1, EMPTY, 300);
    respond(&mut state, &first.last().unwrap().1, WEATHER, 400);

    assert!(state.results().is_empty());
    assert_eq!(state.meta().keyword, "nothing");
    assert_eq!(state.meta().num_found, 0);

    let vm = state.compute_viewmodel(30, 100);
    let empty = vm.empty_state.unwrap();
    assert_eq!(empty.message, "No results for \"nothing\"");
    assert_eq!(empty.alternatives, vec!["Sports", "Jobs", "News", "Books"]);
}

#[test]
fn did_you_mean_searches_alternative() {
    let mut state = initialize(&Config::default());
    handle_event(&mut state, &Event::PermissionsResult { granted: true }, 0).unwrap();

    let sent = requests(&type_and_submit(&mut state, "zzz", 100));
    respond(&mut state, &sent.last().unwrap().1, EMPTY, 200);

    let (_, actions) = handle_event(&mut state, &Event::DidYouMean(1), 300).unwrap();
    let sent = requests(&actions);
    assert_eq!(sent.len(), 1);
    assert!(sent[0].0.contains("title=Jobs"));
    assert_eq!(state.search.keyword(), "Jobs");
}

#[test]
fn search_timeout_shows_error_and_late_response_is_dropped() {
    let mut state = initialize(&config(&[("request_timeout", "5")]));
    handle_event(&mut state, &Event::PermissionsResult { granted: true }, 0).unwrap();

    let sent = requests(&type_and_submit(&mut state, "weather", 1_000));
    let search = sent.last().unwrap().1.clone();

    handle_event(&mut state, &Event::Timer, 3_000).unwrap();
    assert!(state.is_loading());
    assert!(state.error().is_none());

    let (render, _) = handle_event(&mut state, &Event::Timer, 6_000).unwrap();
    assert!(render);
    assert_eq!(state.error(), Some("Request timed out after 5s"));
    assert!(!state.is_loading());

    respond(&mut state, &search, WEATHER, 7_000);
    assert!(state.results().is_empty());

    let empty = state.compute_viewmodel(30, 100).empty_state.unwrap();
    assert!(empty.is_error);
}

#[test]
fn server_error_becomes_visible_error() {
    let mut state = initialize(&Config::default());
    handle_event(&mut state, &Event::PermissionsResult { granted: true }, 0).unwrap();

    let sent = requests(&type_and_submit(&mut state, "weather", 100));
    handle_event(
        &mut state,
        &Event::WebResponse {
            status: 503,
            body: b"unavailable".to_vec(),
            context: sent.last().unwrap().1.clone(),
        },
        200,
    )
    .unwrap();

    assert_eq!(state.error(), Some("Backend returned HTTP 503"));
    assert!(state.results().is_empty());
    assert!(state.facets().is_empty());
}

#[test]
fn pipe_parameters_replace_the_search() {
    let mut state = initialize(&Config::default());
    handle_event(&mut state, &Event::PermissionsResult { granted: true }, 0).unwrap();

    let params = BTreeMap::from([
        ("q".to_string(), "weather".to_string()),
        ("auth".to_string(), "OAuth".to_string()),
    ]);
    let (_, actions) = handle_event(&mut state, &Event::QueryParams(params), 100).unwrap();
    let sent = requests(&actions);
    assert_eq!(sent.len(), 1);
    assert!(sent[0].0.contains("auth=OAuth"));
    assert_eq!(state.search_input, "weather");
}

#[test]
fn view_toggles_do_not_touch_results() {
    let mut state = initialize(&Config::default());
    handle_event(&mut state, &Event::PermissionsResult { granted: true }, 0).unwrap();
    let sent = requests(&type_and_submit(&mut state, "weather", 100));
    respond(&mut state, &sent.last().unwrap().1, WEATHER, 200);

    assert_eq!(state.view_type, ResultViewType::Grid);
    handle_event(&mut state, &Event::ToggleViewType, 300).unwrap();
    assert_eq!(state.view_type, ResultViewType::List);

    handle_event(&mut state, &Event::CycleSort, 400).unwrap();
    let titles: Vec<&str> = state
        .sorted_results()
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, vec!["AccuWeather", "Open-Meteo", "Weatherbit"]);
    assert_eq!(state.results()[0].title, "Open-Meteo");
}
