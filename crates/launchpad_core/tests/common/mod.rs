#![allow(dead_code)]

use launchpad_core::{
    update, AppState, Effect, LaunchLinks, LaunchRecord, Msg, PageOutcome, PageRequest,
};

pub fn init_logging() {
    launchpad_logging::initialize_for_tests();
}

pub fn launch(flight_number: u64, mission: &str, year: &str, success: bool) -> LaunchRecord {
    LaunchRecord {
        flight_number,
        mission_name: mission.to_string(),
        launch_year: year.to_string(),
        details: None,
        launch_success: success,
        links: LaunchLinks::default(),
    }
}

/// `count` sequential launches starting at `first`.
pub fn page_of(first: u64, count: u64) -> Vec<LaunchRecord> {
    (first..first + count)
        .map(|n| launch(n, &format!("Mission {n}"), "2020", n % 2 == 0))
        .collect()
}

pub fn fetch_request(effects: &[Effect]) -> Option<PageRequest> {
    effects.iter().find_map(|effect| match effect {
        Effect::FetchPage(request) => Some(*request),
        _ => None,
    })
}

/// Runs one trigger and feeds back `outcome` for the request it produced.
pub fn trigger_and_complete(
    state: AppState,
    trigger: Msg,
    outcome: PageOutcome,
) -> (AppState, PageRequest) {
    let (state, effects) = update(state, trigger);
    let request = fetch_request(&effects).expect("trigger should issue a fetch");
    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id: request.request_id,
            outcome,
        },
    );
    assert!(effects.is_empty());
    (state, request)
}

/// Scroll trigger: reports the current sentinel card as fully visible.
pub fn scrolled_to_end(state: &AppState) -> Msg {
    let sentinel = state.view().sentinel.expect("a sentinel binding");
    Msg::SentinelVisibility {
        flight_number: sentinel.flight_number,
        ratio: 1.0,
    }
}
