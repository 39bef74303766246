mod common;

use common::{fetch_request, init_logging, launch, page_of, scrolled_to_end, trigger_and_complete};
use launchpad_core::{
    update, AppState, Effect, Msg, PageOutcome, PageRequest, FETCH_FAILURE_MESSAGE,
};

#[test]
fn mount_requests_first_page() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::Mounted);

    assert_eq!(
        effects,
        vec![Effect::FetchPage(PageRequest {
            request_id: 1,
            page: 1,
            limit: 10,
            offset: 0,
        })]
    );
    assert!(state.load().loading());
    assert!(state.view().show_spinner);
    assert!(state.consume_dirty());
}

#[test]
fn offset_follows_page_cursor() {
    init_logging();
    let (state, _) = trigger_and_complete(AppState::new(), Msg::Mounted, PageOutcome::Loaded(page_of(1, 10)));
    let (_state, effects) = update(state, Msg::RetryRequested);

    let request = fetch_request(&effects).unwrap();
    assert_eq!(request.page, 2);
    assert_eq!(request.offset, 10);
    assert_eq!(request.limit, 10);
}

#[test]
fn second_trigger_while_in_flight_is_ignored() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Mounted);
    let first = fetch_request(&effects).unwrap();

    let (state, effects) = update(state, Msg::RetryRequested);
    assert!(effects.is_empty());
    assert_eq!(state.in_flight(), Some(first.request_id));

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: first.request_id,
            outcome: PageOutcome::Loaded(page_of(1, 10)),
        },
    );
    assert_eq!(state.load().records().len(), 10);
    assert_eq!(state.load().page(), 2);
    assert_eq!(state.in_flight(), None);
}

#[test]
fn duplicates_are_dropped_across_and_within_pages() {
    init_logging();
    let (state, _) = trigger_and_complete(AppState::new(), Msg::Mounted, PageOutcome::Loaded(page_of(1, 10)));

    // Page 2 repeats flights 9 and 10 and carries flight 11 twice.
    let mut second = page_of(9, 4);
    second.push(launch(11, "Repeat", "2021", true));
    let (state, _) = trigger_and_complete(state, Msg::RetryRequested, PageOutcome::Loaded(second));

    let numbers: Vec<u64> = state.load().records().iter().map(|r| r.flight_number).collect();
    assert_eq!(numbers, (1..=12).collect::<Vec<_>>());
    assert_eq!(state.load().page(), 3);
    // The first copy of flight 11 wins.
    assert_eq!(state.load().records()[10].mission_name, "Mission 11");
}

#[test]
fn page_of_only_duplicates_still_advances_cursor() {
    init_logging();
    let (state, _) = trigger_and_complete(AppState::new(), Msg::Mounted, PageOutcome::Loaded(page_of(1, 10)));
    let (state, _) = trigger_and_complete(state, Msg::RetryRequested, PageOutcome::Loaded(page_of(1, 10)));

    assert_eq!(state.load().records().len(), 10);
    assert_eq!(state.load().page(), 3);
    assert!(state.load().has_more());
}

#[test]
fn empty_page_ends_feed_and_blocks_further_requests() {
    init_logging();
    let (state, _) = trigger_and_complete(AppState::new(), Msg::Mounted, PageOutcome::Loaded(page_of(1, 4)));
    let (state, _) = trigger_and_complete(state, Msg::RetryRequested, PageOutcome::Loaded(Vec::new()));

    assert!(!state.load().has_more());
    assert_eq!(state.load().page(), 2);
    assert_eq!(state.load().records().len(), 4);

    let (state, effects) = update(state, Msg::RetryRequested);
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::Mounted);
    assert!(effects.is_empty());
    let (_state, effects) = update(
        state,
        Msg::SentinelVisibility {
            flight_number: 4,
            ratio: 1.0,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn end_to_end_three_scroll_triggers() {
    init_logging();
    let (state, _) = trigger_and_complete(AppState::new(), Msg::Mounted, PageOutcome::Loaded(page_of(1, 10)));
    let trigger = scrolled_to_end(&state);
    let (state, second) = trigger_and_complete(state, trigger, PageOutcome::Loaded(page_of(11, 5)));
    assert_eq!(second.offset, 10);
    let trigger = scrolled_to_end(&state);
    let (state, third) = trigger_and_complete(state, trigger, PageOutcome::Loaded(Vec::new()));
    assert_eq!(third.offset, 20);

    assert_eq!(state.load().records().len(), 15);
    assert_eq!(state.load().page(), 3);
    assert!(!state.load().has_more());

    let view = state.view();
    assert!(view.show_end_of_list);
    assert!(!view.show_spinner);
}

#[test]
fn failure_keeps_state_then_manual_retry_recovers() {
    init_logging();
    let (state, _) = trigger_and_complete(AppState::new(), Msg::Mounted, PageOutcome::Loaded(page_of(1, 10)));
    let (state, _) = trigger_and_complete(
        state,
        Msg::RetryRequested,
        PageOutcome::Failed("connection reset".to_string()),
    );

    assert_eq!(state.load().error(), Some(FETCH_FAILURE_MESSAGE));
    assert_eq!(state.load().records().len(), 10);
    assert_eq!(state.load().page(), 2);
    assert!(state.load().has_more());
    assert!(!state.load().loading());

    let (state, effects) = update(state, Msg::RetryRequested);
    assert_eq!(fetch_request(&effects).unwrap().page, 2);
    // A new attempt clears the previous failure message.
    assert_eq!(state.load().error(), None);

    let request = fetch_request(&effects).unwrap();
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: request.request_id,
            outcome: PageOutcome::Loaded(page_of(11, 3)),
        },
    );
    assert_eq!(state.load().records().len(), 13);
    assert_eq!(state.load().page(), 3);
}

#[test]
fn page_cursor_never_moves_backwards() {
    init_logging();
    let outcomes = vec![
        PageOutcome::Loaded(page_of(1, 10)),
        PageOutcome::Failed("timeout".to_string()),
        PageOutcome::Loaded(page_of(5, 10)),
        PageOutcome::Failed("503".to_string()),
        PageOutcome::Loaded(page_of(15, 2)),
        PageOutcome::Loaded(Vec::new()),
    ];

    let mut state = AppState::new();
    let mut last_page = state.load().page();
    for outcome in outcomes {
        let expect_advance = matches!(&outcome, PageOutcome::Loaded(records) if !records.is_empty());
        let (next, _) = trigger_and_complete(state, Msg::RetryRequested, outcome);
        let page = next.load().page();
        if expect_advance {
            assert_eq!(page, last_page + 1);
        } else {
            assert_eq!(page, last_page);
        }
        last_page = page;
        state = next;
    }
    assert_eq!(last_page, 4);
    assert_eq!(state.load().records().len(), 16);
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Mounted);
    let request = fetch_request(&effects).unwrap();

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: request.request_id + 7,
            outcome: PageOutcome::Loaded(page_of(1, 10)),
        },
    );
    assert!(state.load().records().is_empty());
    assert!(state.load().loading());
    assert_eq!(state.in_flight(), Some(request.request_id));
}

#[test]
fn completion_after_session_end_is_a_noop() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Mounted);
    let request = fetch_request(&effects).unwrap();
    let (state, _) = update(state, Msg::SessionEnded);

    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id: request.request_id,
            outcome: PageOutcome::Loaded(page_of(1, 10)),
        },
    );
    assert!(effects.is_empty());
    assert!(state.session_ended());
    assert!(state.load().records().is_empty());
    assert_eq!(state.load().page(), 1);

    let (_state, effects) = update(state, Msg::RetryRequested);
    assert!(effects.is_empty());
}

#[test]
fn failed_scroll_load_is_not_retried_while_card_stays_visible() {
    init_logging();
    let (state, _) = trigger_and_complete(AppState::new(), Msg::Mounted, PageOutcome::Loaded(page_of(1, 10)));
    let trigger = scrolled_to_end(&state);
    let before = state.view().sentinel.unwrap().generation;
    let (state, _) = trigger_and_complete(state, trigger, PageOutcome::Failed("offline".to_string()));

    let sentinel = state.view().sentinel.unwrap();
    assert_eq!(sentinel.flight_number, 10);
    assert_ne!(sentinel.generation, before);
    assert_eq!(state.load().error(), Some(FETCH_FAILURE_MESSAGE));

    // The platform re-reports the new binding while the card is still on screen.
    let (state, effects) = update(
        state,
        Msg::SentinelVisibility {
            flight_number: 10,
            ratio: 1.0,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.load().error(), Some(FETCH_FAILURE_MESSAGE));
    assert_eq!(state.in_flight(), None);

    // Scrolling away and back is a fresh trigger.
    let (state, effects) = update(
        state,
        Msg::SentinelVisibility {
            flight_number: 10,
            ratio: 0.0,
        },
    );
    assert!(effects.is_empty());
    let (state, effects) = update(
        state,
        Msg::SentinelVisibility {
            flight_number: 10,
            ratio: 1.0,
        },
    );
    assert_eq!(fetch_request(&effects).unwrap().page, 2);
    assert_eq!(state.load().error(), None);
}
