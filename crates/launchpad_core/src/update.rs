use crate::{AppState, Effect, Msg, PageOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted | Msg::RetryRequested => load_next_page(&mut state),
        Msg::SentinelVisibility {
            flight_number,
            ratio,
        } => {
            if state.sentinel_mut().observe(flight_number, ratio) {
                let effects = load_next_page(&mut state);
                if effects.is_empty() {
                    state.sentinel_mut().rearm();
                }
                effects
            } else {
                Vec::new()
            }
        }
        Msg::PageLoaded {
            request_id,
            outcome,
        } => {
            if !state.finish_load(request_id) {
                return (state, Vec::new());
            }
            match outcome {
                PageOutcome::Loaded(records) => state.apply_page(records),
                PageOutcome::Failed(detail) => state.apply_failure(&detail),
            }
            Vec::new()
        }
        Msg::SearchChanged(term) => {
            state.set_search_term(term);
            Vec::new()
        }
        Msg::SuccessFilterChanged(filter) => {
            state.set_success_filter(filter);
            Vec::new()
        }
        Msg::SuccessFilterCycled => {
            let next = state.success_filter().next();
            state.set_success_filter(next);
            Vec::new()
        }
        Msg::RecordSelected { flight_number } => {
            state.select(Some(flight_number));
            Vec::new()
        }
        Msg::DetailClosed => {
            state.select(None);
            Vec::new()
        }
        Msg::ThemeToggled => vec![Effect::PersistTheme(state.toggle_theme())],
        Msg::SessionEnded => {
            state.end_session();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    state.refresh_sentinel();
    (state, effects)
}

fn load_next_page(state: &mut AppState) -> Vec<Effect> {
    state
        .begin_load()
        .map(Effect::FetchPage)
        .into_iter()
        .collect()
}
