use std::collections::HashSet;

use launchpad_logging::{launch_debug, launch_info, launch_warn};

use crate::filter::filter_records;
use crate::sentinel::{BindOutcome, SentinelBinder};
use crate::view_model::AppViewModel;
use crate::{FlightNumber, LaunchRecord, PageRequest, SuccessFilter};

pub type RequestId = u64;

/// Message shown when a page load fails.
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to fetch launches";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Accumulated feed plus pagination flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadState {
    records: Vec<LaunchRecord>,
    seen: HashSet<FlightNumber>,
    page: u32,
    loading: bool,
    has_more: bool,
    error: Option<String>,
}

impl Default for LoadState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            seen: HashSet::new(),
            page: 1,
            loading: false,
            has_more: true,
            error: None,
        }
    }
}

impl LoadState {
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Appends records whose flight number is not yet known.
    /// Returns `(appended, duplicates)`.
    fn merge(&mut self, incoming: Vec<LaunchRecord>) -> (usize, usize) {
        let total = incoming.len();
        let before = self.records.len();
        for record in incoming {
            if self.seen.insert(record.flight_number) {
                self.records.push(record);
            }
        }
        let appended = self.records.len() - before;
        (appended, total - appended)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    load: LoadState,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    search_term: String,
    success_filter: SuccessFilter,
    theme: Theme,
    selected: Option<FlightNumber>,
    sentinel: SentinelBinder,
    ended: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session with the theme read from the persistence port.
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self)
    }

    pub fn load(&self) -> &LoadState {
        &self.load
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn success_filter(&self) -> SuccessFilter {
        self.success_filter
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn selected(&self) -> Option<&LaunchRecord> {
        let flight_number = self.selected?;
        self.load
            .records
            .iter()
            .find(|record| record.flight_number == flight_number)
    }

    pub fn sentinel(&self) -> &SentinelBinder {
        &self.sentinel
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn session_ended(&self) -> bool {
        self.ended
    }

    pub fn displayed(&self) -> Vec<&LaunchRecord> {
        filter_records(&self.load.records, &self.search_term, self.success_filter)
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// In-flight guarded start of the next page load.
    pub(crate) fn begin_load(&mut self) -> Option<PageRequest> {
        if self.ended {
            return None;
        }
        if !self.load.has_more {
            launch_debug!("load skipped: feed exhausted at page {}", self.load.page);
            return None;
        }
        if let Some(active) = self.in_flight {
            launch_debug!("load skipped: request {} still in flight", active);
            return None;
        }

        self.next_request_id += 1;
        let request = PageRequest::for_page(self.next_request_id, self.load.page);
        self.in_flight = Some(request.request_id);
        self.load.loading = true;
        self.load.error = None;
        self.mark_dirty();
        launch_info!(
            "load requested: request_id={} page={} offset={}",
            request.request_id,
            request.page,
            request.offset
        );
        Some(request)
    }

    /// Clears the in-flight guard if `request_id` is the active request.
    /// Late or stale completions return `false` and leave state untouched.
    pub(crate) fn finish_load(&mut self, request_id: RequestId) -> bool {
        if self.ended {
            launch_debug!("completion {} dropped: session ended", request_id);
            return false;
        }
        if self.in_flight != Some(request_id) {
            launch_warn!(
                "completion {} dropped: active request is {:?}",
                request_id,
                self.in_flight
            );
            return false;
        }
        self.in_flight = None;
        self.load.loading = false;
        self.mark_dirty();
        true
    }

    pub(crate) fn apply_page(&mut self, records: Vec<LaunchRecord>) {
        if records.is_empty() {
            self.load.has_more = false;
            launch_info!("feed exhausted at page {}", self.load.page);
            return;
        }
        let (appended, duplicates) = self.load.merge(records);
        launch_info!(
            "page {} merged: appended={} duplicates={} total={}",
            self.load.page,
            appended,
            duplicates,
            self.load.records.len()
        );
        self.load.page += 1;
    }

    pub(crate) fn apply_failure(&mut self, detail: &str) {
        launch_warn!("page {} failed: {}", self.load.page, detail);
        self.load.error = Some(FETCH_FAILURE_MESSAGE.to_string());
    }

    pub(crate) fn set_search_term(&mut self, term: String) {
        if self.search_term != term {
            self.search_term = term;
            self.mark_dirty();
        }
        // The spinner never shows while searching; the in-flight guard is kept.
        if self.load.loading {
            self.load.loading = false;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_success_filter(&mut self, filter: SuccessFilter) {
        if self.success_filter != filter {
            self.success_filter = filter;
            self.mark_dirty();
        }
    }

    pub(crate) fn select(&mut self, flight_number: Option<FlightNumber>) {
        if let Some(number) = flight_number {
            if !self.load.seen.contains(&number) {
                launch_debug!("selection of unknown flight {} ignored", number);
                return;
            }
        }
        if self.selected != flight_number {
            self.selected = flight_number;
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.mark_dirty();
        self.theme
    }

    pub(crate) fn end_session(&mut self) {
        if !self.ended {
            self.ended = true;
            self.load.loading = false;
            self.mark_dirty();
        }
    }

    pub(crate) fn sentinel_mut(&mut self) -> &mut SentinelBinder {
        &mut self.sentinel
    }

    /// Re-binds the sentinel to the last displayed card, as a render would.
    pub(crate) fn refresh_sentinel(&mut self) {
        let target = self.displayed().last().map(|record| record.flight_number);
        // Search may hide the spinner mid-fetch; the binder still waits for it.
        let loading = self.load.loading || (self.in_flight.is_some() && !self.ended);
        let has_more = self.load.has_more && !self.ended;
        if matches!(
            self.sentinel.bind(target, loading, has_more),
            BindOutcome::Rebound | BindOutcome::Detached
        ) {
            self.mark_dirty();
        }
    }
}
