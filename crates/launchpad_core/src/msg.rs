use crate::{FlightNumber, LaunchRecord, RequestId, SuccessFilter};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Session start; loads the first page.
    Mounted,
    /// Visible fraction of a rendered card, reported after each draw.
    SentinelVisibility { flight_number: FlightNumber, ratio: f32 },
    /// User asked to load again (e.g. after a failure).
    RetryRequested,
    /// Engine completion for a page request.
    PageLoaded {
        request_id: RequestId,
        outcome: PageOutcome,
    },
    /// User edited the search box.
    SearchChanged(String),
    SuccessFilterChanged(SuccessFilter),
    SuccessFilterCycled,
    /// User opened the detail overlay for a card.
    RecordSelected { flight_number: FlightNumber },
    DetailClosed,
    ThemeToggled,
    /// Controller torn down; late completions are ignored.
    SessionEnded,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Loaded(Vec<LaunchRecord>),
    /// Network or decode failure; carries the underlying detail for logs.
    Failed(String),
}
