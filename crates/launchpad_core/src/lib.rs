//! Launchpad core: pure state machine and view-model helpers.
mod effect;
mod filter;
mod msg;
mod record;
mod sentinel;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, PageRequest, PAGE_SIZE};
pub use filter::{filter_records, matches_search, SuccessFilter};
pub use msg::{Msg, PageOutcome};
pub use record::{embed_video_url, FlightNumber, LaunchLinks, LaunchRecord};
pub use sentinel::{BindOutcome, SentinelBinder};
pub use state::{AppState, LoadState, RequestId, Theme, FETCH_FAILURE_MESSAGE};
pub use update::update;
pub use view_model::{
    truncate_words, AppViewModel, LaunchCardView, LaunchDetailView, SentinelView,
    CARD_DETAIL_WORDS, END_OF_LIST_TEXT, NO_CARD_DETAILS, NO_DETAIL_TEXT, NO_MATCHES_TEXT,
    NO_VIDEO_TEXT,
};
