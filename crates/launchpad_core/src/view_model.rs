use crate::{AppState, FlightNumber, LaunchRecord, SuccessFilter, Theme};

/// Word budget for the card preview of `details`.
pub const CARD_DETAIL_WORDS: usize = 20;

pub const NO_CARD_DETAILS: &str = "No details available";
pub const NO_DETAIL_TEXT: &str = "No additional details available.";
pub const NO_VIDEO_TEXT: &str = "No video available for this launch.";
pub const END_OF_LIST_TEXT: &str = "No more launches to load";
pub const NO_MATCHES_TEXT: &str = "No launches found matching your search.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub cards: Vec<LaunchCardView>,
    pub total_loaded: usize,
    pub page: u32,
    pub show_spinner: bool,
    pub error: Option<String>,
    pub has_more: bool,
    pub search_term: String,
    pub success_filter: SuccessFilter,
    pub theme: Theme,
    pub detail: Option<LaunchDetailView>,
    pub show_end_of_list: bool,
    pub show_no_matches: bool,
    /// Card currently observed for "scrolled to the end", with its binding generation.
    pub sentinel: Option<SentinelView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCardView {
    pub flight_number: FlightNumber,
    pub mission_name: String,
    pub launch_year: String,
    pub summary: String,
    pub launch_success: bool,
    pub mission_patch_small: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchDetailView {
    pub flight_number: FlightNumber,
    pub mission_name: String,
    pub launch_year: String,
    pub launch_success: bool,
    pub details: String,
    pub video_embed_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentinelView {
    pub flight_number: FlightNumber,
    pub generation: u64,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState) -> Self {
        let load = state.load();
        let displayed = state.displayed();
        let search_term = state.search_term().to_string();
        let loading = load.loading();

        let show_end_of_list = !load.has_more()
            && !loading
            && displayed.len() == load.records().len()
            && search_term.is_empty();
        let show_no_matches = displayed.is_empty() && !loading;

        Self {
            cards: displayed.iter().map(|record| LaunchCardView::from_record(record)).collect(),
            total_loaded: load.records().len(),
            page: load.page(),
            show_spinner: loading && search_term.is_empty(),
            error: load.error().map(ToOwned::to_owned),
            has_more: load.has_more(),
            search_term,
            success_filter: state.success_filter(),
            theme: state.theme(),
            detail: state.selected().map(LaunchDetailView::from_record),
            show_end_of_list,
            show_no_matches,
            sentinel: state
                .sentinel()
                .current()
                .map(|(flight_number, generation)| SentinelView {
                    flight_number,
                    generation,
                }),
        }
    }
}

impl LaunchCardView {
    fn from_record(record: &LaunchRecord) -> Self {
        Self {
            flight_number: record.flight_number,
            mission_name: record.mission_name.clone(),
            launch_year: record.launch_year.clone(),
            summary: record
                .details
                .as_deref()
                .filter(|details| !details.is_empty())
                .map(|details| truncate_words(details, CARD_DETAIL_WORDS))
                .unwrap_or_else(|| NO_CARD_DETAILS.to_string()),
            launch_success: record.launch_success,
            mission_patch_small: record.links.mission_patch_small.clone(),
        }
    }
}

impl LaunchDetailView {
    fn from_record(record: &LaunchRecord) -> Self {
        Self {
            flight_number: record.flight_number,
            mission_name: record.mission_name.clone(),
            launch_year: record.launch_year.clone(),
            launch_success: record.launch_success,
            details: record
                .details
                .clone()
                .filter(|details| !details.is_empty())
                .unwrap_or_else(|| NO_DETAIL_TEXT.to_string()),
            video_embed_url: record.embed_video_url(),
        }
    }
}

/// Keeps the first `max_words` space-separated words, appending `...` when cut.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split(' ').collect();
    if words.len() > max_words {
        format!("{}...", words[..max_words].join(" "))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_words;

    #[test]
    fn short_text_is_kept() {
        assert_eq!(truncate_words("one two three", 3), "one two three");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(truncate_words("one two three four", 2), "one two...");
    }
}
