use crate::LaunchRecord;

/// Tri-state partition on `launch_success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessFilter {
    #[default]
    All,
    Success,
    Failure,
}

impl SuccessFilter {
    pub fn matches(self, launch_success: bool) -> bool {
        match self {
            SuccessFilter::All => true,
            SuccessFilter::Success => launch_success,
            SuccessFilter::Failure => !launch_success,
        }
    }

    /// All -> Success -> Failure -> All.
    pub fn next(self) -> Self {
        match self {
            SuccessFilter::All => SuccessFilter::Success,
            SuccessFilter::Success => SuccessFilter::Failure,
            SuccessFilter::Failure => SuccessFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SuccessFilter::All => "All Launches",
            SuccessFilter::Success => "Successful Launches",
            SuccessFilter::Failure => "Failed Launches",
        }
    }
}

impl From<Option<bool>> for SuccessFilter {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => SuccessFilter::All,
            Some(true) => SuccessFilter::Success,
            Some(false) => SuccessFilter::Failure,
        }
    }
}

/// Text match over mission name and details (case-insensitive) and launch
/// year (exact substring). An empty term matches everything.
pub fn matches_search(record: &LaunchRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record.mission_name.to_lowercase().contains(&needle)
        || record.launch_year.contains(term)
        || record
            .details
            .as_deref()
            .is_some_and(|details| details.to_lowercase().contains(&needle))
}

/// Projects the accumulated records into the displayed subset, keeping order.
pub fn filter_records<'a>(
    records: &'a [LaunchRecord],
    term: &str,
    success: SuccessFilter,
) -> Vec<&'a LaunchRecord> {
    records
        .iter()
        .filter(|record| success.matches(record.launch_success) && matches_search(record, term))
        .collect()
}
