use url::Url;

/// Unique identifier of a launch within the feed.
pub type FlightNumber = u64;

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// One launch as delivered by the remote feed. Never mutated after arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    pub flight_number: FlightNumber,
    pub mission_name: String,
    pub launch_year: String,
    pub details: Option<String>,
    pub launch_success: bool,
    pub links: LaunchLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchLinks {
    pub mission_patch_small: Option<String>,
    pub video_link: Option<String>,
}

impl LaunchRecord {
    /// Embeddable form of the video link, if the record has one.
    pub fn embed_video_url(&self) -> Option<String> {
        self.links.video_link.as_deref().map(embed_video_url)
    }
}

/// Rewrites a watch link into its embeddable form.
///
/// YouTube `watch?v=` and `youtu.be` links become `/embed/<id>` URLs. Anything
/// else falls back to a plain `watch?v=` -> `embed/` substitution.
pub fn embed_video_url(link: &str) -> String {
    if let Some(id) = youtube_video_id(link) {
        return format!("{YOUTUBE_EMBED_BASE}{id}");
    }
    link.replace("watch?v=", "embed/")
}

fn youtube_video_id(link: &str) -> Option<String> {
    let parsed = Url::parse(link.trim()).ok()?;
    let host = parsed.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    match host {
        "youtube.com" if parsed.path() == "/watch" => parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty()),
        "youtu.be" => parsed
            .path_segments()?
            .next()
            .filter(|segment| !segment.is_empty())
            .map(ToOwned::to_owned),
        _ => None,
    }
}
