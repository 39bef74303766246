use std::time::Duration;

use futures_util::StreamExt;
use launchpad_logging::launch_debug;

use crate::{FailureKind, FetchError, LaunchDto, PageQuery};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Feed endpoint; `limit` and `offset` are appended as query parameters.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    /// Fixed wait before every page read, pacing successive loads.
    pub pacing_delay: Duration,
}

impl FetchSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.spacexdata.com/v3/launches".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            pacing_delay: Duration::from_secs(1),
        }
    }
}

#[async_trait::async_trait]
pub trait LaunchFetcher: Send + Sync {
    async fn fetch_page(&self, query: PageQuery) -> Result<Vec<LaunchDto>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(self.settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    /// `{base_url}?limit=N&offset=M`, preserving any query the base already has.
    pub fn page_url(&self, query: PageQuery) -> Result<reqwest::Url, FetchError> {
        let mut url = reqwest::Url::parse(&self.settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("limit", &query.limit.to_string())
            .append_pair("offset", &query.offset.to_string());
        Ok(url)
    }
}

#[async_trait::async_trait]
impl LaunchFetcher for ReqwestFetcher {
    async fn fetch_page(&self, query: PageQuery) -> Result<Vec<LaunchDto>, FetchError> {
        let url = self.page_url(query)?;
        let client = self.build_client()?;
        launch_debug!("GET {}", url);

        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
