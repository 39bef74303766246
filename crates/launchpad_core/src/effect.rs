use crate::{RequestId, Theme};

/// Number of records requested per page.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage(PageRequest),
    PersistTheme(Theme),
}

/// One paginated read against the launch feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub request_id: RequestId,
    /// 1-based page cursor the request was issued for.
    pub page: u32,
    pub limit: u32,
    pub offset: u32,
}

impl PageRequest {
    pub fn for_page(request_id: RequestId, page: u32) -> Self {
        Self {
            request_id,
            page,
            limit: PAGE_SIZE,
            offset: page.saturating_sub(1) * PAGE_SIZE,
        }
    }
}
