//! Launchpad engine: paginated feed reads and the persisted state file.
mod engine;
mod fetch;
mod persist;
mod types;

pub use engine::EngineHandle;
pub use fetch::{FetchSettings, LaunchFetcher, ReqwestFetcher};
pub use persist::{StateFile, StateFileError};
pub use types::{
    EngineEvent, FailureKind, FetchError, LaunchDto, LinksDto, PageQuery, RequestId,
};
