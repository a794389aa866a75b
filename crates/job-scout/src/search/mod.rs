//! Job search core: filter translation, the upstream client and platform filtering.

pub mod client;
mod decode;
pub mod filter;
pub mod record;
pub mod request;
pub mod service;
pub mod translator;

pub use client::{JobSource, SearchClient, SearchError, SearchQuery};
pub use filter::{filter_by_platform, PlatformSelection};
pub use record::JobRecord;
pub use request::{RequestError, SearchRequest};
pub use service::{JobSearchService, SearchResults};
pub use translator::{
    build_chips, DatePosted, ExperienceLevel, FilterSelection, JobType, TranslateError,
};
