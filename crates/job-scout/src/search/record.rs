use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";
pub const NO_DESCRIPTION: &str = "No available description";
pub const JOB_TYPE_NOT_SPECIFIED: &str = "Not Specified";
pub const DATE_POSTED_RECENT: &str = "Recent";
pub const UNKNOWN_PLATFORM: &str = "unknown";

/// A normalized job listing as returned to front-ends.
///
/// `url` mirrors `apply_url`; both keys are kept on the wire for consumers of
/// the JSON endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: Option<String>,
    pub apply_url: Option<String>,
    pub date_posted: String,
    pub platform: String,
    pub job_type: String,
    pub is_real_job: bool,
}

impl JobRecord {
    /// Case-insensitive substring match against the record's source label.
    pub fn platform_matches(&self, platform: &str) -> bool {
        self.platform
            .to_lowercase()
            .contains(&platform.to_lowercase())
    }
}

#[cfg(test)]
pub(crate) fn sample_record(title: &str, platform: &str) -> JobRecord {
    JobRecord {
        title: title.to_string(),
        company: "Acme".to_string(),
        location: "Santo Domingo".to_string(),
        description: "Build models".to_string(),
        url: None,
        apply_url: None,
        date_posted: DATE_POSTED_RECENT.to_string(),
        platform: platform.to_string(),
        job_type: JOB_TYPE_NOT_SPECIFIED.to_string(),
        is_real_job: true,
    }
}
