use super::record::JobRecord;
use crate::catalog::SUPPORTED_PLATFORMS;
use serde::{Deserialize, Serialize};

/// Platforms picked in a front-end, plus the "all platforms" toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSelection {
    pub platforms: Vec<String>,
    pub select_all: bool,
}

impl Default for PlatformSelection {
    fn default() -> Self {
        Self {
            platforms: SUPPORTED_PLATFORMS.iter().map(|name| name.to_string()).collect(),
            select_all: true,
        }
    }
}

impl PlatformSelection {
    pub fn only<I, S>(platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            platforms: platforms.into_iter().map(Into::into).collect(),
            select_all: false,
        }
    }

    pub fn apply(&self, jobs: Vec<JobRecord>) -> Vec<JobRecord> {
        filter_by_platform(jobs, &self.platforms, self.select_all)
    }
}

/// Keeps jobs whose platform contains any selected name, ignoring case.
///
/// Returns the input untouched when `select_all` is set or nothing is selected.
pub fn filter_by_platform<S: AsRef<str>>(
    jobs: Vec<JobRecord>,
    platforms: &[S],
    select_all: bool,
) -> Vec<JobRecord> {
    if select_all || platforms.is_empty() {
        return jobs;
    }

    jobs.into_iter()
        .filter(|job| {
            platforms
                .iter()
                .any(|platform| job.platform_matches(platform.as_ref()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::record::sample_record;

    fn jobs() -> Vec<JobRecord> {
        vec![
            sample_record("one", "LinkedIn"),
            sample_record("two", "Indeed"),
            sample_record("three", "via Glassdoor"),
            sample_record("four", "linkedin.com"),
            sample_record("five", "Company Careers"),
        ]
    }

    fn titles(jobs: &[JobRecord]) -> Vec<&str> {
        jobs.iter().map(|job| job.title.as_str()).collect()
    }

    #[test]
    fn select_all_returns_input_unchanged() {
        let filtered = filter_by_platform(jobs(), &["Monster"], true);
        assert_eq!(filtered, jobs());
    }

    #[test]
    fn empty_selection_returns_input_unchanged() {
        let filtered = filter_by_platform::<&str>(jobs(), &[], false);
        assert_eq!(filtered, jobs());
    }

    #[test]
    fn keeps_case_insensitive_matches_in_order() {
        let filtered = filter_by_platform(jobs(), &["LINKEDIN", "glassdoor"], false);
        assert_eq!(titles(&filtered), vec!["one", "three", "four"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let selection = PlatformSelection::only(["Indeed", "LinkedIn"]);
        let once = selection.apply(jobs());
        let twice = selection.apply(once.clone());
        assert_eq!(once, twice);
        assert_eq!(titles(&once), vec!["one", "two", "four"]);
    }

    #[test]
    fn default_selection_covers_supported_platforms() {
        let selection = PlatformSelection::default();
        assert!(selection.select_all);
        assert_eq!(selection.platforms.len(), SUPPORTED_PLATFORMS.len());
        assert_eq!(selection.apply(jobs()).len(), 5);
    }
}
