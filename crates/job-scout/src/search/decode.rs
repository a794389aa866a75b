//! Tolerant decoding of upstream job-search payloads.
//!
//! Every upstream field is optional and type mismatches decode to `None`
//! instead of failing the whole payload. The fallbacks for each record field
//! live in [`RawJob::into_record`].

use super::record::{
    JobRecord, DATE_POSTED_RECENT, JOB_TYPE_NOT_SPECIFIED, NO_DESCRIPTION, UNKNOWN_COMPANY,
    UNKNOWN_LOCATION, UNKNOWN_PLATFORM, UNKNOWN_TITLE,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

const FALLBACK_SEARCH_URL: &str = "https://www.google.com/search?q=";

/// Top-level view over a decoded upstream payload.
#[derive(Debug, Default)]
pub(crate) struct PayloadView {
    pub(crate) error: Option<String>,
    pub(crate) jobs: Option<Vec<Value>>,
    pub(crate) related_links: Vec<RelatedLink>,
}

impl PayloadView {
    pub(crate) fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let error = map.remove("error").map(|value| match value {
            Value::String(message) => message,
            other => other.to_string(),
        });
        let jobs = match map.remove("jobs_results") {
            Some(Value::Array(entries)) => Some(entries),
            _ => None,
        };
        let related_links = match map.remove("related_links") {
            Some(Value::Array(entries)) => entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value::<RelatedLink>(entry).ok())
                .collect(),
            _ => Vec::new(),
        };

        Self {
            error,
            jobs,
            related_links,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RelatedLink {
    #[serde(default, deserialize_with = "lenient")]
    text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawJob {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    location: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    snippet: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    via: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    job_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    detected_extensions: Option<DetectedExtensions>,
    #[serde(default, deserialize_with = "lenient")]
    apply_link: Option<LinkHolder>,
    #[serde(default, deserialize_with = "lenient")]
    apply_options: Option<Vec<LinkHolder>>,
}

#[derive(Debug, Default, Deserialize)]
struct DetectedExtensions {
    #[serde(default, deserialize_with = "lenient")]
    schedule_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    employment_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    posted_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LinkHolder {
    #[serde(default, deserialize_with = "lenient")]
    link: Option<String>,
}

/// Accepts any JSON value and keeps it only when it decodes as `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl RawJob {
    pub(crate) fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            debug!(%value, "skipping non-object job entry");
            return None;
        }
        serde_json::from_value(value).ok()
    }

    pub(crate) fn platform(&self) -> &str {
        self.via.as_deref().unwrap_or(UNKNOWN_PLATFORM)
    }

    /// Resolves the apply URL in priority order: direct apply link, first apply
    /// option, a related link mentioning "apply", then a search URL built from
    /// the job id.
    pub(crate) fn apply_url(&self, related_links: &[RelatedLink]) -> Option<String> {
        let direct = self
            .apply_link
            .as_ref()
            .and_then(|holder| non_empty(holder.link.clone()));
        let first_option = || {
            self.apply_options
                .as_ref()
                .and_then(|options| options.first())
                .and_then(|option| non_empty(option.link.clone()))
        };
        let related = || {
            related_links
                .iter()
                .find(|link| {
                    link.text
                        .as_deref()
                        .is_some_and(|text| text.to_lowercase().contains("apply"))
                })
                .and_then(|link| non_empty(link.link.clone()))
        };
        let synthesized = || {
            non_empty(self.job_id.clone()).map(|job_id| format!("{FALLBACK_SEARCH_URL}{job_id}"))
        };

        direct
            .or_else(first_option)
            .or_else(related)
            .or_else(synthesized)
    }

    pub(crate) fn into_record(self, related_links: &[RelatedLink]) -> JobRecord {
        let apply_url = self.apply_url(related_links);
        let platform = self.platform().to_string();
        let extensions = self.detected_extensions.unwrap_or_default();

        let description = non_empty(self.description)
            .or(self.snippet)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());
        let job_type = non_empty(extensions.schedule_type)
            .or(extensions.employment_type)
            .unwrap_or_else(|| JOB_TYPE_NOT_SPECIFIED.to_string());

        JobRecord {
            title: self.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            company: self
                .company_name
                .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            location: self
                .location
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            description,
            url: apply_url.clone(),
            apply_url,
            date_posted: extensions
                .posted_at
                .unwrap_or_else(|| DATE_POSTED_RECENT.to_string()),
            platform,
            job_type,
            is_real_job: true,
        }
    }
}

/// Walks the results collection in upstream order, skipping entries rejected by
/// the platform hint, until `limit` records have been accepted.
pub(crate) fn collect_records(
    payload: PayloadView,
    platform_hint: Option<&str>,
    limit: usize,
) -> Vec<JobRecord> {
    let hint = platform_hint
        .map(str::to_lowercase)
        .filter(|hint| !hint.is_empty() && hint != "all");
    let related_links = payload.related_links;
    let mut records = Vec::new();

    for entry in payload.jobs.unwrap_or_default() {
        if records.len() >= limit {
            break;
        }
        let Some(job) = RawJob::from_value(entry) else {
            continue;
        };
        if let Some(hint) = hint.as_deref() {
            if !job.platform().to_lowercase().contains(hint) {
                continue;
            }
        }
        records.push(job.into_record(&related_links));
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(entry: Value) -> RawJob {
        RawJob::from_value(entry).expect("object entry")
    }

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let record = decode(json!({})).into_record(&[]);
        assert_eq!(record.title, UNKNOWN_TITLE);
        assert_eq!(record.company, UNKNOWN_COMPANY);
        assert_eq!(record.location, UNKNOWN_LOCATION);
        assert_eq!(record.description, NO_DESCRIPTION);
        assert_eq!(record.job_type, JOB_TYPE_NOT_SPECIFIED);
        assert_eq!(record.date_posted, DATE_POSTED_RECENT);
        assert_eq!(record.platform, UNKNOWN_PLATFORM);
        assert_eq!(record.apply_url, None);
        assert!(record.is_real_job);
    }

    #[test]
    fn description_falls_back_to_snippet() {
        let record = decode(json!({ "snippet": "short blurb" })).into_record(&[]);
        assert_eq!(record.description, "short blurb");

        let record = decode(json!({ "description": "", "snippet": "short blurb" })).into_record(&[]);
        assert_eq!(record.description, "short blurb");
    }

    #[test]
    fn job_type_prefers_schedule_type() {
        let record = decode(json!({
            "detected_extensions": { "schedule_type": "Full-time", "employment_type": "FULLTIME" }
        }))
        .into_record(&[]);
        assert_eq!(record.job_type, "Full-time");

        let record = decode(json!({
            "detected_extensions": { "employment_type": "Contractor", "posted_at": "3 days ago" }
        }))
        .into_record(&[]);
        assert_eq!(record.job_type, "Contractor");
        assert_eq!(record.date_posted, "3 days ago");
    }

    #[test]
    fn mistyped_fields_decode_as_absent() {
        let record = decode(json!({
            "title": 42,
            "company_name": "Acme",
            "detected_extensions": "not-an-object",
            "apply_options": { "link": "https://bad.example" }
        }))
        .into_record(&[]);
        assert_eq!(record.title, UNKNOWN_TITLE);
        assert_eq!(record.company, "Acme");
        assert_eq!(record.job_type, JOB_TYPE_NOT_SPECIFIED);
        assert_eq!(record.apply_url, None);
    }

    #[test]
    fn apply_url_prefers_direct_link() {
        let job = decode(json!({
            "apply_link": { "link": "https://direct.example" },
            "apply_options": [{ "link": "https://option.example" }],
            "job_id": "abc"
        }));
        assert_eq!(job.apply_url(&[]).as_deref(), Some("https://direct.example"));
    }

    #[test]
    fn apply_url_uses_first_apply_option() {
        let job = decode(json!({
            "apply_options": [{ "link": "https://first.example" }, { "link": "https://second.example" }]
        }));
        assert_eq!(job.apply_url(&[]).as_deref(), Some("https://first.example"));
    }

    #[test]
    fn apply_url_scans_related_links_case_insensitively() {
        let related = PayloadView::from_value(json!({
            "related_links": [
                { "text": "Company website", "link": "https://company.example" },
                { "text": "APPLY on site", "link": "https://apply.example" }
            ]
        }))
        .related_links;
        let job = decode(json!({ "job_id": "abc" }));
        assert_eq!(job.apply_url(&related).as_deref(), Some("https://apply.example"));
    }

    #[test]
    fn apply_url_synthesizes_search_link_from_job_id() {
        let job = decode(json!({ "job_id": "eyJqb2IiOjF9" }));
        assert_eq!(
            job.apply_url(&[]).as_deref(),
            Some("https://www.google.com/search?q=eyJqb2IiOjF9")
        );
        let record = job.into_record(&[]);
        assert_eq!(record.url, record.apply_url);
    }

    #[test]
    fn payload_view_captures_error_field() {
        let view = PayloadView::from_value(json!({ "error": "Invalid API key" }));
        assert_eq!(view.error.as_deref(), Some("Invalid API key"));
        assert!(view.jobs.is_none());

        let view = PayloadView::from_value(json!({ "error": { "code": 401 } }));
        assert_eq!(view.error.as_deref(), Some(r#"{"code":401}"#));
    }

    #[test]
    fn collect_skips_hinted_platforms_without_consuming_limit() {
        let payload = PayloadView::from_value(json!({
            "jobs_results": [
                { "title": "A", "via": "Indeed" },
                { "title": "B", "via": "via LinkedIn" },
                "garbage",
                { "title": "C", "via": "Glassdoor" },
                { "title": "D", "via": "LinkedIn" },
                { "title": "E", "via": "LinkedIn" }
            ]
        }));
        let records = collect_records(payload, Some("LinkedIn"), 2);
        let titles: Vec<&str> = records.iter().map(|record| record.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "D"]);
    }

    #[test]
    fn collect_treats_all_hint_as_no_hint() {
        let payload = PayloadView::from_value(json!({
            "jobs_results": [{ "via": "Indeed" }, { "via": "Monster" }]
        }));
        assert_eq!(collect_records(payload, Some("ALL"), 10).len(), 2);
    }
}
