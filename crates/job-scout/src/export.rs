//! CSV download of search results.

use crate::search::JobRecord;
use serde::Serialize;
use std::io::Write;

pub const DEFAULT_EXPORT_FILE: &str = "job_search_results.csv";

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Job Title")]
    title: &'a str,
    #[serde(rename = "Company")]
    company: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Posted")]
    date_posted: &'a str,
    #[serde(rename = "Job Type")]
    job_type: &'a str,
    #[serde(rename = "Platform")]
    platform: &'a str,
    #[serde(rename = "Apply Link")]
    apply_url: &'a str,
}

impl<'a> From<&'a JobRecord> for ExportRow<'a> {
    fn from(record: &'a JobRecord) -> Self {
        Self {
            title: &record.title,
            company: &record.company,
            location: &record.location,
            date_posted: &record.date_posted,
            job_type: &record.job_type,
            platform: &record.platform,
            apply_url: record.apply_url.as_deref().unwrap_or_default(),
        }
    }
}

/// Writes one header row followed by one row per record.
pub fn write_csv<W: Write>(writer: W, records: &[JobRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    if records.is_empty() {
        csv_writer.write_record([
            "Job Title",
            "Company",
            "Location",
            "Posted",
            "Job Type",
            "Platform",
            "Apply Link",
        ])?;
    }
    for record in records {
        csv_writer.serialize(ExportRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}
