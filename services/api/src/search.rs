use clap::Args;
use job_scout::catalog::{country_name, SUPPORTED_PLATFORMS};
use job_scout::config::AppConfig;
use job_scout::error::AppError;
use job_scout::export::{write_csv, DEFAULT_EXPORT_FILE};
use job_scout::search::{
    DatePosted, ExperienceLevel, JobSearchService, JobType, SearchClient, SearchRequest,
    SearchResults,
};
use job_scout::telemetry;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Job title or keywords, e.g. "Software Engineer"
    #[arg(long, short = 'k')]
    pub(crate) keywords: String,
    /// Location, e.g. "New York" or "Remote"
    #[arg(long, short = 'l', default_value = "")]
    pub(crate) location: String,
    /// Restrict results to a platform (repeatable); all platforms when omitted
    #[arg(long = "platform", value_parser = parse_platform)]
    pub(crate) platforms: Vec<String>,
    /// Number of results
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=50))]
    pub(crate) count: u16,
    /// Posted within the last N days
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..=30))]
    pub(crate) days: u32,
    /// ISO 3166-1 alpha-2 country code
    #[arg(long, default_value = "US", value_parser = parse_country)]
    pub(crate) country: String,
    /// Remote jobs only (ignores --radius)
    #[arg(long)]
    pub(crate) remote: bool,
    /// Search radius in miles
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub(crate) radius: u32,
    /// Job type, e.g. "Full-time"
    #[arg(long, default_value = "Any", value_parser = parse_job_type)]
    pub(crate) job_type: String,
    /// Date posted, e.g. "Past week"
    #[arg(long, default_value = "Any time", value_parser = parse_date_posted)]
    pub(crate) date_posted: String,
    /// Experience level, e.g. "Entry level"
    #[arg(long, default_value = "Any", value_parser = parse_experience_level)]
    pub(crate) experience_level: String,
    /// Write results as CSV (defaults to job_search_results.csv when given without a path)
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
    pub(crate) csv: Option<PathBuf>,
}

impl SearchArgs {
    pub(crate) fn to_request(&self) -> SearchRequest {
        let select_all = self.platforms.is_empty();
        let platforms = if select_all {
            SUPPORTED_PLATFORMS.iter().map(|name| name.to_string()).collect()
        } else {
            self.platforms.clone()
        };

        SearchRequest {
            keywords: self.keywords.clone(),
            location: self.location.clone(),
            platforms,
            select_all,
            count: usize::from(self.count),
            days_ago: self.days,
            country: self.country.clone(),
            remote_only: self.remote,
            search_radius: self.radius,
            job_type: self.job_type.clone(),
            date_posted: self.date_posted.clone(),
            experience_level: self.experience_level.clone(),
        }
    }
}

fn parse_platform(raw: &str) -> Result<String, String> {
    SUPPORTED_PLATFORMS
        .iter()
        .find(|name| name.eq_ignore_ascii_case(raw.trim()))
        .map(|name| name.to_string())
        .ok_or_else(|| format!("expected one of: {}", SUPPORTED_PLATFORMS.join(", ")))
}

fn parse_country(raw: &str) -> Result<String, String> {
    let code = raw.trim().to_ascii_uppercase();
    country_name(&code)
        .map(|_| code.clone())
        .ok_or_else(|| format!("'{raw}' is not an ISO 3166-1 alpha-2 country code"))
}

fn parse_job_type(raw: &str) -> Result<String, String> {
    raw.parse::<JobType>()
        .map(|value| value.label().to_string())
        .map_err(|err| err.to_string())
}

fn parse_date_posted(raw: &str) -> Result<String, String> {
    raw.parse::<DatePosted>()
        .map(|value| value.label().to_string())
        .map_err(|err| err.to_string())
}

fn parse_experience_level(raw: &str) -> Result<String, String> {
    raw.parse::<ExperienceLevel>()
        .map(|value| value.label().to_string())
        .map_err(|err| err.to_string())
}

pub(crate) async fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let client = SearchClient::new(&config.upstream)?;
    let service = JobSearchService::new(Arc::new(client));
    let request = args.to_request();
    let results = service.search(&request).await?;

    render_results(&request, &results);

    if let Some(path) = args.csv {
        if !results.is_empty() {
            let writer = BufWriter::new(File::create(&path)?);
            write_csv(writer, &results.jobs)?;
            println!("\nResults written to {}", path.display());
        }
    }

    Ok(())
}

pub(crate) fn render_results(request: &SearchRequest, results: &SearchResults) {
    println!(
        "Job search: \"{}\" in \"{}\" ({})",
        request.keywords, request.location, request.country
    );

    if results.is_empty() {
        println!("No jobs found matching your criteria. Try different filters.");
        return;
    }

    println!("Found {} jobs matching your criteria\n", results.len());
    for job in &results.jobs {
        println!("- {} at {} ({})", job.title, job.company, job.location);
        println!(
            "  posted {}, {}, via {}",
            job.date_posted, job.job_type, job.platform
        );
        if let Some(url) = &job.apply_url {
            println!("  apply: {url}");
        }
    }
}
