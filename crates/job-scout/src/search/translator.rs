//! Maps the human-facing filter labels onto the upstream `chips` vocabulary.
//!
//! Tokens are always emitted in the order `date_posted`, `employment_type`,
//! `experience_level`, and only for selections that differ from their default.

use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("invalid {field} value '{value}'")]
    InvalidFilterValue { field: &'static str, value: String },
}

impl TranslateError {
    fn invalid(field: &'static str, value: &str) -> Self {
        Self::InvalidFilterValue {
            field,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DatePosted {
    #[default]
    AnyTime,
    Past24Hours,
    PastWeek,
    PastMonth,
}

impl DatePosted {
    pub const fn ordered() -> [Self; 4] {
        [Self::AnyTime, Self::Past24Hours, Self::PastWeek, Self::PastMonth]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AnyTime => "Any time",
            Self::Past24Hours => "Past 24 hours",
            Self::PastWeek => "Past week",
            Self::PastMonth => "Past month",
        }
    }

    fn chip(self) -> Option<&'static str> {
        match self {
            Self::AnyTime => None,
            Self::Past24Hours => Some("date_posted:today"),
            Self::PastWeek => Some("date_posted:week"),
            Self::PastMonth => Some("date_posted:month"),
        }
    }
}

impl FromStr for DatePosted {
    type Err = TranslateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|option| option.label() == value)
            .ok_or_else(|| TranslateError::invalid("date_posted", value))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum JobType {
    #[default]
    Any,
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

impl JobType {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Any,
            Self::FullTime,
            Self::PartTime,
            Self::Contract,
            Self::Internship,
            Self::Temporary,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
            Self::Temporary => "Temporary",
        }
    }

    fn chip(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::FullTime => Some("employment_type:FULLTIME"),
            Self::PartTime => Some("employment_type:PARTTIME"),
            Self::Contract => Some("employment_type:CONTRACTOR"),
            Self::Internship => Some("employment_type:INTERN"),
            Self::Temporary => Some("employment_type:TEMPORARY"),
        }
    }
}

impl FromStr for JobType {
    type Err = TranslateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|option| option.label() == value)
            .ok_or_else(|| TranslateError::invalid("job_type", value))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    #[default]
    Any,
    Internship,
    EntryLevel,
    Associate,
    MidSeniorLevel,
    Director,
    Executive,
}

impl ExperienceLevel {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Any,
            Self::Internship,
            Self::EntryLevel,
            Self::Associate,
            Self::MidSeniorLevel,
            Self::Director,
            Self::Executive,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Internship => "Internship",
            Self::EntryLevel => "Entry level",
            Self::Associate => "Associate",
            Self::MidSeniorLevel => "Mid-Senior level",
            Self::Director => "Director",
            Self::Executive => "Executive",
        }
    }

    fn chip(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Internship => Some("experience_level:INTERNSHIP"),
            Self::EntryLevel => Some("experience_level:ENTRY_LEVEL"),
            Self::Associate => Some("experience_level:ASSOCIATE"),
            Self::MidSeniorLevel => Some("experience_level:MID_LEVEL"),
            Self::Director => Some("experience_level:DIRECTOR"),
            Self::Executive => Some("experience_level:EXECUTIVE"),
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = TranslateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|option| option.label() == value)
            .ok_or_else(|| TranslateError::invalid("experience_level", value))
    }
}

/// The three independent filter selections made in a front-end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub date_posted: DatePosted,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
}

impl FilterSelection {
    pub fn parse(
        date_posted: &str,
        job_type: &str,
        experience_level: &str,
    ) -> Result<Self, TranslateError> {
        Ok(Self {
            date_posted: date_posted.parse()?,
            job_type: job_type.parse()?,
            experience_level: experience_level.parse()?,
        })
    }

    /// Comma-joined chip tokens, or `None` when every selection is at its default.
    pub fn chips(&self) -> Option<String> {
        let tokens: Vec<&str> = [
            self.date_posted.chip(),
            self.job_type.chip(),
            self.experience_level.chip(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if tokens.is_empty() {
            None
        } else {
            Some(tokens.join(","))
        }
    }
}

/// Label-level entry point: parses the raw UI selections and builds the chips.
pub fn build_chips(
    date_posted: &str,
    job_type: &str,
    experience_level: &str,
) -> Result<Option<String>, TranslateError> {
    FilterSelection::parse(date_posted, job_type, experience_level).map(|selection| selection.chips())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_no_chips() {
        assert_eq!(build_chips("Any time", "Any", "Any").expect("valid"), None);
        assert_eq!(FilterSelection::default().chips(), None);
    }

    #[test]
    fn single_selection_produces_single_token() {
        assert_eq!(
            build_chips("Any time", "Full-time", "Any").expect("valid"),
            Some("employment_type:FULLTIME".to_string())
        );
        assert_eq!(
            build_chips("Past 24 hours", "Any", "Any").expect("valid"),
            Some("date_posted:today".to_string())
        );
        assert_eq!(
            build_chips("Any time", "Any", "Mid-Senior level").expect("valid"),
            Some("experience_level:MID_LEVEL".to_string())
        );
    }

    #[test]
    fn tokens_follow_fixed_order() {
        assert_eq!(
            build_chips("Past month", "Contract", "Entry level").expect("valid"),
            Some("date_posted:month,employment_type:CONTRACTOR,experience_level:ENTRY_LEVEL".to_string())
        );
        assert_eq!(
            build_chips("Past week", "Any", "Executive").expect("valid"),
            Some("date_posted:week,experience_level:EXECUTIVE".to_string())
        );
    }

    #[test]
    fn every_combination_joins_non_default_tokens_in_order() {
        for date in DatePosted::ordered() {
            for job in JobType::ordered() {
                for level in ExperienceLevel::ordered() {
                    let expected: Vec<&str> = [date.chip(), job.chip(), level.chip()]
                        .into_iter()
                        .flatten()
                        .collect();
                    let chips = build_chips(date.label(), job.label(), level.label())
                        .expect("labels round-trip");
                    match chips {
                        None => assert!(expected.is_empty()),
                        Some(value) => assert_eq!(value, expected.join(",")),
                    }
                }
            }
        }
    }

    #[test]
    fn internship_maps_differently_per_field() {
        assert_eq!(
            build_chips("Any time", "Internship", "Internship").expect("valid"),
            Some("employment_type:INTERN,experience_level:INTERNSHIP".to_string())
        );
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert_eq!(
            build_chips("Any time", "Freelance", "Any"),
            Err(TranslateError::InvalidFilterValue {
                field: "job_type",
                value: "Freelance".to_string(),
            })
        );
        assert!(matches!(
            build_chips("Any time", "Any", "Senior"),
            Err(TranslateError::InvalidFilterValue { field: "experience_level", .. })
        ));
        assert!(matches!(
            build_chips("Yesterday", "Any", "Any"),
            Err(TranslateError::InvalidFilterValue { field: "date_posted", .. })
        ));
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert!("full-time".parse::<JobType>().is_err());
        assert_eq!("Full-time".parse::<JobType>(), Ok(JobType::FullTime));
    }
}
