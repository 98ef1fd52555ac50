//! Survey record model and field cleaning

use crate::constants::data::{BUCKET_MINUTES, SCALE_MAX, SCALE_MIN};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Respondent gender, collapsed to three groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Position in [`Gender::ALL`], used to index per-gender arrays
    pub fn index(self) -> usize {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
            Gender::Other => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Average daily social media time, as answered in the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeBucket {
    LessThanOne,
    OneToTwo,
    TwoToThree,
    ThreeToFour,
    FourToFive,
    MoreThanFive,
    Unknown,
}

impl TimeBucket {
    /// Display order, `Unknown` last
    pub const ALL: [TimeBucket; 7] = [
        TimeBucket::LessThanOne,
        TimeBucket::OneToTwo,
        TimeBucket::TwoToThree,
        TimeBucket::ThreeToFour,
        TimeBucket::FourToFive,
        TimeBucket::MoreThanFive,
        TimeBucket::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeBucket::LessThanOne => "<1h",
            TimeBucket::OneToTwo => "1-2h",
            TimeBucket::TwoToThree => "2-3h",
            TimeBucket::ThreeToFour => "3-4h",
            TimeBucket::FourToFive => "4-5h",
            TimeBucket::MoreThanFive => ">5h",
            TimeBucket::Unknown => "Unknown",
        }
    }

    /// Parse either the survey answer text or the short label.
    /// Blank or unrecognised answers map to `Unknown`.
    pub fn parse(raw: &str) -> TimeBucket {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "less than an hour" | "<1h" => TimeBucket::LessThanOne,
            "between 1 and 2 hours" | "1-2h" => TimeBucket::OneToTwo,
            "between 2 and 3 hours" | "2-3h" => TimeBucket::TwoToThree,
            "between 3 and 4 hours" | "3-4h" => TimeBucket::ThreeToFour,
            "between 4 and 5 hours" | "4-5h" => TimeBucket::FourToFive,
            "more than 5 hours" | ">5h" => TimeBucket::MoreThanFive,
            _ => TimeBucket::Unknown,
        }
    }

    /// Bucket midpoint in minutes, `None` for `Unknown`
    pub fn minutes(self) -> Option<f64> {
        match self {
            TimeBucket::Unknown => None,
            known => Self::ALL
                .iter()
                .position(|b| *b == known)
                .and_then(|i| BUCKET_MINUTES.get(i).copied()),
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Self-reported indicator plotted on the scatter's vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Depression,
    SocialComparison,
    Worry,
    InterestFluctuation,
    SleepIssues,
    Concentration,
    SocialValidation,
    Restlessness,
    Distraction,
    DistractionWhileBusy,
    PurposelessUse,
}

impl Metric {
    pub const COUNT: usize = 11;

    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::Depression,
        Metric::SocialComparison,
        Metric::Worry,
        Metric::InterestFluctuation,
        Metric::SleepIssues,
        Metric::Concentration,
        Metric::SocialValidation,
        Metric::Restlessness,
        Metric::Distraction,
        Metric::DistractionWhileBusy,
        Metric::PurposelessUse,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Axis label
    pub fn label(self) -> &'static str {
        match self {
            Metric::Depression => "Feeling depressed",
            Metric::SocialComparison => "Social comparison",
            Metric::Worry => "Bothered by worries",
            Metric::InterestFluctuation => "Interest fluctuation",
            Metric::SleepIssues => "Sleep issues",
            Metric::Concentration => "Difficulty concentrating",
            Metric::SocialValidation => "Seeking validation",
            Metric::Restlessness => "Restless without social media",
            Metric::Distraction => "Easily distracted",
            Metric::DistractionWhileBusy => "Distracted while busy",
            Metric::PurposelessUse => "Use without purpose",
        }
    }

    /// Literal CSV header of the survey question
    pub fn column(self) -> &'static str {
        match self {
            Metric::Depression => "18. How often do you feel depressed or down?",
            Metric::SocialComparison => {
                "15. On a scale of 1-5, how often do you compare yourself to other successful people through the use of social media?"
            }
            Metric::Worry => "13. On a scale of 1 to 5, how much are you bothered by worries?",
            Metric::InterestFluctuation => {
                "19. On a scale of 1 to 5, how frequently does your interest in daily activities fluctuate?"
            }
            Metric::SleepIssues => {
                "20. On a scale of 1 to 5, how often do you face issues regarding sleep?"
            }
            Metric::Concentration => "14. Do you find it difficult to concentrate on things?",
            Metric::SocialValidation => {
                "17. How often do you look to seek validation from features of social media?"
            }
            Metric::Restlessness => {
                "11. Do you feel restless if you haven't used Social media in a while?"
            }
            Metric::Distraction => "12. On a scale of 1 to 5, how easily distracted are you?",
            Metric::DistractionWhileBusy => {
                "10. How often do you get distracted by Social media when you are busy doing something?"
            }
            Metric::PurposelessUse => {
                "9. How often do you find yourself using Social media without a specific purpose?"
            }
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Depression
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One cleaned survey respondent. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub age: Option<u32>,
    pub gender: Gender,
    pub occupation: String,
    /// Distinct platforms in answer order
    pub platforms: Vec<String>,
    pub time_bucket: TimeBucket,
    metrics: [Option<f64>; Metric::COUNT],
}

impl Record {
    pub fn new(
        age: Option<u32>,
        gender: Gender,
        occupation: impl Into<String>,
        platforms: Vec<String>,
        time_bucket: TimeBucket,
    ) -> Self {
        Self {
            age,
            gender,
            occupation: occupation.into(),
            platforms,
            time_bucket,
            metrics: [None; Metric::COUNT],
        }
    }

    /// Builder-style metric assignment; out-of-range or non-finite values are stored as missing
    pub fn with_metric(mut self, metric: Metric, value: Option<f64>) -> Self {
        self.metrics[metric.index()] = value.filter(|v| v.is_finite() && (SCALE_MIN..=SCALE_MAX).contains(v));
        self
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics[metric.index()]
    }

    pub fn uses_platform(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| p == platform)
    }
}

/// Leading integer of the answer: "21", "21.0" and "21 years" all give 21
pub fn parse_age(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// Anything other than exactly "Male" or "Female" is grouped as `Other`
pub fn gender_group(raw: &str) -> Gender {
    match raw.trim() {
        "Male" => Gender::Male,
        "Female" => Gender::Female,
        _ => Gender::Other,
    }
}

/// Comma-separated platform list; blanks dropped, duplicates collapsed
pub fn parse_platforms(raw: &str) -> Vec<String> {
    let mut platforms: Vec<String> = Vec::new();
    for platform in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !platforms.iter().any(|p| p == platform) {
            platforms.push(platform.to_string());
        }
    }
    platforms
}

/// Survey scale answer; unparseable, non-finite or out-of-range answers are missing
pub fn parse_scale(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (SCALE_MIN..=SCALE_MAX).contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("21"), Some(21));
        assert_eq!(parse_age(" 26.0 "), Some(26));
        assert_eq!(parse_age("21 years"), Some(21));
        assert_eq!(parse_age("21y"), Some(21));
        assert_eq!(parse_age(""), None);
        assert_eq!(parse_age("twenty"), None);
        assert_eq!(parse_age("-3"), None);
    }

    #[test]
    fn test_gender_group_collapses_unknown_values() {
        assert_eq!(gender_group("Male"), Gender::Male);
        assert_eq!(gender_group(" Female "), Gender::Female);
        assert_eq!(gender_group("Nonbinary"), Gender::Other);
        assert_eq!(gender_group("male"), Gender::Other);
        assert_eq!(gender_group(""), Gender::Other);
    }

    #[test]
    fn test_parse_platforms() {
        assert_eq!(
            parse_platforms("Facebook, Instagram,YouTube, Instagram"),
            vec!["Facebook", "Instagram", "YouTube"]
        );
        assert!(parse_platforms("").is_empty());
        assert!(parse_platforms(" , ").is_empty());
    }

    #[test]
    fn test_parse_scale_rejects_invalid_values() {
        assert_eq!(parse_scale("3"), Some(3.0));
        assert_eq!(parse_scale("4.5"), Some(4.5));
        assert_eq!(parse_scale("NaN"), None);
        assert_eq!(parse_scale("inf"), None);
        assert_eq!(parse_scale("0"), None);
        assert_eq!(parse_scale("9"), None);
        assert_eq!(parse_scale("often"), None);
    }

    #[test]
    fn test_time_bucket_parse() {
        assert_eq!(TimeBucket::parse("Less than an Hour"), TimeBucket::LessThanOne);
        assert_eq!(TimeBucket::parse("Between 2 and 3 hours"), TimeBucket::TwoToThree);
        assert_eq!(TimeBucket::parse("More than 5 hours"), TimeBucket::MoreThanFive);
        assert_eq!(TimeBucket::parse("3-4h"), TimeBucket::ThreeToFour);
        assert_eq!(TimeBucket::parse(""), TimeBucket::Unknown);
        assert_eq!(TimeBucket::parse("all day"), TimeBucket::Unknown);
    }

    #[test]
    fn test_time_bucket_minutes() {
        assert_eq!(TimeBucket::LessThanOne.minutes(), Some(30.0));
        assert_eq!(TimeBucket::MoreThanFive.minutes(), Some(330.0));
        assert_eq!(TimeBucket::Unknown.minutes(), None);
    }

    #[test]
    fn test_metric_index_matches_all_order() {
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
        assert_eq!(Metric::default(), Metric::Depression);
    }

    #[test]
    fn test_record_metric_storage() {
        let record = Record::new(Some(20), Gender::Female, "Student", vec![], TimeBucket::Unknown)
            .with_metric(Metric::Depression, Some(4.0))
            .with_metric(Metric::Worry, Some(f64::NAN));
        assert_eq!(record.metric(Metric::Depression), Some(4.0));
        assert_eq!(record.metric(Metric::Worry), None);
        assert_eq!(record.metric(Metric::SleepIssues), None);
    }
}
