//! Grouped counts and means for the secondary views
//!
//! Always computed from the full dataset; cross-filters only change emphasis.

use crate::data::record::{Gender, Metric, Record, TimeBucket};

/// Respondent counts split by gender
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenderCounts([usize; 3]);

impl GenderCounts {
    pub fn add(&mut self, gender: Gender) {
        self.0[gender.index()] += 1;
    }

    pub fn get(&self, gender: Gender) -> usize {
        self.0[gender.index()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

/// One category row of a grouped count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCounts {
    pub category: String,
    pub counts: GenderCounts,
}

/// Mean daily minutes per gender for one depression level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelMinutes {
    pub level: u8,
    /// `None` when no respondent of that gender answered this level
    pub mean_minutes: [Option<f64>; 3],
}

#[cfg(test)]
impl LevelMinutes {
    pub fn get(&self, gender: Gender) -> Option<f64> {
        self.mean_minutes[gender.index()]
    }
}

fn tally(out: &mut Vec<CategoryCounts>, category: &str, gender: Gender) {
    match out.iter_mut().find(|c| c.category == category) {
        Some(row) => row.counts.add(gender),
        None => {
            let mut counts = GenderCounts::default();
            counts.add(gender);
            out.push(CategoryCounts {
                category: category.to_string(),
                counts,
            });
        }
    }
}

/// Platform usage per gender, platforms in first-seen order
pub fn platform_by_gender(records: &[Record]) -> Vec<CategoryCounts> {
    let mut out = Vec::new();
    for record in records {
        for platform in &record.platforms {
            tally(&mut out, platform, record.gender);
        }
    }
    out
}

/// Daily-time bucket per gender, in bucket order; empty buckets omitted
pub fn time_by_gender(records: &[Record]) -> Vec<CategoryCounts> {
    TimeBucket::ALL
        .iter()
        .filter_map(|bucket| {
            let mut counts = GenderCounts::default();
            for record in records.iter().filter(|r| r.time_bucket == *bucket) {
                counts.add(record.gender);
            }
            (counts.total() > 0).then(|| CategoryCounts {
                category: bucket.label().to_string(),
                counts,
            })
        })
        .collect()
}

/// Occupation per gender, occupations in first-seen order
pub fn occupation_by_gender(records: &[Record]) -> Vec<CategoryCounts> {
    let mut out = Vec::new();
    for record in records {
        tally(&mut out, &record.occupation, record.gender);
    }
    out
}

/// Mean daily minutes on social media per depression level (1..=5) and gender
pub fn depression_minutes_by_gender(records: &[Record]) -> Vec<LevelMinutes> {
    (1u8..=5)
        .map(|level| {
            let mut sums = [0.0f64; 3];
            let mut counts = [0usize; 3];
            for record in records {
                let (Some(depression), Some(minutes)) =
                    (record.metric(Metric::Depression), record.time_bucket.minutes())
                else {
                    continue;
                };
                if depression.round() as u8 == level {
                    sums[record.gender.index()] += minutes;
                    counts[record.gender.index()] += 1;
                }
            }
            let mut mean_minutes = [None; 3];
            for i in 0..3 {
                if counts[i] > 0 {
                    mean_minutes[i] = Some(sums[i] / counts[i] as f64);
                }
            }
            LevelMinutes { level, mean_minutes }
        })
        .collect()
}
