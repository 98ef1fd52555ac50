use crate::constants::chart::FALLBACK_METRIC_DOMAIN;
use crate::data::record::{Gender, Metric, Record};

/// Closed numeric range used as an axis domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Per-gender summary of one metric over a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricSummary {
    pub count: usize,
    pub mean: Option<f64>,
}

fn extent(values: impl Iterator<Item = f64>) -> Option<Domain> {
    values.fold(None, |acc, v| match acc {
        None => Some(Domain::new(v, v)),
        Some(d) => Some(Domain::new(d.min.min(v), d.max.max(v))),
    })
}

/// Vertical domain for a metric: zero up to the largest answer, missing values ignored.
/// Falls back to the full scale when no record has the metric.
pub fn metric_domain(records: &[Record], metric: Metric) -> Domain {
    match extent(records.iter().filter_map(|r| r.metric(metric))) {
        Some(d) => Domain::new(0.0, d.max),
        None => Domain::new(FALLBACK_METRIC_DOMAIN.0, FALLBACK_METRIC_DOMAIN.1),
    }
}

/// Horizontal domain over respondent ages, padded by one year on each side
pub fn age_domain(records: &[Record]) -> Option<Domain> {
    extent(records.iter().filter_map(|r| r.age.map(f64::from)))
        .map(|d| Domain::new(d.min - 1.0, d.max + 1.0))
}

/// Mean of the metric for each gender, skipping missing values
pub fn gender_means<'a>(records: impl IntoIterator<Item = &'a Record>, metric: Metric) -> [MetricSummary; 3] {
    let mut sums = [0.0f64; 3];
    let mut counts = [0usize; 3];
    for record in records {
        if let Some(value) = record.metric(metric) {
            sums[record.gender.index()] += value;
            counts[record.gender.index()] += 1;
        }
    }
    let mut out = [MetricSummary::default(); 3];
    for gender in Gender::ALL {
        let i = gender.index();
        out[i] = MetricSummary {
            count: counts[i],
            mean: (counts[i] > 0).then(|| sums[i] / counts[i] as f64),
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::TimeBucket;

    fn record(age: Option<u32>, gender: Gender, depression: Option<f64>) -> Record {
        Record::new(age, gender, "Student", vec![], TimeBucket::Unknown)
            .with_metric(Metric::Depression, depression)
    }

    #[test]
    fn test_metric_domain_ignores_missing() {
        let records = vec![
            record(Some(20), Gender::Male, Some(3.0)),
            record(Some(30), Gender::Female, None),
            record(None, Gender::Other, Some(4.0)),
        ];
        assert_eq!(metric_domain(&records, Metric::Depression), Domain::new(0.0, 4.0));
    }

    #[test]
    fn test_metric_domain_fallback() {
        let records = vec![record(Some(20), Gender::Male, None)];
        assert_eq!(metric_domain(&records, Metric::Depression), Domain::new(0.0, 5.0));
        assert_eq!(metric_domain(&[], Metric::Worry), Domain::new(0.0, 5.0));
    }

    #[test]
    fn test_age_domain() {
        let records = vec![
            record(Some(18), Gender::Male, None),
            record(None, Gender::Male, None),
            record(Some(60), Gender::Male, None),
        ];
        assert_eq!(age_domain(&records), Some(Domain::new(17.0, 61.0)));
        assert_eq!(age_domain(&[record(None, Gender::Male, None)]), None);
    }

    #[test]
    fn test_gender_means() {
        let records = vec![
            record(Some(20), Gender::Male, Some(2.0)),
            record(Some(20), Gender::Male, Some(4.0)),
            record(Some(20), Gender::Female, None),
        ];
        let means = gender_means(&records, Metric::Depression);
        assert_eq!(means[Gender::Male.index()], MetricSummary { count: 2, mean: Some(3.0) });
        assert_eq!(means[Gender::Female.index()], MetricSummary { count: 0, mean: None });
    }
}
