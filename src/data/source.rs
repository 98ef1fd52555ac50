use crate::data::record::{
    Metric, Record, TimeBucket, gender_group, parse_age, parse_platforms, parse_scale,
};
use crate::error::{DashboardError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Survey question headers the dataset cannot be built without
pub mod columns {
    pub const AGE: &str = "1. What is your age?";
    pub const GENDER: &str = "2. Gender";
    pub const OCCUPATION: &str = "4. Occupation Status";
    pub const PLATFORMS: &str = "7. What social media platforms do you commonly use?";
    pub const TIME: &str = "8. What is the average time you spend on social media every day?";

    #[cfg(test)]
    pub const REQUIRED: [&str; 5] = [AGE, GENDER, OCCUPATION, PLATFORMS, TIME];
}

/// Occupation recorded for blank answers
pub const UNKNOWN_OCCUPATION: &str = "Unknown";

/// Immutable, ordered survey records. Cloning shares the underlying slice.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
    file_path: Option<PathBuf>,
}

impl Dataset {
    /// Build a dataset from already-cleaned records
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
            file_path: None,
        }
    }

    /// Load and clean a survey CSV file
    pub fn load(path: &Path, separator: u8) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if !extension.eq_ignore_ascii_case("csv") {
            return Err(DashboardError::UnsupportedFormat {
                extension: extension.to_string(),
            });
        }

        // Schema inference is disabled so every column arrives as a string;
        // cleaning happens per field below.
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(separator)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let mut dataset = Self::from_dataframe(&df)?;
        dataset.file_path = Some(path.to_path_buf());
        Ok(dataset)
    }

    /// Map a string-typed survey frame to records
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        profiling::scope!("dataset_from_dataframe");

        if df.height() == 0 {
            return Err(DashboardError::EmptyDataset);
        }

        let ages = required_column(df, columns::AGE)?;
        let genders = required_column(df, columns::GENDER)?;
        let occupations = required_column(df, columns::OCCUPATION)?;
        let platforms = required_column(df, columns::PLATFORMS)?;
        let times = required_column(df, columns::TIME)?;

        let mut metric_columns = Vec::with_capacity(Metric::COUNT);
        for metric in Metric::ALL {
            let values = optional_column(df, metric.column())?;
            if values.is_none() {
                tracing::warn!(metric = metric.label(), column = metric.column(), "metric column missing; values treated as missing");
            }
            metric_columns.push((metric, values));
        }

        let field = |values: &[Option<String>], row: usize| -> String {
            values.get(row).cloned().flatten().unwrap_or_default()
        };

        let records: Vec<Record> = (0..df.height())
            .map(|row| {
                let occupation = field(&occupations, row).trim().to_string();
                let occupation = if occupation.is_empty() {
                    UNKNOWN_OCCUPATION.to_string()
                } else {
                    occupation
                };

                let mut record = Record::new(
                    parse_age(&field(&ages, row)),
                    gender_group(&field(&genders, row)),
                    occupation,
                    parse_platforms(&field(&platforms, row)),
                    TimeBucket::parse(&field(&times, row)),
                );
                for (metric, values) in &metric_columns {
                    let value = values
                        .as_ref()
                        .and_then(|v| parse_scale(&field(v, row)));
                    record = record.with_metric(*metric, value);
                }
                record
            })
            .collect();

        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Get the file path
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

fn required_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    optional_column(df, name)?.ok_or_else(|| DashboardError::ColumnNotFound {
        column: name.to_string(),
    })
}

fn optional_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<String>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let series = column.as_materialized_series().cast(&DataType::String)?;
    let values = series
        .str()?
        .into_iter()
        .map(|opt| opt.map(str::to_string))
        .collect();
    Ok(Some(values))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::record::Gender;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn quoted(s: &str) -> String {
        format!("\"{}\"", s.replace('"', "\"\""))
    }

    /// Write a survey CSV with the required columns plus depression and worry
    pub(crate) fn write_survey_csv(rows: &[[&str; 7]]) -> NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        let header: Vec<String> = columns::REQUIRED
            .iter()
            .copied()
            .chain([Metric::Depression.column(), Metric::Worry.column()])
            .map(quoted)
            .collect();
        writeln!(file, "{}", header.join(",")).unwrap();
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| quoted(c)).collect();
            writeln!(file, "{}", cells.join(",")).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_dataset_csv_loading() {
        let file = write_survey_csv(&[
            ["21", "Male", "University Student", "Facebook, Instagram", "Between 2 and 3 hours", "4", "3"],
            ["35.0", "Female", "Salaried Worker", "YouTube", "Less than an Hour", "2", ""],
            ["", "Nonbinary", "", "", "", "n/a", "5"],
        ]);

        let ds = Dataset::load(file.path(), b',').unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.file_path(), Some(file.path()));

        let first = &ds.records()[0];
        assert_eq!(first.age, Some(21));
        assert_eq!(first.gender, Gender::Male);
        assert_eq!(first.occupation, "University Student");
        assert_eq!(first.platforms, vec!["Facebook", "Instagram"]);
        assert_eq!(first.time_bucket, TimeBucket::TwoToThree);
        assert_eq!(first.metric(Metric::Depression), Some(4.0));
        assert_eq!(first.metric(Metric::Worry), Some(3.0));

        let second = &ds.records()[1];
        assert_eq!(second.age, Some(35));
        assert_eq!(second.metric(Metric::Worry), None);

        let third = &ds.records()[2];
        assert_eq!(third.age, None);
        assert_eq!(third.gender, Gender::Other);
        assert_eq!(third.occupation, UNKNOWN_OCCUPATION);
        assert!(third.platforms.is_empty());
        assert_eq!(third.time_bucket, TimeBucket::Unknown);
        assert_eq!(third.metric(Metric::Depression), None);
    }

    #[test]
    fn test_missing_metric_column_yields_missing_values() {
        let file = write_survey_csv(&[["20", "Male", "School Student", "TikTok", "More than 5 hours", "1", "2"]]);
        let ds = Dataset::load(file.path(), b',').unwrap();
        assert_eq!(ds.records()[0].metric(Metric::SleepIssues), None);
    }

    #[test]
    fn test_missing_required_column_fails() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "\"{}\",\"{}\"", columns::AGE, columns::GENDER).unwrap();
        writeln!(file, "21,Male").unwrap();
        file.flush().unwrap();

        let err = Dataset::load(file.path(), b',').unwrap_err();
        assert!(matches!(
            err,
            DashboardError::ColumnNotFound { ref column } if column == columns::OCCUPATION
        ));
    }

    #[test]
    fn test_semicolon_separator() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        let header: Vec<String> = columns::REQUIRED.iter().map(|c| quoted(c)).collect();
        writeln!(file, "{}", header.join(";")).unwrap();
        writeln!(file, "22;Female;Retired;Pinterest, Reddit;Between 4 and 5 hours").unwrap();
        file.flush().unwrap();

        let ds = Dataset::load(file.path(), b';').unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].platforms, vec!["Pinterest", "Reddit"]);
        assert_eq!(ds.records()[0].time_bucket, TimeBucket::FourToFive);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = Builder::new().suffix(".parquet").tempfile().unwrap();
        let err = Dataset::load(file.path(), b',').unwrap_err();
        assert!(matches!(err, DashboardError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_header_only_file_is_empty_dataset() {
        let file = write_survey_csv(&[]);
        let err = Dataset::load(file.path(), b',').unwrap_err();
        assert!(matches!(err, DashboardError::EmptyDataset));
    }
}
