//! Error types for Survey Lens
//!
//! Loading, configuration and background-worker failures are typed here.
//! Filter State mutations are total and never produce an error.

use thiserror::Error;

/// Main error type for Survey Lens operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Reading the survey or config file failed
    #[error("I/O error: {0}")]
    FileIo(#[from] std::io::Error),

    /// The CSV could not be parsed
    #[error("CSV parse error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Malformed config file
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration value error
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Anything but a .csv file
    #[error("Expected a .csv file, got '.{extension}'")]
    UnsupportedFormat { extension: String },

    /// Required survey column missing from the CSV header
    #[error("Survey column '{column}' is missing")]
    ColumnNotFound { column: String },

    /// Header present but no respondents
    #[error("Survey file has no responses")]
    EmptyDataset,

    /// The background loader thread is gone
    #[error("Background loader is not running")]
    LoaderUnavailable,
}

/// Result type alias for Survey Lens operations
pub type Result<T> = std::result::Result<T, DashboardError>;

impl DashboardError {
    /// Message for the error banner
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::FileIo(e) => format!("File error: {}", e),
            DashboardError::Polars(e) => format!("Data error: {}", e),
            DashboardError::Json(e) => format!("JSON error: {}", e),
            DashboardError::Config(msg) => format!("Config error: {}", msg),
            DashboardError::UnsupportedFormat { extension } => {
                format!("Only CSV survey exports can be opened (got '.{extension}')")
            }
            DashboardError::ColumnNotFound { column } => {
                format!("The survey has no '{column}' column")
            }
            DashboardError::EmptyDataset => "The survey file contains no responses".to_string(),
            DashboardError::LoaderUnavailable => "Background loader stopped".to_string(),
        }
    }

    /// Banner title
    pub fn title(&self) -> &'static str {
        match self {
            DashboardError::FileIo(_) => "File Error",
            DashboardError::Polars(_) => "Data Error",
            DashboardError::Json(_) => "JSON Error",
            DashboardError::Config(_) => "Configuration Error",
            DashboardError::UnsupportedFormat { .. } => "Unsupported Format",
            DashboardError::ColumnNotFound { .. } => "Missing Survey Column",
            DashboardError::EmptyDataset => "Empty Dataset",
            DashboardError::LoaderUnavailable => "Loader Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_messages() {
        let err = DashboardError::ColumnNotFound {
            column: "2. Gender".to_string(),
        };
        assert_eq!(err.user_message(), "The survey has no '2. Gender' column");
        assert_eq!(err.title(), "Missing Survey Column");

        let err = DashboardError::UnsupportedFormat {
            extension: "xlsx".to_string(),
        };
        assert_eq!(err.user_message(), "Only CSV survey exports can be opened (got '.xlsx')");
        assert_eq!(err.to_string(), "Expected a .csv file, got '.xlsx'");
    }

    #[test]
    fn test_io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "dataset.csv");
        let err: DashboardError = io_err.into();
        assert!(matches!(err, DashboardError::FileIo(_)));
    }
}
