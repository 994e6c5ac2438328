//! Where the dataset comes from: the public remote CSV, or a local file.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;

use crate::error::AppError;

/// Historical automobile sales CSV published with the IBM data-visualization course.
pub const DEFAULT_DATA_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_DATA_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl DataSource {
    /// Read the raw CSV bytes. A single attempt; any failure is returned as-is.
    pub fn read_bytes(&self) -> Result<Vec<u8>, AppError> {
        match self {
            DataSource::Url(url) => DatasetClient::new().fetch(url),
            DataSource::File(path) => read_file(path),
        }
    }
}

/// Thin blocking HTTP client for the dataset download.
pub struct DatasetClient {
    client: Client,
}

impl DatasetClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, AppError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::runtime(format!("Dataset request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::runtime(format!(
                "Dataset request failed with status {}.",
                resp.status()
            )));
        }

        let body = resp
            .bytes()
            .map_err(|e| AppError::runtime(format!("Failed to read dataset response: {e}")))?;
        Ok(body.to_vec())
    }
}

impl Default for DatasetClient {
    fn default() -> Self {
        Self::new()
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, AppError> {
    validate_csv_path(path)?;
    let mut file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .map_err(|e| AppError::input(format!("Failed to read CSV '{}': {e}", path.display())))?;
    Ok(buf)
}

/// Validate the provided path points to a `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<(), AppError> {
    if !path.exists() {
        return Err(AppError::input(format!(
            "CSV file not found: {}",
            path.display()
        )));
    }
    if path.is_dir() {
        return Err(AppError::input(format!(
            "Expected a file, got a directory: {}",
            path.display()
        )));
    }
    if path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        != Some(true)
    {
        return Err(AppError::input(format!(
            "Expected a .csv file (got: {}).",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_is_remote_csv() {
        match DataSource::default() {
            DataSource::Url(url) => assert!(url.ends_with("historical_automobile_sales.csv")),
            other => panic!("unexpected default source: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_input_error() {
        let err = DataSource::File(PathBuf::from("does/not/exist.csv"))
            .read_bytes()
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(err.message().contains("not found"));
    }

    #[test]
    fn non_csv_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.txt");
        std::fs::write(&path, "Year\n").unwrap();
        let err = validate_csv_path(&path).unwrap_err();
        assert!(err.message().contains("Expected a .csv file"));
    }

    #[test]
    fn reads_local_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, "Year\n2000\n").unwrap();
        let bytes = DataSource::File(path).read_bytes().unwrap();
        assert_eq!(bytes, b"Year\n2000\n");
    }
}
