//! Dataset source resolution.
//!
//! Precedence: `--url` / `--file` flags, then `AUTODASH_DATA_URL` /
//! `AUTODASH_DATA_FILE` (a `.env` file in the working directory is loaded
//! first), then the built-in public CSV.

use std::path::PathBuf;

use crate::cli::SourceArgs;
use crate::data::DataSource;
use crate::error::AppError;

pub const ENV_DATA_URL: &str = "AUTODASH_DATA_URL";
pub const ENV_DATA_FILE: &str = "AUTODASH_DATA_FILE";

pub fn resolve_source(args: &SourceArgs) -> Result<DataSource, AppError> {
    dotenvy::dotenv().ok();
    resolve_source_with(args, |key| std::env::var(key).ok())
}

/// Same as `resolve_source`, with the environment lookup injected.
pub fn resolve_source_with<F>(args: &SourceArgs, env: F) -> Result<DataSource, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = &args.file {
        return Ok(DataSource::File(path.clone()));
    }
    if let Some(url) = &args.url {
        return Ok(DataSource::Url(url.clone()));
    }

    let env_url = env(ENV_DATA_URL).filter(|v| !v.trim().is_empty());
    let env_file = env(ENV_DATA_FILE).filter(|v| !v.trim().is_empty());
    match (env_url, env_file) {
        (Some(_), Some(_)) => Err(AppError::input(format!(
            "Set only one of {ENV_DATA_URL} and {ENV_DATA_FILE}."
        ))),
        (Some(url), None) => Ok(DataSource::Url(url.trim().to_string())),
        (None, Some(file)) => Ok(DataSource::File(PathBuf::from(file.trim()))),
        (None, None) => Ok(DataSource::default()),
    }
}
