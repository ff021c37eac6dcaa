use std::path::PathBuf;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

const PREFIX: &str = "APP";
const SEPARATOR: &str = "__";

/// Loads `.env` from the working directory without overriding variables that
/// are already set. A missing file is fine; an unreadable one is an error.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err).context("failed to load .env"),
    }
}

/// `APP_`-prefixed variables, sections split on `__`
/// (`APP_DATABASE__URL` -> `database.url`).
pub(super) fn app_environment() -> config_rs::Environment {
    config_rs::Environment::with_prefix(PREFIX)
        .prefix_separator("_")
        .separator(SEPARATOR)
        .try_parsing(true)
}

pub(super) fn deserialize<T: DeserializeOwned>(source: config_rs::Environment) -> Result<T> {
    config_rs::Config::builder()
        .add_source(source)
        .build()
        .context("failed to read environment variables for config")?
        .try_deserialize::<T>()
        .context("failed to deserialize environment into config")
}
