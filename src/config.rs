use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::engine::EngineSettings;
use crate::models::{parse_amount, DEFAULT_MONTHLY_BUDGET};

pub(crate) const ENV_DB: &str = "BUDGETCAL_DB";
pub(crate) const ENV_DEFAULT_BUDGET: &str = "BUDGETCAL_DEFAULT_BUDGET";
pub(crate) const ENV_ALLOW_PAST: &str = "BUDGETCAL_ALLOW_PAST";
pub(crate) const ENV_LOG: &str = "BUDGETCAL_LOG";
pub(crate) const ENV_LOG_FILE: &str = "BUDGETCAL_LOG_FILE";

const DEFAULT_LOG_FILTER: &str = "budgetcal=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) log_filter: String,
    pub(crate) engine: EngineSettings,
}

impl Config {
    /// Resolve from the platform data directory and `BUDGETCAL_*` variables.
    pub(crate) fn load() -> Result<Self> {
        let data_dir = data_dir()?;
        Self::from_lookup(&data_dir, |key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        data_dir: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let db_path = lookup(ENV_DB)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("budgetcal.db"));
        let log_path = lookup(ENV_LOG_FILE)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("budgetcal.log"));
        let log_filter = lookup(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let default_budget = match lookup(ENV_DEFAULT_BUDGET) {
            Some(raw) => parse_amount(&raw).with_context(|| format!("Invalid {ENV_DEFAULT_BUDGET}"))?,
            None => DEFAULT_MONTHLY_BUDGET,
        };
        let allow_past_dates = match lookup(ENV_ALLOW_PAST) {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| anyhow::anyhow!("Invalid {ENV_ALLOW_PAST}: {raw} (expected true or false)"))?,
            None => true,
        };

        Ok(Self {
            db_path,
            log_path,
            log_filter,
            engine: EngineSettings {
                default_budget,
                allow_past_dates,
            },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budgetcal", "BudgetCal")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(Path::new("/data"), |key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/budgetcal.db"));
        assert_eq!(config.log_path, PathBuf::from("/data/budgetcal.log"));
        assert_eq!(config.log_filter, "budgetcal=info");
        assert_eq!(config.engine, EngineSettings::default());
        assert_eq!(config.engine.default_budget, 135_000);
        assert!(config.engine.allow_past_dates);
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            (ENV_DB, "/tmp/other.db"),
            (ENV_LOG_FILE, "/tmp/other.log"),
            (ENV_LOG, "budgetcal=debug"),
            (ENV_DEFAULT_BUDGET, "200,000"),
            (ENV_ALLOW_PAST, "no"),
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/other.log"));
        assert_eq!(config.log_filter, "budgetcal=debug");
        assert_eq!(config.engine.default_budget, 200_000);
        assert!(!config.engine.allow_past_dates);
    }

    #[test]
    fn test_invalid_default_budget() {
        let err = config_with(&[(ENV_DEFAULT_BUDGET, "lots")]).unwrap_err();
        assert!(err.to_string().contains(ENV_DEFAULT_BUDGET));
    }

    #[test]
    fn test_invalid_allow_past() {
        assert!(config_with(&[(ENV_ALLOW_PAST, "maybe")]).is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" 1 "), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool(""), None);
    }
}
