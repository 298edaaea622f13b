//! Environment-driven configuration
//!
//! - `TWIG_COMMIT_DATE`: fixed timestamp for new commits (RFC 2822 or
//!   `%Y-%m-%d %H:%M:%S %z`), used by tests for reproducible ids
//! - `NO_PAGER`: never page `log`/`global-log` output
//! - `TWIG_LOG`: `tracing` filter directive, `warn` by default

use anyhow::Context;
use chrono::{DateTime, Utc};

pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";
pub const NO_PAGER_ENV: &str = "NO_PAGER";
pub const LOG_FILTER_ENV: &str = "TWIG_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    commit_date: Option<DateTime<Utc>>,
    no_pager: bool,
    log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            commit_date: None,
            no_pager: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let commit_date = lookup(COMMIT_DATE_ENV)
            .map(|date_str| Self::parse_commit_date(&date_str))
            .transpose()?;

        Ok(Config {
            commit_date,
            no_pager: lookup(NO_PAGER_ENV).is_some(),
            log_filter: lookup(LOG_FILTER_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    fn parse_commit_date(date_str: &str) -> anyhow::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc2822(date_str)
            .or_else(|_| DateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S %z"))
            .map(|date| date.with_timezone(&Utc))
            .with_context(|| format!("{COMMIT_DATE_ENV} is not a valid date: {date_str}"))
    }

    pub fn with_commit_date(mut self, commit_date: DateTime<Utc>) -> Self {
        self.commit_date = Some(commit_date);
        self
    }

    /// Timestamp for a commit created now
    pub fn commit_timestamp(&self) -> DateTime<Utc> {
        self.commit_date.unwrap_or_else(Utc::now)
    }

    pub fn no_pager(&self) -> bool {
        self.no_pager
    }

    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn parses_both_date_formats() {
        let rfc = Config::from_lookup(lookup(&[(
            COMMIT_DATE_ENV,
            "Thu, 01 Jan 1970 00:01:40 +0000",
        )]))
        .unwrap();
        let plain =
            Config::from_lookup(lookup(&[(COMMIT_DATE_ENV, "1970-01-01 01:01:40 +0100")])).unwrap();

        assert_eq!(rfc.commit_timestamp().timestamp(), 100);
        assert_eq!(plain.commit_timestamp().timestamp(), 100);
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(Config::from_lookup(lookup(&[(COMMIT_DATE_ENV, "yesterday")])).is_err());
    }

    #[test]
    fn reads_pager_and_log_filter() {
        let config =
            Config::from_lookup(lookup(&[(NO_PAGER_ENV, "1"), (LOG_FILTER_ENV, "debug")])).unwrap();

        assert!(config.no_pager());
        assert_eq!(config.log_filter(), "debug");
    }
}
