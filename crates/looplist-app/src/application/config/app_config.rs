use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::commands::handlers::SharedBackfill;
use looplist_domain::habit_loop::{BackfillPolicy, DayStatus, RandomBackfill, UniformBackfill};
use looplist_domain::shared::DomainError;
use looplist_infrastructure::config::LatencyConfig;

pub const ENV_LOG_DIR: &str = "LOOPLIST_LOG_DIR";
pub const ENV_LATENCY: &str = "LOOPLIST_LATENCY";
pub const ENV_BACKFILL: &str = "LOOPLIST_BACKFILL";
pub const ENV_SEED: &str = "LOOPLIST_SEED";

/// How days before a loop's creation date are filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackfillMode {
    /// Checked with 70% probability, missed otherwise
    #[default]
    Random,
    /// Every past day missed
    Missed,
    /// Every past day checked
    Checked,
}

impl FromStr for BackfillMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "missed" => Ok(Self::Missed),
            "checked" => Ok(Self::Checked),
            other => Err(DomainError::Validation(format!(
                "Unknown backfill mode '{other}', expected random, missed or checked"
            ))),
        }
    }
}

impl fmt::Display for BackfillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Random => "random",
            Self::Missed => "missed",
            Self::Checked => "checked",
        };
        write!(f, "{s}")
    }
}

impl BackfillMode {
    /// Build the policy. `seed` only matters for `Random`.
    pub fn policy(self, seed: Option<u64>) -> Box<dyn BackfillPolicy + Send> {
        match self {
            Self::Random => match seed {
                Some(seed) => Box::new(RandomBackfill::seeded(seed)),
                None => Box::new(RandomBackfill::new()),
            },
            Self::Missed => Box::new(UniformBackfill(DayStatus::Missed)),
            Self::Checked => Box::new(UniformBackfill(DayStatus::Checked)),
        }
    }
}

/// Runtime settings, read from `LOOPLIST_*` environment variables
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// None means the platform data dir
    pub log_dir: Option<PathBuf>,
    pub latency: LatencyConfig,
    pub backfill: BackfillMode,
    pub seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults
    pub fn from_vars<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        if let Some(latency) = get(ENV_LATENCY) {
            config.latency = if parse_switch(ENV_LATENCY, &latency)? {
                LatencyConfig::default()
            } else {
                LatencyConfig::none()
            };
        }

        if let Some(mode) = get(ENV_BACKFILL) {
            config.backfill = mode.parse()?;
        }

        if let Some(seed) = get(ENV_SEED) {
            config.seed = Some(seed.parse().map_err(|_| {
                DomainError::Validation(format!("{ENV_SEED} must be an unsigned integer, got '{seed}'"))
            })?);
        }

        Ok(config)
    }

    pub fn without_latency(mut self) -> Self {
        self.latency = LatencyConfig::none();
        self
    }

    pub fn with_backfill(mut self, backfill: BackfillMode, seed: Option<u64>) -> Self {
        self.backfill = backfill;
        self.seed = seed;
        self
    }

    /// The configured policy, ready to hand to the create handler
    pub fn shared_backfill(&self) -> SharedBackfill {
        Arc::new(Mutex::new(self.backfill.policy(self.seed)))
    }
}

fn parse_switch(key: &str, value: &str) -> Result<bool, DomainError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(DomainError::Validation(format!(
            "{key} must be on or off, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn from_map(pairs: &[(&str, &str)]) -> Result<AppConfig, DomainError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = from_map(&[]).unwrap();
        assert_eq!(config.log_dir, None);
        assert_eq!(config.latency, LatencyConfig::default());
        assert_eq!(config.backfill, BackfillMode::Random);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_reads_every_variable() {
        let config = from_map(&[
            (ENV_LOG_DIR, "/tmp/looplist-logs"),
            (ENV_LATENCY, "off"),
            (ENV_BACKFILL, "Checked"),
            (ENV_SEED, "42"),
        ])
        .unwrap();
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/looplist-logs")));
        assert!(config.latency.is_disabled());
        assert_eq!(config.backfill, BackfillMode::Checked);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = from_map(&[(ENV_BACKFILL, "  "), (ENV_SEED, "")]).unwrap();
        assert_eq!(config.backfill, BackfillMode::Random);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            from_map(&[(ENV_BACKFILL, "sometimes")]),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            from_map(&[(ENV_SEED, "-1")]),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            from_map(&[(ENV_LATENCY, "maybe")]),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_uniform_policies() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(BackfillMode::Missed.policy(None).status_for(day), DayStatus::Missed);
        assert_eq!(BackfillMode::Checked.policy(None).status_for(day), DayStatus::Checked);
    }

    #[test]
    fn test_seeded_random_policy_is_reproducible() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let run = || {
            let mut policy = BackfillMode::Random.policy(Some(7));
            start
                .iter_days()
                .take(20)
                .map(|d| policy.status_for(d))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
