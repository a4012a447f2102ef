//! Application configuration.
//!
//! Read from `config/default.toml` (or `--config`), then overridden by
//! environment variables.  A missing file means "all defaults"; a malformed
//! one is reported at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use agendabot_adapters::{DEFAULT_SERVICE_URL, ScheduleServiceConfig};
use agendabot_intent::{DEFAULT_THRESHOLD, PORTUGUESE};

/// Overrides `[service] url`.
pub const ENV_SERVICE_URL: &str = "AGENDABOT_SERVICE_URL";
/// Overrides `[service] timeout_secs`.
pub const ENV_SERVICE_TIMEOUT: &str = "AGENDABOT_SERVICE_TIMEOUT_SECS";
/// Overrides `[lexicon] path`.
pub const ENV_LEXICON_PATH: &str = "AGENDABOT_LEXICON_PATH";

/// Everything the binary can be configured with.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSection,
    pub matcher: MatcherSection,
    pub lexicon: LexiconSection,
    pub logging: LoggingSection,
}

/// `[service]`: the scheduling endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceSection {
    pub url: String,
    /// Absent means the submission waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// `[matcher]`: fuzzy matching knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatcherSection {
    pub threshold: f64,
    pub language: String,
}

impl Default for MatcherSection {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            language: PORTUGUESE.to_string(),
        }
    }
}

/// `[lexicon]`: where synonyms come from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LexiconSection {
    pub path: PathBuf,
}

impl Default for LexiconSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("config/lexicon.toml"),
        }
    }
}

/// `[logging]`: default filter when `RUST_LOG` is unset.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the config file, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse and check a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Apply environment overrides.  `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(ENV_SERVICE_URL) {
            self.service.url = url;
        }
        if let Some(secs) = lookup(ENV_SERVICE_TIMEOUT) {
            let secs = secs.trim().parse::<u64>().with_context(|| {
                format!("{ENV_SERVICE_TIMEOUT} must be a whole number of seconds")
            })?;
            self.service.timeout_secs = Some(secs);
        }
        if let Some(path) = lookup(ENV_LEXICON_PATH) {
            self.lexicon.path = PathBuf::from(path);
        }
        self.check()
    }

    /// Settings for the scheduling service client.
    pub fn service_config(&self) -> ScheduleServiceConfig {
        ScheduleServiceConfig {
            url: self.service.url.clone(),
            timeout: self.service.timeout_secs.map(Duration::from_secs),
        }
    }

    fn check(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.matcher.threshold) {
            bail!(
                "matcher.threshold must be between 0 and 1, got {}",
                self.matcher.threshold
            );
        }
        if self.service.timeout_secs == Some(0) {
            bail!("service.timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.service.url, DEFAULT_SERVICE_URL);
        assert_eq!(config.service.timeout_secs, None);
        assert!((config.matcher.threshold - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.matcher.language, "por");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[service]
url = "http://localhost:9000/agendar"
timeout_secs = 10
"#,
        )
        .unwrap();
        assert_eq!(config.service.url, "http://localhost:9000/agendar");
        assert_eq!(
            config.service_config().timeout,
            Some(Duration::from_secs(10))
        );
        assert_eq!(config.lexicon.path, PathBuf::from("config/lexicon.toml"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[service\nurl = ").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        assert!(AppConfig::from_toml_str("[matcher]\nthreshold = 1.5").is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_SERVICE_URL, "https://sched.internal/api"),
            (ENV_SERVICE_TIMEOUT, "30"),
            (ENV_LEXICON_PATH, "/srv/lexicon.toml"),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.service.url, "https://sched.internal/api");
        assert_eq!(config.service.timeout_secs, Some(30));
        assert_eq!(config.lexicon.path, PathBuf::from("/srv/lexicon.toml"));
    }

    #[test]
    fn bad_timeout_override_is_an_error() {
        let mut config = AppConfig::default();
        assert!(config
            .apply_env(|k| (k == ENV_SERVICE_TIMEOUT).then(|| "soon".to_string()))
            .is_err());
        assert!(config
            .apply_env(|k| (k == ENV_SERVICE_TIMEOUT).then(|| "0".to_string()))
            .is_err());
    }
}
