use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use crate::models::RankingLimits;
use crate::services::{FeedSource, RemoteFeedClient, SourceError};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_max_consecutive")]
    pub max_consecutive: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            max_consecutive: default_max_consecutive(),
        }
    }
}

impl RankingSettings {
    pub fn limits(&self) -> RankingLimits {
        RankingLimits {
            max_items: self.max_items,
            max_consecutive: self.max_consecutive,
        }
    }
}

fn default_max_items() -> usize { 10 }
fn default_max_consecutive() -> usize { 2 }

/// Which supplier feeds the `GET /feed` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    File,
    Remote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_source_kind")]
    pub kind: SourceKind,
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: default_source_kind(),
            path: default_source_path(),
            endpoint: None,
            api_key: None,
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceSettings {
    /// Build the configured feed source
    pub fn to_source(&self) -> Result<FeedSource, SourceError> {
        match self.kind {
            SourceKind::File => Ok(FeedSource::File(self.path.clone())),
            SourceKind::Remote => {
                let endpoint = self.endpoint.clone().ok_or_else(|| {
                    SourceError::InvalidConfig("source.endpoint is required for a remote source".into())
                })?;
                let api_key = self.api_key.clone().unwrap_or_default();
                let client = RemoteFeedClient::new(endpoint, api_key, self.table.clone(), self.timeout_secs)?;
                Ok(FeedSource::Remote(client))
            }
        }
    }
}

fn default_source_kind() -> SourceKind { SourceKind::File }
fn default_source_path() -> PathBuf { PathBuf::from("data/mock_feed.json") }
fn default_table() -> String { "feed_items".to_string() }
fn default_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_ttl_secs() -> u64 { 30 }
fn default_max_entries() -> u64 { 16 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MOOP_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MOOP__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MOOP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MOOP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the hosted backend's conventional variables
///
/// `SUPABASE_URL` and `SUPABASE_ANON_KEY` fill in the remote source when set.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let endpoint = env::var("SUPABASE_URL").ok();
    let api_key = env::var("SUPABASE_ANON_KEY").ok();

    if endpoint.is_none() && api_key.is_none() {
        return Ok(settings);
    }

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = endpoint {
        builder = builder.set_override("source.endpoint", endpoint)?;
    }
    if let Some(api_key) = api_key {
        builder = builder.set_override("source.api_key", api_key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_ranking() {
        let ranking = RankingSettings::default();
        assert_eq!(ranking.limits(), RankingLimits::default());
    }

    #[test]
    fn test_oversized_ranking_limits_are_clamped_by_ranker() {
        let ranking = RankingSettings {
            max_items: 20,
            max_consecutive: 2,
        };
        let ranker = crate::core::FeedRanker::new(ranking.limits());
        assert_eq!(ranker.limits().max_items, crate::models::MAX_FEED_ITEMS);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[ranking]
max_items = 5

[source]
kind = "remote"
endpoint = "https://project.example.co"
table = "events"
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.ranking.max_items, 5);
        assert_eq!(settings.ranking.max_consecutive, 2);
        assert_eq!(settings.source.kind, SourceKind::Remote);
        assert_eq!(settings.source.table, "events");
        assert_eq!(settings.cache.ttl_secs, 30);

        match settings.source.to_source().unwrap() {
            FeedSource::Remote(client) => {
                assert_eq!(client.table_url(), "https://project.example.co/rest/v1/events?select=*")
            }
            other => panic!("expected remote source, got {:?}", other),
        }
    }

    #[test]
    fn test_remote_source_requires_endpoint() {
        let source = SourceSettings {
            kind: SourceKind::Remote,
            ..Default::default()
        };
        assert!(source.to_source().is_err());
    }

    #[test]
    fn test_default_source_is_mock_file() {
        match SourceSettings::default().to_source().unwrap() {
            FeedSource::File(path) => assert_eq!(path, PathBuf::from("data/mock_feed.json")),
            other => panic!("expected file source, got {:?}", other),
        }
    }
}
