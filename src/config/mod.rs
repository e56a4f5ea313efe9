//! Configuration management.

use crate::search::SearchLimits;
use crate::source::SourceHttpConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for wikihop.
#[derive(Debug, Clone)]
pub struct WikihopConfig {
    /// Path to the data directory holding the durable cache database.
    pub data_dir: PathBuf,
    /// Link source configuration.
    pub source: SourceConfig,
    /// Search bounds.
    pub search: SearchConfig,
    /// Cache tier capacities.
    pub cache: CacheConfig,
}

/// Link source configuration.
#[derive(Debug, Clone, Default)]
pub struct SourceConfig {
    /// API endpoint (defaults to the English Wikipedia).
    pub endpoint: Option<String>,
    /// Title substituted when every resolution strategy fails.
    pub fallback_title: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

/// Search bound configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum path length.
    pub max_depth: usize,
    /// Default wall-clock budget in seconds.
    pub time_budget_secs: u64,
    /// Ceiling on dequeued nodes per search.
    pub node_ceiling: usize,
    /// Neighbors kept per expanded node.
    pub branch_cap: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let limits = SearchLimits::default();
        Self {
            max_depth: limits.max_depth,
            time_budget_secs: limits.time_budget.as_secs(),
            node_ceiling: limits.node_ceiling,
            branch_cap: limits.branch_cap,
        }
    }
}

/// Cache tier configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Hot tier ceiling before the drop-oldest-half flush.
    pub hot_capacity: usize,
    /// Recent-result LRU capacity.
    pub recent_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            hot_capacity: 1000,
            recent_capacity: 2000,
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Source section.
    pub source: Option<ConfigFileSource>,
    /// Search section.
    pub search: Option<ConfigFileSearch>,
    /// Cache section.
    pub cache: Option<ConfigFileCache>,
}

/// Source section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileSource {
    /// API endpoint.
    pub endpoint: Option<String>,
    /// Fallback title.
    pub fallback_title: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

/// Search section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileSearch {
    /// Maximum path length.
    pub max_depth: Option<usize>,
    /// Default budget in seconds.
    pub time_budget_secs: Option<u64>,
    /// Node ceiling.
    pub node_ceiling: Option<usize>,
    /// Branch cap.
    pub branch_cap: Option<usize>,
}

/// Cache section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileCache {
    /// Hot tier ceiling.
    pub hot_capacity: Option<usize>,
    /// Recent LRU capacity.
    pub recent_capacity: Option<usize>,
}

impl Default for WikihopConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".wikihop"),
            source: SourceConfig::default(),
            search: SearchConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl WikihopConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/wikihop/` on macOS)
    /// 2. XDG config dir (`~/.config/wikihop/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join("wikihop").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("wikihop")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `WikihopConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(source) = file.source {
            config.source.endpoint = source.endpoint;
            config.source.fallback_title = source.fallback_title;
            config.source.timeout_ms = source.timeout_ms;
            config.source.connect_timeout_ms = source.connect_timeout_ms;
        }
        if let Some(search) = file.search {
            if let Some(v) = search.max_depth {
                config.search.max_depth = v;
            }
            if let Some(v) = search.time_budget_secs {
                config.search.time_budget_secs = v;
            }
            if let Some(v) = search.node_ceiling {
                config.search.node_ceiling = v;
            }
            if let Some(v) = search.branch_cap {
                config.search.branch_cap = v;
            }
        }
        if let Some(cache) = file.cache {
            if let Some(v) = cache.hot_capacity {
                config.cache.hot_capacity = v;
            }
            if let Some(v) = cache.recent_capacity {
                config.cache.recent_capacity = v;
            }
        }

        config
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Path of the durable cache database.
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("pages.db")
    }

    /// Search limits derived from this configuration.
    #[must_use]
    pub fn limits(&self) -> SearchLimits {
        SearchLimits::default()
            .with_max_depth(self.search.max_depth)
            .with_time_budget(Duration::from_secs(self.search.time_budget_secs))
            .with_node_ceiling(self.search.node_ceiling)
            .with_branch_cap(self.search.branch_cap)
    }

    /// HTTP settings derived from this configuration, with environment
    /// overrides applied on top.
    #[must_use]
    pub fn http_config(&self) -> SourceHttpConfig {
        let mut settings = SourceHttpConfig::default();
        if let Some(timeout_ms) = self.source.timeout_ms {
            settings.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = self.source.connect_timeout_ms {
            settings.connect_timeout_ms = connect_timeout_ms;
        }
        settings.with_env_overrides()
    }
}
