//! Configuration loading.
//!
//! Settings come from `recipe-lookup/config.toml` files found in
//! `$XDG_CONFIG_DIRS` and then `$XDG_CONFIG_HOME`; later files override
//! earlier ones key by key. `RECIPES_CONFIG` replaces the search path with a
//! single file. A few keys can also be overridden from the environment.

use crate::error::{LookupError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "https://www.bing.com/search";
pub const DEFAULT_SITE: &str = "code.activestate.com/recipes";
pub const DEFAULT_LANGUAGE: &str = "python";
pub const DEFAULT_API_URL: &str = "https://code.activestate.com/recipes/api/2/recipes";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_RESULT_SELECTOR: &str = "li h2 a, li h3 a";
pub const DEFAULT_MAX_RESULTS: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_RESULTS_LIMIT: usize = 100;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    search_url: Option<String>,
    site: Option<String>,
    language: Option<String>,
    api_url: Option<String>,
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
    max_results: Option<usize>,
    result_selector: Option<String>,
    workspace_dir: Option<PathBuf>,
}

impl ConfigToml {
    fn merge(&mut self, other: ConfigToml) {
        if other.search_url.is_some() {
            self.search_url = other.search_url;
        }
        if other.site.is_some() {
            self.site = other.site;
        }
        if other.language.is_some() {
            self.language = other.language;
        }
        if other.api_url.is_some() {
            self.api_url = other.api_url;
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.max_results.is_some() {
            self.max_results = other.max_results;
        }
        if other.result_selector.is_some() {
            self.result_selector = other.result_selector;
        }
        if other.workspace_dir.is_some() {
            self.workspace_dir = other.workspace_dir;
        }
    }
}

/// Resolved settings for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Search engine result page, queried with `?q=...`
    pub search_url: String,
    /// Site qualifier appended to every query
    pub site: String,
    /// Language tag appended to every query
    pub language: String,
    /// Recipe record endpoint; records live at `<api_url>/<id>/`
    pub api_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Upper bound on entries kept from one search
    pub max_results: usize,
    /// CSS selector for candidate result links
    pub result_selector: String,
    /// Where imported recipes are written, if anywhere
    pub workspace_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_owned(),
            site: DEFAULT_SITE.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
            api_url: DEFAULT_API_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_results: DEFAULT_MAX_RESULTS,
            result_selector: DEFAULT_RESULT_SELECTOR.to_owned(),
            workspace_dir: None,
        }
    }
}

impl Config {
    /// Load from the standard locations plus environment overrides.
    pub fn load() -> Result<Self> {
        let files = match std::env::var_os("RECIPES_CONFIG") {
            Some(path) => vec![PathBuf::from(path)],
            None => find_config_files(),
        };
        let mut merged = load_files(&files)?;
        apply_env(&mut merged)?;
        build(merged)
    }

    /// Load a single explicit file plus environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LookupError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let mut merged = read_toml(path)?;
        apply_env(&mut merged)?;
        build(merged)
    }

    pub fn with_max_results(mut self, max_results: usize) -> Result<Self> {
        check_max_results(max_results)?;
        self.max_results = max_results;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = clamp_timeout(secs);
        self
    }

    pub fn with_workspace_dir(mut self, dir: PathBuf) -> Self {
        self.workspace_dir = Some(dir);
        self
    }
}

fn clamp_timeout(secs: u64) -> Duration {
    Duration::from_secs(secs.clamp(5, 300))
}

fn check_max_results(n: usize) -> Result<()> {
    if n == 0 || n > MAX_RESULTS_LIMIT {
        return Err(LookupError::Config(format!(
            "max_results must be between 1 and {MAX_RESULTS_LIMIT}, got {n}"
        )));
    }
    Ok(())
}

fn split_xdg_config_dirs() -> Vec<PathBuf> {
    let raw = std::env::var("XDG_CONFIG_DIRS").unwrap_or_else(|_| "/etc/xdg".to_owned());
    raw.split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn xdg_config_home() -> PathBuf {
    if let Ok(raw) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".").join(".config"))
}

fn find_config_files() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = split_xdg_config_dirs()
        .into_iter()
        .map(|dir| dir.join("recipe-lookup").join("config.toml"))
        .collect();
    paths.push(xdg_config_home().join("recipe-lookup").join("config.toml"));
    paths
}

fn read_toml(path: &Path) -> Result<ConfigToml> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| LookupError::Config(format!("failed to read {}: {e}", path.display())))?;
    toml::from_str::<ConfigToml>(&text)
        .map_err(|e| LookupError::Config(format!("invalid TOML in {}: {e}", path.display())))
}

fn load_files(paths: &[PathBuf]) -> Result<ConfigToml> {
    let mut merged = ConfigToml::default();
    for path in paths {
        if !path.exists() {
            continue;
        }
        tracing::debug!("loading config from {}", path.display());
        merged.merge(read_toml(path)?);
    }
    Ok(merged)
}

fn apply_env(cfg: &mut ConfigToml) -> Result<()> {
    if let Ok(raw) = std::env::var("RECIPES_HTTP_TIMEOUT") {
        let secs = raw.trim().parse::<u64>().map_err(|_| {
            LookupError::Config(format!("RECIPES_HTTP_TIMEOUT is not a number: {raw}"))
        })?;
        cfg.timeout_secs = Some(secs);
    }
    if let Ok(raw) = std::env::var("RECIPES_MAX_RESULTS") {
        let n = raw.trim().parse::<usize>().map_err(|_| {
            LookupError::Config(format!("RECIPES_MAX_RESULTS is not a number: {raw}"))
        })?;
        cfg.max_results = Some(n);
    }
    Ok(())
}

fn build(cfg: ConfigToml) -> Result<Config> {
    let defaults = Config::default();
    let max_results = cfg.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
    check_max_results(max_results)?;

    Ok(Config {
        search_url: cfg.search_url.unwrap_or(defaults.search_url),
        site: cfg.site.unwrap_or(defaults.site),
        language: cfg.language.unwrap_or(defaults.language),
        api_url: cfg
            .api_url
            .map(|u| u.trim_end_matches('/').to_owned())
            .unwrap_or(defaults.api_url),
        user_agent: cfg.user_agent.unwrap_or(defaults.user_agent),
        timeout: clamp_timeout(cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        max_results,
        result_selector: cfg.result_selector.unwrap_or(defaults.result_selector),
        workspace_dir: cfg.workspace_dir,
    })
}
