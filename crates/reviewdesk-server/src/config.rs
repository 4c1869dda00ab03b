use anyhow::{Context, Result, bail};
use config::{Config, ConfigError, Environment, File, FileFormat};
use reviewdesk_core::{RepoRef, ServerConfig, UiConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub github: GithubConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Forces debug-level logging
    #[serde(default)]
    pub debug: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// GitHub configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Personal access token
    #[serde(default)]
    pub token: String,
    /// API base URL override (GitHub Enterprise)
    pub api_url: Option<String>,
    /// `owner/name` or a remote URL; detected from `git remote` when unset
    pub repository: Option<String>,
}

impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("token", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("repository", &self.repository)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. The TOML file at `path` (if present)
    /// 3. Environment variables (prefixed with REVIEWDESK_)
    ///
    /// Environment variables use double underscore for nesting:
    /// - REVIEWDESK_SERVER__PORT=9000
    /// - REVIEWDESK_GITHUB__TOKEN=ghp_...
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(path, environment())
    }

    fn load_with(path: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("github.token", "")?
            .set_default("ui.default_pr_state", "open")?
            .set_default("ui.title", "reviewdesk")?
            .set_default("log_level", "info")?
            .set_default("debug", false)?;

        // Try to load the config file if it exists
        let builder = if path.exists() {
            builder.add_source(File::from(path).format(FileFormat::Toml))
        } else {
            builder
        };

        // Override with environment variables
        let builder = builder.add_source(environment);

        builder.build()?.try_deserialize()
    }

    /// Log filter directive used when RUST_LOG is not set
    pub fn log_filter(&self) -> &str {
        if self.debug { "debug" } else { self.log_level.as_str() }
    }

    /// Repository from config, falling back to the `origin` remote of the
    /// current directory
    pub fn resolve_repository(&self) -> Result<RepoRef> {
        match &self.github.repository {
            Some(repository) if !repository.trim().is_empty() => repository
                .parse::<RepoRef>()
                .with_context(|| format!("Invalid github.repository '{}'", repository)),
            _ => detect_origin_repository(Path::new(".")),
        }
    }
}

/// `REVIEWDESK_` variables; `__` separates nested keys
fn environment() -> Environment {
    Environment::with_prefix("REVIEWDESK")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Read `remote.origin.url` from the git repository at `repo_path`
pub fn detect_origin_repository(repo_path: &Path) -> Result<RepoRef> {
    let output = Command::new("git")
        .args([
            "-C",
            &repo_path.to_string_lossy(),
            "remote",
            "get-url",
            "origin",
        ])
        .output()
        .context("Failed to run git remote get-url")?;

    if !output.status.success() {
        bail!(
            "github.repository is not set and no origin remote was found: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    url.parse::<RepoRef>()
        .with_context(|| format!("Cannot derive a GitHub repository from remote '{}'", url))
}
