use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pull request state filter used on the listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrState {
    #[default]
    Open,
    Closed,
    All,
}

impl PrState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrState::Open => "open",
            PrState::Closed => "closed",
            PrState::All => "all",
        }
    }

    /// Search qualifier for the GitHub issue search API, if any
    pub fn search_qualifier(&self) -> Option<&'static str> {
        match self {
            PrState::Open => Some("is:open"),
            PrState::Closed => Some("is:closed"),
            PrState::All => None,
        }
    }
}

impl fmt::Display for PrState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrState {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(PrState::Open),
            "closed" => Ok(PrState::Closed),
            "all" => Ok(PrState::All),
            other => Err(CoreError::InvalidPrState(other.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Presentation settings, also exposed to templates as `config`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// State filter applied when the listing page has no `state` query
    #[serde(default)]
    pub default_pr_state: PrState,

    /// Title shown in the page header
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    "reviewdesk".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_pr_state: PrState::default(),
            title: default_title(),
        }
    }
}

/// Interpret a boolean query flag.
///
/// Only the literal `true` (any case) turns a flag on.
pub fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
