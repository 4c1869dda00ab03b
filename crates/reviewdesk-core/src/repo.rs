use crate::error::{CoreError, CoreResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    // Match: owner/name
    static ref SHORT_REGEX: Regex = Regex::new(r"^([\w.-]+)/([\w.-]+)$").unwrap();

    // Match: https://github.com/owner/name(.git)
    static ref HTTPS_REGEX: Regex =
        Regex::new(r"^https?://[^/]+/([\w.-]+)/([\w.-]+?)(?:\.git)?/?$").unwrap();

    // Match: git@github.com:owner/name(.git)
    static ref SCP_REGEX: Regex =
        Regex::new(r"^[\w.-]+@[^:/]+:([\w.-]+)/([\w.-]+?)(?:\.git)?$").unwrap();

    // Match: ssh://git@github.com/owner/name(.git)
    static ref SSH_REGEX: Regex =
        Regex::new(r"^ssh://(?:[\w.-]+@)?[^/]+/([\w.-]+)/([\w.-]+?)(?:\.git)?/?$").unwrap();
}

/// A GitHub repository identified by owner and name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = CoreError;

    /// Parse `owner/name` or a git remote URL (https, scp-style or ssh)
    fn from_str(s: &str) -> CoreResult<Self> {
        let input = s.trim();

        for regex in [&*SHORT_REGEX, &*HTTPS_REGEX, &*SCP_REGEX, &*SSH_REGEX] {
            if let Some(caps) = regex.captures(input) {
                return Ok(RepoRef::new(&caps[1], &caps[2]));
            }
        }

        Err(CoreError::InvalidRepository(input.to_string()))
    }
}
