use thiserror::Error;

/// GitHub crate error types
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Octocrab error: {0}")]
    OctocrabError(#[from] octocrab::Error),
}

pub type GithubResult<T> = Result<T, GithubError>;

impl GithubError {
    /// Map an octocrab failure, turning GitHub 404 responses into `NotFound`
    pub fn from_octocrab(context: &str, error: octocrab::Error) -> Self {
        match &error {
            octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404 => {
                GithubError::NotFound(format!("{}: {}", context, source.message))
            }
            _ => GithubError::ApiError(format!("{}: {}", context, error)),
        }
    }
}
