use serde::{Deserialize, Serialize};

/// One row on the pull request listing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub state: String,
    pub draft: bool,
    pub merged: bool,
    pub author: String,
    pub comment_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

/// A pull request together with its review threads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestDetail {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub state: String,
    pub author: String,
    pub created_at: String,
    /// Threads shown on the page (resolved ones only when requested)
    pub threads: Vec<ReviewThread>,
    /// Threads on the pull request, before filtering
    pub total_threads: usize,
    pub resolved_threads: usize,
}

/// A review thread flattened to its root comment plus replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewThread {
    /// GraphQL node id of the thread
    pub id: String,
    /// REST id of the root comment, used as the reply target
    pub comment_id: Option<u64>,
    pub path: Option<String>,
    pub line: Option<u64>,
    pub diff_hunk: Option<String>,
    pub author: String,
    pub author_avatar_url: Option<String>,
    /// GitHub-rendered HTML of the root comment
    pub body_html: String,
    pub created_at: String,
    pub url: String,
    pub is_resolved: bool,
    pub is_outdated: bool,
    pub replies: Vec<ReviewReply>,
}

/// A follow-up comment inside a review thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewReply {
    pub comment_id: Option<u64>,
    pub author: String,
    pub author_avatar_url: Option<String>,
    pub body_html: String,
    pub created_at: String,
    pub url: String,
}

/// Result of posting a reply to a review comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostedReply {
    #[serde(rename = "id")]
    pub comment_id: u64,
    #[serde(rename = "html_url")]
    pub url: String,
}

/// Issue search response (`GET /search/issues`)
#[derive(Debug, Deserialize)]
pub(crate) struct ApiSearchResponse {
    #[serde(default)]
    pub items: Vec<ApiIssue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiIssue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub state: String,
    #[serde(default)]
    pub draft: Option<bool>,
    pub user: Option<ApiUser>,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    pub pull_request: Option<ApiPullRequestRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiPullRequestRef {
    pub merged_at: Option<String>,
}

impl From<ApiIssue> for PullRequestSummary {
    fn from(issue: ApiIssue) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            url: issue.html_url,
            state: issue.state,
            draft: issue.draft.unwrap_or(false),
            merged: issue
                .pull_request
                .is_some_and(|pr| pr.merged_at.is_some()),
            author: issue.user.map(|u| u.login).unwrap_or_default(),
            comment_count: issue.comments,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
        }
    }
}
