//! GraphQL query for a pull request's review threads and the types it
//! deserializes into.

use crate::types::{PullRequestDetail, ReviewReply, ReviewThread};
use serde::{Deserialize, Serialize};

/// Review threads with their comments. Only the first 100 threads and the
/// first 100 comments per thread are fetched.
pub const REVIEW_THREADS_QUERY: &str = r#"
query ReviewThreads($owner: String!, $name: String!, $number: Int!) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      number
      title
      url
      state
      createdAt
      author { login avatarUrl }
      reviewThreads(first: 100) {
        nodes {
          id
          isResolved
          isOutdated
          path
          line
          comments(first: 100) {
            nodes {
              id
              databaseId
              bodyHTML
              createdAt
              url
              diffHunk
              author { login avatarUrl }
            }
          }
        }
      }
    }
  }
}
"#;

/// GraphQL request structure
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

/// GraphQL response structure
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

/// GraphQL error structure
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

impl GraphQlError {
    pub fn is_not_found(&self) -> bool {
        self.error_type.as_deref() == Some("NOT_FOUND")
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewThreadsData {
    pub repository: Option<GqlRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlRepository {
    pub pull_request: Option<GqlPullRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlPullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub state: String,
    #[serde(default)]
    pub created_at: String,
    pub author: Option<GqlActor>,
    pub review_threads: GqlConnection<GqlReviewThread>,
}

#[derive(Debug, Deserialize)]
pub struct GqlConnection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlActor {
    pub login: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlReviewThread {
    pub id: String,
    pub is_resolved: bool,
    #[serde(default)]
    pub is_outdated: bool,
    pub path: Option<String>,
    pub line: Option<u64>,
    pub comments: GqlConnection<GqlComment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlComment {
    pub id: String,
    pub database_id: Option<u64>,
    #[serde(rename = "bodyHTML", default)]
    pub body_html: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub url: String,
    pub diff_hunk: Option<String>,
    pub author: Option<GqlActor>,
}

fn actor_parts(author: Option<GqlActor>) -> (String, Option<String>) {
    match author {
        Some(actor) => (actor.login, actor.avatar_url),
        // Deleted accounts come back as a null author
        None => ("ghost".to_string(), None),
    }
}

impl GqlPullRequest {
    /// Flatten into the template-facing shape, dropping resolved threads
    /// unless `include_resolved` is set.
    pub fn into_detail(self, include_resolved: bool) -> PullRequestDetail {
        let mut total_threads = 0;
        let mut resolved_threads = 0;
        let mut threads = Vec::new();

        for thread in self.review_threads.nodes.into_iter().flatten() {
            total_threads += 1;
            if thread.is_resolved {
                resolved_threads += 1;
                if !include_resolved {
                    continue;
                }
            }
            if let Some(view) = thread.into_view() {
                threads.push(view);
            }
        }

        let (author, _) = actor_parts(self.author);

        PullRequestDetail {
            number: self.number,
            title: self.title,
            url: self.url,
            state: self.state.to_lowercase(),
            author,
            created_at: self.created_at,
            threads,
            total_threads,
            resolved_threads,
        }
    }
}

impl GqlReviewThread {
    /// The first comment becomes the thread root; the rest are replies.
    /// Threads without comments yield `None`.
    fn into_view(self) -> Option<ReviewThread> {
        let mut comments = self.comments.nodes.into_iter().flatten();
        let root = comments.next()?;
        let (author, author_avatar_url) = actor_parts(root.author);

        let replies = comments
            .map(|comment| {
                let (author, author_avatar_url) = actor_parts(comment.author);
                ReviewReply {
                    comment_id: comment.database_id,
                    author,
                    author_avatar_url,
                    body_html: comment.body_html,
                    created_at: comment.created_at,
                    url: comment.url,
                }
            })
            .collect();

        Some(ReviewThread {
            id: self.id,
            comment_id: root.database_id,
            path: self.path,
            line: self.line,
            diff_hunk: root.diff_hunk,
            author,
            author_avatar_url,
            body_html: root.body_html,
            created_at: root.created_at,
            url: root.url,
            is_resolved: self.is_resolved,
            is_outdated: self.is_outdated,
            replies,
        })
    }
}
