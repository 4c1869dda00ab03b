use crate::error::{GithubError, GithubResult};
use crate::gateway::ReviewGateway;
use crate::types::{PostedReply, PullRequestDetail, PullRequestSummary};
use async_trait::async_trait;
use reviewdesk_core::{PrState, RepoRef};
use std::sync::Mutex;

/// A reply recorded by [`MockGateway`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedReply {
    pub number: u64,
    pub comment_id: u64,
    pub body: String,
}

#[derive(Debug, Clone)]
enum Failure {
    Api(String),
    NotFound(String),
}

/// In-memory gateway for testing the web layer without GitHub
#[derive(Debug)]
pub struct MockGateway {
    repo: RepoRef,
    pull_requests: Vec<PullRequestSummary>,
    details: Vec<PullRequestDetail>,
    failure: Option<Failure>,
    replies: Mutex<Vec<RecordedReply>>,
}

impl MockGateway {
    /// Create an empty mock bound to `repo`
    pub fn new(repo: RepoRef) -> Self {
        Self {
            repo,
            pull_requests: Vec::new(),
            details: Vec::new(),
            failure: None,
            replies: Mutex::new(Vec::new()),
        }
    }

    pub fn with_pull_requests(mut self, pull_requests: Vec<PullRequestSummary>) -> Self {
        self.pull_requests = pull_requests;
        self
    }

    pub fn with_detail(mut self, detail: PullRequestDetail) -> Self {
        self.details.push(detail);
        self
    }

    /// Make every API call fail with `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(Failure::Api(message.to_string()));
        self
    }

    /// Make every API call fail as if GitHub answered 404
    pub fn failing_not_found(mut self, message: &str) -> Self {
        self.failure = Some(Failure::NotFound(message.to_string()));
        self
    }

    /// Replies posted so far
    pub fn replies(&self) -> Vec<RecordedReply> {
        self.replies
            .lock()
            .map(|replies| replies.clone())
            .unwrap_or_default()
    }

    fn check_failure(&self) -> GithubResult<()> {
        match &self.failure {
            Some(Failure::Api(message)) => Err(GithubError::ApiError(message.clone())),
            Some(Failure::NotFound(message)) => Err(GithubError::NotFound(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ReviewGateway for MockGateway {
    fn repo_info(&self) -> RepoRef {
        self.repo.clone()
    }

    async fn list_my_pull_requests(
        &self,
        _repo: &RepoRef,
        state: PrState,
    ) -> GithubResult<Vec<PullRequestSummary>> {
        self.check_failure()?;

        Ok(self
            .pull_requests
            .iter()
            .filter(|pr| match state {
                PrState::All => true,
                other => pr.state == other.as_str(),
            })
            .cloned()
            .collect())
    }

    async fn get_pull_request_threads(
        &self,
        _repo: &RepoRef,
        number: u64,
        include_resolved: bool,
    ) -> GithubResult<Option<PullRequestDetail>> {
        self.check_failure()?;

        Ok(self
            .details
            .iter()
            .find(|detail| detail.number == number)
            .cloned()
            .map(|mut detail| {
                if !include_resolved {
                    detail.threads.retain(|thread| !thread.is_resolved);
                }
                detail
            }))
    }

    async fn reply_to_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        comment_id: u64,
        body: &str,
    ) -> GithubResult<PostedReply> {
        self.check_failure()?;

        let mut replies = self
            .replies
            .lock()
            .map_err(|e| GithubError::ApiError(format!("Mock state poisoned: {}", e)))?;
        replies.push(RecordedReply {
            number,
            comment_id,
            body: body.to_string(),
        });

        let reply_id = comment_id.wrapping_add(replies.len() as u64);
        Ok(PostedReply {
            comment_id: reply_id,
            url: format!(
                "https://github.com/{}/pull/{}#discussion_r{}",
                repo.full_name(),
                number,
                reply_id
            ),
        })
    }
}
