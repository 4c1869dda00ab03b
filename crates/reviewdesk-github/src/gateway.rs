use crate::error::GithubResult;
use crate::types::{PostedReply, PullRequestDetail, PullRequestSummary};
use async_trait::async_trait;
use reviewdesk_core::{PrState, RepoRef};

/// Review operations the web layer needs from GitHub
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// Repository this gateway is bound to
    fn repo_info(&self) -> RepoRef;

    /// Pull requests in `repo` authored by the authenticated user
    async fn list_my_pull_requests(
        &self,
        repo: &RepoRef,
        state: PrState,
    ) -> GithubResult<Vec<PullRequestSummary>>;

    /// Pull request header and review threads; `None` if the PR does not exist
    async fn get_pull_request_threads(
        &self,
        repo: &RepoRef,
        number: u64,
        include_resolved: bool,
    ) -> GithubResult<Option<PullRequestDetail>>;

    /// Reply to the review comment `comment_id` on pull request `number`
    async fn reply_to_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        comment_id: u64,
        body: &str,
    ) -> GithubResult<PostedReply>;
}
