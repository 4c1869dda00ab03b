use crate::{
    error::{GithubError, GithubResult},
    gateway::ReviewGateway,
    queries::{GraphQlRequest, GraphQlResponse, REVIEW_THREADS_QUERY, ReviewThreadsData},
    types::{ApiSearchResponse, PostedReply, PullRequestDetail, PullRequestSummary},
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reviewdesk_core::{PrState, RepoRef};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

/// Personal access token used for every GitHub call
pub struct GithubToken(SecretString);

impl GithubToken {
    pub fn new(token: String) -> Self {
        Self(SecretString::from(token))
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for GithubToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GithubToken([REDACTED])")
    }
}

/// Query string for `GET /search/issues`
#[derive(Debug, Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    sort: &'a str,
    order: &'a str,
    per_page: u8,
}

/// GitHub API client bound to a single repository
pub struct GithubApiClient {
    client: Octocrab,
    repo: RepoRef,
}

impl GithubApiClient {
    /// Create new GitHub API client with authentication token
    ///
    /// # Arguments
    /// * `token` - Personal access token
    /// * `api_url` - Base URL override (GitHub Enterprise, tests); defaults to api.github.com
    /// * `repo` - Repository the client operates on
    pub fn new(token: &GithubToken, api_url: Option<&str>, repo: RepoRef) -> GithubResult<Self> {
        let builder = Octocrab::builder().personal_token(token.0.expose_secret().to_string());

        let builder = match api_url {
            Some(url) => builder.base_uri(url).map_err(|e| {
                GithubError::ApiError(format!("Invalid GitHub API URL {}: {}", url, e))
            })?,
            None => builder,
        };

        let client = builder.build().map_err(|e| {
            GithubError::ApiError(format!("Failed to create octocrab client: {}", e))
        })?;

        Ok(Self { client, repo })
    }

    /// Build the issue search query for the viewer's pull requests
    fn search_query(repo: &RepoRef, state: PrState) -> String {
        let mut query = format!("is:pr author:@me repo:{}", repo.full_name());
        if let Some(qualifier) = state.search_qualifier() {
            query.push(' ');
            query.push_str(qualifier);
        }
        query
    }
}

#[async_trait]
impl ReviewGateway for GithubApiClient {
    fn repo_info(&self) -> RepoRef {
        self.repo.clone()
    }

    async fn list_my_pull_requests(
        &self,
        repo: &RepoRef,
        state: PrState,
    ) -> GithubResult<Vec<PullRequestSummary>> {
        let query = Self::search_query(repo, state);
        let params = SearchParams {
            q: &query,
            sort: "updated",
            order: "desc",
            per_page: 100,
        };

        debug!("Searching pull requests: {}", query);

        let response: ApiSearchResponse = self
            .client
            .get("/search/issues", Some(&params))
            .await
            .map_err(|e| {
                GithubError::from_octocrab(
                    &format!("Failed to list pull requests for {}", repo),
                    e,
                )
            })?;

        let prs: Vec<PullRequestSummary> = response.items.into_iter().map(Into::into).collect();
        info!("Fetched {} {} pull requests for {}", prs.len(), state, repo);

        Ok(prs)
    }

    async fn get_pull_request_threads(
        &self,
        repo: &RepoRef,
        number: u64,
        include_resolved: bool,
    ) -> GithubResult<Option<PullRequestDetail>> {
        let request = GraphQlRequest {
            query: REVIEW_THREADS_QUERY,
            variables: json!({
                "owner": repo.owner,
                "name": repo.name,
                "number": number,
            }),
        };

        let response: GraphQlResponse<ReviewThreadsData> =
            self.client.graphql(&request).await.map_err(|e| {
                GithubError::from_octocrab(
                    &format!("Failed to fetch review threads for #{}", number),
                    e,
                )
            })?;

        let pull_request = response
            .data
            .and_then(|data| data.repository)
            .and_then(|repository| repository.pull_request);

        if let Some(errors) = response.errors {
            if errors.iter().any(|e| e.is_not_found()) {
                return Ok(None);
            }
            if pull_request.is_none() && !errors.is_empty() {
                let message = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(GithubError::GraphQl(message));
            }
        }

        let detail = pull_request.map(|pr| pr.into_detail(include_resolved));
        if let Some(detail) = &detail {
            info!(
                "Fetched {} review threads ({} resolved) for {}#{}",
                detail.total_threads, detail.resolved_threads, repo, number
            );
        }

        Ok(detail)
    }

    async fn reply_to_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        comment_id: u64,
        body: &str,
    ) -> GithubResult<PostedReply> {
        let route = format!(
            "/repos/{}/{}/pulls/{}/comments/{}/replies",
            repo.owner, repo.name, number, comment_id
        );

        let reply: PostedReply = self
            .client
            .post(route, Some(&json!({ "body": body })))
            .await
            .map_err(|e| {
                GithubError::from_octocrab(
                    &format!("Failed to reply to comment {} on #{}", comment_id, number),
                    e,
                )
            })?;

        info!(
            "Posted reply {} to comment {} on {}#{}",
            reply.comment_id, comment_id, repo, number
        );

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo() -> RepoRef {
        RepoRef::new("octo", "app")
    }

    async fn client_for(server: &MockServer) -> GithubApiClient {
        // Initialize rustls crypto provider for tests
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        GithubApiClient::new(
            &GithubToken::new("test-token".to_string()),
            Some(&server.uri()),
            repo(),
        )
        .expect("Failed to create GitHub client")
    }

    #[tokio::test]
    async fn test_create_api_client() {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let result = GithubApiClient::new(&GithubToken::new("test-token".to_string()), None, repo());
        assert!(result.is_ok());
        assert_eq!(result.unwrap().repo_info(), repo());
    }

    #[test]
    fn test_search_query() {
        assert_eq!(
            GithubApiClient::search_query(&repo(), PrState::Open),
            "is:pr author:@me repo:octo/app is:open"
        );
        assert_eq!(
            GithubApiClient::search_query(&repo(), PrState::All),
            "is:pr author:@me repo:octo/app"
        );
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = GithubToken::new("ghp_secret".to_string());
        assert!(!format!("{:?}", token).contains("ghp_secret"));
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn test_list_my_pull_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("q", "is:pr author:@me repo:octo/app is:closed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 1,
                "incomplete_results": false,
                "items": [{
                    "number": 5,
                    "title": "Fix flaky test",
                    "html_url": "https://github.com/octo/app/pull/5",
                    "state": "closed",
                    "user": { "login": "me" },
                    "comments": 2,
                    "created_at": "2024-05-01T00:00:00Z",
                    "updated_at": "2024-05-03T00:00:00Z",
                    "pull_request": { "merged_at": "2024-05-03T00:00:00Z" }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let prs = client
            .list_my_pull_requests(&repo(), PrState::Closed)
            .await
            .unwrap();

        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].number, 5);
        assert!(prs[0].merged);
    }

    #[tokio::test]
    async fn test_list_my_pull_requests_api_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.list_my_pull_requests(&repo(), PrState::Open).await;

        assert!(matches!(result, Err(GithubError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_get_pull_request_threads() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "variables": { "owner": "octo", "name": "app", "number": 3 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "repository": { "pullRequest": {
                    "number": 3,
                    "title": "Add cache",
                    "url": "https://github.com/octo/app/pull/3",
                    "state": "OPEN",
                    "createdAt": "2024-05-01T00:00:00Z",
                    "author": { "login": "me", "avatarUrl": null },
                    "reviewThreads": { "nodes": [{
                        "id": "T1",
                        "isResolved": true,
                        "isOutdated": false,
                        "path": "src/cache.rs",
                        "line": 4,
                        "comments": { "nodes": [{
                            "id": "C1",
                            "databaseId": 77,
                            "bodyHTML": "<p>why?</p>",
                            "createdAt": "2024-05-02T00:00:00Z",
                            "url": "https://github.com/octo/app/pull/3#discussion_r77",
                            "diffHunk": "@@",
                            "author": { "login": "rev", "avatarUrl": null }
                        }]}
                    }]}
                }}}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let hidden = client
            .get_pull_request_threads(&repo(), 3, false)
            .await
            .unwrap()
            .expect("PR should exist");
        assert!(hidden.threads.is_empty());
        assert_eq!(hidden.resolved_threads, 1);

        let shown = client
            .get_pull_request_threads(&repo(), 3, true)
            .await
            .unwrap()
            .expect("PR should exist");
        assert_eq!(shown.threads.len(), 1);
        assert_eq!(shown.threads[0].comment_id, Some(77));
    }

    #[tokio::test]
    async fn test_get_pull_request_threads_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "repository": { "pullRequest": null } },
                "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a PullRequest" }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.get_pull_request_threads(&repo(), 999, false).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_pull_request_threads_graphql_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "type": "FORBIDDEN", "message": "Resource not accessible" }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.get_pull_request_threads(&repo(), 1, false).await;

        match result {
            Err(GithubError::GraphQl(msg)) => assert!(msg.contains("Resource not accessible")),
            other => panic!("Expected GraphQl error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reply_to_comment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/octo/app/pulls/3/comments/77/replies"))
            .and(body_partial_json(json!({ "body": "Fixed in abc123" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 78,
                "html_url": "https://github.com/octo/app/pull/3#discussion_r78",
                "body": "Fixed in abc123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let reply = client
            .reply_to_comment(&repo(), 3, 77, "Fixed in abc123")
            .await
            .unwrap();

        assert_eq!(reply.comment_id, 78);
    }

    #[tokio::test]
    async fn test_reply_to_missing_comment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/octo/app/pulls/3/comments/1/replies"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.reply_to_comment(&repo(), 3, 1, "hello").await;

        assert!(matches!(result, Err(GithubError::NotFound(_))));
    }
}
