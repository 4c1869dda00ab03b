use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};
use axum::{
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use reviewdesk_core::{PrState, parse_flag};
use serde::Deserialize;
use tracing::{info, warn};

/// Query parameters for the listing page
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub state: Option<String>,
}

/// Query parameters for the pull request page
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub include_resolved: Option<String>,
    pub compact_mode: Option<String>,
}

/// GET / - the viewer's pull requests
pub async fn index(
    State(state): State<AppState>,
    query: Result<Query<IndexQuery>, QueryRejection>,
) -> Response {
    let result = match query {
        Ok(Query(query)) => render_index(&state, query).await,
        Err(rejection) => Err(rejection.into()),
    };

    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!("Failed to render pull request list: {}", e);
            state.templates.error_page(&e)
        }
    }
}

async fn render_index(state: &AppState, query: IndexQuery) -> ApiResult<String> {
    let pr_state = match query.state.as_deref() {
        Some(raw) => raw.parse::<PrState>()?,
        None => state.ui.default_pr_state,
    };

    let repo = state.gateway.repo_info();
    let prs = state.gateway.list_my_pull_requests(&repo, pr_state).await?;

    state.templates.render(
        "index.html",
        context! {
            prs => prs,
            owner => &repo.owner,
            name => &repo.name,
            state => pr_state.as_str(),
        },
    )
}

/// GET /pr/{number} - review threads of one pull request
pub async fn pr_detail(
    State(state): State<AppState>,
    number: Result<Path<u64>, PathRejection>,
    query: Result<Query<DetailQuery>, QueryRejection>,
) -> Response {
    let result = match (number, query) {
        (Ok(Path(number)), Ok(Query(query))) => render_pr_detail(&state, number, query).await,
        (Err(rejection), _) => Err(rejection.into()),
        (_, Err(rejection)) => Err(rejection.into()),
    };

    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!("Failed to render pull request page: {}", e);
            state.templates.error_page(&e)
        }
    }
}

async fn render_pr_detail(state: &AppState, number: u64, query: DetailQuery) -> ApiResult<String> {
    let include_resolved = parse_flag(query.include_resolved.as_deref());
    let compact_mode = parse_flag(query.compact_mode.as_deref());

    let repo = state.gateway.repo_info();
    let pr = state
        .gateway
        .get_pull_request_threads(&repo, number, include_resolved)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("PR #{} could not be found.", number)))?;

    info!(
        "Rendering PR #{} with {} threads (include_resolved={}, compact_mode={})",
        number,
        pr.threads.len(),
        include_resolved,
        compact_mode
    );

    state.templates.render(
        "pr_detail.html",
        context! {
            pr => pr,
            owner => &repo.owner,
            name => &repo.name,
            include_resolved => include_resolved,
            compact_mode => compact_mode,
        },
    )
}
