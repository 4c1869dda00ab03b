use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};
use axum::{
    Form, Json,
    extract::{
        Path, State,
        rejection::{FormRejection, PathRejection},
    },
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Form body for POST /pr/{number}/reply
#[derive(Debug, Deserialize)]
pub struct ReplyForm {
    pub comment_id: Option<String>,
    pub body: Option<String>,
}

/// Successful reply response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub success: bool,
    pub comment_id: u64,
    pub url: String,
}

/// Validated reply: target comment and trimmed, non-empty text
#[derive(Debug, PartialEq)]
struct ReplyRequest {
    comment_id: u64,
    body: String,
}

fn validate(form: ReplyForm) -> ApiResult<ReplyRequest> {
    let comment_id = form.comment_id.unwrap_or_default();
    let comment_id = comment_id.trim();
    let body = form.body.unwrap_or_default().trim().to_string();

    if comment_id.is_empty() || body.is_empty() {
        return Err(ApiError::BadRequest(
            "comment_id and body are required".to_string(),
        ));
    }

    let comment_id = comment_id.parse::<u64>().map_err(|_| {
        ApiError::BadRequest(format!("comment_id must be numeric, got '{}'", comment_id))
    })?;

    Ok(ReplyRequest { comment_id, body })
}

/// POST /pr/{number}/reply - reply to a review comment
pub async fn add_reply(
    State(state): State<AppState>,
    number: Result<Path<u64>, PathRejection>,
    form: Result<Form<ReplyForm>, FormRejection>,
) -> ApiResult<Json<ReplyResponse>> {
    let Path(number) = number?;
    let Form(form) = form?;
    let request = validate(form)?;
    let repo = state.gateway.repo_info();

    let posted = state
        .gateway
        .reply_to_comment(&repo, number, request.comment_id, &request.body)
        .await
        .map_err(|e| {
            error!(
                "Failed to reply to comment {} on #{}: {}",
                request.comment_id, number, e
            );
            ApiError::from(e)
        })?;

    info!(
        "Replied to comment {} on #{} ({})",
        request.comment_id, number, posted.url
    );

    Ok(Json(ReplyResponse {
        success: true,
        comment_id: posted.comment_id,
        url: posted.url,
    }))
}
