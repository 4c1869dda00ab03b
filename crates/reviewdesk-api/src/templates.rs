//! Server-rendered pages.
//!
//! Templates are embedded at compile time and rendered with `minijinja`.
//! HTML auto-escaping is on for every template; GitHub-rendered comment
//! bodies are marked `|safe` in the templates themselves.
//!
//! Every template sees `config` (the [`UiConfig`]) plus its own variables:
//! - `index.html`: `prs`, `owner`, `name`, `state`
//! - `pr_detail.html`: `pr`, `owner`, `name`, `include_resolved`, `compact_mode`
//! - `error.html`: `error_title`, `error_message`

use crate::error::{ApiError, ApiResult};
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use minijinja::{Environment, Value, context};
use reviewdesk_core::{UiConfig, format_relative};
use tracing::error;

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("pr_detail.html", include_str!("../templates/pr_detail.html")),
    ("error.html", include_str!("../templates/error.html")),
];

/// Template environment with the `format_time` filter registered
pub struct Templates {
    env: Environment<'static>,
    ui: UiConfig,
}

impl Templates {
    pub fn new(ui: UiConfig) -> ApiResult<Self> {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        env.add_filter("format_time", |value: Option<String>| {
            format_relative(value.as_deref().unwrap_or_default(), Utc::now())
        });

        Ok(Self { env, ui })
    }

    /// Render `name` with `ctx` plus the shared `config` variable
    pub fn render(&self, name: &str, ctx: Value) -> ApiResult<String> {
        let template = self.env.get_template(name)?;
        let html = template.render(context! { config => &self.ui, ..ctx })?;
        Ok(html)
    }

    /// Render the error page for `err` with the matching status code
    pub fn error_page(&self, err: &ApiError) -> Response {
        let status = err.status();
        let ctx = context! {
            error_title => err.title(),
            error_message => err.user_message(),
        };

        match self.render("error.html", ctx) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(render_err) => {
                error!("Failed to render error page: {}", render_err);
                (status, err.user_message()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use reviewdesk_github::{GithubError, PullRequestSummary};

    fn templates() -> Templates {
        Templates::new(UiConfig::default()).expect("templates should compile")
    }

    #[test]
    fn test_all_templates_compile() {
        let templates = templates();
        for (name, _) in TEMPLATES {
            assert!(templates.env.get_template(name).is_ok(), "{} missing", name);
        }
    }

    #[test]
    fn test_index_escapes_titles() {
        let prs = vec![PullRequestSummary {
            number: 1,
            title: "<script>alert(1)</script>".to_string(),
            url: "https://github.com/octo/app/pull/1".to_string(),
            state: "open".to_string(),
            draft: false,
            merged: false,
            author: "me".to_string(),
            comment_count: 0,
            created_at: "2024-05-01T00:00:00Z".to_string(),
            updated_at: "2024-05-01T00:00:00Z".to_string(),
        }];

        let html = templates()
            .render(
                "index.html",
                context! { prs => prs, owner => "octo", name => "app", state => "open" },
            )
            .unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("octo/app"));
    }

    #[test]
    fn test_format_time_filter_handles_missing_values() {
        let mut env = templates().env;
        env.add_template("t", "[{{ missing|format_time }}][{{ 'bogus-value-here'|format_time }}]")
            .unwrap();

        let out = env.get_template("t").unwrap().render(context! {}).unwrap();
        assert_eq!(out, "[][bogus-valu]");
    }

    #[test]
    fn test_error_page() {
        let err = ApiError::Github(GithubError::ApiError("Bad credentials".to_string()));
        let response = templates().error_page(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
