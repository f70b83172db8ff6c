use axum::{
    body::Body,
    extract::{Extension, Query},
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use interfaces_github_oauth::index::{exchange_code, ExchangeCodeError, GitHubTokenResult};

use crate::config::AppConfig;

/// Query parameters for the endpoint.
#[derive(Deserialize)]
pub struct AuthQuery {
    code: Option<String>,
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("MissingCode")]
    MissingCode,
    #[error("ExchangeCode: {source}")]
    ExchangeCode {
        #[from]
        source: ExchangeCodeError,
    },
    #[error("UpstreamStatus: {status}")]
    UpstreamStatus {
        status: StatusCode,
        body: String,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::MissingCode => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Missing code"})),
            )
                .into_response(),
            HandlerError::ExchangeCode { source } => (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "OAuth exchange failed", "details": source.to_string()})),
            )
                .into_response(),
            HandlerError::UpstreamStatus { status, body } => (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "OAuth exchange failed", "details": format!("{status}: {body}")})),
            )
                .into_response(),
        }
    }
}

/// Axum handler: GET /auth
///
/// Exchanges the authorization code and forwards GitHub's response body
/// verbatim. GitHub reports OAuth errors such as `bad_verification_code`
/// inside a 200 body; those are forwarded unchanged so clients keep seeing
/// the provider shape. Transport failures and non-2xx upstream statuses
/// become a typed 502 instead.
pub async fn handler(
    Extension(config): Extension<AppConfig>,
    Extension(client): Extension<reqwest::Client>,
    Query(input): Query<AuthQuery>,
) -> impl IntoResponse {
    let code = match input.code.as_deref().filter(|code| !code.is_empty()) {
        Some(code) => code,
        None => return HandlerError::MissingCode.into_response(),
    };

    let oauth = &config.oauth;
    let GitHubTokenResult { body, status } = match exchange_code(
        &client,
        &oauth.client_id,
        &oauth.client_secret,
        &oauth.redirect_uri,
        code,
    )
    .await
    {
        Ok(result) => result,
        Err(source) => return HandlerError::ExchangeCode { source }.into_response(),
    };

    if !status.is_success() {
        return HandlerError::UpstreamStatus { status, body }.into_response();
    }

    debug!(%status, body = %body, "GitHub OAuth raw response");

    if body_reports_oauth_error(&body) {
        warn!("GitHub rejected the authorization code; forwarding provider error body");
    }

    match Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
    {
        Ok(response) => response,
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

fn body_reports_oauth_error(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .map(|value| value.get("error").is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_payloads_are_detected() {
        assert!(body_reports_oauth_error(
            r#"{"error":"bad_verification_code","error_description":"The code passed is incorrect or expired."}"#
        ));
        assert!(!body_reports_oauth_error(
            r#"{"access_token":"gho_x","token_type":"bearer","scope":"repo"}"#
        ));
        assert!(!body_reports_oauth_error("not json"));
    }
}
