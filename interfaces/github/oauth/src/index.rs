use reqwest::{Client, StatusCode};
use thiserror::Error;

const ACCESS_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";

/// Raw provider response. The caller decides what to do with the body; the
/// token endpoint reports OAuth errors inside a 200 body.
pub struct GitHubTokenResult {
    pub body: String,
    pub status: StatusCode,
}

pub async fn exchange_code(
    client: &Client,
    client_id: &str,
    client_secret: &str,
    redirect_uri: &str,
    code: &str,
) -> Result<GitHubTokenResult, ExchangeCodeError> {
    let params = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("code", code),
        ("redirect_uri", redirect_uri),
    ];

    let response = client
        .post(ACCESS_TOKEN_URL)
        .header("Accept", "application/json")
        .header("User-Agent", "rust-client")
        .form(&params)
        .send()
        .await
        .map_err(|source| ExchangeCodeError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| ExchangeCodeError::ResponseRead { source })?;

    Ok(GitHubTokenResult { body, status })
}

#[derive(Debug, Error)]
pub enum ExchangeCodeError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },
}
