use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

const GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Deserialize)]
pub struct RepoSummary {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoCommit {
    pub commit: RepoCommitDetails,
}

/// `author` is absent for commits whose author metadata GitHub could not
/// attribute; those entries carry no usable date.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoCommitDetails {
    pub author: Option<RepoCommitAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoCommitAuthor {
    pub date: DateTime<Utc>,
}

pub async fn list_user_repos(
    client: &Client,
    token: &str,
    username: &str,
) -> Result<Vec<RepoSummary>, ListUserReposError> {
    let response = client
        .get(format!("{GITHUB_API_URL}/users/{username}/repos"))
        .query(&[("per_page", "100")])
        .header("Authorization", format!("Bearer {token}"))
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", "rust-client")
        .send()
        .await
        .map_err(|source| ListUserReposError::RequestSend { source })?
        .error_for_status()
        .map_err(|source| ListUserReposError::UpstreamStatus { source })?;

    response
        .json::<Vec<RepoSummary>>()
        .await
        .map_err(|source| ListUserReposError::ResponseRead { source })
}

#[derive(Debug, Error)]
pub enum ListUserReposError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("UpstreamStatus: {source}")]
    UpstreamStatus {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },
}

/// Lists commits authored by `author` in one repository since the start of
/// `since` (UTC midnight).
pub async fn list_repo_commits(
    client: &Client,
    token: &str,
    owner: &str,
    repo: &str,
    since: NaiveDate,
    author: &str,
) -> Result<Vec<RepoCommit>, ListRepoCommitsError> {
    let response = client
        .get(format!("{GITHUB_API_URL}/repos/{owner}/{repo}/commits"))
        .query(&[
            ("since", format!("{since}T00:00:00Z")),
            ("author", author.to_string()),
            ("per_page", String::from("100")),
        ])
        .header("Authorization", format!("Bearer {token}"))
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", "rust-client")
        .send()
        .await
        .map_err(|source| ListRepoCommitsError::RequestSend { source })?
        .error_for_status()
        .map_err(|source| ListRepoCommitsError::UpstreamStatus { source })?;

    response
        .json::<Vec<RepoCommit>>()
        .await
        .map_err(|source| ListRepoCommitsError::ResponseRead { source })
}

#[derive(Debug, Error)]
pub enum ListRepoCommitsError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("UpstreamStatus: {source}")]
    UpstreamStatus {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },
}
