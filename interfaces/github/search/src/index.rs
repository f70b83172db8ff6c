use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

const SEARCH_COMMITS_URL: &str = "https://api.github.com/search/commits";
const SEARCH_ISSUES_URL: &str = "https://api.github.com/search/issues";

/// One page of `/search/commits` results. `total_count` is the full match
/// count reported by GitHub, not the page size.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitSearchPage {
    pub total_count: u64,
    pub items: Vec<CommitSearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitSearchItem {
    pub commit: SearchedCommit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchedCommit {
    pub author: SearchedCommitAuthor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchedCommitAuthor {
    pub date: DateTime<Utc>,
}

/// Totals-only view of `/search/issues`; items are not requested.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueSearchTotals {
    pub total_count: u64,
}

/// Fetches one page of commits authored by `username` on or after `since`.
pub async fn search_commits(
    client: &Client,
    token: &str,
    username: &str,
    since: NaiveDate,
    page: u32,
    per_page: u32,
) -> Result<CommitSearchPage, SearchCommitsError> {
    let query = format!("author:{username} author-date:>={since}");

    let response = client
        .get(SEARCH_COMMITS_URL)
        .query(&[
            ("q", query),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ])
        .header("Authorization", format!("Bearer {token}"))
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", "rust-client")
        .send()
        .await
        .map_err(|source| SearchCommitsError::RequestSend { source })?
        .error_for_status()
        .map_err(|source| SearchCommitsError::UpstreamStatus { source })?;

    response
        .json::<CommitSearchPage>()
        .await
        .map_err(|source| SearchCommitsError::ResponseRead { source })
}

#[derive(Debug, Error)]
pub enum SearchCommitsError {
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

/// Counts pull requests authored by `username` and merged on or after
/// `since`. Only the reported total is of interest, so a single minimal
/// page is requested.
pub async fn search_merged_prs(
    client: &Client,
    token: &str,
    username: &str,
    since: NaiveDate,
) -> Result<IssueSearchTotals, SearchMergedPrsError> {
    let query = format!("type:pr author:{username} merged:>={since}");

    let response = client
        .get(SEARCH_ISSUES_URL)
        .query(&[("q", query), ("per_page", String::from("1"))])
        .header("Authorization", format!("Bearer {token}"))
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", "rust-client")
        .send()
        .await
        .map_err(|source| SearchMergedPrsError::RequestSend { source })?
        .error_for_status()
        .map_err(|source| SearchMergedPrsError::UpstreamStatus { source })?;

    response
        .json::<IssueSearchTotals>()
        .await
        .map_err(|source| SearchMergedPrsError::ResponseRead { source })
}

#[derive(Debug, Error)]
pub enum SearchMergedPrsError {
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
