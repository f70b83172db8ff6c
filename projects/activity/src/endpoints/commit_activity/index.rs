use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use interfaces_github_repos::index::{list_repo_commits, list_user_repos, ListUserReposError};

use crate::activity::repo_scan::{self, RepoScan};
use crate::activity::search_scan::{self, SearchScan};
use crate::activity::streak::{tally, StreakTally};
use crate::activity::window::ActivityWindow;
use crate::activity::{format_day, CommitDaySet};
use crate::config::{ActivitySource, AppConfig};

/// Query parameters for the endpoint.
#[derive(Deserialize)]
pub struct ActivityQuery {
    token: Option<String>,
    username: Option<String>,
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("MissingTokenOrUsername")]
    MissingTokenOrUsername,
    #[error("ListUserRepos: {source}")]
    ListUserRepos {
        #[from]
        source: ListUserReposError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::MissingTokenOrUsername => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Missing token or username"})),
            )
                .into_response(),
            HandlerError::ListUserRepos { source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to fetch repos", "details": source.to_string()})),
            )
                .into_response(),
        }
    }
}

/// Wire shape of a successful aggregation. `health` is reported by the
/// repo-scan source only; `merged_prs`/`total_commits` by the search source
/// only.
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub streak: u32,
    pub max_streak: u32,
    pub days_with_commits: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_prs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_commits: Option<u64>,
    pub partial: bool,
}

/// Axum handler: GET /commit_activity
pub async fn handler(
    Extension(config): Extension<AppConfig>,
    Extension(client): Extension<reqwest::Client>,
    Query(input): Query<ActivityQuery>,
) -> impl IntoResponse {
    let (token, username) = match required_params(&input) {
        Some(params) => params,
        None => return HandlerError::MissingTokenOrUsername.into_response(),
    };

    let window = ActivityWindow::current();

    match config.source {
        ActivitySource::Search => {
            let scan = search_scan::scan(&client, token, username, &window).await;
            let tally = tally(&window, &scan.commit_days);

            (StatusCode::OK, Json(search_response(scan, tally))).into_response()
        }
        ActivitySource::RepoScan => {
            let repos = match list_user_repos(&client, token, username).await {
                Ok(repos) => repos,
                Err(source) => return HandlerError::ListUserRepos { source }.into_response(),
            };

            let http = &client;
            let since = window.since();
            let scan = repo_scan::collect_commit_days(&repos, move |repo: String| async move {
                list_repo_commits(http, token, username, &repo, since, username).await
            })
            .await;
            let tally = tally(&window, &scan.commit_days);

            (StatusCode::OK, Json(repo_scan_response(scan, tally))).into_response()
        }
    }
}

fn required_params(input: &ActivityQuery) -> Option<(&str, &str)> {
    let token = input.token.as_deref().filter(|token| !token.is_empty())?;
    let username = input
        .username
        .as_deref()
        .filter(|username| !username.is_empty())?;

    Some((token, username))
}

fn search_response(scan: SearchScan, tally: StreakTally) -> ActivityResponse {
    ActivityResponse {
        streak: tally.streak,
        max_streak: tally.max_streak,
        days_with_commits: day_list(&scan.commit_days),
        health: None,
        merged_prs: Some(scan.merged_prs),
        total_commits: Some(scan.total_commits),
        partial: scan.partial,
    }
}

fn repo_scan_response(scan: RepoScan, tally: StreakTally) -> ActivityResponse {
    ActivityResponse {
        streak: tally.streak,
        max_streak: tally.max_streak,
        days_with_commits: day_list(&scan.commit_days),
        health: Some(tally.health),
        merged_prs: None,
        total_commits: None,
        partial: scan.partial,
    }
}

fn day_list(days: &CommitDaySet) -> Vec<String> {
    days.iter().copied().map(format_day).collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn rejects_missing_or_empty_parameters() {
        let missing_token = ActivityQuery {
            token: None,
            username: Some("octocat".to_string()),
        };
        assert!(required_params(&missing_token).is_none());

        let missing_username = ActivityQuery {
            token: Some("gho_x".to_string()),
            username: None,
        };
        assert!(required_params(&missing_username).is_none());

        let empty_username = ActivityQuery {
            token: Some("gho_x".to_string()),
            username: Some(String::new()),
        };
        assert!(required_params(&empty_username).is_none());

        let complete = ActivityQuery {
            token: Some("gho_x".to_string()),
            username: Some("octocat".to_string()),
        };
        assert_eq!(required_params(&complete), Some(("gho_x", "octocat")));
    }

    #[test]
    fn response_fields_follow_the_source() {
        let days: CommitDaySet = [NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()]
            .into_iter()
            .collect();
        let result = StreakTally {
            streak: 1,
            max_streak: 3,
            health: 7,
        };

        let scan = SearchScan {
            commit_days: days.clone(),
            total_commits: 12,
            merged_prs: 2,
            partial: false,
        };
        let value = serde_json::to_value(search_response(scan, result)).unwrap();
        assert_eq!(value["streak"], 1);
        assert_eq!(value["max_streak"], 3);
        assert_eq!(value["days_with_commits"][0], "2024-03-05");
        assert_eq!(value["merged_prs"], 2);
        assert_eq!(value["total_commits"], 12);
        assert_eq!(value["partial"], false);
        assert!(value.get("health").is_none());

        let scan = RepoScan {
            commit_days: days,
            partial: true,
        };
        let value = serde_json::to_value(repo_scan_response(scan, result)).unwrap();
        assert_eq!(value["health"], 7);
        assert_eq!(value["partial"], true);
        assert!(value.get("merged_prs").is_none());
        assert!(value.get("total_commits").is_none());
    }
}
