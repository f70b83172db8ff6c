use std::future::Future;

use reqwest::Client;
use tracing::warn;

use interfaces_github_search::index::{search_commits, search_merged_prs, CommitSearchPage};

use super::window::ActivityWindow;
use super::CommitDaySet;

/// Search pagination bounds: 100 items per page, at most 10 pages, so one
/// scan never pulls more than 1000 commits even for very active users.
pub const PAGE_SIZE: usize = 100;
pub const MAX_PAGES: u32 = 10;

/// Commit days plus the totals reported by the search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchScan {
    pub commit_days: CommitDaySet,
    /// Full commit match count reported by the search endpoint, which can
    /// exceed the 1000 items actually fetched.
    pub total_commits: u64,
    pub merged_prs: u64,
    /// Set when any sub-query failed and its contribution is missing.
    pub partial: bool,
}

/// Runs both search queries for one request.
pub async fn scan(client: &Client, token: &str, username: &str, window: &ActivityWindow) -> SearchScan {
    let since = window.since();

    let mut scan = collect_commit_days(move |page| {
        search_commits(client, token, username, since, page, PAGE_SIZE as u32)
    })
    .await;

    match search_merged_prs(client, token, username, since).await {
        Ok(totals) => scan.merged_prs = totals.total_count,
        Err(source) => {
            warn!(error = %source, "merged PR search failed, reporting zero");
            scan.partial = true;
        }
    }

    scan
}

/// Pages through commit-search results, folding author dates into a day set.
///
/// Stops after [`MAX_PAGES`] or on the first page shorter than
/// [`PAGE_SIZE`]. A failing page keeps what was already collected and marks
/// the scan partial instead of surfacing the error.
pub async fn collect_commit_days<F, Fut, E>(fetch_page: F) -> SearchScan
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<CommitSearchPage, E>>,
    E: std::fmt::Display,
{
    let mut scan = SearchScan::default();

    for page in 1..=MAX_PAGES {
        let result = match fetch_page(page).await {
            Ok(result) => result,
            Err(source) => {
                warn!(page, error = %source, "commit search page failed, keeping partial results");
                scan.partial = true;
                break;
            }
        };

        scan.total_commits = result.total_count;
        let item_count = result.items.len();

        for item in result.items {
            scan.commit_days.insert(item.commit.author.date.date_naive());
        }

        if item_count < PAGE_SIZE {
            break;
        }
    }

    scan
}
