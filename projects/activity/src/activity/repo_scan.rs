use std::future::Future;

use tracing::warn;

use interfaces_github_repos::index::{RepoCommit, RepoSummary};

use super::CommitDaySet;

/// Commit days gathered from per-repository listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoScan {
    pub commit_days: CommitDaySet,
    /// Set when at least one repository's listing failed and was skipped.
    pub partial: bool,
}

/// Folds per-repository commit listings into a day set, one repository at a
/// time. A repository whose listing fails is skipped and the scan marked
/// partial; the remaining repositories still contribute.
pub async fn collect_commit_days<F, Fut, E>(repos: &[RepoSummary], fetch_commits: F) -> RepoScan
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<RepoCommit>, E>>,
    E: std::fmt::Display,
{
    let mut scan = RepoScan::default();

    for repo in repos {
        let commits = match fetch_commits(repo.name.clone()).await {
            Ok(commits) => commits,
            Err(source) => {
                warn!(repo = %repo.name, error = %source, "commit listing failed, skipping repository");
                scan.partial = true;
                continue;
            }
        };

        for entry in commits {
            if let Some(author) = entry.commit.author {
                scan.commit_days.insert(author.date.date_naive());
            }
        }
    }

    scan
}
