use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::types::Repository;
use crate::{AppError, Result};

use super::{ClientPool, HostClient};

async fn fetch_one<C: HostClient>(pool: &Arc<ClientPool<C>>, name: &str) -> Result<Repository> {
    let client = pool.acquire().await?;
    let tags = client.list_tags(name).await?;
    let branches = client.list_branches(name).await?;
    debug!(repo = name, tags = tags.len(), branches = branches.len(), "Fetched refs");
    Ok(Repository {
        name: name.to_string(),
        tags,
        branches,
    })
}

/// Fetches tags and branches of every named repository, one task per
/// repository, with concurrency bounded by the pool.
///
/// Every task is awaited even after a failure; the first error is returned.
/// The result is sorted by name.
pub async fn fetch_repositories<C: HostClient>(
    pool: &Arc<ClientPool<C>>,
    names: Vec<String>,
) -> Result<Vec<Repository>> {
    let total = names.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let (repo_tx, mut repo_rx) = mpsc::channel::<Repository>(total);
    let (err_tx, mut err_rx) = mpsc::channel::<AppError>(total);

    for name in names {
        let pool = Arc::clone(pool);
        let repo_tx = repo_tx.clone();
        let err_tx = err_tx.clone();
        tokio::spawn(async move {
            match fetch_one(&pool, &name).await {
                Ok(repo) => {
                    let _ = repo_tx.send(repo).await;
                }
                Err(e) => {
                    let _ = err_tx
                        .send(AppError::Fetch(format!("{}: {}", name, e)))
                        .await;
                }
            }
        });
    }
    drop(repo_tx);
    drop(err_tx);

    let mut repos = Vec::with_capacity(total);
    let mut first_err: Option<AppError> = None;
    let mut received = 0;

    while received < total {
        tokio::select! {
            Some(repo) = repo_rx.recv() => {
                received += 1;
                repos.push(repo);
            }
            Some(err) = err_rx.recv() => {
                received += 1;
                warn!("Repository fetch failed: {}", err);
                first_err.get_or_insert(err);
            }
            else => {
                // Both channels closed early: a task died without reporting.
                return Err(first_err.unwrap_or_else(|| {
                    AppError::Internal(format!(
                        "{} of {} repository fetches never reported",
                        total - received,
                        total
                    ))
                }));
            }
        }
    }

    if let Some(err) = first_err {
        return Err(err);
    }

    repos.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(repos)
}

/// Lists the host's repositories, drops ignored ones, and fetches the
/// refs of the rest.
pub async fn load_repositories<C: HostClient>(
    pool: &Arc<ClientPool<C>>,
    config: &AppConfig,
) -> Result<Vec<Repository>> {
    let names = {
        let client = pool.acquire().await?;
        client.list_repositories().await?
    };
    let names: Vec<String> = names
        .into_iter()
        .filter(|name| {
            let ignored = config.is_ignored(name);
            if ignored {
                debug!(repo = %name, "Ignoring repository");
            }
            !ignored
        })
        .collect();

    info!(count = names.len(), "Fetching repositories");
    fetch_repositories(pool, names).await
}
