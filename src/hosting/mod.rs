//! Repository hosting: what repositories exist and which refs they carry.

pub mod fetcher;
pub mod manifest;
pub mod pool;

pub use fetcher::{fetch_repositories, load_repositories};
pub use manifest::{Manifest, ManifestClient};
pub use pool::{ClientPool, PooledClient};

use async_trait::async_trait;

use crate::Result;

/// Client of a code host.
///
/// Implementations are handed out through a [`ClientPool`]; a handle is
/// used by one task at a time.
#[async_trait]
pub trait HostClient: Send + Sync + 'static {
    async fn list_repositories(&self) -> Result<Vec<String>>;

    async fn list_tags(&self, repo: &str) -> Result<Vec<String>>;

    async fn list_branches(&self, repo: &str) -> Result<Vec<String>>;
}
