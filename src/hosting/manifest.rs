use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::Repository;
use crate::{AppError, Result};

use super::HostClient;

/// Repository listing stored as JSON:
/// `{"repositories": [{"name": ..., "tags": [...], "branches": [...]}]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub repositories: Vec<Repository>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&data)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Host client answering from a [`Manifest`]. Clones share the listing.
#[derive(Debug, Clone)]
pub struct ManifestClient {
    repos: Arc<BTreeMap<String, Repository>>,
    order: Arc<Vec<String>>,
}

impl ManifestClient {
    pub fn new(manifest: Manifest) -> Self {
        let order = manifest
            .repositories
            .iter()
            .map(|r| r.name.clone())
            .collect();
        let repos = manifest
            .repositories
            .into_iter()
            .map(|r| (r.name.clone(), r))
            .collect();
        Self {
            repos: Arc::new(repos),
            order: Arc::new(order),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Manifest::load(path).map(Self::new)
    }

    fn repo(&self, name: &str) -> Result<&Repository> {
        self.repos
            .get(name)
            .ok_or_else(|| AppError::Fetch(format!("unknown repository: {}", name)))
    }
}

#[async_trait]
impl HostClient for ManifestClient {
    async fn list_repositories(&self) -> Result<Vec<String>> {
        Ok(self.order.as_ref().clone())
    }

    async fn list_tags(&self, repo: &str) -> Result<Vec<String>> {
        Ok(self.repo(repo)?.tags.clone())
    }

    async fn list_branches(&self, repo: &str) -> Result<Vec<String>> {
        Ok(self.repo(repo)?.branches.clone())
    }
}
