use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Repository manifest consumed by the manifest host client.
    pub manifest: PathBuf,
    /// Root under which `<base_import>/<rel_path>.<tag>` checkouts live.
    pub source_root: PathBuf,
    pub out_dir: PathBuf,
    pub base_import: String,
    pub view_url_base: String,
    pub ignored_repos: Vec<String>,
    pub pool_size: usize,
    pub log_level: String,
    pub skip_docs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("repositories.json"),
            source_root: PathBuf::from("."),
            out_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("godoc-index"),
            base_import: "azul3d.org".to_string(),
            view_url_base: "https://github.com/azul3d".to_string(),
            ignored_repos: vec!["azul3d.github.io".to_string(), "issues".to_string()],
            pool_size: 16,
            log_level: "info".to_string(),
            skip_docs: false,
        }
    }
}

impl AppConfig {
    /// Import path of one version, e.g. `azul3d.org/native/freetype.v1`.
    pub fn import_path(&self, rel_path: &str, tag: &str) -> String {
        format!(
            "{}/{}.{}",
            self.base_import.trim_end_matches('/'),
            rel_path,
            tag
        )
    }

    /// Checkout directory holding the sources of one version.
    pub fn source_dir(&self, rel_path: &str, tag: &str) -> PathBuf {
        self.source_root.join(self.import_path(rel_path, tag))
    }

    /// Base URL for viewing files of one tagged repository.
    pub fn view_url(&self, repo_name: &str, tag: &str) -> String {
        format!(
            "{}/{}/blob/{}",
            self.view_url_base.trim_end_matches('/'),
            repo_name,
            tag
        )
    }

    pub fn is_ignored(&self, repo_name: &str) -> bool {
        self.ignored_repos.iter().any(|r| r == repo_name)
    }

    pub fn with_source_root(mut self, root: &Path) -> Self {
        self.source_root = root.to_path_buf();
        self
    }
}
