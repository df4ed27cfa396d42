use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::types::{PackageIndex, VersionDocRecord};
use crate::{AppError, Result};

use super::DocSink;

pub const INDEX_FILE: &str = "packages.json";

/// Writes records as pretty-printed JSON below an output directory.
pub struct JsonSink {
    out_dir: PathBuf,
}

impl JsonSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// `<out_dir>/<rel_path>.<tag>.json`
    pub fn version_path(&self, record: &VersionDocRecord) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}.json", record.rel_path, record.version_tag))
    }

    pub fn index_path(&self) -> PathBuf {
        self.out_dir.join(INDEX_FILE)
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Output(format!("{}: {}", parent.display(), e)))?;
        }
        let data = serde_json::to_vec_pretty(value)?;
        std::fs::write(path, data)
            .map_err(|e| AppError::Output(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "Wrote output file");
        Ok(())
    }
}

impl DocSink for JsonSink {
    fn write_version(&self, record: &VersionDocRecord) -> Result<()> {
        Self::write_json(&self.version_path(record), record)
    }

    fn write_index(&self, index: &PackageIndex) -> Result<()> {
        Self::write_json(&self.index_path(), index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PackageIndexEntry;

    fn record(rel_path: &str, tag: &str) -> VersionDocRecord {
        VersionDocRecord {
            base_import: "azul3d.org".to_string(),
            rel_path: rel_path.to_string(),
            import_path: format!("azul3d.org/{}.{}", rel_path, tag),
            version_tag: tag.to_string(),
            major: 1,
            minor: -1,
            versions: vec![tag.to_string()],
            doc: String::new(),
            consts: vec![],
            vars: vec![],
            funcs: vec![],
            types: vec![],
            generic_sources: vec![],
            tagged_sources: vec![],
        }
    }

    #[test]
    fn test_write_version_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonSink::new(dir.path());
        sink.write_version(&record("native/freetype", "v1")).unwrap();

        let path = dir.path().join("native/freetype.v1.json");
        let data = std::fs::read_to_string(path).unwrap();
        let back: VersionDocRecord = serde_json::from_str(&data).unwrap();
        assert_eq!(back.import_path, "azul3d.org/native/freetype.v1");
    }

    #[test]
    fn test_write_index() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonSink::new(dir.path());
        let index = PackageIndex {
            base_import: "azul3d.org".to_string(),
            packages: vec![PackageIndexEntry {
                rel_path: "gfx".to_string(),
                id: "gfx".to_string(),
                versions: vec!["v1".to_string()],
                synopsis: "Package gfx draws.".to_string(),
            }],
            generated_at: chrono::Utc::now(),
        };
        sink.write_index(&index).unwrap();

        let data = std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value["packages"][0]["synopsis"], "Package gfx draws.");
    }
}
