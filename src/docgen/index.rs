use chrono::Utc;
use tracing::warn;

use crate::types::{Importable, PackageDoc, PackageIndex, PackageIndexEntry};
use crate::Result;

use super::render::{index_synopsis, path_id, SYNOPSIS_UNAVAILABLE};

/// Builds the global package index.
///
/// Development-only packages are left out. Each remaining package's most
/// recent version is opened through `open`; a failure there only degrades
/// that entry's synopsis.
pub fn build_package_index<F>(base_import: &str, importables: &[Importable], open: F) -> PackageIndex
where
    F: Fn(&Importable, &str) -> Result<PackageDoc>,
{
    let mut packages: Vec<PackageIndexEntry> = importables
        .iter()
        .filter(|imp| !imp.is_dev_only())
        .filter_map(|imp| {
            let latest = imp.most_recent()?;
            let synopsis = match open(imp, latest) {
                Ok(pkg) => index_synopsis(&pkg.doc),
                Err(e) => {
                    warn!(package = %imp.rel_path, version = latest, error = %e, "Synopsis unavailable");
                    SYNOPSIS_UNAVAILABLE.to_string()
                }
            };
            Some(PackageIndexEntry {
                rel_path: imp.rel_path.clone(),
                id: path_id(&imp.rel_path),
                versions: imp.versions.clone(),
                synopsis,
            })
        })
        .collect();

    packages.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

    PackageIndex {
        base_import: base_import.to_string(),
        packages,
        generated_at: Utc::now(),
    }
}
