use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::{AppError, Result};

/// Lists the Go source files directly inside `dir`, sorted by path.
///
/// Test files are included and build constraints are not evaluated; every
/// `.go` file belongs to some package of the directory.
pub fn scan_package_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AppError::Io(format!(
            "{}: not a directory",
            dir.display()
        )));
    }

    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .max_depth(Some(1))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| AppError::Io(e.to_string()))?;
        let path = entry.path();
        if path.is_file() && is_go_file(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

pub fn is_go_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("go")
}
