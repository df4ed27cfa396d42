use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::types::{SourceFile, SourceFileGroup};
use crate::{AppError, Result};

/// Build-tag group title of a file name, or `None` for generic files.
///
/// Everything after the first underscore names the tag: `gl_linux_amd64.go`
/// belongs to `Linux Amd64`.
pub fn build_tag_title(file_name: &str) -> Option<String> {
    let mut split = file_name.split('_');
    split.next()?;
    let rest: Vec<&str> = split.collect();
    if rest.is_empty() {
        return None;
    }
    let tag = rest.join(" ");
    let tag = tag.strip_suffix(".go").unwrap_or(&tag);
    Some(title_case(tag))
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a package's files into generic sources and build-tag groups.
///
/// View links are `view_url` joined with the file's path relative to
/// `package_root`. Both lists and every group's members are sorted.
pub fn collect_sources(
    package_root: &Path,
    view_url: &str,
    filenames: &[PathBuf],
) -> Result<(Vec<SourceFile>, Vec<SourceFileGroup>)> {
    let mut generic = Vec::new();
    let mut tagged: BTreeMap<String, Vec<SourceFile>> = BTreeMap::new();

    for path in filenames {
        let rel = path.strip_prefix(package_root).map_err(|_| {
            AppError::Internal(format!(
                "{} is outside package root {}",
                path.display(),
                package_root.display()
            ))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let file = SourceFile {
            name: name.clone(),
            view_url: format!("{}/{}", view_url.trim_end_matches('/'), rel),
        };

        match build_tag_title(&name) {
            None => generic.push(file),
            Some(title) => tagged.entry(title).or_default().push(file),
        }
    }

    generic.sort_by(|a, b| a.name.cmp(&b.name));
    let groups = tagged
        .into_iter()
        .map(|(title, mut files)| {
            files.sort_by(|a, b| a.name.cmp(&b.name));
            SourceFileGroup { title, files }
        })
        .collect();

    Ok((generic, groups))
}
