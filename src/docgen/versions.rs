//! Major-version resolution from tag and branch names.

use std::collections::BTreeMap;

use semver::Version;

use crate::types::{Importable, Repository};

/// Parses a tag or branch name as a released version.
///
/// Accepts `v1`, `v1.2` and `v1.2.3` (the `v` is optional). Anything that is
/// not a version, or that carries a pre-release marker such as `-dev`, is
/// rejected.
pub fn parse_release(name: &str) -> Option<Version> {
    let raw = name.trim();
    let raw = raw.strip_prefix('v').unwrap_or(raw);
    if raw.is_empty() {
        return None;
    }

    let (core, suffix) = match raw.find(['-', '+']) {
        Some(i) => (&raw[..i], &raw[i..]),
        None => (raw, ""),
    };
    let parts = core.split('.').count();
    if parts > 3 || core.split('.').any(|p| p.is_empty()) {
        return None;
    }
    let padded = match parts {
        1 => format!("{}.0.0{}", core, suffix),
        2 => format!("{}.0{}", core, suffix),
        _ => format!("{}{}", core, suffix),
    };

    let version = Version::parse(&padded).ok()?;
    if !version.pre.is_empty() {
        return None;
    }
    Some(version)
}

/// Canonical bucket key of a version: minor and patch are discarded.
pub fn major_key(version: &Version) -> String {
    format!("v{}", version.major)
}

/// Resolves the distinct major versions named by a repository's tags and
/// branches, most recent first.
pub fn resolve_versions<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let buckets: BTreeMap<u64, String> = names
        .into_iter()
        .filter_map(parse_release)
        .map(|v| (v.major, major_key(&v)))
        .collect();

    buckets.into_values().rev().collect()
}

pub fn resolve_repository(repo: &Repository) -> Vec<String> {
    resolve_versions(
        repo.tags
            .iter()
            .chain(repo.branches.iter())
            .map(String::as_str),
    )
}

/// Builds the importables of every repository that has at least one
/// released version, sorted by relative path.
pub fn importables(repos: &[Repository]) -> Vec<Importable> {
    let mut out: Vec<Importable> = repos
        .iter()
        .filter_map(|repo| {
            let versions = resolve_repository(repo);
            if versions.is_empty() {
                tracing::debug!(repo = %repo.name, "No released versions, skipping");
                return None;
            }
            Some(Importable {
                repo_name: repo.name.clone(),
                rel_path: repo.rel_path(),
                versions,
            })
        })
        .collect();

    out.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    out
}
