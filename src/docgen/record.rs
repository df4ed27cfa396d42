use crate::config::AppConfig;
use crate::types::{Importable, PackageDoc, VersionDocRecord};
use crate::Result;

use super::classify::classify;
use super::render::render_doc;
use super::sources::collect_sources;

/// Sentinel for a version component that is missing or not a number.
pub const UNKNOWN_VERSION: i64 = -1;

/// Major and minor numbers of an import path such as `azul3d.org/gfx.v1`.
///
/// The path is split on `v` and the last segment's first two dot-separated
/// components are parsed. Unparseable components become
/// [`UNKNOWN_VERSION`].
pub fn package_version(import_path: &str) -> (i64, i64) {
    let last = import_path.rsplit('v').next().unwrap_or("");
    let mut dots = last.split('.');
    let parse = |s: Option<&str>| {
        s.and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(UNKNOWN_VERSION)
    };
    let major = parse(dots.next());
    let minor = parse(dots.next());
    (major, minor)
}

/// Builds the documentation record of one version from its parsed model.
pub fn assemble_record(
    config: &AppConfig,
    importable: &Importable,
    version_tag: &str,
    pkg: &PackageDoc,
) -> Result<VersionDocRecord> {
    let import_path = config.import_path(&importable.rel_path, version_tag);
    let (major, minor) = package_version(&import_path);

    let classified = classify(pkg);

    let package_root = config.source_dir(&importable.rel_path, version_tag);
    let view_url = config.view_url(&importable.repo_name, version_tag);
    let (generic_sources, tagged_sources) =
        collect_sources(&package_root, &view_url, &pkg.filenames)?;

    Ok(VersionDocRecord {
        base_import: config.base_import.clone(),
        rel_path: importable.rel_path.clone(),
        import_path,
        version_tag: version_tag.to_string(),
        major,
        minor,
        versions: importable.versions.clone(),
        doc: render_doc(&pkg.doc),
        consts: classified.consts,
        vars: classified.vars,
        funcs: classified.funcs,
        types: classified.types,
        generic_sources,
        tagged_sources,
    })
}
