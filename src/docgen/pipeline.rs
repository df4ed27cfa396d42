use std::sync::Arc;

use rayon::prelude::*;
use tracing::{error, info, instrument, warn};

use crate::codebase::open_package_doc;
use crate::config::AppConfig;
use crate::output::DocSink;
use crate::types::{Importable, PackageDoc, PackageIndex, VersionDocRecord};
use crate::Result;

use super::index::build_package_index;
use super::record::assemble_record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFailure {
    pub import_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub generated: usize,
    /// Versions whose directory held no package.
    pub unavailable: usize,
    pub failures: Vec<VersionFailure>,
}

impl GenerationReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

enum Outcome {
    Generated,
    Failed { failure: VersionFailure, no_packages: bool },
}

pub struct DocGenerator {
    config: Arc<AppConfig>,
}

impl DocGenerator {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// Opens the parsed model of one version's checkout.
    pub fn open(&self, importable: &Importable, version_tag: &str) -> Result<PackageDoc> {
        let dir = self.config.source_dir(&importable.rel_path, version_tag);
        let import_path = self.config.import_path(&importable.rel_path, version_tag);
        open_package_doc(&dir, &import_path)
    }

    /// Documentation record of a single version. Works for any tag,
    /// including development-only packages left out of the index.
    #[instrument(skip(self, importable), fields(package = %importable.rel_path))]
    pub fn generate_version(
        &self,
        importable: &Importable,
        version_tag: &str,
    ) -> Result<VersionDocRecord> {
        let pkg = self.open(importable, version_tag)?;
        assemble_record(&self.config, importable, version_tag, &pkg)
    }

    pub fn build_index(&self, importables: &[Importable]) -> PackageIndex {
        build_package_index(&self.config.base_import, importables, |imp, tag| {
            self.open(imp, tag)
        })
    }

    /// Generates and writes every version of every importable.
    ///
    /// Versions are independent: a failure is logged and recorded in the
    /// report without affecting the others.
    pub fn generate_all(&self, importables: &[Importable], sink: &dyn DocSink) -> GenerationReport {
        let units: Vec<(&Importable, &str)> = importables
            .iter()
            .flat_map(|imp| imp.versions.iter().map(move |v| (imp, v.as_str())))
            .collect();

        info!(units = units.len(), "Generating package documentation");

        let outcomes: Vec<Outcome> = units
            .par_iter()
            .map(|(imp, tag)| {
                let import_path = self.config.import_path(&imp.rel_path, tag);
                let result = self
                    .generate_version(imp, tag)
                    .and_then(|record| sink.write_version(&record));
                match result {
                    Ok(()) => {
                        info!(import_path = %import_path, "Generated documentation");
                        Outcome::Generated
                    }
                    Err(e) => {
                        let no_packages = e.is_no_packages();
                        if no_packages {
                            warn!(import_path = %import_path, "Documentation unavailable: {}", e);
                        } else {
                            error!(import_path = %import_path, "Documentation failed: {}", e);
                        }
                        Outcome::Failed {
                            failure: VersionFailure {
                                import_path,
                                error: e.to_string(),
                            },
                            no_packages,
                        }
                    }
                }
            })
            .collect();

        let mut report = GenerationReport::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Generated => report.generated += 1,
                Outcome::Failed {
                    failure,
                    no_packages,
                } => {
                    if no_packages {
                        report.unavailable += 1;
                    }
                    report.failures.push(failure);
                }
            }
        }
        report
    }

    /// Writes the package index, then every version unless
    /// `skip_docs` is set. Only a failure to write the index is an error.
    pub fn run(&self, importables: &[Importable], sink: &dyn DocSink) -> Result<GenerationReport> {
        let index = self.build_index(importables);
        info!(packages = index.packages.len(), "Writing package index");
        sink.write_index(&index)?;

        if self.config.skip_docs {
            info!("Skipping generation of package documentation");
            return Ok(GenerationReport::default());
        }

        let report = self.generate_all(importables, sink);
        info!(
            generated = report.generated,
            unavailable = report.unavailable,
            failed = report.failed(),
            "Documentation generation complete"
        );
        Ok(report)
    }
}
