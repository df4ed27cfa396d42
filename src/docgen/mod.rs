//! Turns parsed packages into documentation records.

pub mod classify;
pub mod index;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod sources;
pub mod versions;

pub use classify::{classify, Classified};
pub use index::build_package_index;
pub use pipeline::{DocGenerator, GenerationReport, VersionFailure};
pub use record::{assemble_record, package_version, UNKNOWN_VERSION};
pub use render::{index_synopsis, path_id, render_doc, section_id, synopsis, SYNOPSIS_UNAVAILABLE};
pub use sources::{build_tag_title, collect_sources};
pub use versions::{importables, resolve_repository, resolve_versions};
