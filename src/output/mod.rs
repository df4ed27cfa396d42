//! Outbound interface to renderers.
//!
//! The core hands structured records over; how they are turned into pages
//! is up to the sink.

mod json;

pub use json::JsonSink;

use crate::types::{PackageIndex, VersionDocRecord};
use crate::Result;

pub trait DocSink: Send + Sync {
    /// Write the documentation of one package version.
    fn write_version(&self, record: &VersionDocRecord) -> Result<()>;

    /// Write the global package index.
    fn write_index(&self, index: &PackageIndex) -> Result<()>;
}
