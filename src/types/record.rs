use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedValue {
    /// First exported name of the declaration, used for ordering.
    pub name: String,
    pub names: Vec<String>,
    pub text: String,
    pub doc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedFunction {
    pub name: String,
    pub anchor: String,
    pub text: String,
    pub doc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedType {
    pub name: String,
    pub anchor: String,
    pub text: String,
    pub doc: String,
    pub funcs: Vec<ClassifiedFunction>,
    pub methods: Vec<ClassifiedFunction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub view_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileGroup {
    /// Title-cased build-tag suffix shared by the group's files.
    pub title: String,
    pub files: Vec<SourceFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDocRecord {
    pub base_import: String,
    pub rel_path: String,
    pub import_path: String,
    pub version_tag: String,
    pub major: i64,
    pub minor: i64,
    pub versions: Vec<String>,
    pub doc: String,
    pub consts: Vec<ClassifiedValue>,
    pub vars: Vec<ClassifiedValue>,
    pub funcs: Vec<ClassifiedFunction>,
    pub types: Vec<ClassifiedType>,
    pub generic_sources: Vec<SourceFile>,
    pub tagged_sources: Vec<SourceFileGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIndexEntry {
    pub rel_path: String,
    /// Filesystem-safe form of `rel_path`.
    pub id: String,
    pub versions: Vec<String>,
    pub synopsis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageIndex {
    pub base_import: String,
    pub packages: Vec<PackageIndexEntry>,
    pub generated_at: DateTime<Utc>,
}
