use serde::{Deserialize, Serialize};

/// Development sentinel: a package whose only version is this one has not
/// been released yet.
pub const DEV_VERSION: &str = "v0";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub branches: Vec<String>,
}

impl Repository {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            branches: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branches = branches.into_iter().map(Into::into).collect();
        self
    }

    /// Relative package path: dashes in repository names become slashes,
    /// so `native-freetype` is imported as `native/freetype`.
    pub fn rel_path(&self) -> String {
        self.name.replace('-', "/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Importable {
    pub repo_name: String,
    pub rel_path: String,
    /// Major versions, most recent first.
    pub versions: Vec<String>,
}

impl Importable {
    pub fn most_recent(&self) -> Option<&str> {
        self.versions.first().map(String::as_str)
    }

    pub fn is_dev_only(&self) -> bool {
        self.versions.len() == 1 && self.versions[0] == DEV_VERSION
    }
}
