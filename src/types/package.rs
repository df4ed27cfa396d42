//! Raw documentation model produced by the source parser.
//!
//! Nothing here is filtered or sorted beyond what the parser guarantees;
//! the classifier consumes it without mutating it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDoc {
    pub name: String,
    pub import_path: String,
    pub doc: String,
    pub consts: Vec<ValueDoc>,
    pub vars: Vec<ValueDoc>,
    pub funcs: Vec<FuncDoc>,
    pub types: Vec<TypeDoc>,
    /// Absolute paths of every file belonging to the package.
    pub filenames: Vec<PathBuf>,
}

/// One `const` or `var` declaration, possibly a parenthesized group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDoc {
    pub names: Vec<String>,
    pub decl: String,
    pub doc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDoc {
    pub name: String,
    pub decl: String,
    pub doc: String,
    /// Receiver base type for methods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDoc {
    pub name: String,
    pub decl: String,
    pub doc: String,
    /// Constructors: functions returning `T` or `*T`.
    pub funcs: Vec<FuncDoc>,
    pub methods: Vec<FuncDoc>,
}
