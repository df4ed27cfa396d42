pub mod error;
pub mod package;
pub mod record;
pub mod repository;

pub use error::{AppError, Result};
pub use package::{FuncDoc, PackageDoc, TypeDoc, ValueDoc};
pub use record::{
    ClassifiedFunction, ClassifiedType, ClassifiedValue, PackageIndex, PackageIndexEntry,
    SourceFile, SourceFileGroup, VersionDocRecord,
};
pub use repository::{Importable, Repository, DEV_VERSION};
