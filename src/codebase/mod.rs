pub mod parser;
pub mod scanner;

pub use parser::{open_package_doc, select_documented, PackageParser};
pub use scanner::{is_go_file, scan_package_dir};
