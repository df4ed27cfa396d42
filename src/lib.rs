pub mod codebase;
pub mod config;
pub mod docgen;
pub mod hosting;
pub mod output;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use config::AppConfig;
pub use types::error::{AppError, Result};
