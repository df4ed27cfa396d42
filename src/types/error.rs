use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Directory contains no packages: {0}")]
    NoPackages(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Metadata fetch error: {0}")]
    Fetch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True when a source directory simply had nothing to document.
    pub fn is_no_packages(&self) -> bool {
        matches!(self, AppError::NoPackages(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Output(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_packages_is_distinguishable() {
        let err = AppError::NoPackages("/tmp/empty".to_string());
        assert!(err.is_no_packages());
        assert!(!AppError::Parse("bad.go".to_string()).is_no_packages());
        assert!(!AppError::Io("denied".to_string()).is_no_packages());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }
}
