use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn one input into a decoded page. Every variant names the
/// source so a batch run can report which page was lost.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {source_id}: {error}")]
    Io {
        source_id: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to decode {source_id}: {error}")]
    Decode {
        source_id: String,
        #[source]
        error: image::ImageError,
    },

    #[error("Failed to fetch {source_id}: {error}")]
    Fetch {
        source_id: String,
        #[source]
        error: reqwest::Error,
    },

    #[error("Failed to fetch {source_id}: HTTP {status}")]
    HttpStatus { source_id: String, status: u16 },

    #[error("Invalid input pattern {source_id}: {message}")]
    Pattern { source_id: String, message: String },

    #[error("Unusable image {source_id}: {error}")]
    Image {
        source_id: String,
        #[source]
        error: colormap_match::MatchError,
    },
}

impl LoadError {
    /// The path, URL or pattern that failed.
    pub fn source_id(&self) -> &str {
        match self {
            LoadError::Io { source_id, .. }
            | LoadError::Decode { source_id, .. }
            | LoadError::Fetch { source_id, .. }
            | LoadError::HttpStatus { source_id, .. }
            | LoadError::Pattern { source_id, .. }
            | LoadError::Image { source_id, .. } => source_id,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {error}")]
    Read {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to parse config {path}: {error}")]
    Parse {
        path: PathBuf,
        #[source]
        error: serde_yaml::Error,
    },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
#[error("Failed to write {path}: {error}")]
pub struct ExportError {
    pub path: PathBuf,
    #[source]
    pub error: std::io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "missing")
    }

    #[test]
    fn test_load_error_io() {
        let error = LoadError::Io {
            source_id: "pages/doc-1.png".to_string(),
            error: not_found(),
        };
        assert_eq!(error.to_string(), "Failed to read pages/doc-1.png: missing");
        assert_eq!(error.source_id(), "pages/doc-1.png");
    }

    #[test]
    fn test_load_error_http_status() {
        let error = LoadError::HttpStatus {
            source_id: "http://example.com/p.png".to_string(),
            status: 404,
        };
        assert_eq!(
            error.to_string(),
            "Failed to fetch http://example.com/p.png: HTTP 404"
        );
    }

    #[test]
    fn test_load_error_pattern() {
        let error = LoadError::Pattern {
            source_id: "pages/[".to_string(),
            message: "invalid range pattern".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input pattern pages/[: invalid range pattern"
        );
        assert_eq!(error.source_id(), "pages/[");
    }

    #[test]
    fn test_load_error_image() {
        let error = LoadError::Image {
            source_id: "p.png".to_string(),
            error: colormap_match::MatchError::MalformedImage {
                expected: 12,
                actual: 3,
            },
        };
        assert_eq!(
            error.to_string(),
            "Unusable image p.png: malformed image: expected 12 bytes, got 3"
        );
    }

    #[test]
    fn test_config_error_read() {
        let error = ConfigError::Read {
            path: PathBuf::from("scan.yaml"),
            error: not_found(),
        };
        assert_eq!(error.to_string(), "Failed to read config scan.yaml: missing");
    }

    #[test]
    fn test_config_error_invalid() {
        let error = ConfigError::Invalid("samples must be at least 2".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid config value: samples must be at least 2"
        );
    }

    #[test]
    fn test_export_error() {
        let error = ExportError {
            path: PathBuf::from("out_cm.csv"),
            error: not_found(),
        };
        assert_eq!(error.to_string(), "Failed to write out_cm.csv: missing");
    }
}
