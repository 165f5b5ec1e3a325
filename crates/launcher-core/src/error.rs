//! Error types for launcher-core

use thiserror::Error;

/// Result type alias using launcher-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Astro Launcher
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Schema validation error
    #[error("Schema validation failed:\n{errors}")]
    SchemaValidation { errors: String },

    /// Schema not found
    #[error("Schema not found: {name}")]
    SchemaNotFound { name: String },

    /// Store method called before initialize()
    #[error("{store} store not initialized. Call initialize() first")]
    NotInitialized { store: String },

    /// Brand record rejected by validation
    #[error("Brand assets validation failed: {errors}")]
    BrandValidation { errors: String },

    /// Stable backup file missing
    #[error("No backup file found at: {path}")]
    BackupNotFound { path: String },

    /// Backup file exists but cannot be restored
    #[error("Invalid backup data format: {message}")]
    InvalidBackup { message: String },

    /// Unknown project type name
    #[error("Unknown project type: {value}. Valid types: demo, tool, showcase, blog, docs, portfolio")]
    UnknownProjectType { value: String },

    /// Unknown project status name
    #[error("Unknown project status: {value}. Valid statuses: active, archived, draft")]
    UnknownProjectStatus { value: String },

    /// Template context serialization error
    #[error("Template context error: {0}")]
    Template(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a ConfigNotFound error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a SchemaValidation error from a list of failures
    pub fn schema_validation(errors: Vec<String>) -> Self {
        Error::SchemaValidation {
            errors: errors.join("\n"),
        }
    }

    /// Create a SchemaNotFound error
    pub fn schema_not_found(name: impl Into<String>) -> Self {
        Error::SchemaNotFound { name: name.into() }
    }

    /// Create a NotInitialized error
    pub fn not_initialized(store: impl Into<String>) -> Self {
        Error::NotInitialized {
            store: store.into(),
        }
    }

    /// Create a BrandValidation error from a list of failures
    pub fn brand_validation(errors: Vec<String>) -> Self {
        Error::BrandValidation {
            errors: errors.join(", "),
        }
    }

    /// Create a BackupNotFound error
    pub fn backup_not_found(path: impl Into<String>) -> Self {
        Error::BackupNotFound { path: path.into() }
    }

    /// Create an InvalidBackup error
    pub fn invalid_backup(message: impl Into<String>) -> Self {
        Error::InvalidBackup {
            message: message.into(),
        }
    }
}
