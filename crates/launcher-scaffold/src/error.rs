//! Error types for launcher-scaffold

use thiserror::Error;

/// Result type alias using launcher-scaffold's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Template not found in the catalog
    #[error("Template not found: {template}. Available templates: {available}")]
    TemplateNotFound { template: String, available: String },

    /// Template manifest missing or malformed
    #[error("Invalid manifest for template '{template}': {message}")]
    InvalidManifest { template: String, message: String },

    /// Target directory already has content
    #[error("Target directory is not empty: {path}. Use --force to overwrite")]
    TargetNotEmpty { path: String },

    /// Invalid project name
    #[error(
        "Invalid project name: {name}. Must start with a lowercase letter and contain only lowercase letters, digits, and hyphens"
    )]
    InvalidProjectName { name: String },

    /// Project directory missing on disk
    #[error("Project directory not found: {path}")]
    ProjectDirNotFound { path: String },

    /// Template error from Tera
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] launcher_core::Error),
}

impl Error {
    /// Create a TemplateNotFound error listing the catalog contents
    pub fn template_not_found(template: impl Into<String>, available: &[String]) -> Self {
        Self::TemplateNotFound {
            template: template.into(),
            available: available.join(", "),
        }
    }

    /// Create an InvalidManifest error
    pub fn invalid_manifest(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Create a TargetNotEmpty error
    pub fn target_not_empty(path: impl Into<String>) -> Self {
        Self::TargetNotEmpty { path: path.into() }
    }

    /// Create an InvalidProjectName error
    pub fn invalid_project_name(name: impl Into<String>) -> Self {
        Self::InvalidProjectName { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_not_found_lists_available() {
        let err = Error::template_not_found("fancy", &["base".to_string(), "blog".to_string()]);
        assert_eq!(
            err.to_string(),
            "Template not found: fancy. Available templates: base, blog"
        );
    }

    #[test]
    fn test_target_not_empty_message() {
        let err = Error::target_not_empty("/tmp/site");
        assert!(err.to_string().contains("--force"));
    }

    #[test]
    fn test_core_error_conversion() {
        let core = launcher_core::Error::schema_not_found("platform");
        let err = Error::from(core);
        assert!(matches!(err, Error::Core(_)));
    }
}
