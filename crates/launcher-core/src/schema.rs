//! JSON Schema validation for launcher configurations

use crate::error::{Error, Result};
use jsonschema::Validator;
use rust_embed::RustEmbed;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

/// Embedded schema files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../schemas/"]
#[prefix = ""]
struct EmbeddedSchemas;

/// Schema validator with pre-compiled schemas
#[derive(Debug)]
pub struct SchemaValidator {
    /// Compiled schemas by name
    schemas: HashMap<String, Validator>,
}

/// Global schema validator instance
static VALIDATOR: OnceLock<SchemaValidator> = OnceLock::new();

impl SchemaValidator {
    /// Create a new schema validator with embedded schemas
    pub fn new() -> Result<Self> {
        let mut schemas = HashMap::new();

        for file in EmbeddedSchemas::iter() {
            if file.ends_with(".schema.json") {
                let name = file.trim_end_matches(".schema.json").to_string();

                debug!("Loading embedded schema: {}", name);

                if let Some(content) = EmbeddedSchemas::get(&file) {
                    let json_str = std::str::from_utf8(&content.data).map_err(|_| {
                        Error::invalid_config(format!("Invalid UTF-8 in schema: {}", file))
                    })?;

                    let schema_value: Value = serde_json::from_str(json_str)?;

                    let compiled = jsonschema::validator_for(&schema_value).map_err(|e| {
                        Error::invalid_config(format!("Failed to compile schema {}: {}", name, e))
                    })?;

                    schemas.insert(name, compiled);
                }
            }
        }

        // If no embedded schemas found, use fallback schemas
        if schemas.is_empty() {
            debug!("No embedded schemas found, using fallback schemas");
            Self::load_fallback_schemas(&mut schemas)?;
        }

        Ok(Self { schemas })
    }

    /// Get the global validator instance
    pub fn global() -> &'static SchemaValidator {
        VALIDATOR.get_or_init(|| {
            SchemaValidator::new().expect("Failed to initialize global schema validator")
        })
    }

    /// Validate JSON value against a schema
    pub fn validate(&self, value: &Value, schema_name: &str) -> Result<()> {
        let schema = self
            .schemas
            .get(schema_name)
            .ok_or_else(|| Error::schema_not_found(schema_name))?;

        let errors: Vec<String> = schema
            .iter_errors(value)
            .map(|e| {
                let path = e.instance_path().to_string();
                if path.is_empty() {
                    format!("  - {}", e)
                } else {
                    format!("  - {}: {}", path, e)
                }
            })
            .collect();

        if !errors.is_empty() {
            return Err(Error::schema_validation(errors));
        }

        Ok(())
    }

    /// Validate YAML string against a schema
    pub fn validate_yaml(&self, yaml: &str, schema_name: &str) -> Result<()> {
        let value: Value = serde_yaml_ng::from_str(yaml)?;
        self.validate(&value, schema_name)
    }

    /// Check if a schema exists
    pub fn has_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// List available schemas
    pub fn list_schemas(&self) -> Vec<&str> {
        self.schemas.keys().map(|s| s.as_str()).collect()
    }

    /// Load fallback schemas (minimal schemas for when embedded ones aren't available)
    fn load_fallback_schemas(schemas: &mut HashMap<String, Validator>) -> Result<()> {
        // Minimal platform config schema
        let platform_schema = serde_json::json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["brand"],
            "additionalProperties": false,
            "properties": {
                "brand": {
                    "type": "object",
                    "required": ["personal"],
                    "additionalProperties": false,
                    "properties": {
                        "personal": {
                            "type": "object",
                            "required": ["name"],
                            "additionalProperties": false,
                            "properties": {
                                "name": { "type": "string", "minLength": 1 },
                                "avatar": { "type": "string" },
                                "bio": { "type": "string" },
                                "email": { "type": "string" }
                            }
                        },
                        "socials": {
                            "type": "object",
                            "additionalProperties": { "type": "string" }
                        }
                    }
                }
            }
        });

        // Minimal per-project config schema
        let project_schema = serde_json::json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["meta"],
            "additionalProperties": false,
            "properties": {
                "meta": {
                    "type": "object",
                    "required": ["name"],
                    "additionalProperties": false,
                    "properties": {
                        "name": { "type": "string", "minLength": 1 },
                        "description": { "type": "string" },
                        "repository": { "type": "string" }
                    }
                },
                "theme": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "name": { "type": "string" },
                        "primaryColor": { "type": "string", "pattern": "^#([0-9a-fA-F]{3}){1,2}$" }
                    }
                },
                "features": {
                    "type": "object",
                    "additionalProperties": { "type": "boolean" }
                }
            }
        });

        let platform_compiled = jsonschema::validator_for(&platform_schema).map_err(|e| {
            Error::invalid_config(format!("Failed to compile fallback platform schema: {}", e))
        })?;

        let project_compiled = jsonschema::validator_for(&project_schema).map_err(|e| {
            Error::invalid_config(format!("Failed to compile fallback project schema: {}", e))
        })?;

        schemas.insert("platform".to_string(), platform_compiled);
        schemas.insert("project".to_string(), project_compiled);

        Ok(())
    }
}
