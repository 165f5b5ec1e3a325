//! Config file loading with schema validation and inheritance
//!
//! Single-file loads validate the document before deserializing it into a
//! typed config. Inheritance chains merge documents in order (later files
//! win) and validate only the final merged result, so partial overlay
//! files do not need to satisfy the schema on their own.

use crate::config::types::PlatformConfig;
use crate::error::{Error, Result};
use crate::merge::deep_merge;
use crate::schema::SchemaValidator;
use crate::utils::default_data_dir;
use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use tracing::debug;

/// Platform config file name inside the data directory
const CONFIG_FILE: &str = "config.yaml";

/// Read a YAML file into a JSON value
///
/// A missing file maps to [`Error::ConfigNotFound`] rather than a bare IO
/// error so callers can offer a useful hint.
pub fn load_yaml_value(path: &Utf8Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config_not_found(path.as_str())
        } else {
            Error::Io(e)
        }
    })?;

    let value: Value = serde_yaml_ng::from_str(&content)?;
    Ok(value)
}

/// Load a single YAML config file, validating it against the named schema
pub fn load_config<T: DeserializeOwned>(
    path: &Utf8Path,
    validator: &SchemaValidator,
    schema: &str,
) -> Result<T> {
    let value = load_yaml_value(path)?;
    validator.validate(&value, schema)?;
    let config = serde_json::from_value(value)?;
    Ok(config)
}

/// Load an ordered chain of YAML config files with inheritance
///
/// Files are merged lowest precedence first, so later entries override
/// earlier ones. Missing files are skipped silently; only the merged
/// document is validated.
pub fn load_config_with_inheritance<T: DeserializeOwned>(
    paths: &[Utf8PathBuf],
    validator: &SchemaValidator,
    schema: &str,
) -> Result<T> {
    let mut merged = Value::Object(serde_json::Map::new());

    for path in paths {
        if !path.exists() {
            debug!("Skipping missing config file: {}", path);
            continue;
        }
        let value = load_yaml_value(path)?;
        merged = deep_merge(merged, value);
    }

    validator.validate(&merged, schema)?;
    let config = serde_json::from_value(merged)?;
    Ok(config)
}

/// Manager for the platform config document
///
/// Seeds a default document on first use and supports reading and writing
/// individual values by dot-separated path. Every write re-validates the
/// whole document, so unknown keys are rejected by the schema.
#[derive(Debug)]
pub struct ConfigManager {
    path: Utf8PathBuf,
}

impl ConfigManager {
    /// Manager over the default data directory
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(default_data_dir()?.join(CONFIG_FILE)))
    }

    /// Manager over an explicit config file path
    pub fn with_path(path: Utf8PathBuf) -> Self {
        ConfigManager { path }
    }

    /// Manager over the config file inside a data directory
    pub fn with_dir(data_dir: Utf8PathBuf) -> Self {
        Self::with_path(data_dir.join(CONFIG_FILE))
    }

    /// Path of the managed config file
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Load the typed platform config, seeding defaults on first use
    pub fn load(&self) -> Result<PlatformConfig> {
        self.ensure_seeded()?;
        load_config(&self.path, SchemaValidator::global(), "platform")
    }

    /// Entire config document as a JSON value
    pub fn document(&self) -> Result<Value> {
        self.ensure_seeded()?;
        load_yaml_value(&self.path)
    }

    /// Read the value at a dot-separated path, if present
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        let document = self.document()?;
        Ok(lookup_path(&document, key).cloned())
    }

    /// Write a value at a dot-separated path
    ///
    /// Raw values that parse as JSON keep their type (booleans, numbers,
    /// structures); anything else is stored as a string. The updated
    /// document must still pass the platform schema or the write is
    /// rejected.
    pub fn set(&self, key: &str, raw: &str) -> Result<()> {
        let mut document = self.document()?;
        let value: Value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        insert_path(&mut document, key, value)?;

        SchemaValidator::global().validate(&document, "platform")?;

        let yaml = serde_yaml_ng::to_string(&document)?;
        fs::write(&self.path, yaml)?;
        Ok(())
    }

    fn ensure_seeded(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let seed = PlatformConfig::seed();
        let yaml = serde_yaml_ng::to_string(&seed)?;
        fs::write(&self.path, yaml)?;
        debug!("Seeded platform config at {}", self.path);
        Ok(())
    }
}

fn lookup_path<'a>(document: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = document;
    for part in key.split('.') {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

fn insert_path(document: &mut Value, key: &str, value: Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let (last, parents) = parts
        .split_last()
        .ok_or_else(|| Error::invalid_config("Config key must not be empty"))?;

    let mut current = document;
    for part in parents {
        current = current
            .as_object_mut()
            .ok_or_else(|| {
                Error::invalid_config(format!("Config path '{}' does not address an object", key))
            })?
            .entry((*part).to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
    }

    current
        .as_object_mut()
        .ok_or_else(|| {
            Error::invalid_config(format!("Config path '{}' does not address an object", key))
        })?
        .insert((*last).to_string(), value);

    Ok(())
}
