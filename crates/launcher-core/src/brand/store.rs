//! Brand record persistence
//!
//! File-backed store for the brand record at `<data-dir>/brand.json`.
//! Saves validate before touching disk, snapshot the previous file into a
//! rotating backup set, then replace the document as a whole. Backups are
//! best-effort; a failed snapshot logs a warning and never blocks the
//! save itself.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{debug, warn};

use super::types::{Brand, BrandDefaults, PersonalInfo, SaveOptions, VisualBrand};
use super::validation::validate_brand;
use crate::error::{Error, Result};
use crate::merge::deep_merge;
use crate::utils::{default_data_dir, now_timestamp};

/// Brand data file name inside the data directory
const BRAND_DATA_FILE: &str = "brand.json";

/// Suffix shared by the stable and timestamped backups
const BACKUP_SUFFIX: &str = ".backup";

/// Timestamped backups kept after pruning
const MAX_BACKUPS: usize = 5;

/// On-disk wrapper around the record
#[derive(Debug, Serialize, Deserialize)]
struct BrandFile {
    brand: Brand,
}

/// Point-in-time facts about the store file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandStats {
    pub exists: bool,
    pub path: Utf8PathBuf,
    pub size: u64,
    pub last_modified: Option<String>,
    pub has_backup: bool,
}

/// File-backed brand store
#[derive(Debug)]
pub struct BrandStore {
    data_dir: Utf8PathBuf,
    file_path: Utf8PathBuf,
    initialized: bool,
}

impl BrandStore {
    /// Store rooted at the default data directory
    pub fn new() -> Result<Self> {
        Ok(Self::with_dir(default_data_dir()?))
    }

    /// Store rooted at an explicit directory
    pub fn with_dir(data_dir: Utf8PathBuf) -> Self {
        let file_path = data_dir.join(BRAND_DATA_FILE);
        BrandStore {
            data_dir,
            file_path,
            initialized: false,
        }
    }

    /// Directory holding the store file and its backups
    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    /// Path of the store file
    pub fn file_path(&self) -> &Utf8Path {
        &self.file_path
    }

    /// Create the data directory and seed defaults if the file is absent
    ///
    /// An existing but empty file is reseeded; any other content must
    /// parse as a brand document.
    pub fn initialize(&mut self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;

        let needs_seed = if self.file_path.exists() {
            fs::read_to_string(&self.file_path)?.trim().is_empty()
        } else {
            true
        };

        if needs_seed {
            let file = BrandFile {
                brand: Brand::default_assets(),
            };
            self.write_file(&file)?;
            debug!("Seeded default brand assets at {}", self.file_path);
        }

        self.initialized = true;
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<()> {
        if !self.initialized {
            return Err(Error::not_initialized("Brand"));
        }
        Ok(())
    }

    /// Load the current brand record
    pub fn load(&self) -> Result<Brand> {
        self.ensure_initialized()?;
        Ok(self.read_file()?.brand)
    }

    /// Persist a brand record and return what was written
    ///
    /// Validation inspects the record exactly as passed in; the timestamp
    /// refresh happens after merging, just before the write.
    pub fn save(&self, brand: &Brand, options: &SaveOptions) -> Result<Brand> {
        self.ensure_initialized()?;

        if options.validate {
            let report = validate_brand(brand);
            if !report.is_valid {
                let mut details = report.errors;
                if !report.missing_fields.is_empty() {
                    details.push(format!(
                        "Missing required fields: {}",
                        report.missing_fields.join(", ")
                    ));
                }
                return Err(Error::brand_validation(details));
            }
        }

        if options.create_backup && self.file_path.exists() {
            self.create_backup();
        }

        let mut record = if options.merge {
            let current = self.read_file()?.brand;
            let merged = deep_merge(
                serde_json::to_value(current)?,
                serde_json::to_value(brand)?,
            );
            serde_json::from_value(merged)?
        } else {
            brand.clone()
        };

        if options.update_timestamp {
            record.updated_at = now_timestamp();
        }

        self.write_file(&BrandFile {
            brand: record.clone(),
        })?;
        Ok(record)
    }

    /// Replace the personal section, merge-saving the rest
    pub fn update_personal(&self, personal: PersonalInfo) -> Result<Brand> {
        let mut brand = self.load()?;
        brand.personal = personal;
        self.save(
            &brand,
            &SaveOptions {
                merge: true,
                ..SaveOptions::default()
            },
        )
    }

    /// Replace the visual section, merge-saving the rest
    pub fn update_visual(&self, visual: VisualBrand) -> Result<Brand> {
        let mut brand = self.load()?;
        brand.visual = visual;
        self.save(
            &brand,
            &SaveOptions {
                merge: true,
                ..SaveOptions::default()
            },
        )
    }

    /// Replace the defaults section, merge-saving the rest
    pub fn update_defaults(&self, defaults: BrandDefaults) -> Result<Brand> {
        let mut brand = self.load()?;
        brand.defaults = defaults;
        self.save(
            &brand,
            &SaveOptions {
                merge: true,
                ..SaveOptions::default()
            },
        )
    }

    /// Reset the record to factory defaults, keeping a backup
    pub fn reset(&self) -> Result<Brand> {
        self.save(&Brand::default_assets(), &SaveOptions::default())
    }

    /// Restore the record from the stable backup file
    ///
    /// The restored document is validated like any other save; no new
    /// backup is taken, so the stable backup survives a bad restore.
    pub fn restore_from_backup(&self) -> Result<Brand> {
        self.ensure_initialized()?;

        let backup_path = self.backup_path();
        if !backup_path.exists() {
            return Err(Error::backup_not_found(backup_path.as_str()));
        }

        let content = fs::read_to_string(&backup_path)?;
        let parsed: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| Error::invalid_backup(format!("not valid JSON: {}", e)))?;

        if parsed.get("brand").is_none() {
            return Err(Error::invalid_backup("missing brand record"));
        }

        let file: BrandFile = serde_json::from_value(parsed)
            .map_err(|e| Error::invalid_backup(e.to_string()))?;

        self.save(
            &file.brand,
            &SaveOptions {
                create_backup: false,
                ..SaveOptions::default()
            },
        )
    }

    /// Facts about the store file for status displays
    pub fn stats(&self) -> BrandStats {
        let exists = self.file_path.exists();
        let mut size = 0;
        let mut last_modified = None;

        if exists {
            if let Ok(metadata) = fs::metadata(&self.file_path) {
                size = metadata.len();
                if let Ok(modified) = metadata.modified() {
                    let stamp: chrono::DateTime<chrono::Utc> = modified.into();
                    last_modified = Some(stamp.to_rfc3339());
                }
            }
        }

        BrandStats {
            exists,
            path: self.file_path.clone(),
            size,
            last_modified,
            has_backup: self.backup_path().exists(),
        }
    }

    fn backup_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}{}", self.file_path, BACKUP_SUFFIX))
    }

    /// Snapshot the current file; failures log and are swallowed
    fn create_backup(&self) {
        if let Err(e) = self.try_create_backup() {
            warn!("Failed to create brand backup: {}", e);
        }
    }

    fn try_create_backup(&self) -> Result<()> {
        let content = fs::read_to_string(&self.file_path)?;

        let stamp = now_timestamp().replace([':', '.'], "-");
        let timestamped = self
            .data_dir
            .join(format!("{}.{}{}", BRAND_DATA_FILE, stamp, BACKUP_SUFFIX));

        fs::write(&timestamped, &content)?;
        fs::write(self.backup_path(), &content)?;

        self.prune_backups();
        Ok(())
    }

    /// Drop timestamped backups beyond the retention limit
    ///
    /// Timestamps sort lexicographically, so a plain name sort newest
    /// first is a time sort. Pruning failures are swallowed like the
    /// backups themselves.
    fn prune_backups(&self) {
        let stable_name = format!("{}{}", BRAND_DATA_FILE, BACKUP_SUFFIX);
        let prefix = format!("{}.", BRAND_DATA_FILE);

        let entries = match self.data_dir.read_dir_utf8() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to scan backups for pruning: {}", e);
                return;
            }
        };

        let mut timestamped: Vec<Utf8PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let name = entry.file_name();
                name.starts_with(&prefix)
                    && name.ends_with(BACKUP_SUFFIX)
                    && name != stable_name
            })
            .map(|entry| entry.path().to_owned())
            .collect();

        timestamped.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

        for old in timestamped.iter().skip(MAX_BACKUPS) {
            if let Err(e) = fs::remove_file(old) {
                warn!("Failed to remove old backup {}: {}", old, e);
            }
        }
    }

    fn read_file(&self) -> Result<BrandFile> {
        let content = fs::read_to_string(&self.file_path)?;
        let file: BrandFile = serde_json::from_str(&content)?;
        Ok(file)
    }

    fn write_file(&self, file: &BrandFile) -> Result<()> {
        let json = serde_json::to_string_pretty(file)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, BrandStore) {
        let dir = TempDir::new().unwrap();
        let data_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let mut store = BrandStore::with_dir(data_dir);
        store.initialize().unwrap();
        (dir, store)
    }

    #[test]
    fn test_initialize_seeds_defaults() {
        let (_dir, store) = temp_store();
        let brand = store.load().unwrap();
        assert_eq!(brand.version, "1.0.0");
        assert_eq!(brand.visual.colors.primary, "#3b82f6");
        assert!(store.file_path().exists());
    }

    #[test]
    fn test_uninitialized_store_rejects_calls() {
        let dir = TempDir::new().unwrap();
        let data_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let store = BrandStore::with_dir(data_dir);

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::NotInitialized { .. }));
        assert_eq!(
            err.to_string(),
            "Brand store not initialized. Call initialize() first"
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_dir, store) = temp_store();

        let mut brand = store.load().unwrap();
        brand.personal.name = "Ada Lovelace".to_string();
        brand.personal.email = "ada@example.com".to_string();

        let saved = store.save(&brand, &SaveOptions::default()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.personal.name, "Ada Lovelace");
    }

    #[test]
    fn test_save_refreshes_updated_at() {
        let (_dir, store) = temp_store();

        let brand = store.load().unwrap();
        let before = brand.updated_at.clone();

        let saved = store.save(&brand, &SaveOptions::default()).unwrap();
        assert!(saved.updated_at > before);
        assert_eq!(saved.created_at, brand.created_at);
    }

    #[test]
    fn test_save_without_timestamp_update() {
        let (_dir, store) = temp_store();

        let brand = store.load().unwrap();
        let saved = store
            .save(
                &brand,
                &SaveOptions {
                    update_timestamp: false,
                    ..SaveOptions::default()
                },
            )
            .unwrap();
        assert_eq!(saved.updated_at, brand.updated_at);
    }

    #[test]
    fn test_save_rejects_invalid_record() {
        let (_dir, store) = temp_store();

        let mut brand = store.load().unwrap();
        brand.visual.colors.primary = "bright-ish blue".to_string();

        let err = store.save(&brand, &SaveOptions::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Brand assets validation failed:"));
        assert!(message.contains("Invalid primary color format"));

        // Nothing was written
        let loaded = store.load().unwrap();
        assert_eq!(loaded.visual.colors.primary, "#3b82f6");
    }

    #[test]
    fn test_save_validation_can_be_skipped() {
        let (_dir, store) = temp_store();

        let mut brand = store.load().unwrap();
        brand.visual.colors.primary = "bright-ish blue".to_string();

        let result = store.save(
            &brand,
            &SaveOptions {
                validate: false,
                ..SaveOptions::default()
            },
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_merge_save_preserves_unset_optionals() {
        let (_dir, store) = temp_store();

        let mut brand = store.load().unwrap();
        brand.personal.display_name = Some("Ada".to_string());
        store.save(&brand, &SaveOptions::default()).unwrap();

        // Overlay without the optional field set; merge keeps the stored value
        let mut overlay = store.load().unwrap();
        overlay.personal.display_name = None;
        overlay.personal.bio = "Analyst".to_string();
        let merged = store
            .save(
                &overlay,
                &SaveOptions {
                    merge: true,
                    ..SaveOptions::default()
                },
            )
            .unwrap();

        assert_eq!(merged.personal.display_name.as_deref(), Some("Ada"));
        assert_eq!(merged.personal.bio, "Analyst");
    }

    #[test]
    fn test_update_personal_section() {
        let (_dir, store) = temp_store();

        let mut personal = store.load().unwrap().personal;
        personal.name = "Grace Hopper".to_string();
        personal.profession = Some("Rear Admiral".to_string());

        let updated = store.update_personal(personal).unwrap();
        assert_eq!(updated.personal.name, "Grace Hopper");
        assert_eq!(
            store.load().unwrap().personal.profession.as_deref(),
            Some("Rear Admiral")
        );
    }

    #[test]
    fn test_backup_created_on_save() {
        let (_dir, store) = temp_store();

        let brand = store.load().unwrap();
        store.save(&brand, &SaveOptions::default()).unwrap();

        let stats = store.stats();
        assert!(stats.exists);
        assert!(stats.has_backup);
        assert!(stats.size > 0);
        assert!(stats.last_modified.is_some());
    }

    #[test]
    fn test_backup_can_be_disabled() {
        let (_dir, store) = temp_store();

        let brand = store.load().unwrap();
        store
            .save(
                &brand,
                &SaveOptions {
                    create_backup: false,
                    ..SaveOptions::default()
                },
            )
            .unwrap();

        assert!(!store.stats().has_backup);
    }

    #[test]
    fn test_restore_from_backup() {
        let (_dir, store) = temp_store();

        let mut brand = store.load().unwrap();
        brand.personal.name = "Original".to_string();
        store.save(&brand, &SaveOptions::default()).unwrap();

        // Second save snapshots the "Original" state, then overwrites it
        let mut changed = store.load().unwrap();
        changed.personal.name = "Changed".to_string();
        store.save(&changed, &SaveOptions::default()).unwrap();

        let restored = store.restore_from_backup().unwrap();
        assert_eq!(restored.personal.name, "Original");
        assert_eq!(store.load().unwrap().personal.name, "Original");
    }

    #[test]
    fn test_restore_without_backup_fails() {
        let (_dir, store) = temp_store();

        let err = store.restore_from_backup().unwrap_err();
        assert!(matches!(err, Error::BackupNotFound { .. }));
    }

    #[test]
    fn test_restore_rejects_malformed_backup() {
        let (_dir, store) = temp_store();

        fs::write(store.backup_path(), "{\"not_brand\": true}").unwrap();
        let err = store.restore_from_backup().unwrap_err();
        assert!(matches!(err, Error::InvalidBackup { .. }));
        assert!(err.to_string().contains("missing brand record"));
    }

    #[test]
    fn test_stats_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let data_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let store = BrandStore::with_dir(data_dir.join("nested"));

        let stats = store.stats();
        assert!(!stats.exists);
        assert_eq!(stats.size, 0);
        assert!(stats.last_modified.is_none());
        assert!(!stats.has_backup);
    }

    #[test]
    fn test_initialize_reseeds_empty_file() {
        let dir = TempDir::new().unwrap();
        let data_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        fs::write(data_dir.join(BRAND_DATA_FILE), "").unwrap();

        let mut store = BrandStore::with_dir(data_dir);
        store.initialize().unwrap();
        assert_eq!(store.load().unwrap().version, "1.0.0");
    }
}
