//! Integration tests for the brand and project stores
//!
//! These tests exercise the full persistence workflow against a real
//! temporary directory: seeding, repeated saves with backup rotation,
//! restore, and registry bookkeeping.

use camino::Utf8PathBuf;
use launcher_core::brand::{BrandStore, SaveOptions};
use launcher_core::project::{
    CreateProjectOptions, ProjectFilter, ProjectSort, ProjectStore, ProjectType,
};
use tempfile::TempDir;

fn utf8_dir(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("temp dir path is UTF-8")
}

fn count_backups(data_dir: &Utf8PathBuf) -> (usize, bool) {
    let mut timestamped = 0;
    let mut stable = false;
    for entry in data_dir.read_dir_utf8().expect("read data dir") {
        let name = entry.expect("dir entry").file_name().to_string();
        if name == "brand.json.backup" {
            stable = true;
        } else if name.starts_with("brand.json.") && name.ends_with(".backup") {
            timestamped += 1;
        }
    }
    (timestamped, stable)
}

#[test]
fn repeated_saves_keep_five_timestamped_backups() {
    let dir = TempDir::new().unwrap();
    let data_dir = utf8_dir(&dir);
    let mut store = BrandStore::with_dir(data_dir.clone());
    store.initialize().unwrap();

    let mut brand = store.load().unwrap();
    for i in 0..7 {
        brand.personal.bio = format!("revision {}", i);
        brand = store.save(&brand, &SaveOptions::default()).unwrap();
    }

    let (timestamped, stable) = count_backups(&data_dir);
    assert_eq!(timestamped, 5, "older backups should have been pruned");
    assert!(stable, "stable backup file should exist");
}

#[test]
fn updated_at_strictly_increases_across_saves() {
    let dir = TempDir::new().unwrap();
    let mut store = BrandStore::with_dir(utf8_dir(&dir));
    store.initialize().unwrap();

    let mut brand = store.load().unwrap();
    let mut previous = brand.updated_at.clone();
    for i in 0..5 {
        brand.personal.bio = format!("revision {}", i);
        brand = store.save(&brand, &SaveOptions::default()).unwrap();
        assert!(
            brand.updated_at > previous,
            "save {} did not advance updatedAt ({} -> {})",
            i,
            previous,
            brand.updated_at
        );
        previous = brand.updated_at.clone();
    }
}

#[test]
fn restore_round_trip_after_edits() {
    let dir = TempDir::new().unwrap();
    let mut store = BrandStore::with_dir(utf8_dir(&dir));
    store.initialize().unwrap();

    let mut brand = store.load().unwrap();
    brand.personal.name = "Keeper".to_string();
    store.save(&brand, &SaveOptions::default()).unwrap();

    let mut broken = store.load().unwrap();
    broken.personal.name = "Mistake".to_string();
    store.save(&broken, &SaveOptions::default()).unwrap();

    let restored = store.restore_from_backup().unwrap();
    assert_eq!(restored.personal.name, "Keeper");

    // The restore itself counts as a save and refreshes the timestamp
    assert!(restored.updated_at > brand.updated_at);
}

#[test]
fn both_stores_share_a_data_directory() {
    let dir = TempDir::new().unwrap();
    let data_dir = utf8_dir(&dir);

    let mut brands = BrandStore::with_dir(data_dir.clone());
    brands.initialize().unwrap();
    let mut projects = ProjectStore::with_dir(data_dir.clone());
    projects.initialize().unwrap();

    assert!(data_dir.join("brand.json").exists());
    assert!(data_dir.join("projects.json").exists());

    let created = projects
        .create_project(CreateProjectOptions {
            name: "portfolio-site".to_string(),
            description: "Personal portfolio".to_string(),
            project_type: ProjectType::Portfolio,
            path: data_dir.join("portfolio-site"),
            repository: Some("https://github.com/keeper/portfolio-site".to_string()),
            site: None,
            tags: vec!["personal".to_string()],
            version: None,
        })
        .unwrap();

    let found = projects
        .filter_projects(
            &ProjectFilter {
                search: Some("PORTFOLIO".to_string()),
                ..ProjectFilter::default()
            },
            &ProjectSort::default(),
        )
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, created.id);

    let stats = projects.project_stats().unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.by_type.get("portfolio"), Some(&1));
    assert_eq!(stats.recently_active, 1);
}
