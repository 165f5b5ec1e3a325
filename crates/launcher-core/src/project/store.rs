//! Project registry persistence
//!
//! JSON-file-backed registry of every site the launcher has generated,
//! stored at `<data-dir>/projects.json`. Writes replace the whole file;
//! the registry assumes a single launcher process at a time.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use tracing::debug;

use super::types::{
    CreateProjectOptions, ProjectFilter, ProjectInfo, ProjectSort, ProjectStats, ProjectStatus,
    SortDirection, SortField, UpdateProjectOptions,
};
use crate::error::{Error, Result};
use crate::utils::{default_data_dir, now_timestamp};

/// Registry file name inside the data directory
const PROJECTS_DATA_FILE: &str = "projects.json";

/// Registry format version written to the meta block
const STORE_VERSION: &str = "1.0.0";

/// Window for the recently-active stat
const RECENT_ACTIVITY_DAYS: i64 = 30;

/// On-disk registry document
#[derive(Debug, Serialize, Deserialize)]
struct ProjectsFile {
    projects: Vec<ProjectInfo>,
    meta: StoreMeta,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreMeta {
    version: String,
    last_updated: String,
}

impl ProjectsFile {
    fn empty() -> Self {
        ProjectsFile {
            projects: Vec::new(),
            meta: StoreMeta {
                version: STORE_VERSION.to_string(),
                last_updated: now_timestamp(),
            },
        }
    }
}

/// File-backed project registry
#[derive(Debug)]
pub struct ProjectStore {
    data_dir: Utf8PathBuf,
    file_path: Utf8PathBuf,
    initialized: bool,
}

impl ProjectStore {
    /// Registry rooted at the default data directory
    pub fn new() -> Result<Self> {
        Ok(Self::with_dir(default_data_dir()?))
    }

    /// Registry rooted at an explicit directory
    pub fn with_dir(data_dir: Utf8PathBuf) -> Self {
        let file_path = data_dir.join(PROJECTS_DATA_FILE);
        ProjectStore {
            data_dir,
            file_path,
            initialized: false,
        }
    }

    /// Directory holding the registry file
    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    /// Path of the registry file
    pub fn file_path(&self) -> &Utf8Path {
        &self.file_path
    }

    /// Create the data directory and seed an empty registry if absent
    pub fn initialize(&mut self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;

        let needs_seed = if self.file_path.exists() {
            fs::read_to_string(&self.file_path)?.trim().is_empty()
        } else {
            true
        };

        if needs_seed {
            self.write_file(&mut ProjectsFile::empty())?;
            debug!("Seeded empty project registry at {}", self.file_path);
        }

        self.initialized = true;
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<()> {
        if !self.initialized {
            return Err(Error::not_initialized("Project"));
        }
        Ok(())
    }

    /// All registered projects in insertion order
    pub fn list_projects(&self) -> Result<Vec<ProjectInfo>> {
        self.ensure_initialized()?;
        Ok(self.read_file()?.projects)
    }

    /// Look up a project by id
    pub fn get_project(&self, id: &str) -> Result<Option<ProjectInfo>> {
        Ok(self
            .list_projects()?
            .into_iter()
            .find(|project| project.id == id))
    }

    /// Look up a project by exact name
    pub fn find_by_name(&self, name: &str) -> Result<Option<ProjectInfo>> {
        Ok(self
            .list_projects()?
            .into_iter()
            .find(|project| project.name == name))
    }

    /// Register a new project
    ///
    /// New entries start active with both timestamps set to now. The id is
    /// a slug of the name plus a base-36 millisecond stamp and is kept
    /// unique within the registry.
    pub fn create_project(&self, options: CreateProjectOptions) -> Result<ProjectInfo> {
        self.ensure_initialized()?;
        let mut file = self.read_file()?;

        let mut id = generate_project_id(&options.name);
        while file.projects.iter().any(|project| project.id == id) {
            id = generate_project_id(&options.name);
        }

        let now = now_timestamp();
        let project = ProjectInfo {
            id,
            name: options.name,
            description: options.description,
            project_type: options.project_type,
            path: options.path,
            repository: options.repository,
            site: options.site,
            status: ProjectStatus::Active,
            created_at: now.clone(),
            updated_at: now,
            tags: options.tags,
            version: options.version,
        };

        file.projects.push(project.clone());
        self.write_file(&mut file)?;
        Ok(project)
    }

    /// Apply updates to a project, returning the new record
    ///
    /// Returns `Ok(None)` when the id is unknown. Any applied update
    /// refreshes `updated_at`.
    pub fn update_project(
        &self,
        id: &str,
        options: UpdateProjectOptions,
    ) -> Result<Option<ProjectInfo>> {
        self.ensure_initialized()?;
        let mut file = self.read_file()?;

        let Some(project) = file.projects.iter_mut().find(|project| project.id == id) else {
            return Ok(None);
        };

        if let Some(name) = options.name {
            project.name = name;
        }
        if let Some(description) = options.description {
            project.description = description;
        }
        if let Some(project_type) = options.project_type {
            project.project_type = project_type;
        }
        if let Some(path) = options.path {
            project.path = path;
        }
        if let Some(repository) = options.repository {
            project.repository = Some(repository);
        }
        if let Some(site) = options.site {
            project.site = Some(site);
        }
        if let Some(status) = options.status {
            project.status = status;
        }
        if let Some(tags) = options.tags {
            project.tags = tags;
        }
        if let Some(version) = options.version {
            project.version = Some(version);
        }
        project.updated_at = now_timestamp();

        let updated = project.clone();
        self.write_file(&mut file)?;
        Ok(Some(updated))
    }

    /// Remove a project; false when the id is unknown
    pub fn delete_project(&self, id: &str) -> Result<bool> {
        self.ensure_initialized()?;
        let mut file = self.read_file()?;

        let before = file.projects.len();
        file.projects.retain(|project| project.id != id);
        if file.projects.len() == before {
            return Ok(false);
        }

        self.write_file(&mut file)?;
        Ok(true)
    }

    /// Query the registry with a filter and ordering
    pub fn filter_projects(
        &self,
        filter: &ProjectFilter,
        sort: &ProjectSort,
    ) -> Result<Vec<ProjectInfo>> {
        let mut projects = self.list_projects()?;
        projects.retain(|project| matches_filter(project, filter));
        sort_projects(&mut projects, sort);
        Ok(projects)
    }

    /// Aggregate counts over the whole registry
    pub fn project_stats(&self) -> Result<ProjectStats> {
        let projects = self.list_projects()?;
        let cutoff = Utc::now() - Duration::days(RECENT_ACTIVITY_DAYS);

        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
        let mut recently_active = 0;

        for project in &projects {
            *by_type
                .entry(project.project_type.as_str().to_string())
                .or_insert(0) += 1;
            *by_status
                .entry(project.status.as_str().to_string())
                .or_insert(0) += 1;

            if let Ok(updated) = DateTime::parse_from_rfc3339(&project.updated_at) {
                if updated.with_timezone(&Utc) > cutoff {
                    recently_active += 1;
                }
            }
        }

        Ok(ProjectStats {
            total: projects.len(),
            by_type,
            by_status,
            recently_active,
        })
    }

    fn read_file(&self) -> Result<ProjectsFile> {
        let content = fs::read_to_string(&self.file_path)?;
        let file: ProjectsFile = serde_json::from_str(&content)?;
        Ok(file)
    }

    fn write_file(&self, file: &mut ProjectsFile) -> Result<()> {
        file.meta.last_updated = now_timestamp();
        let json = serde_json::to_string_pretty(file)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }
}

fn matches_filter(project: &ProjectInfo, filter: &ProjectFilter) -> bool {
    if let Some(project_type) = filter.project_type {
        if project.project_type != project_type {
            return false;
        }
    }

    if let Some(status) = filter.status {
        if project.status != status {
            return false;
        }
    }

    if let Some(tags) = &filter.tags {
        if !tags.is_empty() && !tags.iter().any(|tag| project.tags.contains(tag)) {
            return false;
        }
    }

    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        let hit = project.name.to_lowercase().contains(&needle)
            || project.description.to_lowercase().contains(&needle)
            || project
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }

    true
}

fn sort_projects(projects: &mut [ProjectInfo], sort: &ProjectSort) {
    projects.sort_by(|a, b| {
        let ordering = sort_key(a, sort.field).cmp(sort_key(b, sort.field));
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn sort_key(project: &ProjectInfo, field: SortField) -> &str {
    match field {
        SortField::Name => &project.name,
        SortField::Type => project.project_type.as_str(),
        SortField::Status => project.status.as_str(),
        SortField::CreatedAt => &project.created_at,
        SortField::UpdatedAt => &project.updated_at,
    }
}

/// Slug of the name plus a base-36 millisecond stamp
fn generate_project_id(name: &str) -> String {
    format!(
        "{}-{}",
        slugify(name),
        to_base36(Utc::now().timestamp_millis() as u64)
    )
}

/// Lowercase, non-alphanumerics to dashes, runs collapsed, ends trimmed
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = false;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_matches('-').to_string()
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        let digit = (value % 36) as u8;
        digits.push(if digit < 10 {
            b'0' + digit
        } else {
            b'a' + digit - 10
        });
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).expect("base36 digits are ASCII")
}
