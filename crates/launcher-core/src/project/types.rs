//! Project registry data model

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Kind of generated site
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Demo,
    Tool,
    Showcase,
    Blog,
    Docs,
    Portfolio,
}

impl ProjectType {
    /// All types in presentation order
    pub const ALL: [ProjectType; 6] = [
        ProjectType::Demo,
        ProjectType::Tool,
        ProjectType::Showcase,
        ProjectType::Blog,
        ProjectType::Docs,
        ProjectType::Portfolio,
    ];

    /// Serialized type name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Demo => "demo",
            ProjectType::Tool => "tool",
            ProjectType::Showcase => "showcase",
            ProjectType::Blog => "blog",
            ProjectType::Docs => "docs",
            ProjectType::Portfolio => "portfolio",
        }
    }

    /// Human-facing name used in generated copy
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::Demo => "Demo",
            ProjectType::Tool => "Tool",
            ProjectType::Showcase => "Showcase",
            ProjectType::Blog => "Blog",
            ProjectType::Docs => "Documentation",
            ProjectType::Portfolio => "Portfolio",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demo" => Ok(ProjectType::Demo),
            "tool" => Ok(ProjectType::Tool),
            "showcase" => Ok(ProjectType::Showcase),
            "blog" => Ok(ProjectType::Blog),
            "docs" => Ok(ProjectType::Docs),
            "portfolio" => Ok(ProjectType::Portfolio),
            other => Err(Error::UnknownProjectType {
                value: other.to_string(),
            }),
        }
    }
}

/// Lifecycle state of a registered project
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Archived,
    Draft,
}

impl ProjectStatus {
    /// Serialized status name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Archived => "archived",
            ProjectStatus::Draft => "draft",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProjectStatus::Active),
            "archived" => Ok(ProjectStatus::Archived),
            "draft" => Ok(ProjectStatus::Draft),
            other => Err(Error::UnknownProjectStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// Registered project record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub path: Utf8PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    pub status: ProjectStatus,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Input for creating a registry entry
#[derive(Debug, Clone)]
pub struct CreateProjectOptions {
    pub name: String,
    pub description: String,
    pub project_type: ProjectType,
    pub path: Utf8PathBuf,
    pub repository: Option<String>,
    pub site: Option<String>,
    pub tags: Vec<String>,
    pub version: Option<String>,
}

/// Field updates applied to an existing entry; unset fields keep their value
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_type: Option<ProjectType>,
    pub path: Option<Utf8PathBuf>,
    pub repository: Option<String>,
    pub site: Option<String>,
    pub status: Option<ProjectStatus>,
    pub tags: Option<Vec<String>>,
    pub version: Option<String>,
}

/// Registry query
///
/// Type and status match exactly; tags match when any requested tag is
/// present; search is a case-insensitive substring over name, description,
/// and tags.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub project_type: Option<ProjectType>,
    pub status: Option<ProjectStatus>,
    pub tags: Option<Vec<String>>,
    pub search: Option<String>,
}

/// Sortable registry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Type,
    Status,
    CreatedAt,
    UpdatedAt,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Registry ordering; defaults to most recently updated first
#[derive(Debug, Clone, Copy)]
pub struct ProjectSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for ProjectSort {
    fn default() -> Self {
        ProjectSort {
            field: SortField::UpdatedAt,
            direction: SortDirection::Desc,
        }
    }
}

/// Aggregate registry counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: usize,
    pub by_type: std::collections::BTreeMap<String, usize>,
    pub by_status: std::collections::BTreeMap<String, usize>,
    pub recently_active: usize,
}
