//! Project registry: data model and persistence

mod store;
mod types;

pub use store::ProjectStore;
pub use types::{
    CreateProjectOptions, ProjectFilter, ProjectInfo, ProjectSort, ProjectStats, ProjectStatus,
    ProjectType, SortDirection, SortField, UpdateProjectOptions,
};
