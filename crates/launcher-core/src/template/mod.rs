//! Template context assembly

mod context;

pub use context::{
    BrandComputed, BrandContext, ProjectComputed, ProjectContext, ProjectProfile, TemplateContext,
    TemplateContextBuilder, TemplateMetadata,
};
