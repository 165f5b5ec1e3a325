//! Brand assets: data model, validation, and persistence

mod store;
mod types;
mod validation;

pub use store::{BrandStats, BrandStore};
pub use types::{
    BorderRadius, Brand, BrandColors, BrandDefaults, BrandIcons, BrandTypography, PersonalInfo,
    ProjectTypeOverride, SaveOptions, ShadowStyle, SocialLink, SocialLinks, SocialPlatform,
    ValidationReport, VisualBrand, BRAND_VERSION,
};
pub use validation::{is_valid_color, is_valid_email, is_valid_url, validate_brand};
