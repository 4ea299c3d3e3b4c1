//! Static site generator for marquee.
//!
//! Composes themes and pages from resolved content and renders them to a
//! static site, one directory per locale.

pub mod assets;
pub mod builder;
pub mod features;
pub mod markdown;
pub mod page;
pub mod templates;
pub mod theme;

pub use assets::{AssetPipeline, AssetRole, MissingAsset};
pub use builder::{BuildError, BuildResult, StaticBuilder};
pub use features::{render_features, FeatureFragment};
pub use page::{compose_doc_page, compose_homepage, DocPage, HomePage};
pub use templates::{Head, TemplateEngine};
pub use theme::{compose_theme, ThemeDescriptor};
