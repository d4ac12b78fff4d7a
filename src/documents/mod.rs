//! Document templates: registry, placeholder discovery, and filling.

pub mod filler;
pub mod placeholder;
pub mod registry;

pub use filler::{fill_template, DocumentFiller, FilledDocument};
pub use placeholder::{
    describe, discover_placeholders, placeholder_details, PlaceholderDetail, CURRENT_DATE,
};
pub use registry::TemplateRegistry;
