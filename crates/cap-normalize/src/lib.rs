pub mod format;
pub mod render;
pub mod schema;

pub use format::{Variant, format_policy};
pub use schema::{GenerationResult, UseCaseEntry, UseCases};
