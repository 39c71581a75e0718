pub mod context;
pub mod error;
pub mod format;
pub mod literal;
pub mod types;

// Bridge and launcher templates
pub mod templates;

// Re-exports
pub use context::EmitContext;
pub use error::CodegenError;
pub use templates::{render, TemplateKind};
pub use types::{GenerationContext, GenerationOptions, TypeDescriptor};
