pub mod config;
pub mod emit;
pub mod error;
pub mod janitor;
pub mod paths;
pub mod resolver;
pub mod runner;
pub mod session;
pub mod toolchain;

// Re-exports
pub use config::{ConfigError, InceptionConfig};
pub use error::{ErrorKind, InceptionError, Result};
pub use janitor::{CleanupReport, StagedArtifacts};
pub use resolver::{resolve_import_identity, ResolutionError, SearchRoots};
pub use runner::BuildError;
pub use session::{InceptionSession, SessionState};
pub use toolchain::{CapturedOutput, GoToolchain, Toolchain, ToolchainError};

pub use inception_codegen::{GenerationOptions, TypeDescriptor};
