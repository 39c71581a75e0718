use std::path::PathBuf;

use inception_codegen::CodegenError;

use crate::config::ConfigError;
use crate::resolver::ResolutionError;
use crate::runner::BuildError;
use crate::toolchain::ToolchainError;

/// Every failure an inception cycle can surface to its caller.
#[derive(Debug, thiserror::Error)]
pub enum InceptionError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The generation context could not be substituted into a template.
    #[error(transparent)]
    Render(CodegenError),

    /// A template produced malformed Go source.
    #[error(transparent)]
    Format(CodegenError),

    #[error("file error at {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("session misuse: {0}")]
    Session(String),
}

/// Coarse classification of [`InceptionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Resolution,
    Render,
    Format,
    File,
    Build,
    Toolchain,
    Config,
    Session,
}

impl InceptionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Resolution(_) => ErrorKind::Resolution,
            Self::Render(_) => ErrorKind::Render,
            Self::Format(_) => ErrorKind::Format,
            Self::File { .. } => ErrorKind::File,
            Self::Build(_) => ErrorKind::Build,
            Self::Toolchain(_) => ErrorKind::Toolchain,
            Self::Config(_) => ErrorKind::Config,
            Self::Session(_) => ErrorKind::Session,
        }
    }

    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

impl From<CodegenError> for InceptionError {
    fn from(err: CodegenError) -> Self {
        match err {
            CodegenError::Render { .. } => Self::Render(err),
            CodegenError::Format { .. } => Self::Format(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, InceptionError>;

#[cfg(test)]
mod tests {
    use inception_codegen::TemplateKind;

    use super::*;

    #[test]
    fn codegen_errors_keep_their_kind() {
        let render: InceptionError = CodegenError::Render {
            template: TemplateKind::Bridge,
            reason: "bad".into(),
        }
        .into();
        let format: InceptionError = CodegenError::Format {
            template: TemplateKind::Launcher,
            line: 3,
            reason: "bad".into(),
            source_text: String::new(),
        }
        .into();
        assert_eq!(render.kind(), ErrorKind::Render);
        assert_eq!(format.kind(), ErrorKind::Format);
    }

    #[test]
    fn file_error_names_path() {
        let err = InceptionError::file(
            "/tmp/x_ffjson_expose.go",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::File);
        assert_eq!(
            err.to_string(),
            "file error at /tmp/x_ffjson_expose.go: denied"
        );
    }
}
