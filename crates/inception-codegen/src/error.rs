use thiserror::Error;

use crate::templates::TemplateKind;

#[derive(Debug, Error)]
pub enum CodegenError {
    /// The context could not be substituted into the template.
    #[error("failed to render {template} source: {reason}")]
    Render {
        template: TemplateKind,
        reason: String,
    },

    /// Substitution succeeded but produced source that is not well-formed Go.
    #[error("generated {template} source is malformed at line {line}: {reason}")]
    Format {
        template: TemplateKind,
        line: usize,
        reason: String,
        /// The unformatted source, kept for diagnostics.
        source_text: String,
    },
}

impl CodegenError {
    /// Which template the failure came from.
    pub fn template(&self) -> TemplateKind {
        match self {
            Self::Render { template, .. } | Self::Format { template, .. } => *template,
        }
    }
}
