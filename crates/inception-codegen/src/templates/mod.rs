pub mod bridge;
pub mod launcher;

use std::fmt;
use std::path::Path;

use crate::error::CodegenError;
use crate::format::format_source;
use crate::literal::{is_go_identifier, quote_string};
use crate::types::GenerationContext;

/// Import path of the package that drives downstream generation.
pub const INCEPTION_IMPORT: &str = "github.com/maxproc/ffjson/inception";
/// Import path of the package declaring `InceptionType` and `StructOptions`.
pub const SHARED_IMPORT: &str = "github.com/maxproc/ffjson/shared";
/// Local name the launcher imports the target package under.
pub const TARGET_ALIAS: &str = "importedinceptionpackage";
/// Local name the bridge imports the shared package under.
pub const SHARED_ALIAS: &str = "ffjsonshared";
/// Name of the function the bridge exports.
pub const EXPOSE_FUNC: &str = "FFJSONExpose";

/// Comment line present in every rendered bridge. Used to recognize a
/// bridge left behind by an interrupted run.
pub const BRIDGE_MARKER: &str = "// This should be automatically deleted by running 'ffjson',";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Standalone `package main` program run by the toolchain
    Launcher,
    /// File injected into the target package
    Bridge,
}

impl TemplateKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Launcher => "launcher",
            Self::Bridge => "bridge",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render `template` against `ctx` and canonicalize the result.
pub fn render(template: TemplateKind, ctx: &GenerationContext) -> Result<Vec<u8>, CodegenError> {
    let source = match template {
        TemplateKind::Launcher => launcher::emit(ctx)?,
        TemplateKind::Bridge => bridge::emit(ctx)?,
    };
    let formatted = format_source(template, &source)?;
    Ok(formatted.into_bytes())
}

fn render_error(template: TemplateKind, reason: String) -> CodegenError {
    CodegenError::Render { template, reason }
}

/// Check that `value` can be substituted where Go expects an identifier.
fn identifier<'a>(
    template: TemplateKind,
    what: &str,
    value: &'a str,
) -> Result<&'a str, CodegenError> {
    if is_go_identifier(value) {
        Ok(value)
    } else {
        Err(render_error(
            template,
            format!("{what} {value:?} is not a valid Go identifier"),
        ))
    }
}

/// Quote a path as a Go string literal.
fn path_literal(template: TemplateKind, what: &str, path: &Path) -> Result<String, CodegenError> {
    path.to_str()
        .map(quote_string)
        .ok_or_else(|| render_error(template, format!("{what} {} is not valid UTF-8", path.display())))
}
