use crate::context::EmitContext;
use crate::error::CodegenError;
use crate::literal::{bool_literal, quote_string};
use crate::types::GenerationContext;

use super::{
    identifier, path_literal, render_error, TemplateKind, EXPOSE_FUNC, INCEPTION_IMPORT,
    TARGET_ALIAS,
};

const HEADER: &[&str] = &[
    "// DO NOT EDIT!",
    "// Code generated by ffjson <https://github.com/maxproc/ffjson>",
    "// DO NOT EDIT!",
];

/// Emit the launcher program: imports the target package, feeds the
/// bridge's descriptors to the inception driver and executes it.
pub(crate) fn emit(ctx: &GenerationContext) -> Result<String, CodegenError> {
    let template = TemplateKind::Launcher;
    let import_identity = import_identity(&ctx.import_identity)?;
    let package = identifier(template, "package name", &ctx.package_name)?;
    let input = path_literal(template, "input path", &ctx.input_path)?;
    let output = path_literal(template, "output path", &ctx.output_path)?;

    let mut out = EmitContext::new();
    for line in HEADER {
        out.line(line);
    }
    out.blank();
    out.line("package main");
    out.blank();

    out.add_import(None, INCEPTION_IMPORT);
    out.add_import(Some(TARGET_ALIAS), import_identity);
    out.emit_imports();
    out.blank();

    out.line("func main() {");
    out.push_indent();
    out.line(format!(
        "i := ffjsoninception.NewInception({input}, {}, {output}, {})",
        quote_string(package),
        bool_literal(ctx.reset_fields)
    ));
    out.line(format!("i.AddMany({TARGET_ALIAS}.{EXPOSE_FUNC}())"));
    out.line("i.Execute()");
    out.pop_indent();
    out.line("}");

    Ok(out.finish())
}

fn import_identity(identity: &str) -> Result<&str, CodegenError> {
    let template = TemplateKind::Launcher;
    if identity.is_empty() {
        return Err(render_error(template, "import identity is empty".to_string()));
    }
    if let Some(bad) = identity
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\\' | '`'))
    {
        return Err(render_error(
            template,
            format!("import identity {identity:?} contains {bad:?}"),
        ));
    }
    Ok(identity)
}
