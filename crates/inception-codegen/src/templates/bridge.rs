use crate::context::EmitContext;
use crate::error::CodegenError;
use crate::literal::bool_literal;
use crate::types::{GenerationContext, GenerationOptions};

use super::{identifier, TemplateKind, BRIDGE_MARKER, EXPOSE_FUNC, SHARED_ALIAS, SHARED_IMPORT};

/// Emit the bridge file: one exported function listing every descriptor,
/// in order, as `ffjsonshared.InceptionType` values.
pub(crate) fn emit(ctx: &GenerationContext) -> Result<String, CodegenError> {
    let template = TemplateKind::Bridge;
    let package = identifier(template, "package name", &ctx.package_name)?;

    let mut out = EmitContext::new();
    out.line("// Code generated by ffjson <https://github.com/maxproc/ffjson>");
    out.line("//");
    out.line(BRIDGE_MARKER);
    out.line("// if leftover, please delete it.");
    out.blank();
    out.line(format!("package {package}"));
    out.blank();

    out.add_import(Some(SHARED_ALIAS), SHARED_IMPORT);
    out.emit_imports();
    out.blank();

    out.line(format!(
        "func {EXPOSE_FUNC}() []{SHARED_ALIAS}.InceptionType {{"
    ));
    out.push_indent();
    out.line(format!(
        "rv := make([]{SHARED_ALIAS}.InceptionType, 0, {})",
        ctx.type_descriptors.len()
    ));
    for descriptor in &ctx.type_descriptors {
        let name = identifier(template, "type name", &descriptor.name)?;
        let options = options_literal(&descriptor.options)?;
        out.line(format!(
            "rv = append(rv, {SHARED_ALIAS}.InceptionType{{Obj: {name}{{}}, Options: {options}}})"
        ));
    }
    out.line("return rv");
    out.pop_indent();
    out.line("}");

    Ok(out.finish())
}

/// Render options as a `StructOptions` composite literal.
fn options_literal(options: &GenerationOptions) -> Result<String, CodegenError> {
    let fields = options
        .iter()
        .map(|(flag, value)| {
            identifier(TemplateKind::Bridge, "option flag", flag)
                .map(|flag| format!("{flag}: {}", bool_literal(value)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!(
        "{SHARED_ALIAS}.StructOptions{{{}}}",
        fields.join(", ")
    ))
}
