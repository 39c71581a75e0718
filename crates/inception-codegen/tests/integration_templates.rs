use std::path::PathBuf;

use inception_codegen::{
    render, CodegenError, GenerationContext, GenerationOptions, TemplateKind, TypeDescriptor,
};
use pretty_assertions::assert_eq;

fn sample_context() -> GenerationContext {
    GenerationContext {
        type_descriptors: vec![
            TypeDescriptor::new("A", GenerationOptions::new().with("X", true)),
            TypeDescriptor::new("B", GenerationOptions::new().with("X", false)),
        ],
        import_identity: "example.com/app/models".into(),
        package_name: "models".into(),
        input_path: PathBuf::from("models/user.go"),
        output_path: PathBuf::from("models/user_ffjson.go"),
        reset_fields: false,
    }
}

fn render_str(template: TemplateKind, ctx: &GenerationContext) -> String {
    String::from_utf8(render(template, ctx).unwrap()).unwrap()
}

#[test]
fn test_bridge_lists_descriptors_in_order() {
    let bridge = render_str(TemplateKind::Bridge, &sample_context());

    let expected = "\
// Code generated by ffjson <https://github.com/maxproc/ffjson>
//
// This should be automatically deleted by running 'ffjson',
// if leftover, please delete it.

package models

import (
\tffjsonshared \"github.com/maxproc/ffjson/shared\"
)

func FFJSONExpose() []ffjsonshared.InceptionType {
\trv := make([]ffjsonshared.InceptionType, 0, 2)
\trv = append(rv, ffjsonshared.InceptionType{Obj: A{}, Options: ffjsonshared.StructOptions{X: true}})
\trv = append(rv, ffjsonshared.InceptionType{Obj: B{}, Options: ffjsonshared.StructOptions{X: false}})
\treturn rv
}
";
    assert_eq!(bridge, expected);
}

#[test]
fn test_launcher_drives_inception() {
    let launcher = render_str(TemplateKind::Launcher, &sample_context());

    let expected = "\
// DO NOT EDIT!
// Code generated by ffjson <https://github.com/maxproc/ffjson>
// DO NOT EDIT!

package main

import (
\t\"github.com/maxproc/ffjson/inception\"
\timportedinceptionpackage \"example.com/app/models\"
)

func main() {
\ti := ffjsoninception.NewInception(\"models/user.go\", \"models\", \"models/user_ffjson.go\", false)
\ti.AddMany(importedinceptionpackage.FFJSONExpose())
\ti.Execute()
}
";
    assert_eq!(launcher, expected);
}

#[test]
fn test_launcher_passes_reset_fields() {
    let mut ctx = sample_context();
    ctx.reset_fields = true;
    let launcher = render_str(TemplateKind::Launcher, &ctx);
    assert!(launcher.contains("\"models/user_ffjson.go\", true)"));
}

#[test]
fn test_rendering_is_deterministic() {
    let ctx = sample_context();
    for template in [TemplateKind::Launcher, TemplateKind::Bridge] {
        assert_eq!(render(template, &ctx).unwrap(), render(template, &ctx).unwrap());
    }
}

#[test]
fn test_bridge_with_no_descriptors() {
    let mut ctx = sample_context();
    ctx.type_descriptors.clear();
    let bridge = render_str(TemplateKind::Bridge, &ctx);
    assert!(bridge.contains("rv := make([]ffjsonshared.InceptionType, 0, 0)\n\treturn rv\n}"));
}

#[test]
fn test_bridge_with_empty_options() {
    let mut ctx = sample_context();
    ctx.type_descriptors = vec![TypeDescriptor::new("Plain", GenerationOptions::new())];
    let bridge = render_str(TemplateKind::Bridge, &ctx);
    assert!(bridge.contains("{Obj: Plain{}, Options: ffjsonshared.StructOptions{}}"));
}

#[test]
fn test_paths_are_quoted_as_go_strings() {
    let mut ctx = sample_context();
    ctx.input_path = PathBuf::from(r"C:\work\models\user.go");
    let launcher = render_str(TemplateKind::Launcher, &ctx);
    assert!(launcher.contains(r#"NewInception("C:\\work\\models\\user.go", "models""#));
}

fn expect_render_error(template: TemplateKind, ctx: &GenerationContext) -> String {
    match render(template, ctx).unwrap_err() {
        CodegenError::Render { template: t, reason } => {
            assert_eq!(t, template);
            reason
        }
        e => panic!("Expected Render error, got: {:?}", e),
    }
}

#[test]
fn test_invalid_type_name_is_render_error() {
    let mut ctx = sample_context();
    ctx.type_descriptors
        .push(TypeDescriptor::new("pkg.Type", GenerationOptions::new()));
    let reason = expect_render_error(TemplateKind::Bridge, &ctx);
    assert!(reason.contains("type name \"pkg.Type\""), "{reason}");
}

#[test]
fn test_invalid_option_flag_is_render_error() {
    let mut ctx = sample_context();
    ctx.type_descriptors = vec![TypeDescriptor::new(
        "A",
        GenerationOptions::new().with("skip decoder", true),
    )];
    let reason = expect_render_error(TemplateKind::Bridge, &ctx);
    assert!(reason.contains("option flag"), "{reason}");
}

#[test]
fn test_keyword_package_name_is_render_error() {
    let mut ctx = sample_context();
    ctx.package_name = "func".into();
    expect_render_error(TemplateKind::Bridge, &ctx);
    expect_render_error(TemplateKind::Launcher, &ctx);
}

#[test]
fn test_bad_import_identity_is_render_error() {
    let mut ctx = sample_context();
    ctx.import_identity = String::new();
    let reason = expect_render_error(TemplateKind::Launcher, &ctx);
    assert!(reason.contains("empty"));

    ctx.import_identity = "example.com/\"quoted\"".into();
    let reason = expect_render_error(TemplateKind::Launcher, &ctx);
    assert!(reason.contains("contains"));
}

#[test]
fn test_bridge_ignores_import_identity() {
    let mut ctx = sample_context();
    ctx.import_identity = String::new();
    assert!(render(TemplateKind::Bridge, &ctx).is_ok());
}
