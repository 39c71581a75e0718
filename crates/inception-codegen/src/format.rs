use std::iter::Peekable;
use std::str::Chars;

use tree_sitter::{Node, Parser, Tree};

use crate::error::CodegenError;
use crate::templates::TemplateKind;

/// Declarations Go allows at file scope, after the package clause.
const TOP_LEVEL_DECLARATIONS: &[&str] = &[
    "const_declaration",
    "function_declaration",
    "method_declaration",
    "type_declaration",
    "var_declaration",
];

/// Canonicalize `source`, rejecting it if it is not a syntactically valid
/// Go file.
///
/// The source is parsed with the tree-sitter Go grammar; any error or
/// missing node fails with the line it starts on. File-scope structure is
/// then checked (one leading package clause, imports before declarations,
/// no statements outside functions). Layout is normalized afterwards:
/// one tab per open bracket, blank-line runs collapsed, trailing whitespace
/// dropped, exactly one final newline. Raw string lines are left untouched.
pub fn format_source(template: TemplateKind, source: &str) -> Result<String, CodegenError> {
    let fail = |line: usize, reason: String| CodegenError::Format {
        template,
        line,
        reason,
        source_text: source.to_string(),
    };

    let tree = parse_go(template, source)?;
    let root = tree.root_node();
    if root.has_error() {
        let node = first_error(root);
        return Err(fail(line_of(node), describe_error(node, source)));
    }
    check_file_scope(root).map_err(|(line, reason)| fail(line, reason))?;

    Ok(normalize_layout(source))
}

fn parse_go(template: TemplateKind, source: &str) -> Result<Tree, CodegenError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|err| CodegenError::Render {
            template,
            reason: format!("Go grammar failed to load: {err}"),
        })?;
    parser
        .parse(source, None)
        .ok_or_else(|| CodegenError::Format {
            template,
            line: 1,
            reason: "parser produced no syntax tree".to_string(),
            source_text: source.to_string(),
        })
}

fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// Walk down the leftmost erroneous branch to the innermost ERROR or
/// MISSING node.
fn first_error<'a>(root: Node<'a>) -> Node<'a> {
    let mut node = root;
    loop {
        if node.is_missing() {
            return node;
        }
        let mut cursor = node.walk();
        let next = node.children(&mut cursor).find(|child| child.has_error());
        match next {
            Some(child) => node = child,
            None => return node,
        }
    }
}

fn describe_error(node: Node<'_>, source: &str) -> String {
    if node.is_missing() {
        return format!("expected {:?}", node.kind());
    }
    let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
    match text.lines().map(str::trim).find(|l| !l.is_empty()) {
        Some(snippet) => format!("syntax error near {snippet:?}"),
        None => "unexpected end of file".to_string(),
    }
}

fn check_file_scope(root: Node<'_>) -> Result<(), (usize, String)> {
    let mut seen_package = false;
    let mut seen_declaration = false;
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        let line = line_of(child);
        match child.kind() {
            "comment" => {}
            "package_clause" if seen_package => {
                return Err((line, "duplicate 'package' clause".to_string()))
            }
            "package_clause" => seen_package = true,
            _ if !seen_package => return Err((line, "expected 'package' clause".to_string())),
            "import_declaration" if seen_declaration => {
                return Err((line, "imports must appear before other declarations".to_string()))
            }
            "import_declaration" => {}
            kind if TOP_LEVEL_DECLARATIONS.contains(&kind) => seen_declaration = true,
            kind => return Err((line, format!("{kind} is not allowed outside a function body"))),
        }
    }
    if seen_package {
        Ok(())
    } else {
        Err((1, "expected 'package' clause".to_string()))
    }
}

/// Re-indent and tidy source that is already known to parse.
fn normalize_layout(source: &str) -> String {
    let mut scanner = Scanner::default();
    let mut out: Vec<String> = Vec::new();

    for raw in source.lines() {
        let trimmed = raw.trim();
        match scanner.carry {
            Carry::RawString => out.push(raw.to_string()),
            _ if trimmed.is_empty() => {
                if out.last().is_some_and(|l| !l.is_empty()) {
                    out.push(String::new());
                }
            }
            Carry::BlockComment => out.push(format!("{}{}", tabs(scanner.depth), trimmed)),
            Carry::Code => {
                let closers = trimmed
                    .chars()
                    .take_while(|c| matches!(c, ')' | ']' | '}'))
                    .count();
                out.push(format!("{}{}", tabs(scanner.depth.saturating_sub(closers)), trimmed));
            }
        }
        scanner.scan_line(raw);
    }

    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    let mut formatted = out.join("\n");
    formatted.push('\n');
    formatted
}

fn tabs(depth: usize) -> String {
    "\t".repeat(depth)
}

/// Lexical state carried from one line into the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Carry {
    #[default]
    Code,
    BlockComment,
    RawString,
}

#[derive(Debug, Default)]
struct Scanner {
    carry: Carry,
    /// Number of currently open brackets
    depth: usize,
}

impl Scanner {
    fn scan_line(&mut self, line: &str) {
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match self.carry {
                Carry::BlockComment => {
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        self.carry = Carry::Code;
                    }
                }
                Carry::RawString => {
                    if c == '`' {
                        self.carry = Carry::Code;
                    }
                }
                Carry::Code => match c {
                    '/' if chars.peek() == Some(&'/') => return,
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        self.carry = Carry::BlockComment;
                    }
                    '`' => self.carry = Carry::RawString,
                    '"' | '\'' => skip_quoted(&mut chars, c),
                    '(' | '[' | '{' => self.depth += 1,
                    ')' | ']' | '}' => self.depth = self.depth.saturating_sub(1),
                    _ => {}
                },
            }
        }
    }
}

/// Skip past the closing `quote` of an interpreted string or rune literal.
fn skip_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) {
    while let Some(c) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            return;
        }
    }
}
