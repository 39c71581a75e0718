use indexmap::IndexSet;

use crate::literal::quote_string;

/// Tracks state while a Go source file is emitted: indentation, collected
/// imports and the lines written so far.
#[derive(Debug, Clone, Default)]
pub struct EmitContext {
    /// Current indentation level (one tab per level)
    indent_level: usize,
    /// Collected imports (deduped, insertion-ordered)
    imports: IndexSet<ImportIR>,
    lines: Vec<String>,
}

/// A single Go import spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportIR {
    /// Local name the package is imported under, if not its own name
    pub alias: Option<String>,
    /// Import path (e.g., "github.com/maxproc/ffjson/shared")
    pub path: String,
}

impl EmitContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current indentation string.
    pub fn indent(&self) -> String {
        "\t".repeat(self.indent_level)
    }

    /// Increase indentation by one level.
    pub fn push_indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation by one level.
    pub fn pop_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    #[cfg(test)]
    fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Write one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let line = format!("{}{}", self.indent(), text.as_ref());
        self.lines.push(line);
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Add an import to the collection (deduped).
    pub fn add_import(&mut self, alias: Option<&str>, path: impl Into<String>) {
        self.imports.insert(ImportIR {
            alias: alias.map(str::to_string),
            path: path.into(),
        });
    }

    #[cfg(test)]
    fn imports(&self) -> &IndexSet<ImportIR> {
        &self.imports
    }

    /// Drain the collected imports into a parenthesized import block.
    /// Writes nothing when no imports were collected.
    pub fn emit_imports(&mut self) {
        let imports = std::mem::take(&mut self.imports);
        if imports.is_empty() {
            return;
        }
        self.line("import (");
        self.push_indent();
        for import in &imports {
            let path = quote_string(&import.path);
            match &import.alias {
                Some(alias) => self.line(format!("{alias} {path}")),
                None => self.line(path),
            }
        }
        self.pop_indent();
        self.line(")");
    }

    /// Consume the context, returning the emitted source.
    pub fn finish(self) -> String {
        let mut source = self.lines.join("\n");
        source.push('\n');
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_tabs() {
        let mut ctx = EmitContext::new();
        assert_eq!(ctx.indent(), "");
        ctx.push_indent();
        assert_eq!(ctx.indent(), "\t");
        ctx.push_indent();
        assert_eq!(ctx.indent(), "\t\t");
        ctx.pop_indent();
        ctx.pop_indent();
        ctx.pop_indent();
        assert_eq!(ctx.indent_level(), 0);
    }

    #[test]
    fn test_imports_dedup() {
        let mut ctx = EmitContext::new();
        ctx.add_import(None, "fmt");
        ctx.add_import(None, "fmt");
        ctx.add_import(Some("shared"), "github.com/maxproc/ffjson/shared");
        assert_eq!(ctx.imports().len(), 2);
    }

    #[test]
    fn test_emit_imports_block() {
        let mut ctx = EmitContext::new();
        ctx.add_import(None, "fmt");
        ctx.add_import(Some("x"), "example.com/x");
        ctx.emit_imports();
        assert!(ctx.imports().is_empty());
        assert_eq!(ctx.finish(), "import (\n\t\"fmt\"\n\tx \"example.com/x\"\n)\n");
    }

    #[test]
    fn test_emit_imports_empty_writes_nothing() {
        let mut ctx = EmitContext::new();
        ctx.emit_imports();
        ctx.line("package main");
        assert_eq!(ctx.finish(), "package main\n");
    }
}
