use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::paths;
use crate::toolchain::Toolchain;

/// Directory segment under each search root that holds package sources.
pub const SOURCE_ROOT: &str = "src";

/// Module search roots consulted when the toolchain cannot name a package
/// itself (the `GOPATH` layout: `<root>/src/<import path>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRoots(Vec<PathBuf>);

impl SearchRoots {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self(
            roots
                .into_iter()
                .map(Into::into)
                .filter(|p: &PathBuf| !p.as_os_str().is_empty())
                .collect(),
        )
    }

    /// Split an OS path-list value (`:`-separated on Unix, `;` on Windows).
    pub fn parse(value: &OsStr) -> Self {
        Self::new(std::env::split_paths(value))
    }

    /// Read the roots from environment variable `var`; empty if unset.
    pub fn from_env(var: &str) -> Self {
        std::env::var_os(var)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("could not find source directory for {}: search roots {roots:?}", .dir.display())]
pub struct ResolutionError {
    /// Roots that were tried, as configured
    pub roots: Vec<PathBuf>,
    /// Absolute directory the identity was wanted for
    pub dir: PathBuf,
}

/// Determine the import identity of the package containing `input_path`.
///
/// Asks the toolchain first. When that fails, looks for the directory under
/// `<root>/src/` for each of `roots` in order and returns the remainder,
/// `/`-separated.
pub fn resolve_import_identity<T: Toolchain + ?Sized>(
    toolchain: &T,
    input_path: &Path,
    roots: &SearchRoots,
) -> Result<String, ResolutionError> {
    let dir = containing_dir(input_path);

    match toolchain.query_identity(&dir) {
        Ok(stdout) => {
            let identity = stdout.trim_end();
            if !identity.is_empty() {
                debug!(dir = %dir.display(), identity, "toolchain resolved import identity");
                return Ok(identity.to_string());
            }
            debug!(dir = %dir.display(), "toolchain returned an empty identity");
        }
        Err(err) => {
            debug!(dir = %dir.display(), error = %err, "identity query failed, trying search roots");
        }
    }

    for root in roots.iter() {
        let Ok(root) = paths::absolute(root) else {
            continue;
        };
        if let Some(identity) = identity_under_root(&root, &dir) {
            debug!(root = %root.display(), identity = %identity, "resolved import identity from search root");
            return Ok(identity);
        }
    }

    Err(ResolutionError {
        roots: roots.iter().map(Path::to_path_buf).collect(),
        dir,
    })
}

fn containing_dir(input_path: &Path) -> PathBuf {
    let abs = paths::absolute(input_path).unwrap_or_else(|_| paths::clean(input_path));
    abs.parent().map(Path::to_path_buf).unwrap_or(abs)
}

fn identity_under_root(root: &Path, dir: &Path) -> Option<String> {
    let rel = dir.strip_prefix(root).ok()?;
    let mut components = rel.components();
    match components.next() {
        Some(Component::Normal(first)) if first == SOURCE_ROOT => {}
        _ => return None,
    }
    let parts = components
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
