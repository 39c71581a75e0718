use std::path::{Component, Path, PathBuf};

/// Inserted between the input file's stem and extension to name the bridge.
pub const BRIDGE_SUFFIX: &str = "_ffjson_expose";
/// Prefix of the staging directory and of the launcher file inside it.
pub const STAGING_PREFIX: &str = "ffjson-inception";
/// The toolchain only runs a standalone program from a `.go` file.
pub const LAUNCHER_EXTENSION: &str = ".go";

/// Bridge file path for `input`: `models/user.go` -> `models/user_ffjson_expose.go`.
///
/// An input without an extension gets the bridge suffix plus `.go`.
pub fn bridge_path(input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(BRIDGE_SUFFIX);
    match input.extension() {
        Some(ext) => {
            name.push(".");
            name.push(ext);
        }
        None => name.push(LAUNCHER_EXTENSION),
    }
    input.with_file_name(name)
}

/// Directory the staging directory is created in: the input file's own
/// directory, so the launcher sits next to the target package.
pub fn staging_parent(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Absolute, lexically cleaned form of `path`.
pub fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(clean(path))
    } else {
        Ok(clean(&std::env::current_dir()?.join(path)))
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Forward-slash form of an import path given with OS separators.
pub fn to_slash(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
