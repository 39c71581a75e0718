use std::fs::File;
use std::io::Write;
use std::path::Path;

use tempfile::{Builder, NamedTempFile, TempDir};
use tracing::debug;

use crate::error::{InceptionError, Result};
use crate::paths::{LAUNCHER_EXTENSION, STAGING_PREFIX};

/// Create a fresh, uniquely named staging directory inside `parent`.
pub fn create_staging_dir(parent: &Path) -> Result<TempDir> {
    let dir = Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(parent)
        .map_err(|source| InceptionError::file(parent, source))?;
    debug!(dir = %dir.path().display(), "created staging directory");
    Ok(dir)
}

/// Write the launcher program to a new uniquely named `.go` file in `dir`.
///
/// The name is allocated with an exclusive create, so concurrent sessions
/// sharing `dir`'s parent can never pick the same file.
pub fn emit_launcher(dir: &Path, source: &[u8]) -> Result<NamedTempFile> {
    let mut file = Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(LAUNCHER_EXTENSION)
        .tempfile_in(dir)
        .map_err(|source| InceptionError::file(dir, source))?;
    if let Err(err) = write_all(file.as_file_mut(), source) {
        return Err(InceptionError::file(file.path(), err));
    }
    debug!(path = %file.path().display(), bytes = source.len(), "wrote launcher");
    Ok(file)
}

/// Create (or truncate) the bridge file at `path`.
pub fn create_bridge(path: &Path) -> Result<File> {
    File::create(path).map_err(|err| InceptionError::file(path, err))
}

/// Write `source` to a bridge opened with [`create_bridge`].
pub fn write_bridge(file: &mut File, path: &Path, source: &[u8]) -> Result<()> {
    write_all(file, source).map_err(|err| InceptionError::file(path, err))?;
    debug!(path = %path.display(), bytes = source.len(), "wrote bridge");
    Ok(())
}

fn write_all(file: &mut File, source: &[u8]) -> std::io::Result<()> {
    file.write_all(source)?;
    file.flush()
}
