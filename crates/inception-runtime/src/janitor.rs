use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};
use tracing::warn;

/// Transient files and directories created by one inception cycle.
#[derive(Debug, Default)]
pub struct StagedArtifacts {
    pub(crate) staging_dir: Option<TempDir>,
    pub(crate) launcher: Option<NamedTempFile>,
    pub(crate) bridge: Option<File>,
    /// Set once the bridge file has been created by this session
    pub(crate) bridge_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Launcher,
    Bridge,
    StagingDir,
}

#[derive(Debug)]
pub struct CleanupFailure {
    pub artifact: ArtifactKind,
    pub path: PathBuf,
    pub error: io::Error,
}

/// What could not be removed. Never turned into a cycle failure.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub failures: Vec<CleanupFailure>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn check(&mut self, artifact: ArtifactKind, path: &Path, result: io::Result<()>) {
        let error = match result {
            Ok(()) => return,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return,
            Err(e) => e,
        };
        match artifact {
            ArtifactKind::Bridge => warn!(
                path = %path.display(),
                error = %error,
                "failed to remove bridge file; it will be compiled into the target package until deleted"
            ),
            _ => warn!(path = %path.display(), error = %error, ?artifact, "failed to remove inception artifact"),
        }
        self.failures.push(CleanupFailure {
            artifact,
            path: path.to_path_buf(),
            error,
        });
    }
}

impl StagedArtifacts {
    pub fn is_empty(&self) -> bool {
        self.staging_dir.is_none()
            && self.launcher.is_none()
            && self.bridge.is_none()
            && self.bridge_path.is_none()
    }

    pub fn launcher_path(&self) -> Option<&Path> {
        self.launcher.as_ref().map(NamedTempFile::path)
    }

    pub fn staging_dir(&self) -> Option<&Path> {
        self.staging_dir.as_ref().map(TempDir::path)
    }

    /// Close handles, then remove the launcher, the bridge and the staging
    /// directory, in that order. Safe to call any number of times.
    pub fn cleanup(&mut self) -> CleanupReport {
        let mut report = CleanupReport::default();

        let launcher = self.launcher.take().map(NamedTempFile::into_temp_path);
        drop(self.bridge.take());

        if let Some(launcher) = launcher {
            let path = launcher.to_path_buf();
            report.check(ArtifactKind::Launcher, &path, launcher.close());
        }
        if let Some(path) = self.bridge_path.take() {
            report.check(ArtifactKind::Bridge, &path, std::fs::remove_file(&path));
        }
        if let Some(dir) = self.staging_dir.take() {
            let path = dir.path().to_path_buf();
            report.check(ArtifactKind::StagingDir, &path, dir.close());
        }

        report
    }
}

/// Whether an existing file at the bridge path was written by a previous
/// cycle (and so may be removed).
pub fn is_generated_bridge(contents: &[u8]) -> bool {
    String::from_utf8_lossy(contents).contains(inception_codegen::templates::BRIDGE_MARKER)
}
