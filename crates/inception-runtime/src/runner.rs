use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::toolchain::{CapturedOutput, Toolchain};

/// The launcher failed to compile or exited nonzero. Carries both output
/// streams untouched so the compiler's diagnostics reach the user.
#[derive(Debug, thiserror::Error)]
#[error("{command} run failed for: {}\nSTDOUT:\n{stdout}\nSTDERR:\n{stderr}\n", .launcher.display())]
pub struct BuildError {
    pub command: String,
    pub launcher: PathBuf,
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Compile and execute the launcher at `launcher`. Success means exit
/// status zero and nothing more.
pub fn run_launcher<T: Toolchain + ?Sized>(
    toolchain: &T,
    launcher: &Path,
) -> Result<CapturedOutput> {
    debug!(toolchain = toolchain.name(), launcher = %launcher.display(), "running launcher");
    let output = toolchain.compile_and_run(launcher)?;
    if !output.success {
        return Err(BuildError {
            command: toolchain.name().to_string(),
            launcher: launcher.to_path_buf(),
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        }
        .into());
    }
    debug!(launcher = %launcher.display(), "launcher finished");
    Ok(output)
}
