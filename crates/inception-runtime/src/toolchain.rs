use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

/// Error types for toolchain invocations.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    #[error("toolchain {command:?} not found in PATH")]
    NotFound { command: String },

    #[error("failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {}: {}", describe_status(.status), .stderr.trim_end())]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Fully captured result of a finished toolchain process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub success: bool,
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for CapturedOutput {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// The external compiler the inception cycle drives.
///
/// Implemented by [`GoToolchain`] for real builds; tests substitute fakes.
pub trait Toolchain {
    /// Command name used in diagnostics.
    fn name(&self) -> &str;

    /// Ask for the import identity of the package in `dir`.
    /// Returns the raw stdout of a successful query.
    fn query_identity(&self, dir: &Path) -> Result<String, ToolchainError>;

    /// Compile and execute the standalone program at `source`, bypassing
    /// any build cache. A nonzero exit is reported through
    /// [`CapturedOutput::success`], not as an `Err`.
    fn compile_and_run(&self, source: &Path) -> Result<CapturedOutput, ToolchainError>;
}

impl<T: Toolchain + ?Sized> Toolchain for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn query_identity(&self, dir: &Path) -> Result<String, ToolchainError> {
        (**self).query_identity(dir)
    }

    fn compile_and_run(&self, source: &Path) -> Result<CapturedOutput, ToolchainError> {
        (**self).compile_and_run(source)
    }
}

impl<T: Toolchain + ?Sized> Toolchain for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn query_identity(&self, dir: &Path) -> Result<String, ToolchainError> {
        (**self).query_identity(dir)
    }

    fn compile_and_run(&self, source: &Path) -> Result<CapturedOutput, ToolchainError> {
        (**self).compile_and_run(source)
    }
}

/// The `go` command: `go list <dir>` for identity, `go run -a <file>` to
/// compile and execute.
#[derive(Debug, Clone)]
pub struct GoToolchain {
    command: PathBuf,
    name: String,
}

impl GoToolchain {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        let command = command.into();
        let name = command.display().to_string();
        Self { command, name }
    }

    /// Resolve `command` (a bare name or a path) to an executable.
    pub fn locate(command: &str) -> Result<Self, ToolchainError> {
        let resolved = which::which(command).map_err(|_| ToolchainError::NotFound {
            command: command.to_string(),
        })?;
        debug!(command, resolved = %resolved.display(), "located toolchain");
        Ok(Self {
            command: resolved,
            name: command.to_string(),
        })
    }

    pub fn command(&self) -> &Path {
        &self.command
    }

    fn output(&self, args: &[&OsStr]) -> Result<Output, ToolchainError> {
        debug!(command = %self.name, ?args, "invoking toolchain");
        Command::new(&self.command)
            .args(args)
            .output()
            .map_err(|source| ToolchainError::Spawn {
                command: self.name.clone(),
                source,
            })
    }
}

impl Toolchain for GoToolchain {
    fn name(&self) -> &str {
        &self.name
    }

    fn query_identity(&self, dir: &Path) -> Result<String, ToolchainError> {
        let output = self.output(&[OsStr::new("list"), dir.as_os_str()])?;
        if !output.status.success() {
            return Err(ToolchainError::Failed {
                command: format!("{} list", self.name),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn compile_and_run(&self, source: &Path) -> Result<CapturedOutput, ToolchainError> {
        let output = self.output(&[OsStr::new("run"), OsStr::new("-a"), source.as_os_str()])?;
        Ok(output.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_unknown_command_fails() {
        let err = GoToolchain::locate("nonexistent_toolchain_xyz").unwrap_err();
        assert!(matches!(err, ToolchainError::NotFound { .. }));
        assert!(err.to_string().contains("nonexistent_toolchain_xyz"));
    }

    #[test]
    fn spawn_failure_is_reported() {
        let toolchain = GoToolchain::new("/nonexistent/bin/go");
        let err = toolchain
            .compile_and_run(Path::new("launcher.go"))
            .unwrap_err();
        match err {
            ToolchainError::Spawn { command, .. } => assert_eq!(command, "/nonexistent/bin/go"),
            e => panic!("Expected Spawn, got: {:?}", e),
        }
    }

    #[test]
    fn failed_query_message_includes_stderr() {
        let err = ToolchainError::Failed {
            command: "go list".into(),
            status: Some(1),
            stderr: "no Go files in /tmp/x\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "go list exited with status 1: no Go files in /tmp/x"
        );
    }

    #[cfg(unix)]
    #[test]
    fn captured_output_from_process() {
        let output = Command::new("sh")
            .args(["-c", "echo out; echo err >&2; exit 3"])
            .output()
            .unwrap();
        let captured = CapturedOutput::from(output);
        assert!(!captured.success);
        assert_eq!(captured.status, Some(3));
        assert_eq!(captured.stdout, "out\n");
        assert_eq!(captured.stderr, "err\n");
    }
}
