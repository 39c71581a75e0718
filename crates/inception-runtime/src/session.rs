use std::io;
use std::path::{Path, PathBuf};

use inception_codegen::{render, GenerationContext, TemplateKind, TypeDescriptor};
use tracing::{debug, info, warn};

use crate::config::InceptionConfig;
use crate::emit;
use crate::error::{InceptionError, Result};
use crate::janitor::{is_generated_bridge, CleanupReport, StagedArtifacts};
use crate::paths;
use crate::resolver::{resolve_import_identity, SearchRoots};
use crate::runner;
use crate::toolchain::{CapturedOutput, GoToolchain, Toolchain};

/// Lifecycle of an [`InceptionSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing staged yet
    New,
    /// Bridge and launcher are on disk, ready to run
    Generated,
    /// Run (or a failed generate) has completed and artifacts were cleaned up
    Finished,
}

/// One bridge/launcher cycle for a single input file.
///
/// `generate` stages the bridge beside the input and the launcher in a
/// private temporary directory; `run` compiles and executes the launcher.
/// Staged artifacts are removed after `run` whatever its outcome, after a
/// failed `generate`, and when the session is dropped.
///
/// Two sessions on the same input file must not overlap: they share the
/// bridge path.
pub struct InceptionSession<T: Toolchain> {
    toolchain: T,
    input_path: PathBuf,
    bridge_path: PathBuf,
    output_path: PathBuf,
    reset_fields: bool,
    search_roots: SearchRoots,
    remove_stale_bridge: bool,
    artifacts: StagedArtifacts,
    state: SessionState,
}

impl InceptionSession<GoToolchain> {
    /// Build a session on the `go` toolchain named by `config`.
    pub fn from_config(
        config: &InceptionConfig,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let toolchain = GoToolchain::locate(&config.toolchain)?;
        Ok(Self::new(toolchain, input_path, output_path)
            .with_reset_fields(config.reset_fields)
            .with_search_roots(config.search_roots())
            .with_stale_bridge_removal(config.remove_stale_bridge))
    }
}

impl<T: Toolchain> InceptionSession<T> {
    pub fn new(toolchain: T, input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        let input_path = input_path.into();
        let bridge_path = paths::bridge_path(&input_path);
        Self {
            toolchain,
            input_path,
            bridge_path,
            output_path: output_path.into(),
            reset_fields: false,
            search_roots: SearchRoots::default(),
            remove_stale_bridge: true,
            artifacts: StagedArtifacts::default(),
            state: SessionState::New,
        }
    }

    pub fn with_reset_fields(mut self, reset_fields: bool) -> Self {
        self.reset_fields = reset_fields;
        self
    }

    pub fn with_search_roots(mut self, roots: SearchRoots) -> Self {
        self.search_roots = roots;
        self
    }

    pub fn with_stale_bridge_removal(mut self, enabled: bool) -> Self {
        self.remove_stale_bridge = enabled;
        self
    }

    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn bridge_path(&self) -> &Path {
        &self.bridge_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Path of the staged launcher, while it exists.
    pub fn launcher_path(&self) -> Option<&Path> {
        self.artifacts.launcher_path()
    }

    /// Path of the staging directory, while it exists.
    pub fn staging_dir(&self) -> Option<&Path> {
        self.artifacts.staging_dir()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Render and stage the bridge and launcher for `descriptors`.
    ///
    /// `import_identity` is resolved through the toolchain (and the search
    /// roots) when `None` or empty. On error everything staged so far is
    /// removed before returning.
    pub fn generate(
        &mut self,
        package_name: &str,
        descriptors: &[TypeDescriptor],
        import_identity: Option<&str>,
    ) -> Result<()> {
        if self.state != SessionState::New {
            return Err(InceptionError::Session(
                "generate() may only be called once per session".to_string(),
            ));
        }

        match self.stage(package_name, descriptors, import_identity) {
            Ok(()) => {
                self.state = SessionState::Generated;
                Ok(())
            }
            Err(err) => {
                debug!(input = %self.input_path.display(), error = %err, "generate failed, cleaning up");
                self.cleanup();
                self.state = SessionState::Finished;
                Err(err)
            }
        }
    }

    /// Compile and execute the staged launcher, then clean up. The cleanup
    /// happens before any build error is returned.
    pub fn run(&mut self) -> Result<CapturedOutput> {
        if self.state != SessionState::Generated {
            return Err(InceptionError::Session(format!(
                "run() requires a successful generate() (session is {:?})",
                self.state
            )));
        }
        let launcher = self
            .launcher_path()
            .map(Path::to_path_buf)
            .ok_or_else(|| InceptionError::Session("no launcher staged".to_string()))?;

        let result = runner::run_launcher(&self.toolchain, &launcher);
        self.cleanup();
        self.state = SessionState::Finished;

        if result.is_ok() {
            info!(
                input = %self.input_path.display(),
                output = %self.output_path.display(),
                "inception cycle complete"
            );
        }
        result
    }

    /// `generate` followed by `run`.
    pub fn execute(
        &mut self,
        package_name: &str,
        descriptors: &[TypeDescriptor],
        import_identity: Option<&str>,
    ) -> Result<CapturedOutput> {
        self.generate(package_name, descriptors, import_identity)?;
        self.run()
    }

    /// Remove every staged artifact. Idempotent; failures are logged and
    /// reported, never raised.
    pub fn cleanup(&mut self) -> CleanupReport {
        self.artifacts.cleanup()
    }

    fn stage(
        &mut self,
        package_name: &str,
        descriptors: &[TypeDescriptor],
        import_identity: Option<&str>,
    ) -> Result<()> {
        self.clear_stale_bridge()?;

        let import_identity = match import_identity {
            Some(identity) if !identity.is_empty() => paths::to_slash(identity),
            _ => paths::to_slash(&resolve_import_identity(
                &self.toolchain,
                &self.input_path,
                &self.search_roots,
            )?),
        };

        let ctx = GenerationContext {
            type_descriptors: descriptors.to_vec(),
            import_identity,
            package_name: package_name.to_string(),
            input_path: self.input_path.clone(),
            output_path: self.output_path.clone(),
            reset_fields: self.reset_fields,
        };
        let launcher_source = render(TemplateKind::Launcher, &ctx)?;
        let bridge_source = render(TemplateKind::Bridge, &ctx)?;

        let staging = emit::create_staging_dir(&paths::staging_parent(&self.input_path))?;
        let staging_path = staging.path().to_path_buf();
        self.artifacts.staging_dir = Some(staging);

        self.artifacts.launcher = Some(emit::emit_launcher(&staging_path, &launcher_source)?);

        let mut bridge = emit::create_bridge(&self.bridge_path)?;
        self.artifacts.bridge_path = Some(self.bridge_path.clone());
        emit::write_bridge(&mut bridge, &self.bridge_path, &bridge_source)?;
        self.artifacts.bridge = Some(bridge);

        debug!(
            import = %ctx.import_identity,
            types = ctx.type_descriptors.len(),
            bridge = %self.bridge_path.display(),
            staging = %staging_path.display(),
            "staged inception sources"
        );
        Ok(())
    }

    /// Remove a bridge left behind by an interrupted cycle. A file at the
    /// bridge path that this tool did not generate is never touched.
    fn clear_stale_bridge(&self) -> Result<()> {
        if !self.remove_stale_bridge {
            return Ok(());
        }
        let contents = match std::fs::read(&self.bridge_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(InceptionError::file(&self.bridge_path, e)),
        };
        if !is_generated_bridge(&contents) {
            return Err(InceptionError::file(
                &self.bridge_path,
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "bridge path is occupied by a file ffjson did not generate",
                ),
            ));
        }
        warn!(path = %self.bridge_path.display(), "removing stale bridge file from an earlier run");
        std::fs::remove_file(&self.bridge_path)
            .map_err(|e| InceptionError::file(&self.bridge_path, e))
    }
}

impl<T: Toolchain> Drop for InceptionSession<T> {
    fn drop(&mut self) {
        if !self.artifacts.is_empty() {
            self.artifacts.cleanup();
        }
    }
}

impl<T: Toolchain> std::fmt::Debug for InceptionSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InceptionSession")
            .field("toolchain", &self.toolchain.name())
            .field("input_path", &self.input_path)
            .field("bridge_path", &self.bridge_path)
            .field("output_path", &self.output_path)
            .field("state", &self.state)
            .finish()
    }
}
