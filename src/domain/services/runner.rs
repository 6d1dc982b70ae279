use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::{CaptureFile, LogLayout};
use crate::domain::ports::capture::{AnalysisEngine, EngineOutcome};
use crate::domain::ports::file_system::DirectoryOperations;
use crate::error::PipelineError;

/// Drives the external engine over a capture file inside a prepared layout.
pub struct CaptureRunner {
    engine: Arc<dyn AnalysisEngine + Send + Sync>,
    directories: Arc<dyn DirectoryOperations + Send + Sync>,
}

impl CaptureRunner {
    pub fn new(
        engine: Arc<dyn AnalysisEngine + Send + Sync>,
        directories: Arc<dyn DirectoryOperations + Send + Sync>,
    ) -> Self {
        Self { engine, directories }
    }

    /// Create the log root and every category directory.
    ///
    /// Existing directories are fine. The first directory that cannot be
    /// created aborts with an error naming it.
    pub async fn prepare_layout(&self, layout: &LogLayout) -> Result<(), PipelineError> {
        for dir in layout.category_dirs() {
            self.directories
                .create_dir_all(&dir)
                .await
                .map_err(|source| PipelineError::DirectoryCreation {
                    path: dir.clone(),
                    source,
                })?;
            debug!(dir = %dir.display(), "directory ready");
        }

        // No categories still needs a root for the engine to run in.
        if layout.categories().is_empty() {
            self.directories
                .create_dir_all(layout.root())
                .await
                .map_err(|source| PipelineError::DirectoryCreation {
                    path: layout.root().to_path_buf(),
                    source,
                })?;
        }

        Ok(())
    }

    /// Run the engine with the layout root as its working directory.
    ///
    /// Anything other than a zero exit status is an error; logs the engine
    /// may have written before failing are left where they are.
    pub async fn run(
        &self,
        capture: &CaptureFile,
        layout: &LogLayout,
    ) -> Result<EngineOutcome, PipelineError> {
        info!(
            engine = %self.engine.name(),
            capture = %capture.path().display(),
            working_dir = %layout.root().display(),
            "running analysis engine"
        );

        let outcome = self
            .engine
            .run(capture.path(), layout.root())
            .await
            .map_err(|source| PipelineError::EngineLaunch {
                engine: self.engine.name().to_string(),
                source,
            })?;

        if !outcome.success() {
            return Err(PipelineError::EngineFailed {
                engine: self.engine.name().to_string(),
                exit_code: outcome.exit_code,
            });
        }

        info!(elapsed = ?outcome.execution_time, "analysis engine finished");
        Ok(outcome)
    }
}
