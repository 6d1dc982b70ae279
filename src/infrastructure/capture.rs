use std::path::Path;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::capture::*;
use crate::domain::ports::process::*;

// ============================================================================
// ZEEK ENGINE
// ============================================================================

/// Concrete implementation of AnalysisEngine that runs the Zeek binary
pub struct ZeekEngine {
    zeek_path: String,
    extra_args: Vec<String>,
    executor: Arc<dyn ProcessExecutor + Send + Sync>,
}

#[async_trait]
impl AnalysisEngine for ZeekEngine {
    fn name(&self) -> &str {
        &self.zeek_path
    }

    async fn run(&self, input: &Path, working_dir: &Path) -> crate::Result<EngineOutcome> {
        let args = ZeekCommandBuilder::new().build_read_args(input, &self.extra_args);
        debug!(command = %self.zeek_path, ?args, "spawning zeek");

        // stdout/stderr pass straight through to the console
        let options = ExecutionOptions::new().with_working_directory(working_dir.to_path_buf());
        let result = self
            .executor
            .execute_command(&self.zeek_path, &args, &options)
            .await?;

        Ok(EngineOutcome {
            exit_code: result.exit_code,
            execution_time: result.execution_time,
        })
    }
}

impl ZeekEngine {
    pub fn new(executor: Arc<dyn ProcessExecutor + Send + Sync>) -> Self {
        Self::with_custom_path(crate::DEFAULT_ENGINE.to_string(), executor)
    }

    pub fn with_custom_path(
        zeek_path: String,
        executor: Arc<dyn ProcessExecutor + Send + Sync>,
    ) -> Self {
        Self {
            zeek_path,
            extra_args: Vec::new(),
            executor,
        }
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
}

// ============================================================================
// ZEEK COMMAND BUILDER
// ============================================================================

/// Builds Zeek command lines
pub struct ZeekCommandBuilder;

impl ZeekCommandBuilder {
    pub fn new() -> Self {
        Self
    }

    /// `-r <capture>` followed by any configured extras
    pub fn build_read_args(&self, input: &Path, extra_args: &[String]) -> Vec<String> {
        let mut args = Vec::with_capacity(2 + extra_args.len());

        args.push("-r".to_string());
        args.push(input.to_string_lossy().to_string());
        args.extend(extra_args.iter().cloned());

        args
    }
}

impl Default for ZeekCommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}
