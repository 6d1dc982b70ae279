use std::path::PathBuf;
use async_trait::async_trait;

// ============================================================================
// PROCESS EXECUTION PORTS
// ============================================================================

/// Port for executing system processes
/// Abstracts command execution from the domain logic
#[async_trait]
pub trait ProcessExecutor {
    /// Execute command and wait for completion.
    ///
    /// Returns an error only when the process could not be started; a
    /// non-zero exit is reported through `ProcessResult`.
    async fn execute_command(
        &self,
        command: &str,
        args: &[String],
        options: &ExecutionOptions,
    ) -> crate::Result<ProcessResult>;
}

/// Port for probing installed tools
pub trait SystemToolChecker {
    /// Get version of installed tool
    fn get_tool_version(&self, tool_name: &str) -> crate::Result<Option<String>>;
}

// ============================================================================
// SUPPORTING TYPES
// ============================================================================

/// Options for process execution. The child's stdout and stderr always pass
/// through to the console.
#[derive(Debug, Clone, Default)]
pub struct ExecutionOptions {
    pub working_directory: Option<PathBuf>,
}

/// Result of completed process execution
#[derive(Debug)]
pub struct ProcessResult {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub execution_time: std::time::Duration,
}

impl ExecutionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_working_directory(mut self, dir: PathBuf) -> Self {
        self.working_directory = Some(dir);
        self
    }
}
