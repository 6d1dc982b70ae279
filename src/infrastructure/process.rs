use std::process::Stdio;
use async_trait::async_trait;
use tokio::process::Command as AsyncCommand;
use std::process::Command;
use regex::Regex;
use tracing::debug;

use crate::domain::ports::process::*;

// ============================================================================
// PROCESS EXECUTOR IMPLEMENTATION
// ============================================================================

/// Concrete implementation using tokio process execution
pub struct TokioProcessExecutor;

#[async_trait]
impl ProcessExecutor for TokioProcessExecutor {
    async fn execute_command(
        &self,
        command: &str,
        args: &[String],
        options: &ExecutionOptions,
    ) -> crate::Result<ProcessResult> {
        let mut cmd = AsyncCommand::new(command);
        cmd.args(args);

        // The child's output goes straight to our console
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
        cmd.stdin(Stdio::null());

        if let Some(ref dir) = options.working_directory {
            cmd.current_dir(dir);
        }

        let started_at = chrono::Local::now();
        let mut child = cmd.spawn()?;
        debug!(command, pid = child.id(), "process started");

        let status = child.wait().await?;

        Ok(ProcessResult {
            exit_code: status.code(),
            execution_time: chrono::Local::now()
                .signed_duration_since(started_at)
                .to_std()
                .unwrap_or_default(),
        })
    }
}

impl TokioProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

// ============================================================================
// SYSTEM TOOL CHECKER IMPLEMENTATION
// ============================================================================

/// Concrete implementation for checking system tool availability
pub struct StandardToolChecker;

impl SystemToolChecker for StandardToolChecker {
    fn get_tool_version(&self, tool_name: &str) -> crate::Result<Option<String>> {
        let output = Command::new(tool_name)
            .arg("--version")
            .stdin(Stdio::null())
            .output()?;

        if output.status.success() {
            let version_output = String::from_utf8_lossy(&output.stdout);
            Ok(Self::parse_version(&version_output))
        } else {
            Ok(None)
        }
    }
}

impl StandardToolChecker {
    pub fn new() -> Self {
        Self
    }

    fn parse_version(version_output: &str) -> Option<String> {
        version_output.lines().find_map(Self::extract_version_from_line)
    }

    fn extract_version_from_line(line: &str) -> Option<String> {
        // "zeek version 6.0.3", "v1.2.3" or just "1.2.3", optionally with a
        // "-dev.42" style suffix
        let patterns = [
            r"version\s+(\d+\.\d+(?:\.\d+)?(?:-[\w.]+)?)",
            r"v(\d+\.\d+\.\d+)",
            r"(\d+\.\d+\.\d+)",
        ];

        for pattern in &patterns {
            if let Ok(re) = Regex::new(pattern) {
                if let Some(version) = re.captures(line).and_then(|c| c.get(1)) {
                    return Some(version.as_str().to_string());
                }
            }
        }

        None
    }
}

// ============================================================================
// DEFAULT IMPLEMENTATIONS
// ============================================================================

impl Default for TokioProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for StandardToolChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zeek_version() {
        assert_eq!(
            StandardToolChecker::parse_version("zeek version 6.0.3\n"),
            Some("6.0.3".to_string())
        );
        assert_eq!(
            StandardToolChecker::parse_version("zeek version 7.1.0-dev.42\n"),
            Some("7.1.0-dev.42".to_string())
        );
        assert_eq!(
            StandardToolChecker::parse_version("tool v2.4.1"),
            Some("2.4.1".to_string())
        );
        assert_eq!(StandardToolChecker::parse_version("no digits here"), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_reports_exit_code_and_working_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let executor = TokioProcessExecutor::new();
        let options = ExecutionOptions::new().with_working_directory(temp_dir.path().to_path_buf());

        let result = executor
            .execute_command(
                "sh",
                &["-c".to_string(), "touch ran-here; exit 3".to_string()],
                &options,
            )
            .await
            .unwrap();

        assert_eq!(result.exit_code, Some(3));
        assert!(temp_dir.path().join("ran-here").is_file());
    }

    #[tokio::test]
    async fn test_missing_command_fails_to_launch() {
        let executor = TokioProcessExecutor::new();
        let result = executor
            .execute_command(
                "definitely-not-an-installed-engine",
                &[],
                &ExecutionOptions::new(),
            )
            .await;

        assert!(result.is_err());
    }
}
