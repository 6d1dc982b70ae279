use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a pipeline.
///
/// Per-file classification problems and per-packet decode problems are not
/// represented here: the former are reported as warnings, the latter are
/// skipped silently.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("capture file does not exist: {}", .0.display())]
    MissingCapture(PathBuf),

    #[error("could not resolve path {}: {source}", .path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not create directory {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("could not launch analysis engine '{engine}': {source}")]
    EngineLaunch {
        engine: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("analysis engine '{engine}' failed ({})", describe_status(.exit_code))]
    EngineFailed { engine: String, exit_code: Option<i32> },

    #[error("could not read log directory {}: {source}", .path.display())]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("could not open capture {}: {source}", .path.display())]
    CaptureOpen {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("could not write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

fn describe_status(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}
