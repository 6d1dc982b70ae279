pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod config;
pub mod error;

pub use application::cli::{DecodeArgs, RunnerArgs};
pub use error::PipelineError;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub const DEFAULT_ENGINE: &str = "zeek";
pub const DEFAULT_LOG_ROOT: &str = "zeek_logs";
pub const DEFAULT_CONNECTION_LOG: &str = "conn.log";
