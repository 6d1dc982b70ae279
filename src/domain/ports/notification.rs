use async_trait::async_trait;

// ============================================================================
// NOTIFICATION PORTS
// ============================================================================

/// Port for user-facing console messages.
///
/// Diagnostic detail goes to `tracing`; this port carries only what a user of
/// the command line is meant to read.
#[async_trait]
pub trait UserNotification {
    /// Show informational message to user
    async fn show_info(&self, message: &str) -> crate::Result<()>;

    /// Show warning message to user
    async fn show_warning(&self, message: &str) -> crate::Result<()>;

    /// Show error message to user
    async fn show_error(&self, message: &str) -> crate::Result<()>;

    /// Show success message to user
    async fn show_success(&self, message: &str) -> crate::Result<()>;
}
