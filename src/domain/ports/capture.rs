use std::path::Path;
use std::time::Duration;
use async_trait::async_trait;

use crate::domain::entities::{LinkType, RawPacket};

// ============================================================================
// ANALYSIS ENGINE PORT
// ============================================================================

/// Port for the external traffic-analysis engine.
/// The engine reads a capture file and leaves its logs in `working_dir`.
#[async_trait]
pub trait AnalysisEngine {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Run the engine over `input` with `working_dir` as its current
    /// directory and wait for it to exit.
    ///
    /// An `Err` means the engine could not be launched at all.
    async fn run(&self, input: &Path, working_dir: &Path) -> crate::Result<EngineOutcome>;
}

/// How an engine run ended
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutcome {
    pub exit_code: Option<i32>,
    pub execution_time: Duration,
}

impl EngineOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

// ============================================================================
// PACKET SOURCE PORT
// ============================================================================

/// Port for an offline capture: a finite, single-pass sequence of packets.
///
/// Sources are not required to support rewinding, so consumers get exactly
/// one pass over the packets.
pub trait PacketSource: Iterator<Item = RawPacket> {
    /// Link type declared by the capture
    fn link_type(&self) -> LinkType;

    /// True when the sequence ended on a read error rather than a clean
    /// end of capture
    fn truncated(&self) -> bool;
}
