use crate::domain::entities::ConnectionRecord;

// ============================================================================
// RECORD OUTPUT PORT
// ============================================================================

/// Port for the connection log writer.
///
/// Implementations write the header when they are created, so a sink that
/// receives no records still produces a valid, header-only log.
pub trait RecordSink {
    /// Append one record after the previously written ones
    fn write_record(&mut self, record: &ConnectionRecord) -> crate::Result<()>;

    /// Flush buffered output; nothing written before a successful `finish` is
    /// guaranteed to be on disk
    fn finish(&mut self) -> crate::Result<()>;

    /// Number of records written so far
    fn records_written(&self) -> u64;
}
