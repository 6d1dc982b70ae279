use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::entities::{ConnectionRecord, CONNECTION_LOG_HEADER};
use crate::domain::ports::record::RecordSink;

// ============================================================================
// CSV CONNECTION LOG
// ============================================================================

/// Comma-separated connection log.
///
/// The header row goes out as soon as the writer is built, so an empty
/// capture still leaves a well-formed log behind.
pub struct CsvRecordWriter<W: Write> {
    writer: csv::Writer<W>,
    records_written: u64,
}

impl CsvRecordWriter<BufWriter<File>> {
    /// Create (or truncate) the log at `path`
    pub fn create(path: &Path) -> crate::Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvRecordWriter<W> {
    pub fn new(inner: W) -> crate::Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(CONNECTION_LOG_HEADER)?;

        Ok(Self {
            writer,
            records_written: 0,
        })
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> crate::Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

impl<W: Write> RecordSink for CsvRecordWriter<W> {
    fn write_record(&mut self, record: &ConnectionRecord) -> crate::Result<()> {
        self.writer.serialize(record)?;
        self.records_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> crate::Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn records_written(&self) -> u64 {
        self.records_written
    }
}
