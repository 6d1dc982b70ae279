use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::domain::entities::{CaptureFile, LogLayout};
use crate::domain::ports::capture::{EngineOutcome, PacketSource};
use crate::domain::ports::file_system::DirectoryOperations;
use crate::domain::ports::notification::UserNotification;
use crate::domain::ports::process::SystemToolChecker;
use crate::domain::ports::record::RecordSink;
use crate::domain::services::classifier::{ClassificationReport, LogClassifier};
use crate::domain::services::decoder::{DecodeStats, PacketDecoder};
use crate::domain::services::runner::CaptureRunner;
use crate::error::PipelineError;
use crate::infrastructure::factories::DependencyContainer;
use crate::infrastructure::pcap::PcapFileSource;
use crate::infrastructure::storage::CsvRecordWriter;

// ============================================================================
// ENGINE PIPELINE
// ============================================================================

/// What a completed engine run produced.
#[derive(Debug, Clone)]
pub struct EngineRunSummary {
    pub capture: PathBuf,
    pub log_root: PathBuf,
    pub outcome: EngineOutcome,
    pub report: ClassificationReport,
}

/// Validate, prepare directories, run the engine, classify.
///
/// Strictly sequential. Everything except per-file classification problems
/// stops the run; nothing is rolled back.
pub struct EnginePipeline {
    runner: CaptureRunner,
    classifier: LogClassifier,
    notifier: Arc<dyn UserNotification + Send + Sync>,
    version_check: Option<(Arc<dyn SystemToolChecker + Send + Sync>, String)>,
}

impl EnginePipeline {
    pub fn new(
        runner: CaptureRunner,
        classifier: LogClassifier,
        notifier: Arc<dyn UserNotification + Send + Sync>,
    ) -> Self {
        Self {
            runner,
            classifier,
            notifier,
            version_check: None,
        }
    }

    /// Log the engine's version once the capture has been validated
    pub fn with_version_check(
        mut self,
        checker: Arc<dyn SystemToolChecker + Send + Sync>,
        engine: impl Into<String>,
    ) -> Self {
        self.version_check = Some((checker, engine.into()));
        self
    }

    pub async fn run(
        &self,
        capture_path: &Path,
        layout: &LogLayout,
    ) -> Result<EngineRunSummary, PipelineError> {
        // Nothing touches the disk until the capture checks out
        let capture = CaptureFile::resolve(capture_path)?;
        debug!(capture = %capture.path().display(), "capture resolved");

        if let Some((checker, engine)) = &self.version_check {
            log_engine_version(checker.as_ref(), engine);
        }

        self.runner.prepare_layout(layout).await?;
        let outcome = self.runner.run(&capture, layout).await?;

        let report = match self.classifier.classify(layout).await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "skipping classification");
                self.notify_warning(&e.to_string()).await;
                ClassificationReport::default()
            }
        };

        for failure in &report.failures {
            self.notify_warning(&format!(
                "could not move {} into {}: {}",
                failure.file_name, failure.category, failure.reason
            ))
            .await;
        }

        info!(
            moved = report.moved_count(),
            uncategorized = report.uncategorized.len(),
            failed = report.failures.len(),
            "classification finished"
        );

        Ok(EngineRunSummary {
            capture: capture.path().to_path_buf(),
            log_root: layout.root().to_path_buf(),
            outcome,
            report,
        })
    }

    async fn notify_warning(&self, message: &str) {
        if let Err(e) = self.notifier.show_warning(message).await {
            debug!(error = %e, "could not show warning");
        }
    }
}

/// Wire the engine pipeline from the container and run it.
pub async fn run_engine_pipeline(
    capture_path: &Path,
    config: &AppConfig,
    container: &mut DependencyContainer,
) -> Result<EngineRunSummary, PipelineError> {
    let directories = container.directory_operations();
    let pipeline = EnginePipeline::new(
        CaptureRunner::new(container.analysis_engine(), directories.clone()),
        LogClassifier::new(directories, config.classification_policy()),
        container.user_notification(),
    )
    .with_version_check(
        Arc::new(container.create_system_tool_checker()),
        container.engine_binary(),
    );

    pipeline.run(capture_path, &config.layout()).await
}

/// Log the engine version at debug level; a failed lookup changes nothing.
pub fn log_engine_version(checker: &dyn SystemToolChecker, engine: &str) -> Option<String> {
    match checker.get_tool_version(engine) {
        Ok(Some(version)) => {
            debug!(engine, %version, "engine version");
            Some(version)
        }
        Ok(None) => {
            debug!(engine, "engine version not reported");
            None
        }
        Err(e) => {
            debug!(engine, error = %e, "engine version lookup failed");
            None
        }
    }
}

// ============================================================================
// DECODE PIPELINE
// ============================================================================

/// What a completed decode produced.
#[derive(Debug, Clone)]
pub struct DecodeSummary {
    pub capture: PathBuf,
    pub output: PathBuf,
    pub stats: DecodeStats,
    /// The capture ended on a read error; records before it were kept
    pub truncated: bool,
}

/// Decode a capture into the connection log under the configured root.
///
/// The capture is opened before anything is created, so a missing or
/// unreadable capture leaves no output behind.
pub async fn run_decode_pipeline(
    capture_path: &Path,
    config: &AppConfig,
    directories: Arc<dyn DirectoryOperations + Send + Sync>,
) -> Result<DecodeSummary, PipelineError> {
    let capture = CaptureFile::resolve(capture_path)?;
    let source = PcapFileSource::open(capture.path())?;

    let root = config.output.root.clone();
    directories
        .create_dir_all(&root)
        .await
        .map_err(|source| PipelineError::DirectoryCreation {
            path: root.clone(),
            source,
        })?;

    let output = config.connection_log_path();
    let mut sink = CsvRecordWriter::create(&output).map_err(|source| PipelineError::OutputWrite {
        path: output.clone(),
        source,
    })?;

    info!(
        capture = %capture.path().display(),
        output = %output.display(),
        link_type = ?source.link_type(),
        "decoding capture"
    );
    let (stats, truncated) = decode_into(source, &mut sink, &output)?;
    info!(
        packets = stats.packets_read,
        records = stats.records_emitted,
        skipped = stats.packets_skipped,
        "decode finished"
    );

    Ok(DecodeSummary {
        capture: capture.path().to_path_buf(),
        output,
        stats,
        truncated,
    })
}

/// Stream every record from `source` into `sink` and flush it.
///
/// The first failed write is fatal; `output` only names it in the error.
pub fn decode_into<S, K>(
    source: S,
    sink: &mut K,
    output: &Path,
) -> Result<(DecodeStats, bool), PipelineError>
where
    S: PacketSource,
    K: RecordSink,
{
    let write_error = |source: Box<dyn std::error::Error + Send + Sync>| PipelineError::OutputWrite {
        path: output.to_path_buf(),
        source,
    };

    let mut decoder = PacketDecoder::new(source);
    for record in &mut decoder {
        sink.write_record(&record).map_err(write_error)?;
    }
    sink.finish().map_err(write_error)?;

    Ok((decoder.stats(), decoder.source().truncated()))
}
