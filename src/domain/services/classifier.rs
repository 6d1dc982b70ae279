use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{LogCategory, LogLayout};
use crate::domain::ports::file_system::DirectoryOperations;
use crate::error::PipelineError;

/// Zeek logs describing core traffic
pub const CORE_LOGS: &[&str] = &["conn.log", "dns.log", "http.log", "files.log", "ssl.log"];

/// Zeek logs describing network services
pub const NETWORK_SERVICE_LOGS: &[&str] = &["ftp.log", "smtp.log", "ssh.log", "rdp.log", "ldap.log"];

/// Zeek logs describing application protocols
pub const APPLICATION_LOGS: &[&str] = &["pe.log", "ntp.log", "quic.log", "traceroute.log"];

// ============================================================================
// CLASSIFICATION POLICY
// ============================================================================

/// Immutable lookup from log file name to category.
///
/// Categories are consulted in the order they were added. A name listed by
/// more than one category belongs to the first one.
#[derive(Debug, Clone, Default)]
pub struct ClassificationPolicy {
    categories: Vec<LogCategory>,
    table: HashMap<String, usize>,
}

impl ClassificationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock Zeek layout: core, network_services, application.
    pub fn zeek_default() -> Self {
        Self::new()
            .with_category(LogCategory::new("core", "core"), CORE_LOGS.iter().copied())
            .with_category(
                LogCategory::new("network_services", "network_services"),
                NETWORK_SERVICE_LOGS.iter().copied(),
            )
            .with_category(
                LogCategory::new("application", "application"),
                APPLICATION_LOGS.iter().copied(),
            )
    }

    /// Append a category with lower priority than every category added so far.
    pub fn with_category<I, S>(mut self, category: LogCategory, logs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = self.categories.len();
        for log in logs {
            match self.table.entry(log.into()) {
                Entry::Occupied(existing) => {
                    warn!(
                        log = %existing.key(),
                        kept = %self.categories[*existing.get()].name(),
                        ignored = %category.name(),
                        "log listed by more than one category"
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
        }
        self.categories.push(category);
        self
    }

    /// Category for an exact, case-sensitive file name, if any.
    pub fn classify(&self, file_name: &str) -> Option<&LogCategory> {
        self.table
            .get(file_name)
            .map(|&index| &self.categories[index])
    }

    pub fn categories(&self) -> &[LogCategory] {
        &self.categories
    }

    /// Output layout rooted at `root` with one directory per category.
    pub fn layout(&self, root: impl Into<std::path::PathBuf>) -> LogLayout {
        LogLayout::new(root, self.categories.clone())
    }
}

// ============================================================================
// CLASSIFICATION REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MovedLog {
    pub file_name: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveFailure {
    pub file_name: String,
    pub category: String,
    pub reason: String,
}

/// What a classification pass did to the log root.
#[derive(Debug, Clone, Default)]
pub struct ClassificationReport {
    pub moved: Vec<MovedLog>,
    pub uncategorized: Vec<String>,
    pub failures: Vec<MoveFailure>,
}

impl ClassificationReport {
    pub fn moved_count(&self) -> usize {
        self.moved.len()
    }

    pub fn moved_into(&self, category: &str) -> usize {
        self.moved.iter().filter(|m| m.category == category).count()
    }
}

// ============================================================================
// LOG CLASSIFIER
// ============================================================================

/// Files the logs sitting in a layout's root into their category directories.
pub struct LogClassifier {
    directories: Arc<dyn DirectoryOperations + Send + Sync>,
    policy: ClassificationPolicy,
}

impl LogClassifier {
    pub fn new(
        directories: Arc<dyn DirectoryOperations + Send + Sync>,
        policy: ClassificationPolicy,
    ) -> Self {
        Self { directories, policy }
    }

    /// Move every categorized regular file in the layout root into its
    /// category directory.
    ///
    /// Only the root's immediate entries are considered. A failed move is
    /// recorded in the report and does not stop the pass; the only error
    /// returned is failing to list the root at all.
    pub async fn classify(&self, layout: &LogLayout) -> Result<ClassificationReport, PipelineError> {
        let entries = self
            .directories
            .list_dir(layout.root())
            .await
            .map_err(|source| PipelineError::LogDirectory {
                path: layout.root().to_path_buf(),
                source,
            })?;

        let mut report = ClassificationReport::default();

        for entry in entries {
            if !entry.is_regular_file() {
                debug!(entry = %entry.name, "skipping non-file entry");
                continue;
            }

            let Some(category) = self.policy.classify(&entry.name) else {
                debug!(file = %entry.name, "leaving uncategorized log in place");
                report.uncategorized.push(entry.name);
                continue;
            };

            let destination = layout.category_dir(category).join(&entry.name);
            match self.directories.move_file(&entry.path, &destination).await {
                Ok(()) => {
                    debug!(file = %entry.name, category = %category.name(), "moved log");
                    report.moved.push(MovedLog {
                        file_name: entry.name,
                        category: category.name().to_string(),
                    });
                }
                Err(e) => {
                    warn!(
                        file = %entry.name,
                        destination = %destination.display(),
                        error = %e,
                        "could not move log"
                    );
                    report.failures.push(MoveFailure {
                        file_name: entry.name,
                        category: category.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
