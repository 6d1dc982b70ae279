use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use crate::domain::ports::file_system::*;

// ============================================================================
// DIRECTORY OPERATIONS
// ============================================================================

/// Concrete implementation for directory management
pub struct TokioDirectoryManager;

#[async_trait]
impl DirectoryOperations for TokioDirectoryManager {
    async fn create_dir_all(&self, path: &Path) -> crate::Result<()> {
        fs::create_dir_all(path).await?;
        Ok(())
    }

    async fn list_dir(&self, path: &Path) -> crate::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(path).await?;

        while let Some(entry) = dir.next_entry().await? {
            // Does not follow symlinks, so a link to a log is not a log
            let metadata = entry.metadata().await;
            let name = entry.file_name().to_string_lossy().to_string();

            if let Some(described) = describe_entry(entry.path(), name, metadata) {
                entries.push(described);
            }
        }

        // read_dir order is platform dependent
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn move_file(&self, source: &Path, destination: &Path) -> crate::Result<()> {
        // Plain rename: the destination directory must already exist
        fs::rename(source, destination).await?;
        Ok(())
    }
}

// An entry can vanish between read_dir and stat; skip it rather than fail the listing
fn describe_entry(path: PathBuf, name: String, metadata: io::Result<Metadata>) -> Option<DirEntry> {
    let metadata = match metadata {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable directory entry");
            return None;
        }
    };

    let file_type = if metadata.is_file() {
        FileType::RegularFile
    } else if metadata.is_dir() {
        FileType::Directory
    } else if metadata.is_symlink() {
        FileType::SymbolicLink
    } else {
        FileType::Other
    };

    Some(DirEntry {
        path,
        name,
        file_type,
        size: if metadata.is_file() { Some(metadata.len()) } else { None },
    })
}

impl TokioDirectoryManager {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokioDirectoryManager {
    fn default() -> Self {
        Self::new()
    }
}
