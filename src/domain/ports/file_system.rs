use std::path::Path;
use std::path::PathBuf;
use async_trait::async_trait;

// ============================================================================
// FILE SYSTEM PORTS
// ============================================================================

/// Port for directory operations
/// Abstracts away the actual file system implementation
#[async_trait]
pub trait DirectoryOperations {
    /// Create directory and all parent directories; an existing directory is not an error
    async fn create_dir_all(&self, path: &Path) -> crate::Result<()>;

    /// List the immediate entries of a directory (non-recursive).
    ///
    /// Fails only if the directory itself cannot be read; an entry whose
    /// metadata cannot be read is left out.
    async fn list_dir(&self, path: &Path) -> crate::Result<Vec<DirEntry>>;

    /// Move/rename a file within the same filesystem
    async fn move_file(&self, source: &Path, destination: &Path) -> crate::Result<()>;
}

// ============================================================================
// SUPPORTING TYPES
// ============================================================================

/// Type of file system entry
#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    RegularFile,
    Directory,
    SymbolicLink,
    Other,
}

/// Directory entry information
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
    pub size: Option<u64>,
}

impl DirEntry {
    pub fn is_regular_file(&self) -> bool {
        self.file_type == FileType::RegularFile
    }
}
