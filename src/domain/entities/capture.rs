use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

// ============================================================================
// CAPTURE FILE
// ============================================================================

/// An existing, readable capture file addressed by an absolute path.
///
/// Construction performs the precondition checks that must pass before any
/// pipeline touches the filesystem, so holding a `CaptureFile` means nothing
/// has been created yet and the input is known to be usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureFile {
    path: PathBuf,
}

impl CaptureFile {
    /// Resolve `path` against the current directory and verify it is a
    /// readable regular file.
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|source| PipelineError::PathResolution {
                    path: path.to_path_buf(),
                    source,
                })?
                .join(path)
        };

        let metadata = match absolute.metadata() {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PipelineError::MissingCapture(absolute));
            }
            Err(source) => {
                return Err(PipelineError::PathResolution { path: absolute, source });
            }
        };

        if !metadata.is_file() {
            return Err(PipelineError::PathResolution {
                path: absolute,
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        // Present is not enough, it must open for reading.
        File::open(&absolute).map_err(|source| PipelineError::PathResolution {
            path: absolute.clone(),
            source,
        })?;

        Ok(Self { path: absolute })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_existing_file() -> crate::Result<()> {
        let temp_dir = TempDir::new()?;
        let capture_path = temp_dir.path().join("trace.pcap");
        std::fs::write(&capture_path, b"not really a pcap")?;

        let capture = CaptureFile::resolve(&capture_path)?;
        assert!(capture.path().is_absolute());
        assert_eq!(capture.path().file_name().unwrap(), "trace.pcap");
        Ok(())
    }

    #[test]
    fn test_missing_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.pcap");

        match CaptureFile::resolve(&missing) {
            Err(PipelineError::MissingCapture(path)) => assert_eq!(path, missing),
            other => panic!("expected MissingCapture, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();

        let result = CaptureFile::resolve(temp_dir.path());
        assert!(matches!(result, Err(PipelineError::PathResolution { .. })));
    }
}
