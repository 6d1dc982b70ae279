use std::path::{Path, PathBuf};

// ============================================================================
// LOG CATEGORIES
// ============================================================================

/// A semantic bucket for engine logs, filed under its own subdirectory of the
/// log root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogCategory {
    name: String,
    directory: String,
}

impl LogCategory {
    pub fn new(name: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }
}

// ============================================================================
// LOG DIRECTORY LAYOUT
// ============================================================================

/// The on-disk shape of the output: a root directory holding one
/// subdirectory per category, in priority order.
#[derive(Debug, Clone)]
pub struct LogLayout {
    root: PathBuf,
    categories: Vec<LogCategory>,
}

impl LogLayout {
    pub fn new(root: impl Into<PathBuf>, categories: Vec<LogCategory>) -> Self {
        Self {
            root: root.into(),
            categories,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn categories(&self) -> &[LogCategory] {
        &self.categories
    }

    pub fn category_dir(&self, category: &LogCategory) -> PathBuf {
        self.root.join(category.directory())
    }

    /// Every category directory, in the order they should be created.
    pub fn category_dirs(&self) -> Vec<PathBuf> {
        self.categories
            .iter()
            .map(|category| self.category_dir(category))
            .collect()
    }

    /// Path of a log file sitting directly in the root.
    pub fn root_file(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_dirs_follow_priority_order() {
        let layout = LogLayout::new(
            "zeek_logs",
            vec![
                LogCategory::new("core", "core"),
                LogCategory::new("network_services", "network_services"),
                LogCategory::new("application", "application"),
            ],
        );

        assert_eq!(
            layout.category_dirs(),
            vec![
                PathBuf::from("zeek_logs/core"),
                PathBuf::from("zeek_logs/network_services"),
                PathBuf::from("zeek_logs/application"),
            ]
        );
        assert_eq!(layout.root_file("conn.log"), PathBuf::from("zeek_logs/conn.log"));
    }
}
