//! Migration file discovery
//!
//! Enumerates the migration sources directly inside a directory.

use rulegen_core::{RulegenError, RulegenResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default migration file extension
pub const DEFAULT_EXTENSION: &str = "php";

/// Locates migration files in a single directory.
#[derive(Debug, Clone)]
pub struct MigrationLocator {
    dir: PathBuf,
    extension: String,
}

impl MigrationLocator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Only yield files with this extension (without the dot)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lazily iterate matching files, ordered by file name.
    ///
    /// Fails up front if the directory does not exist; errors on individual
    /// entries are yielded as items.
    pub fn files(&self) -> RulegenResult<impl Iterator<Item = RulegenResult<PathBuf>> + '_> {
        if !self.dir.is_dir() {
            return Err(RulegenError::MigrationsDirNotFound(self.dir.clone()));
        }

        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter();

        Ok(walker.filter_map(move |entry| match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && self.matches(entry.path()) {
                    Some(Ok(entry.into_path()))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(RulegenError::FileRead {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| self.dir.clone()),
                message: e.to_string(),
            })),
        }))
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(locator: &MigrationLocator) -> Vec<String> {
        locator
            .files()
            .unwrap()
            .map(|p| p.unwrap().file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_empty_directory_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(names(&MigrationLocator::new(dir.path())).is_empty());
    }

    #[test]
    fn test_filters_by_extension_and_sorts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("2024_02_01_create_posts.php"), "").unwrap();
        std::fs::write(dir.path().join("2024_01_01_create_users.php"), "").unwrap();
        std::fs::write(dir.path().join("README.md"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested.php")).unwrap();
        std::fs::write(dir.path().join("nested.php").join("inner.php"), "").unwrap();

        assert_eq!(
            names(&MigrationLocator::new(dir.path())),
            vec!["2024_01_01_create_users.php", "2024_02_01_create_posts.php"]
        );
    }

    #[test]
    fn test_custom_extension() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.php"), "").unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();

        let locator = MigrationLocator::new(dir.path()).with_extension(".txt");
        assert_eq!(names(&locator), vec!["b.txt"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let locator = MigrationLocator::new("/nonexistent/migrations");
        let result = locator.files();
        assert!(matches!(
            result.err(),
            Some(RulegenError::MigrationsDirNotFound(_))
        ));
    }
}
