//! Writing generated files to disk
//!
//! With atomic writes enabled the content goes to a temporary file in the
//! destination directory, which is then renamed over the target. A failed
//! write leaves any previous output untouched.

use rulegen_core::{RulegenError, RulegenResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::GeneratedFile;

/// Write `file` below `base_dir`, creating parent directories.
///
/// Returns the full path written.
pub fn write_file(base_dir: &Path, file: &GeneratedFile, atomic: bool) -> RulegenResult<PathBuf> {
    let full_path = base_dir.join(&file.path);
    let parent = full_path
        .parent()
        .ok_or_else(|| RulegenError::InvalidOutputPath(full_path.clone()))?;

    std::fs::create_dir_all(parent).map_err(|e| RulegenError::DirectoryCreate {
        path: parent.to_path_buf(),
        message: e.to_string(),
    })?;

    let write_error = |e: std::io::Error| RulegenError::FileWrite {
        path: full_path.clone(),
        message: e.to_string(),
    };

    if atomic {
        let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;
        temp.write_all(file.content.as_bytes()).map_err(write_error)?;
        temp.as_file().sync_all().map_err(write_error)?;
        temp.persist(&full_path).map_err(|e| write_error(e.error))?;
    } else {
        std::fs::write(&full_path, &file.content).map_err(write_error)?;
    }

    Ok(full_path)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileType;
    use tempfile::TempDir;

    fn sample(content: &str) -> GeneratedFile {
        GeneratedFile::new(
            PathBuf::from("User").join("UserRequest.php"),
            content,
            FileType::Php,
            "users",
        )
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_atomic_write_creates_dirs_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), &sample("<?php first"), true).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<?php first");
        assert_eq!(entries(&dir.path().join("User")), vec!["UserRequest.php"]);
    }

    #[test]
    fn test_atomic_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), &sample("old"), true).unwrap();
        let path = write_file(dir.path(), &sample("new"), true).unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "new");
        assert_eq!(entries(&dir.path().join("User")), vec!["UserRequest.php"]);
    }

    #[test]
    fn test_direct_write() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), &sample("direct"), false).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "direct");
    }

    #[test]
    fn test_unwritable_destination_reports_directory_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("User");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = write_file(dir.path(), &sample("x"), true).unwrap_err();
        assert!(matches!(err, RulegenError::DirectoryCreate { .. }));
        assert!(err.is_io());
        assert_eq!(std::fs::read_to_string(blocker).unwrap(), "not a directory");
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_atomic_write_keeps_previous_output() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), &sample("<?php previous"), true).unwrap();
        let user_dir = dir.path().join("User");
        std::fs::set_permissions(&user_dir, std::fs::Permissions::from_mode(0o555)).unwrap();

        // Directory permissions do not bind privileged users
        let enforced = NamedTempFile::new_in(&user_dir).is_err();
        let result = write_file(dir.path(), &sample("<?php next"), true);
        std::fs::set_permissions(&user_dir, std::fs::Permissions::from_mode(0o755)).unwrap();
        if !enforced {
            return;
        }

        assert!(matches!(result, Err(RulegenError::FileWrite { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<?php previous");
        assert_eq!(entries(&user_dir), vec!["UserRequest.php"]);
    }
}
