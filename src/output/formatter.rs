use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::generator::GeneratedFile;

/// Recursively remove the output root left over from a previous run. Errors are ignored.
pub fn clear_output_root(output_root: &Path) {
    if output_root.exists() {
        info!(root = %output_root.display(), "clearing previous output");
        let _ = std::fs::remove_dir_all(output_root);
    }
}

/// Write generated files below `output_root`, creating directories as needed.
///
/// Returns the written paths (root-joined) in input order.
pub fn write_files(output_root: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        validate_relative_path(&file.path)?;
        let target = output_root.join(&file.path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|source| Error::WriteOutput {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&target, &file.contents).map_err(|source| Error::WriteOutput {
            path: target.clone(),
            source,
        })?;
        debug!(path = %target.display(), bytes = file.contents.len(), "wrote file");
        written.push(target);
    }
    Ok(written)
}

fn validate_relative_path(path: &Path) -> Result<()> {
    let invalid = |reason| Error::InvalidOutputPath {
        path: path.to_path_buf(),
        reason,
    };
    if path.as_os_str().is_empty() {
        return Err(invalid("path must not be empty"));
    }
    if path.is_absolute() {
        return Err(invalid("absolute paths are not allowed"));
    }
    if path.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    }) {
        return Err(invalid("traversal segments are not allowed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_path(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!("{prefix}_{nanos}"))
    }

    #[test]
    fn write_files_reports_directory_creation_errors() {
        let path = unique_path("sql2crud_formatter_file");
        std::fs::write(&path, "not a directory").expect("should create marker file");

        let err = write_files(&path, &[GeneratedFile::new("api/x.ts", "x")])
            .expect_err("directory creation should fail");
        assert!(matches!(err, Error::WriteOutput { .. }));
    }

    #[test]
    fn write_files_rejects_unsafe_paths() {
        let dir = unique_path("sql2crud_formatter_dir");

        let err = write_files(&dir, &[GeneratedFile::new("../escape.ts", "x")])
            .expect_err("path traversal should fail validation");
        assert!(err.to_string().contains("invalid output path"));

        let absolute = std::env::temp_dir().join("absolute.ts");
        let err = write_files(&dir, &[GeneratedFile::new(absolute, "x")])
            .expect_err("absolute path should fail validation");
        assert!(matches!(err, Error::InvalidOutputPath { .. }));

        let err = write_files(&dir, &[GeneratedFile::new("", "x")])
            .expect_err("empty path should fail validation");
        assert!(matches!(err, Error::InvalidOutputPath { .. }));
    }

    #[test]
    fn write_files_creates_nested_directories() {
        let dir = unique_path("sql2crud_formatter_ok");
        let files = vec![
            GeneratedFile::new("www/person-list/person-list.component.ts", "list"),
            GeneratedFile::new("sql/public.person_get.sql", "get"),
        ];

        let written = write_files(&dir, &files).expect("write_files should succeed");
        assert_eq!(written.len(), 2);

        let list = std::fs::read_to_string(dir.join("www/person-list/person-list.component.ts"))
            .expect("list component should exist");
        assert_eq!(list, "list");
    }

    #[test]
    fn clear_output_root_removes_stale_files_and_ignores_missing_root() {
        let dir = unique_path("sql2crud_formatter_clear");
        clear_output_root(&dir);

        std::fs::create_dir_all(dir.join("api")).expect("should create temp tree");
        std::fs::write(dir.join("api/stale.ts"), "old").expect("should write stale file");
        clear_output_root(&dir);
        assert!(!dir.exists());
    }
}
