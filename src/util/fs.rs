//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Copy a single file, overwriting the destination if it already exists.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    fs::copy(src, dst)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))
}

/// List the files in `dir` whose names match `pattern`, sorted.
///
/// The pattern is applied to file names only, so directories whose
/// paths contain glob metacharacters are scanned safely. The scan is
/// non-recursive: artifact directories are flat, and descending into
/// subdirectories would pick up helper files (cmake modules,
/// pkg-config data) that happen to match.
pub fn matching_files(dir: &Path, pattern: &Pattern) -> io::Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if pattern.matches(&entry.file_name().to_string_lossy()) {
            results.push(entry.path());
        }
    }

    results.sort();
    Ok(results)
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_matching_files_by_name() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("libfmt.so"), "").unwrap();
        fs::write(lib.join("libfmt.so.9.1.0"), "").unwrap();
        fs::write(lib.join("libfmt.a"), "").unwrap();
        fs::create_dir_all(lib.join("cmake")).unwrap();

        let pattern = Pattern::new("*.so*").unwrap();
        let files = matching_files(&lib, &pattern).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["libfmt.so", "libfmt.so.9.1.0"]);
    }

    #[test]
    fn test_matching_files_ignores_subdirectories() {
        let tmp = TempDir::new().unwrap();
        let bin = tmp.path().join("bin");
        fs::create_dir_all(bin.join("nested")).unwrap();
        fs::write(bin.join("nested").join("inner.dll"), "").unwrap();
        fs::write(bin.join("fmt.dll"), "").unwrap();

        let pattern = Pattern::new("*.dll").unwrap();
        let files = matching_files(&bin, &pattern).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("fmt.dll"));
    }

    #[test]
    fn test_copy_file_overwrites() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("new.dll");
        let dst = tmp.path().join("old.dll");
        fs::write(&src, "new contents").unwrap();
        fs::write(&dst, "stale").unwrap();

        copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new contents");
    }

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a").join("b").join("file.toml");

        write_string(&path, "contents").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "contents");
    }

    #[test]
    fn test_remove_dir_all_if_exists_missing_is_ok() {
        let tmp = TempDir::new().unwrap();
        remove_dir_all_if_exists(&tmp.path().join("absent")).unwrap();
    }
}
