use std::fs;
use std::io;
use std::path::Path;

/// Creates the parent directory of `path` if it does not exist yet.
/// Returns `true` if a directory was created.
pub fn ensure_parent_dir_exists(path: &Path) -> io::Result<bool> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Directory a temporary sibling of `path` should be created in.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// File size in whole KiB, `None` if the file cannot be inspected.
pub fn file_size_kib(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().map(|metadata| metadata.len() / 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("data.csv")), Path::new("."));
        assert_eq!(parent_dir(Path::new("out/data.csv")), Path::new("out"));
    }

    #[test]
    fn test_ensure_parent_dir_exists() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("file.json");
        assert!(ensure_parent_dir_exists(&nested).unwrap());
        assert!(nested.parent().unwrap().is_dir());
        assert!(!ensure_parent_dir_exists(&nested).unwrap());
    }

    #[test]
    fn test_file_size_kib() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob");
        fs::write(&path, vec![0u8; 3 * 1024 + 100]).unwrap();
        assert_eq!(file_size_kib(&path), Some(3));
        assert_eq!(file_size_kib(&dir.path().join("missing")), None);
    }
}
