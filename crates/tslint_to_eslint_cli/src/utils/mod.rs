//! CLI utility functions

use std::fs;
use std::path::Path;

use miette::{IntoDiagnostic, Result};

/// Writes `content` to `path`, refusing to follow a symbolic link.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink()) {
        return Err(miette::miette!(
            "Refusing to write file because it is a symbolic link: {}",
            path.display()
        ));
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(path, content).into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_file_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config/.eslintrc.json");

        write_file(&path, "{}\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_file_refuses_symlink() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        let link = dir.path().join(".eslintrc.json");
        fs::write(&target, "Important Data").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(write_file(&link, "{}").is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "Important Data");
    }
}
