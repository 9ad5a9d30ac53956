//! Source file discovery for comment rewriting.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::info;
use tslint_to_eslint_core::MigrateError;
use walkdir::WalkDir;

/// Patterns searched when `--comments` is given without globs.
pub const DEFAULT_SOURCE_PATTERNS: &[&str] = &["**/*.ts", "**/*.tsx", "**/*.js", "**/*.jsx"];

/// Directories never searched.
const ALWAYS_EXCLUDED: &[&str] = &["**/node_modules/**", "**/.git/**"];

pub struct FileFinder {
    exclude_globs: Option<GlobSet>,
}

impl FileFinder {
    /// Creates a finder that skips `exclude` on top of the built-in exclusions.
    pub fn new(exclude: &[String]) -> Result<Self, MigrateError> {
        let patterns: Vec<String> = ALWAYS_EXCLUDED
            .iter()
            .map(|pattern| pattern.to_string())
            .chain(exclude.iter().cloned())
            .collect();

        Ok(Self {
            exclude_globs: Self::build_globset(&patterns)?,
        })
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, MigrateError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| MigrateError::glob(format!("Invalid glob pattern: {}", e)))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| MigrateError::glob(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Checks if a path matches an exclusion.
    pub fn should_ignore(&self, path: &Path) -> bool {
        self.exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(path))
    }

    /// Finds files under `base_dir` matching `patterns`.
    ///
    /// Patterns naming an existing file are taken as-is; everything else is a
    /// glob matched against paths relative to `base_dir`.
    pub fn discover_files(
        &self,
        patterns: &[String],
        base_dir: &Path,
    ) -> Result<Vec<PathBuf>, MigrateError> {
        let mut files = Vec::new();

        let mut glob_builder = GlobSetBuilder::new();
        let mut has_globs = false;

        for pattern in patterns {
            let path = base_dir.join(pattern);
            if path
                .symlink_metadata()
                .is_ok_and(|m| m.file_type().is_file())
            {
                if !self.should_ignore(Path::new(pattern)) {
                    files.push(path);
                }
            } else {
                let glob = Glob::new(pattern).map_err(|e| {
                    MigrateError::glob(format!("Invalid pattern '{}': {}", pattern, e))
                })?;
                glob_builder.add(glob);
                has_globs = true;
            }
        }

        if has_globs {
            let glob_set = glob_builder
                .build()
                .map_err(|e| MigrateError::glob(format!("Failed to build globset: {}", e)))?;

            for entry in WalkDir::new(base_dir).into_iter().filter_map(|e| e.ok()) {
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                let relative = path.strip_prefix(base_dir).unwrap_or(path);
                if glob_set.is_match(relative) && !self.should_ignore(relative) {
                    files.push(path.to_path_buf());
                }
            }
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files to rewrite", files.len());
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn test_build_globset_invalid_pattern() {
        let result = FileFinder::build_globset(&patterns(&["[invalid"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_discover_files_skips_node_modules() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::write(dir.path().join("src/app.ts"), "").unwrap();
        fs::write(dir.path().join("src/readme.md"), "").unwrap();
        fs::write(dir.path().join("node_modules/pkg/index.ts"), "").unwrap();

        let finder = FileFinder::new(&[]).unwrap();
        let files = finder
            .discover_files(&patterns(&["**/*.ts"]), dir.path())
            .unwrap();

        assert_eq!(files, vec![dir.path().join("src/app.ts")]);
    }

    #[test]
    fn test_discover_files_with_exclude() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/app.ts"), "").unwrap();
        fs::write(dir.path().join("src/types.d.ts"), "").unwrap();

        let finder = FileFinder::new(&patterns(&["**/*.d.ts"])).unwrap();
        let files = finder
            .discover_files(&patterns(&["src/*.ts"]), dir.path())
            .unwrap();

        assert_eq!(files, vec![dir.path().join("src/app.ts")]);
    }

    #[test]
    fn test_discover_explicit_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.ts"), "").unwrap();

        let finder = FileFinder::new(&[]).unwrap();
        let files = finder
            .discover_files(&patterns(&["index.ts", "index.ts"]), dir.path())
            .unwrap();

        assert_eq!(files, vec![dir.path().join("index.ts")]);
    }
}
