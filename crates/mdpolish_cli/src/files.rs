//! Input file discovery.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info};
use walkdir::WalkDir;

/// File extensions picked up when a directory is given.
const MARKDOWN_EXTENSIONS: [&str; 3] = ["md", "markdown", "mdx"];

/// Directories never descended into.
const SKIPPED_DIRS: [&str; 3] = [".git", "node_modules", "target"];

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum FindError {
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("No Markdown files matched: {}", .0.join(", "))]
    NoMatches(Vec<String>),
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn walk(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIPPED_DIRS.contains(&name))
        })
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}

fn build_globset(patterns: &[&String]) -> Result<GlobSet, FindError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| FindError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| FindError::InvalidPattern {
        pattern: patterns
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        source,
    })
}

/// Resolves files, directories and glob patterns relative to `base_dir`.
///
/// Explicit files are taken as given. Directories contribute their Markdown
/// files. Globs are matched against paths relative to `base_dir`.
pub fn discover_files(patterns: &[String], base_dir: &Path) -> Result<Vec<PathBuf>, FindError> {
    let mut files = Vec::new();
    let mut globs = Vec::new();

    for pattern in patterns {
        let path = base_dir.join(pattern);
        if path.is_file() {
            files.push(path);
        } else if path.is_dir() {
            files.extend(walk(&path).filter(|p| is_markdown(p)));
        } else {
            globs.push(pattern);
        }
    }

    if !globs.is_empty() {
        let glob_set = build_globset(&globs)?;
        for path in walk(base_dir) {
            let relative = path.strip_prefix(base_dir).unwrap_or(&path);
            if glob_set.is_match(relative) {
                debug!("Matched {}", relative.display());
                files.push(path);
            }
        }
    }

    files.sort();
    files.dedup();

    if files.is_empty() {
        return Err(FindError::NoMatches(patterns.to_vec()));
    }

    info!("Discovered {} files", files.len());
    Ok(files)
}

/// Returns `path` relative to `base_dir` for display.
pub fn display_path(path: &Path, base_dir: &Path) -> String {
    path.strip_prefix(base_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
