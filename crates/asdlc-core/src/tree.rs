//! Plain-text listing of a project's files, embedded in plan prompts so the
//! model sees what already exists.

use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
pub const SKIPPED_DIRS: [&str; 5] = [".git", "target", "node_modules", "__pycache__", "venv"];

const INDENT: &str = "    ";

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && SKIPPED_DIRS.iter().any(|d| entry.file_name() == *d)
}

/// One line per entry below `root`, sorted by path:
/// `<4 spaces per depth>└── <📁|📄> <name>`.
pub fn project_structure(root: &Path) -> String {
    let mut lines = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("tree walk: {e}");
                continue;
            }
        };
        let marker = if entry.file_type().is_dir() { "📁" } else { "📄" };
        lines.push(format!(
            "{}└── {marker} {}",
            INDENT.repeat(entry.depth() - 1),
            entry.file_name().to_string_lossy()
        ));
    }
    lines.join("\n")
}
