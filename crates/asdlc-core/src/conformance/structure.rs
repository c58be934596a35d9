use crate::paths::{REQUIRED_DIRS, REQUIRED_FILES};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    File,
    Directory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureItem {
    pub path: String,
    pub kind: ItemKind,
    pub exists: bool,
}

impl StructureItem {
    fn suggestion(&self) -> String {
        match self.kind {
            ItemKind::File => format!("create required file: {}", self.path),
            ItemKind::Directory => format!("create required directory: {}", self.path),
        }
    }

    fn fix_command(&self) -> String {
        match self.kind {
            ItemKind::File => format!("touch '{}'", self.path),
            ItemKind::Directory => format!("mkdir -p '{}'", self.path),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStructureResult {
    pub score: f64,
    pub found: usize,
    pub total: usize,
    pub items: Vec<StructureItem>,
}

impl FileStructureResult {
    pub fn missing(&self) -> impl Iterator<Item = &StructureItem> {
        self.items.iter().filter(|i| !i.exists)
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.missing().map(StructureItem::suggestion).collect()
    }

    /// Shell commands that create each missing item, in the same order as
    /// [`Self::suggestions`].
    pub fn auto_fix_commands(&self) -> Vec<String> {
        self.missing().map(StructureItem::fix_command).collect()
    }
}

/// Files first, then directories; a directory only counts when the path is
/// really a directory.
pub fn check(root: &Path) -> FileStructureResult {
    let files = REQUIRED_FILES.iter().map(|rel| StructureItem {
        path: rel.to_string(),
        kind: ItemKind::File,
        exists: root.join(rel).exists(),
    });
    let dirs = REQUIRED_DIRS.iter().map(|rel| StructureItem {
        path: rel.to_string(),
        kind: ItemKind::Directory,
        exists: root.join(rel).is_dir(),
    });
    let items: Vec<StructureItem> = files.chain(dirs).collect();

    let total = items.len();
    let found = items.iter().filter(|i| i.exists).count();
    let score = super::percentage(found, total);

    tracing::info!("file structure: {score:.1}/100 ({found}/{total} items)");

    FileStructureResult {
        score,
        found,
        total,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_dir_scores_zero_with_ten_commands() {
        let dir = TempDir::new().unwrap();
        let result = check(dir.path());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.total, 10);
        assert_eq!(result.auto_fix_commands().len(), 10);
        assert_eq!(result.suggestions().len(), 10);
        assert_eq!(result.auto_fix_commands()[0], "touch 'PROJECT_CONTEXT.md'");
        assert_eq!(result.auto_fix_commands()[6], "mkdir -p '.asdlc'");
    }

    #[test]
    fn partial_structure_lists_only_missing_items() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".asdlc/agents")).unwrap();
        std::fs::create_dir_all(dir.path().join("stories")).unwrap();
        std::fs::write(dir.path().join("PROJECT_CONTEXT.md"), "x").unwrap();

        let result = check(dir.path());
        // PROJECT_CONTEXT.md + .asdlc + .asdlc/agents + stories
        assert_eq!(result.found, 4);
        assert_eq!(result.score, 40.0);
        assert_eq!(
            result.suggestions(),
            vec![
                "create required file: .asdlc/agents/code_agent.md",
                "create required file: .asdlc/agents/test_agent.md",
                "create required file: .asdlc/agents/architecture_agent.md",
                "create required file: .asdlc/agents/requirements_agent.md",
                "create required file: .asdlc/agents/review_agent.md",
                "create required directory: prompts",
            ]
        );
        assert_eq!(
            result.auto_fix_commands().last().map(String::as_str),
            Some("mkdir -p 'prompts'")
        );
    }

    #[test]
    fn file_in_place_of_directory_is_missing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("prompts"), "not a dir").unwrap();
        let result = check(dir.path());
        let prompts = result.items.iter().find(|i| i.path == "prompts").unwrap();
        assert!(!prompts.exists);
    }
}
