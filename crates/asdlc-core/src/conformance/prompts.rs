use crate::paths::{self, PROMPT_FILES};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptCheck {
    pub file: String,
    pub exists: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptsResult {
    pub score: f64,
    pub dir_exists: bool,
    pub found: usize,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prompts: Vec<PromptCheck>,
}

pub fn check(root: &Path) -> PromptsResult {
    let total = PROMPT_FILES.len();
    if !paths::prompts_dir(root).is_dir() {
        tracing::info!("prompts: 0.0/100 (no prompts directory)");
        return PromptsResult {
            total,
            ..PromptsResult::default()
        };
    }

    let prompts: Vec<PromptCheck> = PROMPT_FILES
        .iter()
        .map(|&file| PromptCheck {
            file: file.to_string(),
            exists: paths::prompt_path(root, file).exists(),
        })
        .collect();
    let found = prompts.iter().filter(|p| p.exists).count();
    let score = super::percentage(found, total);

    tracing::info!("prompts: {score:.1}/100 ({found}/{total} found)");

    PromptsResult {
        score,
        dir_exists: true,
        found,
        total,
        prompts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_dir_scores_zero() {
        let dir = TempDir::new().unwrap();
        let result = check(dir.path());
        assert!(!result.dir_exists);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.total, 5);
    }

    #[test]
    fn counts_present_prompts() {
        let dir = TempDir::new().unwrap();
        let prompts = dir.path().join("prompts");
        std::fs::create_dir_all(&prompts).unwrap();
        std::fs::write(prompts.join("README.md"), "").unwrap();
        std::fs::write(prompts.join("story_generator.md"), "").unwrap();

        let result = check(dir.path());
        assert_eq!(result.found, 2);
        assert_eq!(result.score, 40.0);
        assert!(result.prompts.iter().any(|p| p.file == "README.md" && p.exists));
    }
}
