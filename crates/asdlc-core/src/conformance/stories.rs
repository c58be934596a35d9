use crate::io::{markdown_files, read_lossy};
use crate::paths;
use crate::sections::{ExactMatcher, SectionMatcher};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Markers a story execution plan should contain (exact match).
pub const STORY_SECTION_MARKERS: [&str; 7] = [
    "---",
    "title:",
    "ticket:",
    "# Plano de Execução",
    "## 📝 Especificações da Story",
    "## Manifesto de Arquivos",
    "## ✅ Critérios de Aceitação",
];

pub const FRONTMATTER_DELIMITER: &str = "---";

/// A story scoring at least this many points counts as valid.
pub const STORY_VALID_THRESHOLD: f64 = 70.0;

const SECTIONS_WEIGHT: f64 = 70.0;
const FRONTMATTER_WEIGHT: f64 = 20.0;
const AGENTS_REFERENCE_WEIGHT: f64 = 10.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryCheck {
    pub file: String,
    pub sections_found: Vec<String>,
    pub has_frontmatter: bool,
    pub has_agents_reference: bool,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StoryCheck {
    pub fn is_valid(&self) -> bool {
        is_valid_score(self.score)
    }
}

pub fn is_valid_score(score: f64) -> bool {
    score >= STORY_VALID_THRESHOLD
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoriesResult {
    pub score: f64,
    pub dir_exists: bool,
    pub total_stories: usize,
    pub valid_stories: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stories: Vec<StoryCheck>,
}

/// Leading `---` plus a closing delimiter somewhere after it.
pub fn has_frontmatter(content: &str) -> bool {
    content.starts_with(FRONTMATTER_DELIMITER) && content.matches(FRONTMATTER_DELIMITER).count() >= 2
}

pub fn has_agents_reference(content: &str) -> bool {
    content.contains(".asdlc/agents/") || content.to_lowercase().contains("agente")
}

pub fn score_story(file: &str, content: &str, matcher: &impl SectionMatcher) -> StoryCheck {
    let sections_found = matcher.find(content, &STORY_SECTION_MARKERS);
    let has_frontmatter = has_frontmatter(content);
    let has_agents_reference = has_agents_reference(content);

    let mut score =
        SECTIONS_WEIGHT * sections_found.len() as f64 / STORY_SECTION_MARKERS.len() as f64;
    if has_frontmatter {
        score += FRONTMATTER_WEIGHT;
    }
    if has_agents_reference {
        score += AGENTS_REFERENCE_WEIGHT;
    }

    StoryCheck {
        file: file.to_string(),
        sections_found: sections_found.into_iter().map(str::to_string).collect(),
        has_frontmatter,
        has_agents_reference,
        score,
        error: None,
    }
}

pub fn check(root: &Path) -> StoriesResult {
    let dir = paths::stories_dir(root);
    if !dir.is_dir() {
        tracing::info!("stories: 0.0/100 (no stories directory)");
        return StoriesResult::default();
    }

    let files = match markdown_files(&dir) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!("failed to list {}: {e}", dir.display());
            return StoriesResult {
                dir_exists: true,
                ..StoriesResult::default()
            };
        }
    };

    let matcher = ExactMatcher;
    let stories: Vec<StoryCheck> = files
        .iter()
        .map(|path| {
            let file = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match read_lossy(path) {
                Ok(content) => score_story(&file, &content, &matcher),
                Err(e) => {
                    tracing::warn!("failed to read story {}: {e}", path.display());
                    StoryCheck {
                        file,
                        error: Some(e.to_string()),
                        ..StoryCheck::default()
                    }
                }
            }
        })
        .collect();

    let total_stories = stories.len();
    let valid_stories = stories.iter().filter(|s| s.is_valid()).count();
    // Pass/fail ratio over the threshold, not the mean of story scores.
    let score = super::percentage(valid_stories, total_stories);

    tracing::info!("stories: {score:.1}/100 ({valid_stories}/{total_stories} valid)");

    StoriesResult {
        score,
        dir_exists: true,
        total_stories,
        valid_stories,
        stories,
    }
}
