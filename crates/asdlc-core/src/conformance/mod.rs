//! Conformance validation of an A-SDLC project tree.
//!
//! Five independent checks each return their own immutable result:
//!
//! ```text
//! structure ─┐
//! agents    ─┤
//! stories   ─┼─► CategoryResults ─► overall score ─► headline ─► ValidationReport
//! context   ─┤
//! prompts   ─┘
//! ```
//!
//! The overall score is the unweighted mean of the five category scores.
//! Nothing is shared between checks, so independent projects can be validated
//! side by side.

pub mod agents;
pub mod context;
pub mod prompts;
pub mod render;
pub mod stories;
pub mod structure;

pub use agents::{AgentCheck, AgentsResult};
pub use context::ProjectContextResult;
pub use prompts::{PromptCheck, PromptsResult};
pub use render::ReportFormat;
pub use stories::{StoriesResult, StoryCheck};
pub use structure::{FileStructureResult, ItemKind, StructureItem};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A category (and the project as a whole) passes at this score.
pub const PASS_THRESHOLD: f64 = 80.0;

pub(crate) fn percentage(found: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    found as f64 * 100.0 / total as f64
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FileStructure,
    Agents,
    Stories,
    ProjectContext,
    Prompts,
}

impl Category {
    /// Evaluation order.
    pub fn all() -> &'static [Category] {
        &[
            Category::FileStructure,
            Category::Agents,
            Category::Stories,
            Category::ProjectContext,
            Category::Prompts,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::FileStructure => "file_structure",
            Category::Agents => "agents",
            Category::Stories => "stories",
            Category::ProjectContext => "project_context",
            Category::Prompts => "prompts",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::FileStructure => "File Structure",
            Category::Agents => "Agents",
            Category::Stories => "Stories",
            Category::ProjectContext => "PROJECT_CONTEXT",
            Category::Prompts => "Prompts",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CategoryResults
// ---------------------------------------------------------------------------

/// Field order is evaluation order; serialization keeps it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResults {
    pub file_structure: FileStructureResult,
    pub agents: AgentsResult,
    pub stories: StoriesResult,
    pub project_context: ProjectContextResult,
    pub prompts: PromptsResult,
}

impl CategoryResults {
    pub fn score(&self, category: Category) -> f64 {
        match category {
            Category::FileStructure => self.file_structure.score,
            Category::Agents => self.agents.score,
            Category::Stories => self.stories.score,
            Category::ProjectContext => self.project_context.score,
            Category::Prompts => self.prompts.score,
        }
    }

    pub fn scores(&self) -> Vec<(Category, f64)> {
        Category::all()
            .iter()
            .map(|&c| (c, self.score(c)))
            .collect()
    }

    pub fn mean(&self) -> f64 {
        let scores = self.scores();
        scores.iter().map(|(_, s)| s).sum::<f64>() / scores.len() as f64
    }
}

// ---------------------------------------------------------------------------
// Headline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Headline {
    Critical,
    Warning,
    Good,
    Excellent,
}

impl Headline {
    pub fn for_score(score: f64) -> Self {
        if score < 50.0 {
            Headline::Critical
        } else if score < 70.0 {
            Headline::Warning
        } else if score < 90.0 {
            Headline::Good
        } else {
            Headline::Excellent
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Headline::Critical => "CRITICAL: project requires full restructuring to follow A-SDLC",
            Headline::Warning => "WARNING: project is partially compliant and needs improvement",
            Headline::Good => "GOOD: project is nearly compliant, minor adjustments needed",
            Headline::Excellent => "EXCELLENT: project is fully compliant with A-SDLC",
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub project_name: String,
    pub timestamp: String,
    pub overall_score: f64,
    pub categories: CategoryResults,
    pub suggestions: Vec<String>,
    pub auto_fix_commands: Vec<String>,
}

impl ValidationReport {
    /// Assemble a report from the five category results.
    pub fn assemble(
        project_name: impl Into<String>,
        timestamp: impl Into<String>,
        categories: CategoryResults,
    ) -> Self {
        let overall_score = categories.mean();

        let mut suggestions = vec![Headline::for_score(overall_score).message().to_string()];
        suggestions.extend(categories.file_structure.suggestions());
        suggestions.extend(categories.agents.suggestions());
        suggestions.extend(categories.project_context.suggestions());

        let auto_fix_commands = categories.file_structure.auto_fix_commands();

        Self {
            project_name: project_name.into(),
            timestamp: timestamp.into(),
            overall_score,
            categories,
            suggestions,
            auto_fix_commands,
        }
    }

    pub fn passed(&self) -> bool {
        passes(self.overall_score)
    }

    pub fn exit_code(&self) -> i32 {
        exit_code_for(self.overall_score)
    }
}

pub fn passes(score: f64) -> bool {
    score >= PASS_THRESHOLD
}

/// 0 when the score passes, 1 otherwise. A low score is not an error.
pub fn exit_code_for(score: f64) -> i32 {
    if passes(score) {
        0
    } else {
        1
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validate the project at `root`, stamping the report with the current time.
pub fn validate_project(root: &Path) -> ValidationReport {
    validate_project_at(root, chrono::Utc::now().to_rfc3339())
}

pub fn validate_project_at(root: &Path, timestamp: impl Into<String>) -> ValidationReport {
    let project_name = project_name(root);
    tracing::info!("validating A-SDLC conformance for: {project_name}");

    let categories = CategoryResults {
        file_structure: structure::check(root),
        agents: agents::check(root),
        stories: stories::check(root),
        project_context: context::check(root),
        prompts: prompts::check(root),
    };

    let report = ValidationReport::assemble(project_name, timestamp, categories);
    tracing::info!("validation finished: {:.1}/100", report.overall_score);
    report
}

/// Basename of the validated directory, resolving `.` and friends first.
fn project_name(root: &Path) -> String {
    let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.display().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conformance::context::CONTEXT_SECTION_HEADERS;
    use tempfile::TempDir;

    const AGENT_BODY: &str = "# 🤖 Agent\n\n## 📋 Visão Geral\nPersona: a careful senior engineer.\n\n## 🎯 Responsabilidades Principais\n- follow the execution plan exactly\n- keep changes small and reviewed\n";

    const STORY_BODY: &str = "---\ntitle: \"Login\"\nticket: \"t-1\"\n---\n\n# Plano de Execução: Login\n\n## 📝 Especificações da Story\nx\n\n## Manifesto de Arquivos\n- app.py\n\n## ✅ Critérios de Aceitação\n- [ ] ok\n\nUse `.asdlc/agents/code_agent.md`.\n";

    fn conformant_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for d in crate::paths::REQUIRED_DIRS {
            std::fs::create_dir_all(root.join(d)).unwrap();
        }
        for agent in crate::paths::AGENT_FILES {
            std::fs::write(crate::paths::agent_path(root, agent), AGENT_BODY).unwrap();
        }
        for prompt in crate::paths::PROMPT_FILES {
            std::fs::write(crate::paths::prompt_path(root, prompt), "# prompt").unwrap();
        }
        std::fs::write(
            crate::paths::project_context_path(root),
            CONTEXT_SECTION_HEADERS.join("\n\n"),
        )
        .unwrap();
        std::fs::write(root.join("stories/001_login.md"), STORY_BODY).unwrap();
        dir
    }

    #[test]
    fn empty_directory_scores_zero_everywhere() {
        let dir = TempDir::new().unwrap();
        let report = validate_project(dir.path());
        for (category, score) in report.categories.scores() {
            assert_eq!(score, 0.0, "{category} should be 0");
        }
        assert_eq!(report.overall_score, 0.0);
        assert_eq!(report.suggestions[0], Headline::Critical.message());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn conformant_project_scores_100() {
        let dir = conformant_project();
        let report = validate_project(dir.path());
        for (category, score) in report.categories.scores() {
            assert_eq!(score, 100.0, "{category} should be 100");
        }
        assert_eq!(report.overall_score, 100.0);
        assert_eq!(report.suggestions, vec![Headline::Excellent.message()]);
        assert!(report.auto_fix_commands.is_empty());
        assert!(report.passed());
    }

    #[test]
    fn validation_is_deterministic() {
        let dir = conformant_project();
        std::fs::remove_file(dir.path().join("prompts/README.md")).unwrap();
        std::fs::write(dir.path().join("stories/002_note.md"), "draft").unwrap();

        let a = validate_project_at(dir.path(), "t0");
        let b = validate_project_at(dir.path(), "t1");
        assert_eq!(a.categories.scores(), b.categories.scores());
        assert_eq!(a.overall_score, b.overall_score);
        assert_eq!(a.suggestions, b.suggestions);
        assert_eq!(a.auto_fix_commands, b.auto_fix_commands);
    }

    #[test]
    fn scores_stay_within_bounds() {
        for dir in [TempDir::new().unwrap(), conformant_project()] {
            let report = validate_project(dir.path());
            for (_, score) in report.categories.scores() {
                assert!((0.0..=100.0).contains(&score));
            }
            assert!((0.0..=100.0).contains(&report.overall_score));
        }
    }

    #[test]
    fn missing_items_map_to_commands_in_check_order() {
        let dir = conformant_project();
        std::fs::remove_file(dir.path().join(".asdlc/agents/test_agent.md")).unwrap();
        std::fs::remove_dir_all(dir.path().join("prompts")).unwrap();
        std::fs::remove_file(dir.path().join("PROJECT_CONTEXT.md")).unwrap();

        let report = validate_project(dir.path());
        assert_eq!(
            report.auto_fix_commands,
            vec![
                "touch 'PROJECT_CONTEXT.md'",
                "touch '.asdlc/agents/test_agent.md'",
                "mkdir -p 'prompts'",
            ]
        );
    }

    #[test]
    fn headline_is_always_first() {
        let dir = conformant_project();
        std::fs::remove_file(dir.path().join("PROJECT_CONTEXT.md")).unwrap();
        let report = validate_project(dir.path());
        // structure 90, agents 100, stories 100, context 0, prompts 100 → 78
        assert!((report.overall_score - 78.0).abs() < 1e-9);
        assert_eq!(report.suggestions[0], Headline::Good.message());
        assert_eq!(
            &report.suggestions[1..],
            &[
                "create required file: PROJECT_CONTEXT.md".to_string(),
                "create PROJECT_CONTEXT.md at the project root".to_string(),
            ]
        );
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn headline_brackets() {
        assert_eq!(Headline::for_score(0.0), Headline::Critical);
        assert_eq!(Headline::for_score(49.9), Headline::Critical);
        assert_eq!(Headline::for_score(50.0), Headline::Warning);
        assert_eq!(Headline::for_score(69.9), Headline::Warning);
        assert_eq!(Headline::for_score(70.0), Headline::Good);
        assert_eq!(Headline::for_score(89.9), Headline::Good);
        assert_eq!(Headline::for_score(90.0), Headline::Excellent);
        assert_eq!(Headline::for_score(100.0), Headline::Excellent);
    }

    #[test]
    fn exit_code_boundary() {
        assert_eq!(exit_code_for(79.9), 1);
        assert_eq!(exit_code_for(80.0), 0);
        assert_eq!(exit_code_for(100.0), 0);
    }

    #[test]
    fn project_name_is_directory_basename() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("my-service");
        std::fs::create_dir_all(&project).unwrap();
        let report = validate_project(&project);
        assert_eq!(report.project_name, "my-service");
    }

    #[test]
    fn json_keys_follow_evaluation_order() {
        let dir = TempDir::new().unwrap();
        let report = validate_project(dir.path());
        let json = serde_json::to_string(&report).unwrap();
        let positions: Vec<usize> = Category::all()
            .iter()
            .map(|c| json.find(&format!("\"{}\":", c.as_str())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
