use crate::io::read_lossy;
use crate::paths::{self, AGENTS_DIR, AGENT_FILES};
use crate::sections::{CaseInsensitiveMatcher, SectionMatcher};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Markers every agent definition should carry (matched case-insensitively).
pub const AGENT_SECTION_MARKERS: [&str; 5] = [
    "# 🤖",
    "## 📋 Visão Geral",
    "## 🎯 Responsabilidades Principais",
    "Persona",
    "Agent",
];

/// Trimmed content must be longer than this many characters to count as
/// substantive.
pub const MIN_AGENT_CONTENT_CHARS: usize = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentCheck {
    pub file: String,
    pub exists: bool,
    pub has_content: bool,
    pub has_persona: bool,
    pub sections_found: Vec<String>,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsResult {
    pub score: f64,
    pub agents: Vec<AgentCheck>,
}

impl AgentsResult {
    pub fn suggestions(&self) -> Vec<String> {
        self.agents
            .iter()
            .filter(|a| !a.exists)
            .map(|a| format!("create agent definition: {AGENTS_DIR}/{}", a.file))
            .collect()
    }
}

/// Score a single agent definition from its text.
///
/// Four equally weighted signals: the file exists, it has substantive
/// content, it mentions a persona, and the fraction of section markers found.
pub fn score_agent(file: &str, content: &str, matcher: &impl SectionMatcher) -> AgentCheck {
    let has_content = content.trim().chars().count() > MIN_AGENT_CONTENT_CHARS;
    let has_persona = content.to_lowercase().contains("persona");
    let sections_found = matcher.find(content, &AGENT_SECTION_MARKERS);
    let sections_fraction = sections_found.len() as f64 / AGENT_SECTION_MARKERS.len() as f64;

    let score = (1.0 + flag(has_content) + flag(has_persona) + sections_fraction) / 4.0 * 100.0;

    AgentCheck {
        file: file.to_string(),
        exists: true,
        has_content,
        has_persona,
        sections_found: sections_found.into_iter().map(str::to_string).collect(),
        score,
        error: None,
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

pub fn check(root: &Path) -> AgentsResult {
    let matcher = CaseInsensitiveMatcher;
    let agents: Vec<AgentCheck> = AGENT_FILES
        .iter()
        .map(|&file| {
            let path = paths::agent_path(root, file);
            if !path.exists() {
                return AgentCheck {
                    file: file.to_string(),
                    ..AgentCheck::default()
                };
            }
            match read_lossy(&path) {
                Ok(content) => score_agent(file, &content, &matcher),
                Err(e) => {
                    tracing::warn!("failed to read agent definition {}: {e}", path.display());
                    AgentCheck {
                        file: file.to_string(),
                        exists: true,
                        error: Some(e.to_string()),
                        ..AgentCheck::default()
                    }
                }
            }
        })
        .collect();

    // Missing or unreadable files keep their slot in the denominator.
    let score = agents.iter().map(|a| a.score).sum::<f64>() / AGENT_FILES.len() as f64;

    tracing::info!("agents: {score:.1}/100");

    AgentsResult { score, agents }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FULL_AGENT: &str = "# 🤖 Code Agent\n\n## 📋 Visão Geral\nPersona: senior developer who writes clean, tested code.\n\n## 🎯 Responsabilidades Principais\n- implement features from the execution plan\n- keep the build green\n";

    #[test]
    fn full_agent_scores_100() {
        let check = score_agent("code_agent.md", FULL_AGENT, &CaseInsensitiveMatcher);
        assert!(check.has_content);
        assert!(check.has_persona);
        assert_eq!(check.sections_found.len(), 5);
        assert_eq!(check.score, 100.0);
    }

    #[test]
    fn short_file_scores_existence_only() {
        let check = score_agent("code_agent.md", "hello", &CaseInsensitiveMatcher);
        assert!(!check.has_content);
        assert!(!check.has_persona);
        assert!(check.sections_found.is_empty());
        assert_eq!(check.score, 25.0);
    }

    #[test]
    fn markers_match_case_insensitively() {
        let check = score_agent("x.md", "PERSONA and AGENT", &CaseInsensitiveMatcher);
        assert!(check.has_persona);
        assert_eq!(check.sections_found, vec!["Persona", "Agent"]);
        // (1 + 0 + 1 + 2/5) / 4 * 100
        assert!((check.score - 60.0).abs() < 1e-9);
    }

    #[test]
    fn missing_files_count_as_zero() {
        let dir = TempDir::new().unwrap();
        let agents = dir.path().join(".asdlc/agents");
        std::fs::create_dir_all(&agents).unwrap();
        std::fs::write(agents.join("code_agent.md"), FULL_AGENT).unwrap();

        let result = check(dir.path());
        assert_eq!(result.agents.len(), 5);
        assert_eq!(result.score, 20.0);
        assert_eq!(result.suggestions().len(), 4);
        assert_eq!(
            result.suggestions()[0],
            "create agent definition: .asdlc/agents/test_agent.md"
        );
    }

    #[test]
    fn unreadable_agent_scores_zero_and_keeps_slot() {
        let dir = TempDir::new().unwrap();
        let agents = dir.path().join(".asdlc/agents");
        std::fs::create_dir_all(agents.join("code_agent.md")).unwrap();
        std::fs::write(agents.join("test_agent.md"), FULL_AGENT).unwrap();

        let result = check(dir.path());
        assert_eq!(result.agents.len(), 5);
        let broken = &result.agents[0];
        assert_eq!(broken.file, "code_agent.md");
        assert!(broken.exists);
        assert_eq!(broken.score, 0.0);
        assert!(broken.error.is_some());
        assert_eq!(result.agents[1].score, 100.0);
        // 100 over all five slots
        assert_eq!(result.score, 20.0);
        assert!(!result
            .suggestions()
            .iter()
            .any(|s| s.ends_with("code_agent.md")));
    }

    #[test]
    fn no_agents_dir_scores_zero() {
        let dir = TempDir::new().unwrap();
        let result = check(dir.path());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.suggestions().len(), 5);
    }
}
