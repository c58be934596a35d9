//! Project scaffolding: the directory layout, context document, agent
//! definitions, prompt templates and config that make a project conformant.

pub mod templates;

use crate::config::Config;
use crate::error::{AsdlcError, Result};
use crate::io;
use crate::paths::{self, REQUIRED_DIRS};
use crate::types::ProjectType;
use std::path::{Component, Path, PathBuf};

fn validate_project_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if name.trim().is_empty() || !single_normal {
        return Err(AsdlcError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}

/// Create (or refresh) an A-SDLC project at `parent/name`.
///
/// An existing directory is reused. Managed documents are overwritten;
/// stories and any other files are left alone. The `llm` section of an
/// existing config survives a re-run.
pub fn initialize_project(
    parent: &Path,
    name: &str,
    goal: &str,
    project_type: ProjectType,
) -> Result<PathBuf> {
    validate_project_name(name)?;
    let root = parent.join(name);

    if root.exists() {
        tracing::warn!("directory '{name}' already exists; reusing it");
    } else {
        tracing::info!("creating project directory {}", root.display());
    }

    for dir in REQUIRED_DIRS {
        io::ensure_dir(&root.join(dir))?;
    }

    io::atomic_write(
        &paths::project_context_path(&root),
        templates::project_context(name, goal, project_type).as_bytes(),
    )?;

    let agents = templates::agent_definitions();
    for (file, body) in &agents {
        io::atomic_write(&paths::agent_path(&root, file), body.as_bytes())?;
    }

    let prompts = templates::prompt_templates();
    for (file, body) in prompts {
        io::atomic_write(&paths::prompt_path(&root, file), body.as_bytes())?;
    }

    let mut config = Config::load_optional(&root)?
        .unwrap_or_else(|| Config::new(name, project_type));
    config.project.name = name.to_string();
    config.project.project_type = project_type;
    config.project.description = Some(goal.to_string()).filter(|g| !g.trim().is_empty());
    config.save(&root)?;

    tracing::info!(
        "scaffolded {} ({} agents, {} prompts)",
        root.display(),
        agents.len(),
        prompts.len()
    );
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conformance::{self, Category};
    use crate::config::LlmConfig;
    use tempfile::TempDir;

    #[test]
    fn fresh_project_is_conformant_except_stories() {
        let dir = TempDir::new().unwrap();
        let root = initialize_project(dir.path(), "todo", "track tasks", ProjectType::Cli).unwrap();

        let report = conformance::validate_project_at(&root, "2026-01-01T00:00:00+00:00");
        for &c in Category::all() {
            let expected = if c == Category::Stories { 0.0 } else { 100.0 };
            assert_eq!(report.categories.score(c), expected, "{c}");
        }
        assert_eq!(report.overall_score, 80.0);
        assert!(report.auto_fix_commands.is_empty());
    }

    #[test]
    fn writes_config() {
        let dir = TempDir::new().unwrap();
        let root =
            initialize_project(dir.path(), "shop", "sell things", ProjectType::WebFullstack).unwrap();
        let cfg = Config::load(&root).unwrap();
        assert_eq!(cfg.project.name, "shop");
        assert_eq!(cfg.project.project_type, ProjectType::WebFullstack);
        assert_eq!(cfg.project.description.as_deref(), Some("sell things"));
    }

    #[test]
    fn rerun_keeps_stories_and_llm_settings() {
        let dir = TempDir::new().unwrap();
        let root = initialize_project(dir.path(), "app", "v1", ProjectType::WebApi).unwrap();

        let story = paths::story_path(&root, "s1.md");
        std::fs::write(&story, "keep me").unwrap();
        std::fs::write(paths::agent_path(&root, "code_agent.md"), "edited").unwrap();
        let mut cfg = Config::load(&root).unwrap();
        cfg.llm = Some(LlmConfig {
            model: Some("gpt-4o".to_string()),
            ..LlmConfig::default()
        });
        cfg.save(&root).unwrap();

        initialize_project(dir.path(), "app", "v2", ProjectType::WebApi).unwrap();

        assert_eq!(std::fs::read_to_string(&story).unwrap(), "keep me");
        let agent = std::fs::read_to_string(paths::agent_path(&root, "code_agent.md")).unwrap();
        assert!(agent.starts_with("# 🤖 Code Agent"));
        let cfg = Config::load(&root).unwrap();
        assert_eq!(cfg.llm.and_then(|l| l.model).as_deref(), Some("gpt-4o"));
        assert_eq!(cfg.project.description.as_deref(), Some("v2"));
    }

    #[test]
    fn rejects_bad_names() {
        let dir = TempDir::new().unwrap();
        for name in ["", "  ", "a/b", "..", "/abs"] {
            assert!(
                matches!(
                    initialize_project(dir.path(), name, "g", ProjectType::Cli),
                    Err(AsdlcError::InvalidProjectName(_))
                ),
                "{name:?} accepted"
            );
        }
    }
}
