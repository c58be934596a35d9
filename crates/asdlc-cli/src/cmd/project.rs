use crate::cmd::story::{generate_story, open_client};
use crate::output::print_json;
use anyhow::Context;
use asdlc_core::paths::AGENT_FILES;
use asdlc_core::scaffold::initialize_project;
use asdlc_core::story::StoryDraft;
use asdlc_core::types::ProjectType;
use std::path::Path;

/// Scaffold `parent/name` and, unless `skip_plan`, generate its first story.
pub fn create(
    parent: &Path,
    name: &str,
    goal: &str,
    project_type: ProjectType,
    skip_plan: bool,
    json: bool,
) -> anyhow::Result<()> {
    let root = initialize_project(parent, name, goal, project_type)
        .with_context(|| format!("failed to scaffold project '{name}'"))?;

    if !json {
        println!("Project scaffolded at: {}", root.display());
        println!("  created: PROJECT_CONTEXT.md");
        println!("  created: .asdlc/config.yaml");
        println!("  created: .asdlc/agents/ ({} agents)", AGENT_FILES.len());
        println!("  created: prompts/");
        println!("  created: stories/");
    }

    let story_path = if skip_plan {
        None
    } else {
        let draft = StoryDraft::new(
            &format!("Initial implementation: {name}"),
            Some(goal),
            chrono::Local::now(),
        )?;
        let generated = open_client(&root).and_then(|client| generate_story(&root, &draft, &client));
        let path = generated.with_context(|| {
            format!(
                "project scaffolded at {}, but the initial story could not be generated; \
                 run `asdlc story create` inside the project once the LLM is reachable",
                root.display()
            )
        })?;
        Some(path)
    };

    if json {
        print_json(&serde_json::json!({
            "root": root,
            "project_type": project_type,
            "initial_story": story_path,
        }))?;
        return Ok(());
    }

    if let Some(path) = &story_path {
        println!("  created: {}", path.display());
    }
    println!("\nNext:");
    println!("  cd {name}");
    println!("  asdlc validate");
    Ok(())
}
