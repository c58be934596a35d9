use crate::output::{print_json, print_table, progress_bar};
use anyhow::Context;
use asdlc_core::config::Config;
use asdlc_core::plan::{build_plan_prompt, PlanContext, PLAN_MAX_TOKENS};
use asdlc_core::story::{self, StoryDraft};
use asdlc_core::types::{Priority, StoryType};
use clap::Subcommand;
use llm_client::{Completion, LlmOverrides, LlmSettings, OpenAiClient};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum StorySubcommand {
    /// Create a story and generate its execution plan
    Create {
        /// Story title
        #[arg(long)]
        title: String,
        /// What the story should achieve (default: "Implement feature: <title>")
        #[arg(long)]
        description: Option<String>,
        /// user_story, bug_fix, technical_story or enhancement
        #[arg(long = "type", default_value = "user_story")]
        story_type: StoryType,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Free-form estimate (e.g. "4h")
        #[arg(long)]
        estimate: Option<String>,
    },

    /// List stories, newest first
    List,

    /// Show size and checklist progress for a story
    Metrics {
        /// Story id, or any part of its file name
        id: String,
    },

    /// Set the frontmatter status of a story
    Status {
        /// Story id, or any part of its file name
        id: String,
        /// New status (e.g. IN_PROGRESS, DONE)
        status: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: StorySubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        StorySubcommand::Create {
            title,
            description,
            story_type,
            priority,
            estimate,
        } => {
            let draft = StoryDraft::new(&title, description.as_deref(), chrono::Local::now())?
                .with_type(story_type)
                .with_priority(priority)
                .with_estimate(estimate);
            create(root, draft, json)
        }
        StorySubcommand::List => list(root, json),
        StorySubcommand::Metrics { id } => metrics(root, &id, json),
        StorySubcommand::Status { id, status } => set_status(root, &id, &status, json),
    }
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

/// Export `<root>/.env` into the process environment. Variables that are
/// already set keep their values.
fn load_dotenv(root: &Path) {
    let path = root.join(".env");
    if !path.is_file() {
        return;
    }
    match dotenvy::from_path(&path) {
        Ok(()) => tracing::debug!("loaded {}", path.display()),
        Err(e) => tracing::warn!("ignoring {}: {e}", path.display()),
    }
}

/// Build a chat client from the environment (plus the project's `.env`)
/// layered over `.asdlc/config.yaml`.
pub fn open_client(root: &Path) -> anyhow::Result<OpenAiClient> {
    load_dotenv(root);
    let overrides = match Config::load_optional(root).context("failed to load config.yaml")? {
        Some(cfg) => {
            for w in cfg.validate() {
                tracing::warn!("config: {}", w.message);
            }
            cfg.llm
                .map(|l| LlmOverrides {
                    model: l.model,
                    max_tokens: l.max_tokens,
                    temperature: l.temperature,
                    base_url: l.base_url,
                })
                .unwrap_or_default()
        }
        None => LlmOverrides::default(),
    };
    let settings = LlmSettings::from_env_over(&overrides).context("invalid LLM settings")?;
    let client = OpenAiClient::new(settings)?;
    tracing::debug!(
        model = %client.settings().model,
        base_url = %client.settings().base_url,
        "llm client ready"
    );
    Ok(client)
}

/// Ask the model for an execution plan and write the story. Nothing is
/// written when generation fails.
pub fn generate_story(
    root: &Path,
    draft: &StoryDraft,
    client: &impl Completion,
) -> anyhow::Result<PathBuf> {
    let prompt = build_plan_prompt(draft, &PlanContext::gather(root));
    tracing::info!("requesting execution plan for '{}'", draft.title);
    let plan = client
        .complete(&prompt, Some(PLAN_MAX_TOKENS))
        .context("failed to generate execution plan")?;
    let path = story::write_story(root, draft, &plan).context("failed to write story")?;
    Ok(path)
}

fn create(root: &Path, draft: StoryDraft, json: bool) -> anyhow::Result<()> {
    let client = open_client(root)?;
    let path = generate_story(root, &draft, &client)?;

    if json {
        print_json(&serde_json::json!({
            "story_id": draft.id,
            "title": draft.title,
            "path": path,
        }))?;
        return Ok(());
    }

    println!("Story created: {}", draft.title);
    println!("  id:   {}", draft.id);
    println!("  file: {}", path.display());
    println!("\nNext: review the plan, then `asdlc story status {} IN_PROGRESS`", draft.id);
    Ok(())
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let stories = story::list_stories(root).context("failed to list stories")?;

    if json {
        print_json(&stories)?;
        return Ok(());
    }

    if stories.is_empty() {
        println!("No stories yet.");
        println!("Create one with: asdlc story create --title \"...\"");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = stories
        .iter()
        .map(|s| {
            vec![
                s.story_id.clone(),
                s.title.clone(),
                s.status.clone(),
                s.priority.clone(),
                s.created.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "TITLE", "STATUS", "PRIORITY", "CREATED"], rows);
    println!("\n{} stories", stories.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// metrics
// ---------------------------------------------------------------------------

fn metrics(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let m = story::story_metrics(root, id)?;

    if json {
        print_json(&m)?;
        return Ok(());
    }

    println!("Metrics for story: {id}");
    println!("  lines:    {}", m.total_lines);
    println!("  chars:    {}", m.total_chars);
    println!("  words:    {}", m.total_words);
    println!("  sections: {}", m.sections);
    println!("  tasks:    {}/{} completed", m.completed_tasks, m.total_tasks);
    println!(
        "  progress: {} {}%",
        progress_bar(m.progress_percentage, 20),
        m.progress_percentage
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

fn set_status(root: &Path, id: &str, status: &str, json: bool) -> anyhow::Result<()> {
    if status.trim().is_empty() {
        anyhow::bail!("status must not be empty");
    }
    let path = story::set_status(root, id, status)?;

    if json {
        print_json(&serde_json::json!({ "path": path, "status": status }))?;
        return Ok(());
    }
    println!("Status set: {} → {status}", path.display());
    Ok(())
}
