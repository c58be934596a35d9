mod cmd;
mod output;
mod root;

use asdlc_core::conformance::ReportFormat;
use asdlc_core::types::ProjectType;
use clap::{CommandFactory, Parser, Subcommand};
use cmd::story::StorySubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "asdlc",
    about = "A-SDLC framework: scaffold projects, plan stories with an LLM, and score conformance",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .asdlc/ or PROJECT_CONTEXT.md)
    #[arg(long, global = true, env = "ASDLC_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new project in ./<name> and generate its first story
    CreateProject {
        /// Project (and directory) name
        #[arg(long)]
        name: String,

        /// What the project should do
        #[arg(long)]
        prompt: String,

        /// web_frontend, web_api, web_fullstack, mobile, desktop or cli
        #[arg(long = "type", default_value = "web_api")]
        project_type: ProjectType,

        /// Only scaffold; do not call the LLM for an initial story
        #[arg(long)]
        skip_plan: bool,
    },

    /// Create, list and track stories
    Story {
        #[command(subcommand)]
        subcommand: StorySubcommand,
    },

    /// Score a project's conformance to the A-SDLC layout
    Validate {
        /// Project directory (default: --root or the current directory)
        #[arg(short = 'p', long)]
        project: Option<PathBuf>,

        /// markdown, json or text (default: markdown, or json with --json)
        #[arg(short = 'f', long)]
        format: Option<ReportFormat>,

        /// Write the report to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root_path = cli.root.as_deref();

    let result = match cli.command {
        None => Cli::command()
            .print_help()
            .map(|()| {
                println!();
                0
            })
            .map_err(anyhow::Error::from),
        Some(Commands::CreateProject {
            name,
            prompt,
            project_type,
            skip_plan,
        }) => cmd::project::create(
            &root::resolve_dir(None),
            &name,
            &prompt,
            project_type,
            skip_plan,
            cli.json,
        )
        .map(|()| 0),
        Some(Commands::Story { subcommand }) => root::require_project_root(root_path)
            .map_err(anyhow::Error::from)
            .and_then(|root| cmd::story::run(&root, subcommand, cli.json))
            .map(|()| 0),
        Some(Commands::Validate {
            project,
            format,
            output,
        }) => {
            let dir = project.unwrap_or_else(|| root::resolve_dir(root_path));
            let format = format.unwrap_or(if cli.json {
                ReportFormat::Json
            } else {
                ReportFormat::Markdown
            });
            cmd::validate::run(&dir, format, output.as_deref())
        }
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
