use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ASDLC_DIR: &str = ".asdlc";
pub const AGENTS_DIR: &str = ".asdlc/agents";
pub const STORIES_DIR: &str = "stories";
pub const PROMPTS_DIR: &str = "prompts";

pub const CONFIG_FILE: &str = ".asdlc/config.yaml";
pub const PROJECT_CONTEXT_MD: &str = "PROJECT_CONTEXT.md";

/// Agent definition files expected under [`AGENTS_DIR`], in check order.
pub const AGENT_FILES: [&str; 5] = [
    "code_agent.md",
    "test_agent.md",
    "architecture_agent.md",
    "requirements_agent.md",
    "review_agent.md",
];

/// Prompt templates expected under [`PROMPTS_DIR`], in check order.
pub const PROMPT_FILES: [&str; 5] = [
    "project_description_generator.md",
    "story_generator.md",
    "implementation_executor.md",
    "validation_checker.md",
    "README.md",
];

/// Files a conformant project must contain, relative to the project root.
pub const REQUIRED_FILES: [&str; 6] = [
    PROJECT_CONTEXT_MD,
    ".asdlc/agents/code_agent.md",
    ".asdlc/agents/test_agent.md",
    ".asdlc/agents/architecture_agent.md",
    ".asdlc/agents/requirements_agent.md",
    ".asdlc/agents/review_agent.md",
];

/// Directories a conformant project must contain, relative to the project root.
pub const REQUIRED_DIRS: [&str; 4] = [ASDLC_DIR, AGENTS_DIR, STORIES_DIR, PROMPTS_DIR];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn asdlc_dir(root: &Path) -> PathBuf {
    root.join(ASDLC_DIR)
}

pub fn agents_dir(root: &Path) -> PathBuf {
    root.join(AGENTS_DIR)
}

pub fn agent_path(root: &Path, filename: &str) -> PathBuf {
    agents_dir(root).join(filename)
}

pub fn stories_dir(root: &Path) -> PathBuf {
    root.join(STORIES_DIR)
}

pub fn story_path(root: &Path, filename: &str) -> PathBuf {
    stories_dir(root).join(filename)
}

pub fn prompts_dir(root: &Path) -> PathBuf {
    root.join(PROMPTS_DIR)
}

pub fn prompt_path(root: &Path, filename: &str) -> PathBuf {
    prompts_dir(root).join(filename)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn project_context_path(root: &Path) -> PathBuf {
    root.join(PROJECT_CONTEXT_MD)
}

// ---------------------------------------------------------------------------
// Project root discovery
// ---------------------------------------------------------------------------

/// True when `dir` carries an A-SDLC marker: a `.asdlc/` directory or a
/// `PROJECT_CONTEXT.md` file.
pub fn is_project_root(dir: &Path) -> bool {
    asdlc_dir(dir).is_dir() || project_context_path(dir).is_file()
}

/// Walk upward from `start` looking for the nearest project root.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start.ancestors().find(|d| is_project_root(d)).map(Path::to_path_buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
