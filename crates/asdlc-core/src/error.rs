use thiserror::Error;

#[derive(Debug, Error)]
pub enum AsdlcError {
    #[error("not inside an A-SDLC project: run 'asdlc create-project' first")]
    NotAProject,

    #[error("not initialized: .asdlc/config.yaml is missing")]
    NotInitialized,

    #[error("story not found: {0}")]
    StoryNotFound(String),

    #[error("invalid project name '{0}': must be a single, non-empty directory name")]
    InvalidProjectName(String),

    #[error("story title is required")]
    EmptyTitle,

    #[error("invalid project type '{0}': expected one of web_frontend, web_api, web_fullstack, mobile, desktop, cli")]
    InvalidProjectType(String),

    #[error("invalid story type '{0}': expected one of user_story, bug_fix, technical_story, enhancement")]
    InvalidStoryType(String),

    #[error("invalid priority '{0}': expected one of high, medium, low")]
    InvalidPriority(String),

    #[error("invalid report format '{0}': expected one of markdown, json, text")]
    InvalidReportFormat(String),

    #[error("story has no frontmatter: {0}")]
    MissingFrontmatter(String),

    #[error("story has no status field: {0}")]
    MissingStatus(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AsdlcError>;
