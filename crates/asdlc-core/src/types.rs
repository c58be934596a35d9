use crate::error::AsdlcError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ProjectType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    WebFrontend,
    #[default]
    WebApi,
    WebFullstack,
    Mobile,
    Desktop,
    Cli,
}

impl ProjectType {
    pub fn all() -> &'static [ProjectType] {
        &[
            ProjectType::WebFrontend,
            ProjectType::WebApi,
            ProjectType::WebFullstack,
            ProjectType::Mobile,
            ProjectType::Desktop,
            ProjectType::Cli,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::WebFrontend => "web_frontend",
            ProjectType::WebApi => "web_api",
            ProjectType::WebFullstack => "web_fullstack",
            ProjectType::Mobile => "mobile",
            ProjectType::Desktop => "desktop",
            ProjectType::Cli => "cli",
        }
    }

    /// One-line description used in generated documents.
    pub fn description(self) -> &'static str {
        match self {
            ProjectType::WebFrontend => "Web frontend application (HTML/CSS/JS)",
            ProjectType::WebApi => "Web API backend (Python/Node.js)",
            ProjectType::WebFullstack => "Full-stack web application (frontend + backend)",
            ProjectType::Mobile => "Mobile application (React Native/Flutter)",
            ProjectType::Desktop => "Desktop application (Electron/Python GUI)",
            ProjectType::Cli => "Command-line application",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectType {
    type Err = AsdlcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AsdlcError::InvalidProjectType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// StoryType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryType {
    #[default]
    UserStory,
    BugFix,
    TechnicalStory,
    Enhancement,
}

impl StoryType {
    pub fn as_str(self) -> &'static str {
        match self {
            StoryType::UserStory => "user_story",
            StoryType::BugFix => "bug_fix",
            StoryType::TechnicalStory => "technical_story",
            StoryType::Enhancement => "enhancement",
        }
    }
}

impl fmt::Display for StoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoryType {
    type Err = AsdlcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user_story" => Ok(StoryType::UserStory),
            "bug_fix" => Ok(StoryType::BugFix),
            "technical_story" => Ok(StoryType::TechnicalStory),
            "enhancement" => Ok(StoryType::Enhancement),
            _ => Err(AsdlcError::InvalidStoryType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = AsdlcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(AsdlcError::InvalidPriority(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
