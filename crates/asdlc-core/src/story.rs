use crate::error::{AsdlcError, Result};
use crate::io::{self, markdown_files, read_lossy};
use crate::paths;
use crate::types::{Priority, StoryType};
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const SLUG_MAX_LEN: usize = 20;

/// Status written into frontmatter that the generator had to synthesize.
pub const INITIAL_STATUS: &str = "PENDING";

static FRONTMATTER_RE: OnceLock<Regex> = OnceLock::new();
static STATUS_RE: OnceLock<Regex> = OnceLock::new();
static SECTION_RE: OnceLock<Regex> = OnceLock::new();

fn frontmatter_re() -> &'static Regex {
    FRONTMATTER_RE.get_or_init(|| {
        Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)").unwrap()
    })
}

fn status_re() -> &'static Regex {
    STATUS_RE.get_or_init(|| Regex::new(r#"(?m)^status:[ \t]*("[^"\n]*"|[^\n]*)$"#).unwrap())
}

fn section_re() -> &'static Regex {
    SECTION_RE.get_or_init(|| Regex::new(r"(?m)^##\s+").unwrap())
}

// ---------------------------------------------------------------------------
// Identifiers and file names
// ---------------------------------------------------------------------------

/// `<YYYYmmdd_HHMMSS>_<slug>` where the slug is the lowercased title with
/// every non-alphanumeric run collapsed to `_`, capped at 20 characters.
pub fn story_id(title: &str, at: NaiveDateTime) -> String {
    format!("{}_{}", at.format("%Y%m%d_%H%M%S"), slugify(title))
}

fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.chars().take(SLUG_MAX_LEN).collect()
}

/// Replace characters that are unsafe in file names, collapse `_` runs and
/// trim them from both ends.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let c = match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | ' ' => '_',
            other => other,
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('_').to_string()
}

pub fn story_filename(id: &str, title: &str) -> String {
    format!("{id}_{}.md", sanitize_filename(title))
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// A story request before its execution plan exists.
#[derive(Debug, Clone, Serialize)]
pub struct StoryDraft {
    pub id: String,
    pub title: String,
    pub description: String,
    pub story_type: StoryType,
    pub priority: Priority,
    pub estimate: Option<String>,
    pub created: String,
}

impl StoryDraft {
    pub fn new(title: &str, description: Option<&str>, now: DateTime<Local>) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AsdlcError::EmptyTitle);
        }
        let description = match description.map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => format!("Implement feature: {title}"),
        };
        Ok(StoryDraft {
            id: story_id(title, now.naive_local()),
            title: title.to_string(),
            description,
            story_type: StoryType::default(),
            priority: Priority::default(),
            estimate: None,
            created: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    pub fn with_type(mut self, story_type: StoryType) -> Self {
        self.story_type = story_type;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_estimate(mut self, estimate: Option<String>) -> Self {
        self.estimate = estimate.filter(|e| !e.trim().is_empty());
        self
    }

    pub fn filename(&self) -> String {
        story_filename(&self.id, &self.title)
    }

    /// Frontmatter block for plans that came back without one.
    pub fn frontmatter(&self) -> String {
        let mut out = String::from("---\n");
        out.push_str(&format!("title: {}\n", yaml_quote(&self.title)));
        out.push_str(&format!("ticket: {}\n", yaml_quote(&self.id)));
        out.push_str(&format!("status: {}\n", yaml_quote(INITIAL_STATUS)));
        out.push_str(&format!("type: {}\n", yaml_quote(self.story_type.as_str())));
        out.push_str(&format!("priority: {}\n", yaml_quote(self.priority.as_str())));
        if let Some(estimate) = &self.estimate {
            out.push_str(&format!("estimate: {}\n", yaml_quote(estimate)));
        }
        out.push_str(&format!("created: {}\n", yaml_quote(&self.created)));
        out.push_str("---\n");
        out
    }
}

// JSON string literals are valid YAML double-quoted scalars.
fn yaml_quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

// ---------------------------------------------------------------------------
// Plan post-processing
// ---------------------------------------------------------------------------

/// Drop a Markdown code fence wrapped around the whole text, if present.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Skip the info string (```markdown) on the opening line.
    match body.find('\n') {
        Some(idx) => body[idx + 1..].trim(),
        None => body.trim(),
    }
}

/// Turn raw generated text into the story document that gets written.
pub fn finalize_plan(draft: &StoryDraft, generated: &str) -> String {
    let body = strip_code_fence(generated);
    let mut doc = if extract_frontmatter(body).is_some() {
        body.to_string()
    } else {
        format!("{}\n{body}", draft.frontmatter())
    };
    if !doc.ends_with('\n') {
        doc.push('\n');
    }
    doc
}

/// Persist a finished plan under `stories/`. Returns the written path.
pub fn write_story(root: &Path, draft: &StoryDraft, plan: &str) -> Result<PathBuf> {
    io::ensure_dir(&paths::stories_dir(root))?;
    let path = paths::story_path(root, &draft.filename());
    io::atomic_write(&path, finalize_plan(draft, plan).as_bytes())?;
    tracing::info!("story written: {}", path.display());
    Ok(path)
}

// ---------------------------------------------------------------------------
// Frontmatter
// ---------------------------------------------------------------------------

/// Raw text between the leading `---` line and the next `---` line.
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    frontmatter_re()
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Scalar frontmatter fields, stringified. Nested values are dropped.
pub fn parse_frontmatter(content: &str) -> Result<BTreeMap<String, String>> {
    let raw = extract_frontmatter(content)
        .ok_or_else(|| AsdlcError::MissingFrontmatter("no leading --- block".to_string()))?;
    let value: serde_yaml::Value = serde_yaml::from_str(raw)?;
    let mut fields = BTreeMap::new();
    if let serde_yaml::Value::Mapping(map) = value {
        for (k, v) in map {
            if let (Some(key), Some(val)) = (scalar_string(&k), scalar_string(&v)) {
                fields.insert(key, val);
            }
        }
    }
    Ok(fields)
}

fn scalar_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorySummary {
    pub story_id: String,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub created: String,
    pub file_path: String,
    pub file_size: u64,
    pub modified: DateTime<Utc>,
}

fn summarize(path: &Path) -> Result<StorySummary> {
    let content = read_lossy(path)?;
    let fields = parse_frontmatter(&content)
        .map_err(|_| AsdlcError::MissingFrontmatter(path.display().to_string()))?;
    let meta = std::fs::metadata(path)?;
    let modified: DateTime<Utc> = meta.modified().map(DateTime::from).unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let field = |key: &str, fallback: &str| {
        fields
            .get(key)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };

    Ok(StorySummary {
        story_id: field("ticket", &stem),
        title: field("title", &stem),
        status: field("status", "unknown"),
        priority: field("priority", Priority::default().as_str()),
        created: field("created", ""),
        file_path: path.display().to_string(),
        file_size: meta.len(),
        modified,
    })
}

/// Every story with parsable frontmatter, newest first.
pub fn list_stories(root: &Path) -> Result<Vec<StorySummary>> {
    let dir = paths::stories_dir(root);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut stories = Vec::new();
    for path in markdown_files(&dir)? {
        match summarize(&path) {
            Ok(summary) => stories.push(summary),
            Err(e) => tracing::warn!("skipping {}: {e}", path.display()),
        }
    }
    stories.sort_by(|a, b| {
        b.created
            .cmp(&a.created)
            .then_with(|| b.modified.cmp(&a.modified))
    });
    Ok(stories)
}

/// First story (by file name) whose stem contains `id`.
pub fn find_story(root: &Path, id: &str) -> Result<PathBuf> {
    let dir = paths::stories_dir(root);
    if !id.is_empty() && dir.is_dir() {
        for path in markdown_files(&dir)? {
            let matches = path
                .file_stem()
                .is_some_and(|s| s.to_string_lossy().contains(id));
            if matches {
                return Ok(path);
            }
        }
    }
    Err(AsdlcError::StoryNotFound(id.to_string()))
}

// ---------------------------------------------------------------------------
// Metrics and status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryMetrics {
    pub total_lines: usize,
    pub total_chars: usize,
    pub total_words: usize,
    pub sections: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub progress_percentage: f64,
}

impl StoryMetrics {
    pub fn from_content(content: &str) -> Self {
        let open = content.matches("- [ ]").count();
        let completed_tasks = content.matches("- [x]").count();
        let total_tasks = open + completed_tasks;
        let progress_percentage = if total_tasks == 0 {
            0.0
        } else {
            (completed_tasks as f64 * 1000.0 / total_tasks as f64).round() / 10.0
        };

        StoryMetrics {
            total_lines: content.split('\n').count(),
            total_chars: content.chars().count(),
            total_words: content.split_whitespace().count(),
            sections: section_re().find_iter(content).count(),
            total_tasks,
            completed_tasks,
            progress_percentage,
        }
    }
}

pub fn story_metrics(root: &Path, id: &str) -> Result<StoryMetrics> {
    let path = find_story(root, id)?;
    Ok(StoryMetrics::from_content(&read_lossy(&path)?))
}

/// Replace the first `status:` line with `status: "<status>"`.
pub fn replace_status(content: &str, status: &str) -> Option<String> {
    let re = status_re();
    re.find(content)?;
    let line = format!("status: {}", yaml_quote(status));
    Some(re.replacen(content, 1, NoExpand(&line)).into_owned())
}

/// Rewrite the status of the story matching `id`. Returns the story path.
pub fn set_status(root: &Path, id: &str, status: &str) -> Result<PathBuf> {
    let path = find_story(root, id)?;
    let content = read_lossy(&path)?;
    let updated = replace_status(&content, status)
        .ok_or_else(|| AsdlcError::MissingStatus(path.display().to_string()))?;
    io::atomic_write(&path, updated.as_bytes())?;
    tracing::info!("{} status → {status}", path.display());
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
