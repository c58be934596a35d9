use crate::config::Config;
use crate::io::read_lossy;
use crate::paths::{self, PROJECT_CONTEXT_MD};
use crate::story::StoryDraft;
use crate::tree;
use crate::types::ProjectType;
use std::path::Path;

/// Completion budget for execution plans; they run long.
pub const PLAN_MAX_TOKENS: u32 = 3072;

const NO_CONTEXT_PLACEHOLDER: &str = "No PROJECT_CONTEXT.md provided.";

/// Everything about the project a plan prompt needs besides the story.
#[derive(Debug, Clone, Default)]
pub struct PlanContext {
    pub project_type: Option<ProjectType>,
    /// Raw `PROJECT_CONTEXT.md` text, if the file could be read.
    pub context: Option<String>,
    /// Output of [`tree::project_structure`].
    pub structure: String,
}

impl PlanContext {
    pub fn gather(root: &Path) -> Self {
        let context_path = paths::project_context_path(root);
        let context = if context_path.is_file() {
            match read_lossy(&context_path) {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!("failed to read {PROJECT_CONTEXT_MD}: {e}");
                    None
                }
            }
        } else {
            None
        };

        let project_type = match Config::load_optional(root) {
            Ok(cfg) => cfg.map(|c| c.project.project_type),
            Err(e) => {
                tracing::warn!("ignoring unreadable config: {e}");
                None
            }
        };

        PlanContext {
            project_type,
            context,
            structure: tree::project_structure(root),
        }
    }
}

fn type_focus(project_type: ProjectType) -> &'static str {
    match project_type {
        ProjectType::WebFrontend => {
            "HTML/CSS/JavaScript, responsive layout, accessibility and web UX (e.g. index.html, style.css, script.js)"
        }
        ProjectType::WebApi => {
            "Python or Node.js services, security and API documentation (e.g. app.py, requirements.txt or server.js, package.json)"
        }
        ProjectType::WebFullstack => "frontend and backend together, with a complete architecture",
        ProjectType::Mobile => {
            "React Native or Flutter, mobile UX and performance (e.g. App.js, package.json)"
        }
        ProjectType::Desktop => {
            "Electron or a Python GUI, desktop UX and installation (e.g. main.js, index.html)"
        }
        ProjectType::Cli => {
            "a Python or Node.js command-line interface with clear commands (e.g. main.py, requirements.txt)"
        }
    }
}

/// Architect prompt asking for a full execution plan in the story format.
pub fn build_plan_prompt(story: &StoryDraft, project: &PlanContext) -> String {
    let mut out = String::new();

    out.push_str(
        "**PERSONA:** You are a Senior Software Architect and an expert in the A-SDLC framework.\n\n",
    );
    out.push_str(
        "**TASK:** Turn the high-level request below into a detailed Markdown execution plan. \
         Analyse the request, consider the project context and, above all, produce a specific, \
         actionable File Manifest listing the SOURCE CODE files required.\n\n",
    );

    out.push_str("**CRITICAL RULES:**\n");
    out.push_str("1. Focus EXCLUSIVELY on the user's request.\n");
    out.push_str(
        "2. The File Manifest lists ONLY source files (.html, .py, .js, .css, ...) or \
         configuration files (Dockerfile, requirements.txt, ...).\n",
    );
    out.push_str(
        "3. NEVER list A-SDLC framework files (Markdown under .asdlc/ or stories/) in the manifest.\n",
    );
    out.push_str("4. Adapt to the project type:\n");
    for &t in ProjectType::all() {
        out.push_str(&format!("   - `{t}`: {}\n", type_focus(t)));
    }
    out.push('\n');

    out.push_str("**CURRENT PROJECT CONTEXT:**\n---\n");
    out.push_str(&format!("**PROJECT CONSTITUTION ({PROJECT_CONTEXT_MD}):**\n"));
    out.push_str(project.context.as_deref().unwrap_or(NO_CONTEXT_PLACEHOLDER));
    out.push_str("\n---\n**CURRENT FILE STRUCTURE:**\n");
    out.push_str(&project.structure);
    out.push_str("\n---\n\n");

    out.push_str("**CURRENT USER REQUEST (STORY):**\n");
    out.push_str(&format!("- Title: {}\n", story.title));
    out.push_str(&format!("- Description: {}\n", story.description));
    out.push_str(&format!("- Story type: {}\n", story.story_type));
    out.push_str(&format!("- Priority: {}\n", story.priority));
    if let Some(estimate) = &story.estimate {
        out.push_str(&format!("- Estimate: {estimate}\n"));
    }
    match project.project_type {
        Some(t) => {
            out.push_str(&format!("- Project type: {t} ({})\n", t.description()));
            out.push_str(&format!("\nFocus on {}.\n", type_focus(t)));
        }
        None => out.push_str("- Project type: N/A\n"),
    }
    out.push('\n');

    out.push_str(
        "**YOUR OUTPUT:** Produce the complete Markdown file for the execution plan. Be specific \
         in tasks, acceptance criteria and success metrics, and give concrete code examples in \
         the project's language. Always include instructions for the AI agents. Follow the \
         output structure below STRICTLY and add no text before or after it.\n\n",
    );
    out.push_str("**OUTPUT STRUCTURE (MARKDOWN):**\n");
    out.push_str(&output_skeleton(story));
    out
}

fn output_skeleton(story: &StoryDraft) -> String {
    format!(
        r#"---
title: "{title}"
ticket: "{ticket}"
status: "PENDING"
priority: "{priority}"
created: "{created}"
---

# Plano de Execução: {title}

## 📝 Especificações da Story

**User Story:**
{description}

## Manifesto de Arquivos
- **CREATE:** [exact source files to create]
- **MODIFY:** [existing files to change]

## 🎯 Tarefas Detalhadas

### Task 1: [name]
1. **File**: [file name]
2. **Action**: [specific action]

```[language]
[concrete, implementable example]
```

## ✅ Critérios de Aceitação

- [ ] [specific, measurable criterion]
- [ ] [specific, measurable criterion]

## 📊 Métricas de Sucesso

- [measurable metric]

## 🤖 Instruções para Agentes de IA

### Code Agent (phase 1)
Combine the persona in `.asdlc/agents/code_agent.md` with: "Implement EXACTLY the tasks above, creating and modifying files EXACTLY as listed in the File Manifest."

### Test Agent (phase 2)
Combine the persona in `.asdlc/agents/test_agent.md` with: "Write automated tests covering EVERY acceptance criterion above."

### Review Agent (phase 3)
Combine the persona in `.asdlc/agents/review_agent.md` with: "Review the implementation against the mandatory standards and acceptance criteria."

### Requirements Agent (optional)
Combine the persona in `.asdlc/agents/requirements_agent.md` with: "Check the requirements were fully met and list any gaps."

### Architecture Agent (optional)
Combine the persona in `.asdlc/agents/architecture_agent.md` with: "Validate the architecture against the design principles."

## ✅ Checklist de Execução

- [ ] Phase 1: code
- [ ] Phase 2: tests
- [ ] Phase 3: set `status` in the frontmatter to "DONE"
"#,
        title = story.title,
        ticket = story.id,
        priority = story.priority,
        created = story.created,
        description = story.description,
    )
}
