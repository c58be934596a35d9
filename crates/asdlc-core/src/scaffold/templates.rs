//! Managed document templates written by the scaffolder.
//!
//! Section headers stay in the framework's canonical wording because the
//! conformance checks look for them verbatim.

use crate::types::ProjectType;

// ---------------------------------------------------------------------------
// PROJECT_CONTEXT.md
// ---------------------------------------------------------------------------

const PROJECT_CONTEXT_TEMPLATE: &str = r#"# 📜 PROJECT_CONTEXT.md - {{NAME}}

## 1. Visão Geral do Projeto

**Project name**: {{NAME}}

**Goal**: {{GOAL}}

**Application type**: {{TYPE}} ({{TYPE_DESCRIPTION}})

## 2. Arquitetura do Sistema

### Main components
- **Core services**: business logic behind a thin interface layer
- **Persistence**: storage and caching as the features require
- **External integrations**: third-party APIs where needed

### Data flow
```
client → interface → core services → storage → response
```

## 3. Pilha de Tecnologia (Tech Stack)

- **Language and framework**: chosen to fit a {{TYPE}} project
- **Tests**: the ecosystem's standard test runner
- **Linting and formatting**: enforced in CI

## 4. Funcionalidades Principais

### Core features
- [ ] First end-to-end slice of: {{GOAL}}
- [ ] Input validation and error handling
- [ ] Structured logging
- [ ] Automated tests

## 5. Padrões e Convenções Obrigatórios

- Descriptive, consistent names across modules
- One responsibility per module
- Errors are handled where they can be acted on and logged once
- No secrets in source control or logs

## 6. Princípios Gerais de Desenvolvimento

- **Clarity**: small, readable units of code
- **Modularity**: clear separation of responsibilities
- **Security**: validate every input
- **Testability**: code is written to be tested

## 7. Métricas de Qualidade

- **Test coverage**: at least 80%
- **Lint**: zero warnings on the main branch
- **Reviews**: every change reviewed before merge

## 8. Estrutura de Diretórios

```
.asdlc/agents/   agent personas
stories/         execution plans
prompts/         prompt templates for external LLMs
src/             application code
tests/           automated tests
```

## 9. Configurações de Ambiente

- `LOG_LEVEL`: logging verbosity
- `OPENAI_API_KEY`: key used by `asdlc story create` to generate plans

## 10. Próximos Passos

1. Review the generated initial story under `stories/`
2. Refine this document with project-specific decisions
3. Create further stories with `asdlc story create --title "..."`
4. Check conformance with `asdlc validate`
"#;

pub fn project_context(name: &str, goal: &str, project_type: ProjectType) -> String {
    PROJECT_CONTEXT_TEMPLATE
        .replace("{{NAME}}", name)
        .replace("{{GOAL}}", goal)
        .replace("{{TYPE}}", project_type.as_str())
        .replace("{{TYPE_DESCRIPTION}}", project_type.description())
}

// ---------------------------------------------------------------------------
// Agent definitions
// ---------------------------------------------------------------------------

struct AgentTemplate {
    file: &'static str,
    name: &'static str,
    persona: &'static str,
    overview: &'static str,
    responsibilities: &'static [&'static str],
    guidelines: &'static [&'static str],
}

const AGENT_TEMPLATES: [AgentTemplate; 5] = [
    AgentTemplate {
        file: "code_agent.md",
        name: "Code Agent",
        persona: "Senior Full-Stack Developer",
        overview: "Writes clean, efficient and well documented code that implements exactly what the story's File Manifest lists.",
        responsibilities: &[
            "Implement features according to the story specification",
            "Follow the standards in PROJECT_CONTEXT.md",
            "Keep code testable and maintainable",
            "Document important technical decisions",
        ],
        guidelines: &[
            "Organise code into logical modules",
            "Use descriptive, consistent names",
            "Handle errors explicitly",
            "Consider performance and security from the start",
        ],
    },
    AgentTemplate {
        file: "test_agent.md",
        name: "Test Agent",
        persona: "Senior QA Engineer",
        overview: "Designs and writes automated tests that prove every acceptance criterion of a story.",
        responsibilities: &[
            "Write unit, integration and end-to-end tests",
            "Keep coverage at or above the project target",
            "Identify critical and edge-case scenarios",
        ],
        guidelines: &[
            "Each test is independent of the others",
            "Test names describe the behaviour under test",
            "Mock external dependencies in unit tests",
        ],
    },
    AgentTemplate {
        file: "architecture_agent.md",
        name: "Architecture Agent",
        persona: "Senior Software Architect",
        overview: "Owns the system design and keeps the implementation aligned with it as stories land.",
        responsibilities: &[
            "Define and document the system architecture",
            "Choose appropriate technologies",
            "Establish design patterns",
            "Keep the system scalable and performant",
        ],
        guidelines: &[
            "Components are well defined and independent",
            "Design for testability",
            "Record architectural decisions with their trade-offs",
        ],
    },
    AgentTemplate {
        file: "requirements_agent.md",
        name: "Requirements Agent",
        persona: "Senior Requirements Analyst",
        overview: "Elicits, analyses and documents requirements so every story is clear, complete and verifiable.",
        responsibilities: &[
            "Analyse and validate requirements",
            "Document functional and non-functional requirements",
            "Prioritise requirements",
            "Keep requirements traceable to project goals",
        ],
        guidelines: &[
            "Requirements are unambiguous",
            "Requirements do not conflict",
            "Every requirement can be tested",
        ],
    },
    AgentTemplate {
        file: "review_agent.md",
        name: "Review Agent",
        persona: "Senior Code Reviewer",
        overview: "Reviews changes for quality, security and conformance with the project's standards.",
        responsibilities: &[
            "Review code quality and structure",
            "Identify security problems",
            "Check conformance with the mandatory standards",
            "Suggest performance improvements",
        ],
        guidelines: &[
            "Inputs are validated and data sanitised",
            "Errors are handled and logged appropriately",
            "Tests cover the change, including edge cases",
        ],
    },
];

impl AgentTemplate {
    fn render(&self) -> String {
        let mut out = format!("# 🤖 {} - A-SDLC Framework\n\n", self.name);
        out.push_str(&format!("**Persona**: {}\n\n", self.persona));
        out.push_str("## 📋 Visão Geral\n\n");
        out.push_str(self.overview);
        out.push_str("\n\n## 🎯 Responsabilidades Principais\n\n");
        for r in self.responsibilities {
            out.push_str(&format!("- {r}\n"));
        }
        out.push_str("\n## Guidelines\n\n");
        for (i, g) in self.guidelines.iter().enumerate() {
            out.push_str(&format!("{}. {g}\n", i + 1));
        }
        out
    }
}

/// `(file name, contents)` for every agent definition.
pub fn agent_definitions() -> Vec<(&'static str, String)> {
    AGENT_TEMPLATES.iter().map(|a| (a.file, a.render())).collect()
}

// ---------------------------------------------------------------------------
// Prompt templates
// ---------------------------------------------------------------------------

const PROJECT_DESCRIPTION_PROMPT: &str = r#"# 📋 PROMPT: A-SDLC Project Description Generator

You are a **Senior Software Architect** specialised in the A-SDLC framework.
Turn the user's intent into a complete `PROJECT_CONTEXT.md`.

## Input
- Project name
- Application type (web_frontend, web_api, web_fullstack, mobile, desktop, cli)
- Detailed intent

## Output
A `PROJECT_CONTEXT.md` containing these headers, in order:

```markdown
# 📜 PROJECT_CONTEXT.md - [NAME]
## 1. Visão Geral do Projeto
## 2. Arquitetura do Sistema
## 3. Pilha de Tecnologia (Tech Stack)
## 4. Funcionalidades Principais
## 5. Padrões e Convenções Obrigatórios
## 6. Princípios Gerais de Desenvolvimento
## 7. Métricas de Qualidade
## 8. Estrutura de Diretórios
## 9. Configurações de Ambiente
## 10. Próximos Passos
```

Fill every section with specific, justified decisions.
"#;

const STORY_GENERATOR_PROMPT: &str = r#"# 📖 PROMPT: A-SDLC Story Generator

You are a **Senior Software Architect**. Given `PROJECT_CONTEXT.md` and a
feature request, write an execution plan for `stories/`.

## Required structure

```markdown
---
title: "[TITLE]"
ticket: "[YYYYmmdd_HHMMSS_slug]"
status: "PENDING"
---

# Plano de Execução: [TITLE]

## 📝 Especificações da Story
## Manifesto de Arquivos
## ✅ Critérios de Aceitação
## 🤖 Instruções para Agentes de IA
```

The File Manifest lists only source and configuration files. Agent
instructions reference the personas under `.asdlc/agents/`.
"#;

const IMPLEMENTATION_EXECUTOR_PROMPT: &str = r#"# 🚀 PROMPT: A-SDLC Implementation Executor

You implement one story from `stories/`.

1. Read `PROJECT_CONTEXT.md` and the story file.
2. Adopt the persona in `.asdlc/agents/code_agent.md`.
3. Create and modify EXACTLY the files in the story's File Manifest.
4. Follow every mandatory standard in the project context.
5. Adopt `.asdlc/agents/test_agent.md` and cover each acceptance criterion.
6. Set the story's `status` to "DONE" when all criteria pass.
"#;

const VALIDATION_CHECKER_PROMPT: &str = r#"# 🔍 PROMPT: A-SDLC Implementation Validator

Adopt the persona in `.asdlc/agents/review_agent.md` and check an
implemented story:

- Every file in the File Manifest exists and no unlisted file changed
- Each acceptance criterion is met and covered by a test
- The mandatory standards in `PROJECT_CONTEXT.md` are followed

Report each finding as PASS or FAIL with a one-line reason.
"#;

const PROMPTS_README: &str = r#"# 🚀 A-SDLC Prompts

Templates for driving an external LLM through the A-SDLC workflow.

| File | Use |
|------|-----|
| `project_description_generator.md` | draft `PROJECT_CONTEXT.md` from an idea |
| `story_generator.md` | turn a request into a story execution plan |
| `implementation_executor.md` | implement a story |
| `validation_checker.md` | review an implemented story |

Run `asdlc validate` to check the project's conformance at any time.
"#;

/// `(file name, contents)` for every prompt template.
pub fn prompt_templates() -> [(&'static str, &'static str); 5] {
    [
        ("project_description_generator.md", PROJECT_DESCRIPTION_PROMPT),
        ("story_generator.md", STORY_GENERATOR_PROMPT),
        ("implementation_executor.md", IMPLEMENTATION_EXECUTOR_PROMPT),
        ("validation_checker.md", VALIDATION_CHECKER_PROMPT),
        ("README.md", PROMPTS_README),
    ]
}
