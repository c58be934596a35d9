use crate::io::read_lossy;
use crate::paths::{self, PROJECT_CONTEXT_MD};
use crate::sections::{ExactMatcher, SectionMatcher};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Headers of the project context document (exact match, any order).
pub const CONTEXT_SECTION_HEADERS: [&str; 11] = [
    "# 📜 PROJECT_CONTEXT.md",
    "## 1. Visão Geral do Projeto",
    "## 2. Arquitetura do Sistema",
    "## 3. Pilha de Tecnologia",
    "## 4. Funcionalidades Principais",
    "## 5. Padrões e Convenções",
    "## 6. Princípios Gerais",
    "## 7. Métricas de Qualidade",
    "## 8. Estrutura de Diretórios",
    "## 9. Configurações de Ambiente",
    "## 10. Próximos Passos",
];

/// Below this score the document is reported as incomplete.
pub const CONTEXT_COMPLETE_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectContextResult {
    pub score: f64,
    pub exists: bool,
    pub sections_found: Vec<String>,
    pub total_sections: usize,
    pub content_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProjectContextResult {
    pub fn suggestions(&self) -> Vec<String> {
        if !self.exists {
            return vec![format!("create {PROJECT_CONTEXT_MD} at the project root")];
        }
        if self.error.is_none() && self.score < CONTEXT_COMPLETE_THRESHOLD {
            return vec![format!(
                "{PROJECT_CONTEXT_MD} is incomplete ({}/{} sections)",
                self.sections_found.len(),
                self.total_sections
            )];
        }
        Vec::new()
    }
}

pub fn check(root: &Path) -> ProjectContextResult {
    let path = paths::project_context_path(root);
    let total_sections = CONTEXT_SECTION_HEADERS.len();

    if !path.exists() {
        tracing::info!("project context: 0.0/100 (missing)");
        return ProjectContextResult {
            total_sections,
            ..ProjectContextResult::default()
        };
    }

    let content = match read_lossy(&path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("failed to read {}: {e}", path.display());
            return ProjectContextResult {
                exists: true,
                total_sections,
                error: Some(e.to_string()),
                ..ProjectContextResult::default()
            };
        }
    };

    let sections_found = ExactMatcher.find(&content, &CONTEXT_SECTION_HEADERS);
    let score = super::percentage(sections_found.len(), total_sections);

    tracing::info!("project context: {score:.1}/100");

    ProjectContextResult {
        score,
        exists: true,
        sections_found: sections_found.into_iter().map(str::to_string).collect(),
        total_sections,
        content_length: content.chars().count(),
        error: None,
    }
}
