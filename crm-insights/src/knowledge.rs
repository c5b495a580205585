use crate::error::{InsightsError, InsightsResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub const EMPTY_KNOWLEDGE: &str = "# Knowledge base is empty!";

/// Markdown documents concatenated into a single system prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    content: String,
    documents: Vec<PathBuf>
}

impl KnowledgeBase {
    /// Reads every `*.md` below `dir`, sorted by path. A missing directory
    /// yields an empty knowledge base.
    pub fn load(dir: &Path) -> InsightsResult<Self> {
        let mut documents = Vec::new();

        if dir.is_dir() {
            for entry in WalkDir::new(dir) {
                let entry = entry.map_err(|e| InsightsError::Knowledge(e.into()))?;
                let is_markdown = entry.path().extension().is_some_and(|ext| ext == "md");
                if entry.file_type().is_file() && is_markdown {
                    documents.push(entry.into_path());
                }
            }
        } else {
            debug!(dir = %dir.display(), "Knowledge directory not found");
        }

        documents.sort();

        if documents.is_empty() {
            return Ok(Self::empty());
        }

        let mut content = String::new();
        for path in &documents {
            let relative = path.strip_prefix(dir).unwrap_or(path);
            content.push_str(&format!("<!-- {} -->\n", relative.display()));
            content.push_str(&std::fs::read_to_string(path)?);
            content.push_str("\n\n");
        }

        info!(documents = documents.len(), bytes = content.len(), "Loaded knowledge base");
        Ok(Self { content, documents })
    }

    pub fn empty() -> Self {
        Self {
            content: EMPTY_KNOWLEDGE.to_string(),
            documents: Vec::new()
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn documents(&self) -> &[PathBuf] {
        &self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
