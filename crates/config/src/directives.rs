//! File-backed directive loader
//!
//! Directive text lives in `{dir}/{key}.txt`, one file per state or intent
//! (`qual_finance.txt`, `post_link_question.txt`, ...). Files are read once
//! and cached. Keys that cannot be resolved yield the configured filler.

use parking_lot::RwLock;
use setter_core::{DirectiveLoader, DEFAULT_DIRECTIVE};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct FileDirectiveLoader {
    dir: PathBuf,
    default: String,
    cache: RwLock<HashMap<String, String>>,
}

impl FileDirectiveLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            default: DEFAULT_DIRECTIVE.to_string(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Filler returned for unresolvable keys
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Drop cached text so edited files are picked up
    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }

    fn read(&self, key: &str) -> Option<String> {
        // keys are plain names, never paths
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            tracing::warn!(key = %key, "Rejected directive key");
            return None;
        }

        let path = self.dir.join(format!("{}.txt", key));
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(text.trim().to_string()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Directive file unavailable");
                None
            }
        }
    }
}

impl DirectiveLoader for FileDirectiveLoader {
    fn load(&self, key: &str) -> String {
        if let Some(text) = self.cache.read().get(key) {
            return text.clone();
        }

        match self.read(key) {
            Some(text) => {
                self.cache.write().insert(key.to_string(), text.clone());
                text
            }
            None => self.default.clone(),
        }
    }
}
