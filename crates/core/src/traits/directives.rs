//! Directive text lookup

use std::collections::HashMap;

/// Filler used when a directive key cannot be resolved
pub const DEFAULT_DIRECTIVE: &str = "Respond naturally and keep the conversation moving.";

/// Maps a directive key (`qual_finance`, `post_link_question`, ...) to text.
///
/// Never fails: unresolvable keys yield a default filler.
pub trait DirectiveLoader: Send + Sync {
    fn load(&self, key: &str) -> String;
}

/// In-memory loader, mostly for tests and the built-in fallback
#[derive(Debug, Clone, Default)]
pub struct StaticDirectiveLoader {
    directives: HashMap<String, String>,
    default: Option<String>,
}

impl StaticDirectiveLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.directives.insert(key.into(), text.into());
        self
    }

    pub fn with_default(mut self, text: impl Into<String>) -> Self {
        self.default = Some(text.into());
        self
    }
}

impl DirectiveLoader for StaticDirectiveLoader {
    fn load(&self, key: &str) -> String {
        match self.directives.get(key) {
            Some(text) => text.clone(),
            None => {
                tracing::warn!(key = %key, "Directive not found, using default");
                self.default
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_yields_filler() {
        let loader = StaticDirectiveLoader::new().with("rapport", "Be curious.");
        assert_eq!(loader.load("rapport"), "Be curious.");
        assert_eq!(loader.load("nope"), DEFAULT_DIRECTIVE);

        let loader = loader.with_default("Keep going.");
        assert_eq!(loader.load("nope"), "Keep going.");
    }
}
