//! Reply generation trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::conversation::Turn;
use crate::Result;

/// Everything a generator needs to write one reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyRequest {
    /// Persona-level instructions, same for every turn
    pub system_directive: String,
    /// Instructions for the state the conversation just moved into
    pub state_directive: String,
    pub user_message: String,
    /// Oldest first
    pub history: Vec<Turn>,
}

/// What a user means after the offer link has been sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostLinkIntent {
    Bought,
    Question,
    Hesitation,
    TechIssue,
    Negotiation,
    OffTopic,
}

impl PostLinkIntent {
    pub const ALL: [PostLinkIntent; 6] = [
        PostLinkIntent::Bought,
        PostLinkIntent::Question,
        PostLinkIntent::Hesitation,
        PostLinkIntent::TechIssue,
        PostLinkIntent::Negotiation,
        PostLinkIntent::OffTopic,
    ];

    pub fn directive_key(&self) -> &'static str {
        match self {
            PostLinkIntent::Bought => "post_link_bought",
            PostLinkIntent::Question => "post_link_question",
            PostLinkIntent::Hesitation => "post_link_hesitation",
            PostLinkIntent::TechIssue => "post_link_tech",
            PostLinkIntent::Negotiation => "post_link_negotiation",
            PostLinkIntent::OffTopic => "post_link_off_topic",
        }
    }

    /// Parse a single-word label as returned by a classifier.
    ///
    /// Anything unrecognized is treated as off-topic.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "BOUGHT" => PostLinkIntent::Bought,
            "QUESTION" => PostLinkIntent::Question,
            "HESITATION" => PostLinkIntent::Hesitation,
            "TECH_ISSUE" | "TECH" => PostLinkIntent::TechIssue,
            "NEGOTIATION" => PostLinkIntent::Negotiation,
            _ => PostLinkIntent::OffTopic,
        }
    }
}

/// Free-text reply generation
///
/// # Example
///
/// ```ignore
/// let generator: Arc<dyn ReplyGenerator> = Arc::new(TemplateReplyGenerator::default());
/// let reply = generator.generate(request).await?;
/// ```
#[async_trait]
pub trait ReplyGenerator: Send + Sync + 'static {
    /// Write the reply for one turn
    async fn generate(&self, request: ReplyRequest) -> Result<String>;

    /// Classify a message sent after the offer link.
    ///
    /// Called once per turn, only while in `POST_LINK_FLOW`.
    async fn classify_post_link_intent(&self, message: &str) -> Result<PostLinkIntent>;

    /// Name for logging
    fn name(&self) -> &str {
        "reply-generator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_keys() {
        assert_eq!(PostLinkIntent::Bought.directive_key(), "post_link_bought");
        assert_eq!(PostLinkIntent::TechIssue.directive_key(), "post_link_tech");
        for intent in PostLinkIntent::ALL {
            assert!(intent.directive_key().starts_with("post_link_"));
        }
    }

    #[test]
    fn test_from_label() {
        assert_eq!(PostLinkIntent::from_label("bought"), PostLinkIntent::Bought);
        assert_eq!(PostLinkIntent::from_label(" TECH_ISSUE\n"), PostLinkIntent::TechIssue);
        assert_eq!(PostLinkIntent::from_label("no idea"), PostLinkIntent::OffTopic);
    }

    struct LabelGenerator;

    #[async_trait]
    impl ReplyGenerator for LabelGenerator {
        async fn generate(&self, request: ReplyRequest) -> Result<String> {
            Ok(format!("{} / {}", request.state_directive, request.user_message))
        }

        async fn classify_post_link_intent(&self, message: &str) -> Result<PostLinkIntent> {
            Ok(PostLinkIntent::from_label(message))
        }
    }

    #[tokio::test]
    async fn test_trait_object() {
        let generator: std::sync::Arc<dyn ReplyGenerator> = std::sync::Arc::new(LabelGenerator);
        assert_eq!(generator.name(), "reply-generator");

        let reply = generator
            .generate(ReplyRequest {
                system_directive: String::new(),
                state_directive: "be brief".to_string(),
                user_message: "hi".to_string(),
                history: vec![Turn::user("earlier")],
            })
            .await
            .unwrap();
        assert_eq!(reply, "be brief / hi");

        let intent = generator.classify_post_link_intent("negotiation").await.unwrap();
        assert_eq!(intent, PostLinkIntent::Negotiation);
    }
}
