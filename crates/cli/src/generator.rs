//! Offline reply generator
//!
//! Stands in for a language model: the reply is the state directive itself,
//! and post-link intent comes from a few keywords.

use async_trait::async_trait;
use setter_core::{PostLinkIntent, ReplyGenerator, ReplyRequest, Result};

#[derive(Debug, Clone, Default)]
pub struct TemplateReplyGenerator;

#[async_trait]
impl ReplyGenerator for TemplateReplyGenerator {
    async fn generate(&self, request: ReplyRequest) -> Result<String> {
        tracing::trace!(
            history = request.history.len(),
            "Template reply for {} chars of input",
            request.user_message.len()
        );
        Ok(request.state_directive)
    }

    async fn classify_post_link_intent(&self, message: &str) -> Result<PostLinkIntent> {
        Ok(classify_by_keywords(message))
    }

    fn name(&self) -> &str {
        "template"
    }
}

fn classify_by_keywords(message: &str) -> PostLinkIntent {
    let lower = message.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has(&["bought", "purchased", "paid", "signed up", "just got it"]) {
        PostLinkIntent::Bought
    } else if has(&["doesn't work", "doesnt work", "broken", "error", "won't load", "wont load"]) {
        PostLinkIntent::TechIssue
    } else if has(&["discount", "cheaper", "too expensive", "payment plan", "deal"]) {
        PostLinkIntent::Negotiation
    } else if has(&["not sure", "think about it", "maybe", "later"]) {
        PostLinkIntent::Hesitation
    } else if lower.trim_end().ends_with('?') {
        PostLinkIntent::Question
    } else {
        PostLinkIntent::OffTopic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_is_directive() {
        let reply = TemplateReplyGenerator
            .generate(ReplyRequest {
                system_directive: "You are Jamie.".to_string(),
                state_directive: "Ask where they live.".to_string(),
                user_message: "sure".to_string(),
                history: Vec::new(),
            })
            .await
            .unwrap();
        assert_eq!(reply, "Ask where they live.");
    }

    #[test]
    fn test_intent_keywords() {
        assert_eq!(classify_by_keywords("just bought it!"), PostLinkIntent::Bought);
        assert_eq!(classify_by_keywords("the link doesn't work"), PostLinkIntent::TechIssue);
        assert_eq!(classify_by_keywords("any discount?"), PostLinkIntent::Negotiation);
        assert_eq!(classify_by_keywords("let me think about it"), PostLinkIntent::Hesitation);
        assert_eq!(classify_by_keywords("how long is it?"), PostLinkIntent::Question);
        assert_eq!(classify_by_keywords("nice weather"), PostLinkIntent::OffTopic);
    }
}
