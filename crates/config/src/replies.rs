//! Fixed reply templates
//!
//! Replies the funnel sends without asking the reply generator: the safety
//! refusal, canned answers to side questions, and the two offer messages.
//! Offer templates use `{product_name}`, `{product_link}` and
//! `{discount_code}` placeholders.

use serde::{Deserialize, Serialize};

use crate::constants::offers;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyTemplates {
    /// Sent instead of engaging with explicit content
    pub safety_refusal: String,
    /// Answer to "are you real" / "is this a bot"
    pub identity_reply: String,
    /// Answer to "why are you asking"
    pub why_asking_reply: String,
    /// Appended to canned side-question replies
    pub off_topic_suffix: String,
    pub high_ticket_offer: String,
    pub low_ticket_offer: String,
    pub discount_code: String,
}

impl Default for ReplyTemplates {
    fn default() -> Self {
        Self {
            safety_refusal: "I'm not the right person for this...".to_string(),
            identity_reply: "oh no, sorry, i'm amanda, her assistant. i monitor her social \
                             accounts. it's nice to meet you :)"
                .to_string(),
            why_asking_reply: "just trying to get a better picture of where you're at so i \
                               can see if we can actually help."
                .to_string(),
            off_topic_suffix: " anyway... back to what we were saying.".to_string(),
            high_ticket_offer: "Perfect. Based on what you told me, you're a great fit for this \
                                specific program.\n\nIt's called **{product_name}**, and it fixes \
                                exactly what we talked about.\n\nYou can grab it here (and use \
                                code {discount_code} for 10% off):\n{product_link}"
                .to_string(),
            low_ticket_offer: "Got it. Based on where you're at, I want to make sure you have the \
                               right resources without overcommitting.\n\nI have a full library \
                               of self-guided courses here. Take a look and see which one feels \
                               right for you:\n{product_link}\n\n(You can use code \
                               {discount_code} for 10% off too!)"
                .to_string(),
            discount_code: offers::DISCOUNT_CODE.to_string(),
        }
    }
}

impl ReplyTemplates {
    /// Canned side-question reply with the steer-back suffix
    pub fn with_suffix(&self, reply: &str) -> String {
        format!("{}{}", reply, self.off_topic_suffix)
    }
}

/// Replace `{name}` placeholders. Unknown placeholders are left as-is.
pub fn render(template: &str, variables: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in variables {
        let pattern = format!("{{{}}}", key);
        result = result.replace(&pattern, value);
    }
    result
}
