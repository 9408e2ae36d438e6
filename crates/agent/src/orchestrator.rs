//! Turn orchestration
//!
//! [`FunnelAgent`] runs one inbound message through the gates, the transition
//! engine and either the router or the reply generator. The engine itself
//! never sees unsafe or side-question messages, except that abuse in `ENTRY`
//! always reaches the boundary check.

use serde::{Deserialize, Serialize};
use setter_config::{CatalogConfig, FileDirectiveLoader, ReplyTemplates, Settings};
use setter_core::{
    AttributeStore, ConversationState, DirectiveLoader, FunnelPhase, HistoryStore,
    ReplyGenerator, ReplyRequest, Result, Turn,
};
use setter_text_processing::{extract_age, identity_question, is_unsafe, normalize, OffTopic};
use setter_text_processing::signals::{infer_problem_tag, is_abusive};
use std::sync::Arc;

use crate::routing::{ProductCatalog, Router, RoutingDecision};
use crate::scoring::score_for;
use crate::transitions::TransitionEngine;

/// One inbound message plus the conversation's persisted state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnInput {
    pub user_id: String,
    pub message: String,
    pub current_state: ConversationState,
    #[serde(default)]
    pub attributes: AttributeStore,
}

impl TurnInput {
    pub fn new(
        user_id: impl Into<String>,
        message: impl Into<String>,
        current_state: ConversationState,
        attributes: AttributeStore,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
            current_state,
            attributes,
        }
    }
}

/// Outcome of one turn; the caller persists `next_state` and `attributes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub reply: String,
    pub next_state: ConversationState,
    pub attributes: AttributeStore,
    pub progress_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<RoutingDecision>,
}

/// Drives the funnel for any number of independent conversations
pub struct FunnelAgent {
    engine: Arc<TransitionEngine>,
    router: Router,
    generator: Arc<dyn ReplyGenerator>,
    directives: Arc<dyn DirectiveLoader>,
    history: Arc<dyn HistoryStore>,
    replies: ReplyTemplates,
    system_directive_key: String,
}

impl FunnelAgent {
    /// Agent with the built-in catalog and default reply templates
    pub fn new(
        generator: Arc<dyn ReplyGenerator>,
        directives: Arc<dyn DirectiveLoader>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        let replies = ReplyTemplates::default();
        Self {
            engine: Arc::new(TransitionEngine::new()),
            router: Router::new(Arc::new(ProductCatalog::builtin()), replies.clone()),
            generator,
            directives,
            history,
            replies,
            system_directive_key: setter_config::constants::agent::SYSTEM_DIRECTIVE_KEY
                .to_string(),
        }
    }

    /// Wire everything from loaded settings.
    ///
    /// A missing catalog file falls back to the built-in products; a
    /// malformed one is an error.
    pub fn from_settings(
        settings: &Settings,
        generator: Arc<dyn ReplyGenerator>,
        history: Arc<dyn HistoryStore>,
    ) -> Result<Self> {
        let catalog = CatalogConfig::load_or_builtin(&settings.paths.catalog_path)?;

        let mut loader = FileDirectiveLoader::new(&settings.paths.directives_dir);
        if let Some(default) = &settings.agent.default_directive {
            loader = loader.with_default(default.clone());
        }

        tracing::info!(
            products = catalog.products.len(),
            directives_dir = %settings.paths.directives_dir,
            generator = generator.name(),
            "Funnel agent configured"
        );

        Ok(Self::new(generator, Arc::new(loader), history)
            .with_catalog(ProductCatalog::from_config(&catalog))
            .with_replies(settings.replies.clone())
            .with_system_directive_key(settings.agent.system_directive_key.clone()))
    }

    pub fn with_catalog(mut self, catalog: ProductCatalog) -> Self {
        self.router = Router::new(Arc::new(catalog), self.replies.clone());
        self
    }

    /// Replace the fixed replies. The router keeps its catalog.
    pub fn with_replies(mut self, replies: ReplyTemplates) -> Self {
        let catalog = Arc::new(self.router.catalog().clone());
        self.router = Router::new(catalog, replies.clone());
        self.replies = replies;
        self
    }

    pub fn with_system_directive_key(mut self, key: impl Into<String>) -> Self {
        self.system_directive_key = key.into();
        self
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Process one message.
    ///
    /// Only reply generation and history errors propagate; every
    /// classification step is total.
    pub async fn process_message(&self, input: TurnInput) -> Result<TurnResult> {
        let TurnInput {
            user_id,
            message,
            current_state,
            mut attributes,
        } = input;

        let text = normalize(&message);

        // abuse in ENTRY counts toward the hard stop whatever else the message carries
        let entry_abuse = current_state == ConversationState::Entry && is_abusive(&text);
        if entry_abuse {
            tracing::debug!(user_id = %user_id, "Entry abuse bypasses side gates");
        } else {
            if is_unsafe(&message) {
                tracing::info!(user_id = %user_id, state = %current_state, "Unsafe message refused");
                return Ok(self.unchanged(
                    self.replies.safety_refusal.clone(),
                    current_state,
                    attributes,
                ));
            }

            if let Some(kind) = identity_question(&message) {
                let canned = match kind {
                    OffTopic::Identity => &self.replies.identity_reply,
                    OffTopic::WhyAsking => &self.replies.why_asking_reply,
                };
                let reply = self.replies.with_suffix(canned);
                tracing::debug!(user_id = %user_id, kind = ?kind, "Side question answered");
                self.record(&user_id, &message, &reply).await?;
                return Ok(self.unchanged(reply, current_state, attributes));
            }
        }

        if current_state.phase() == FunnelPhase::Qualification && attributes.age == 0 {
            if let Some(age) = extract_age(&text) {
                attributes.age = age;
                tracing::debug!(user_id = %user_id, age, "Age recorded");
            }
        }

        if attributes.primary_problem.is_none() {
            attributes.set_primary_problem_if_absent(infer_problem_tag(&text));
        }

        let next_state = self
            .engine
            .next_state(current_state, &message, &mut attributes);

        let routing = self.router.decide(next_state, &attributes);
        let reply = match &routing {
            Some(decision) => self.router.offer_message(decision),
            None => {
                let directive_key = if next_state == ConversationState::PostLinkFlow {
                    let intent = self.generator.classify_post_link_intent(&message).await?;
                    tracing::debug!(user_id = %user_id, intent = ?intent, "Post-link intent");
                    intent.directive_key()
                } else {
                    next_state.directive_key()
                };

                let request = ReplyRequest {
                    system_directive: self.directives.load(&self.system_directive_key),
                    state_directive: self.directives.load(directive_key),
                    user_message: message.clone(),
                    history: self.history.recent(&user_id).await?,
                };
                self.generator.generate(request).await?
            }
        };

        self.record(&user_id, &message, &reply).await?;

        Ok(TurnResult {
            reply,
            next_state,
            progress_score: score_for(next_state),
            attributes,
            routing,
        })
    }

    async fn record(&self, user_id: &str, message: &str, reply: &str) -> Result<()> {
        self.history.append(user_id, Turn::user(message)).await?;
        self.history.append(user_id, Turn::assistant(reply)).await
    }

    fn unchanged(
        &self,
        reply: String,
        state: ConversationState,
        attributes: AttributeStore,
    ) -> TurnResult {
        TurnResult {
            reply,
            next_state: state,
            progress_score: score_for(state),
            attributes,
            routing: None,
        }
    }
}
