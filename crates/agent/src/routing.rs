//! Routing and product selection
//!
//! Once the funnel lands on a routing state the router picks the ticket and
//! the product and renders the offer message. Product lookup is total: any
//! tag without a product resolves to the catalog's default product.

use serde::{Deserialize, Serialize};
use setter_config::replies::render;
use setter_config::{CatalogConfig, ReplyTemplates};
use setter_core::{AttributeStore, ConversationState, ProblemTag, Product};
use std::collections::HashMap;
use std::sync::Arc;

/// Products keyed by problem tag
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    by_tag: HashMap<ProblemTag, Product>,
    default_product: Product,
}

impl ProductCatalog {
    /// Build from config. The first product for a tag wins.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let mut by_tag: HashMap<ProblemTag, Product> = HashMap::new();

        for product in &config.products {
            if product.problem_tag.is_general() {
                tracing::warn!(
                    product = %product.id,
                    "Product tagged GENERAL ignored, the default product covers GENERAL"
                );
                continue;
            }
            if let Some(existing) = by_tag.get(&product.problem_tag) {
                tracing::warn!(
                    tag = %product.problem_tag,
                    kept = %existing.id,
                    ignored = %product.id,
                    "Duplicate product for tag"
                );
                continue;
            }
            by_tag.insert(product.problem_tag, product.clone());
        }

        Self {
            by_tag,
            default_product: config.default_product.clone(),
        }
    }

    pub fn builtin() -> Self {
        Self::from_config(&CatalogConfig::builtin())
    }

    /// Product for a tag, falling back to the default product
    pub fn product_for(&self, tag: ProblemTag) -> &Product {
        self.by_tag.get(&tag).unwrap_or(&self.default_product)
    }

    pub fn default_product(&self) -> &Product {
        &self.default_product
    }

    /// Number of tag-specific products
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Stored problem tag, GENERAL when absent
pub fn resolve_problem(attrs: &AttributeStore) -> ProblemTag {
    attrs.primary_problem_or_general()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ticket {
    /// Matched premium product
    High,
    /// Self-guided course library
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub ticket: Ticket,
    pub product: Product,
}

/// Picks and presents the offer for routing states
#[derive(Debug, Clone)]
pub struct Router {
    catalog: Arc<ProductCatalog>,
    replies: ReplyTemplates,
}

impl Router {
    pub fn new(catalog: Arc<ProductCatalog>, replies: ReplyTemplates) -> Self {
        Self { catalog, replies }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Decision for a routing state, `None` for every other state
    pub fn decide(&self, state: ConversationState, attrs: &AttributeStore) -> Option<RoutingDecision> {
        let decision = match state {
            ConversationState::RouteHighTicket => {
                let tag = resolve_problem(attrs);
                RoutingDecision {
                    ticket: Ticket::High,
                    product: self.catalog.product_for(tag).clone(),
                }
            }
            ConversationState::RouteLowTicket => RoutingDecision {
                ticket: Ticket::Low,
                product: self.catalog.default_product().clone(),
            },
            _ => return None,
        };

        tracing::info!(
            ticket = ?decision.ticket,
            product = %decision.product.id,
            "Routing decision"
        );
        Some(decision)
    }

    pub fn offer_message(&self, decision: &RoutingDecision) -> String {
        let template = match decision.ticket {
            Ticket::High => &self.replies.high_ticket_offer,
            Ticket::Low => &self.replies.low_ticket_offer,
        };
        render(
            template,
            &[
                ("product_name", decision.product.name.as_str()),
                ("product_link", decision.product.link.as_str()),
                ("discount_code", self.replies.discount_code.as_str()),
            ],
        )
    }
}
