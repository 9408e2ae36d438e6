//! Product offered at the end of the funnel

use serde::{Deserialize, Serialize};

use crate::problem::ProblemTag;

/// A purchasable program, tied to exactly one problem tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub problem_tag: ProblemTag,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        link: impl Into<String>,
        price: Option<&str>,
        problem_tag: ProblemTag,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            link: link.into(),
            price: price.map(str::to_string),
            problem_tag,
        }
    }
}
