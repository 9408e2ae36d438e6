//! Product catalog configuration
//!
//! Loaded from `catalog.yaml`:
//!
//! ```yaml
//! default_product:
//!   id: general_dating_guide
//!   name: How to Make Online Dating Suck Less
//!   link: https://www.jamiedatecoaching.com/courses
//!   problem_tag: GENERAL
//! products:
//!   - id: banter_blueprint
//!     name: Banter Blueprint
//!     link: https://jamie-date.mykajabi.com/the-banter-blueprint
//!     price: "$147"
//!     problem_tag: TEXTING
//! ```
//!
//! A missing file falls back to the built-in table.

use serde::{Deserialize, Serialize};
use setter_core::{Product, ProblemTag};
use std::path::Path;

use crate::constants::offers;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Returned for GENERAL and for any tag without a product
    pub default_product: Product,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CatalogConfig {
    /// The shipped product table
    pub fn builtin() -> Self {
        Self {
            default_product: Product::new(
                "general_dating_guide",
                "How to Make Online Dating Suck Less",
                offers::COURSE_LIBRARY_LINK,
                None,
                ProblemTag::General,
            ),
            products: vec![
                Product::new(
                    "banter_blueprint",
                    "Banter Blueprint",
                    "https://jamie-date.mykajabi.com/the-banter-blueprint",
                    Some("$147"),
                    ProblemTag::Texting,
                ),
                Product::new(
                    "online_dating_mastery",
                    "Online Dating Mastery",
                    "https://jamie-date.mykajabi.com/online-dating-mastery-2",
                    Some("$174"),
                    ProblemTag::Matches,
                ),
                Product::new(
                    "cold_approach_mastery",
                    "Cold Approach Mastery",
                    "https://jamie-date.mykajabi.com/cold-approach-training",
                    Some("$97"),
                    ProblemTag::Approach,
                ),
                Product::new(
                    "creating_spark",
                    "Creating Spark",
                    "https://jamie-date.mykajabi.com/creating-spark-course",
                    Some("$147"),
                    ProblemTag::Spark,
                ),
                Product::new(
                    "sexual_escalation",
                    "Secrets of Sexual Escalation",
                    "https://jamie-date.mykajabi.com/offers/DX9qJe9C/checkout",
                    Some("$75"),
                    ProblemTag::Escalation,
                ),
                Product::new(
                    "golden_guide",
                    "Golden Guide",
                    "https://jamie-date.mykajabi.com/goldenguide",
                    Some("$147"),
                    ProblemTag::Confidence,
                ),
            ],
        }
    }

    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let catalog: Self = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load from a YAML file, or use the built-in table if the file is missing
    pub fn load_or_builtin<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Catalog file not found, using built-in catalog");
            return Ok(Self::builtin());
        }
        let catalog = Self::load(path)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.products.len(),
            "Loaded product catalog"
        );
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for product in std::iter::once(&self.default_product).chain(&self.products) {
            if product.id.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "catalog.products.id".to_string(),
                    message: "Product id must not be empty".to_string(),
                });
            }
            if product.link.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("catalog.{}.link", product.id),
                    message: "Product link must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_covers_every_specific_tag() {
        let catalog = CatalogConfig::builtin();
        for tag in ProblemTag::ALL.iter().filter(|t| !t.is_general()) {
            assert_eq!(
                catalog.products.iter().filter(|p| p.problem_tag == *tag).count(),
                1,
                "{} should map to exactly one product",
                tag
            );
        }
        assert_eq!(catalog.default_product.problem_tag, ProblemTag::General);
        assert_eq!(catalog.default_product.price, None);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_load_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
default_product:
  id: library
  name: Course Library
  link: https://example.com/courses
  problem_tag: GENERAL
products:
  - id: texting_course
    name: Texting Course
    link: https://example.com/texting
    price: "$10"
    problem_tag: texting
"#
        )
        .unwrap();

        let catalog = CatalogConfig::load(file.path()).unwrap();
        assert_eq!(catalog.default_product.id, "library");
        assert_eq!(catalog.products.len(), 1);
        assert_eq!(catalog.products[0].problem_tag, ProblemTag::Texting);
        assert_eq!(catalog.products[0].price.as_deref(), Some("$10"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CatalogConfig::load_or_builtin(dir.path().join("missing.yaml")).unwrap();
        assert_eq!(catalog, CatalogConfig::builtin());
        assert!(CatalogConfig::load(dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_empty_link_rejected() {
        let mut catalog = CatalogConfig::builtin();
        catalog.products[0].link = " ".to_string();
        assert!(matches!(
            catalog.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_shipped_catalog_matches_builtin() {
        let shipped: CatalogConfig =
            serde_yaml::from_str(include_str!("../../../config/catalog.yaml")).unwrap();
        assert_eq!(shipped, CatalogConfig::builtin());
    }
}
