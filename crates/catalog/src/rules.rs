//! SKU substitution and accessory bundling tables.
//!
//! Both are configuration data handed to the resolver at construction, so a
//! deployment (or a test) can swap them without touching the resolver.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::index::COMPOSITE_DELIMITER;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuRules {
    /// Alternate/display token → canonical SKU.
    #[serde(default)]
    substitutions: BTreeMap<String, String>,
    /// Frame SKU → SKU of the accessory that ships with it.
    #[serde(default)]
    accessories: BTreeMap<String, String>,
}

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to parse sku rules: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid sku rule key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },
}

impl SkuRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables of the Naos Optics storefront.
    ///
    /// Goggle SKUs are too long to encode as three literal parts, so the goggle
    /// name stands in for the frame SKU. Every frame ships with a clear lens.
    pub fn storefront_defaults() -> Self {
        Self::new()
            .with_substitution("SELVA", "6095936367383")
            .with_substitution("VIRTAUS", "6095930196101")
            // SELVA frame
            .with_accessory("6095936367383", "6095946877810")
            // VIRTAUS frame
            .with_accessory("6095930196101", "6095935353387")
            // VUORI frames (Glossy White, Matte Black, Matte Black old, Matte Blue,
            // Matte Desert, Matte Green, Matte Pink) share one clear lens
            .with_accessory("6095926198102", "6095950193135")
            .with_accessory("6095927077093", "6095950193135")
            .with_accessory("6095930865847", "6095950193135")
            .with_accessory("6095939782718", "6095950193135")
            .with_accessory("6095930631626", "6095950193135")
            .with_accessory("6095926186161", "6095950193135")
            .with_accessory("6095927234274", "6095950193135")
    }

    /// Parse rules from JSON: `{"substitutions": {..}, "accessories": {..}}`.
    pub fn from_json(raw: &str) -> Result<Self, RulesError> {
        let rules: Self = serde_json::from_str(raw)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn with_substitution(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.substitutions.insert(alias.into(), canonical.into());
        self
    }

    pub fn with_accessory(mut self, trigger: impl Into<String>, accessory: impl Into<String>) -> Self {
        self.accessories.insert(trigger.into(), accessory.into());
        self
    }

    pub fn substitution(&self, sku: &str) -> Option<&str> {
        self.substitutions.get(sku).map(String::as_str)
    }

    pub fn accessory(&self, sku: &str) -> Option<&str> {
        self.accessories.get(sku).map(String::as_str)
    }

    pub fn substitutions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.substitutions
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn accessories(&self) -> impl Iterator<Item = (&str, &str)> {
        self.accessories.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys are matched against single parts of a split composite SKU, so a
    /// key that is empty or contains the delimiter could never match.
    pub fn validate(&self) -> Result<(), RulesError> {
        for key in self.substitutions.keys().chain(self.accessories.keys()) {
            if key.is_empty() {
                return Err(RulesError::InvalidKey {
                    key: key.clone(),
                    reason: "key cannot be empty",
                });
            }
            if key.contains(COMPOSITE_DELIMITER) {
                return Err(RulesError::InvalidKey {
                    key: key.clone(),
                    reason: "key cannot contain the composite delimiter",
                });
            }
        }
        Ok(())
    }
}
