// Copyright 2025 Cowboy AI, LLC.

//! Catalog settings
//!
//! Settings are plain serde structs. Every field has a default, so a
//! settings document only needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{CommissionRate, NewCategory, State};
use crate::errors::{CatalogError, CatalogResult};

/// Settings for attribute queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSettings {
    /// Upper bound on the page size of paged attribute queries
    pub max_page_size: u32,
}

impl Default for AttributeSettings {
    fn default() -> Self {
        Self { max_page_size: 100 }
    }
}

/// Defaults applied to new categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySettings {
    /// State of categories created without an explicit state
    pub default_state: State,
    /// Commission of categories created without an explicit rate, in basis points
    pub default_commission_rate_bps: u16,
}

impl Default for CategorySettings {
    fn default() -> Self {
        Self {
            default_state: State::Enabled,
            default_commission_rate_bps: 0,
        }
    }
}

impl CategorySettings {
    /// Default commission as a checked rate
    pub fn default_commission_rate(&self) -> CatalogResult<CommissionRate> {
        CommissionRate::from_basis_points(self.default_commission_rate_bps)
    }

    /// Platform category input carrying the configured defaults.
    pub fn new_category(
        &self,
        name: impl Into<String>,
        icon: impl Into<String>,
        description: impl Into<String>,
    ) -> CatalogResult<NewCategory> {
        Ok(NewCategory {
            seller_id: None,
            name: name.into(),
            icon: icon.into(),
            image: None,
            commission_rate: self.default_commission_rate()?,
            description: description.into(),
            state: self.default_state,
        })
    }
}

/// All catalog settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Attribute query settings
    pub attributes: AttributeSettings,
    /// Category defaults
    pub categories: CategorySettings,
}

impl CatalogSettings {
    /// Parse settings from a JSON document and validate them.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let settings: CatalogSettings = serde_json::from_str(json)?;
        settings.validate()?;
        debug!(?settings, "Parsed catalog settings");
        Ok(settings)
    }

    /// Read settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| CatalogError::InvalidOperation {
            reason: format!("Failed to read settings from {}: {e}", path.display()),
        })?;
        let settings = Self::from_json_str(&json)?;
        info!(path = %path.display(), "Loaded catalog settings");
        Ok(settings)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.attributes.max_page_size == 0 {
            return Err(CatalogError::invalid_argument(
                "attributes.max_page_size",
                "max page size must be at least 1",
            ));
        }
        self.categories.default_commission_rate()?;
        Ok(())
    }
}
