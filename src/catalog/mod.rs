// Copyright 2025 Cowboy AI, LLC.

//! Catalog entities: categories, brands, attributes and the links between them.
//!
//! Every entity is built through validated setters and deserialized through
//! the same checks, so an instance that exists always satisfies its field
//! constraints.

mod attribute;
mod brand;
mod category;

pub use attribute::{Attribute, AttributeCategory, AttributeValue};
pub use brand::{Brand, CategoryBrand, NewBrand};
pub use category::{Category, NewCategory};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, CatalogResult};

/// Publication state of a catalog entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum State {
    /// Hidden from shoppers
    Disabled = 0,
    /// Visible to shoppers
    #[default]
    Enabled = 1,
}

impl State {
    /// True when the entry is visible
    pub fn is_enabled(self) -> bool {
        matches!(self, State::Enabled)
    }
}

impl TryFrom<u8> for State {
    type Error = CatalogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(State::Disabled),
            1 => Ok(State::Enabled),
            other => Err(CatalogError::invalid_argument(
                "state",
                format!("unknown state {other}"),
            )),
        }
    }
}

/// Commission a platform takes on a category, stored in basis points so
/// that `0..=10000` covers the ratio range `0..=1` exactly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct CommissionRate(u16);

impl CommissionRate {
    /// One whole, i.e. a ratio of 1.
    pub const MAX_BASIS_POINTS: u16 = 10_000;

    /// Zero commission
    pub const ZERO: CommissionRate = CommissionRate(0);

    /// Create a rate from basis points.
    pub fn from_basis_points(bps: u16) -> CatalogResult<Self> {
        if bps > Self::MAX_BASIS_POINTS {
            return Err(CatalogError::invalid_argument(
                "commission_rate",
                "Category commission_rate can not be less than 0 and can not be more than 1",
            ));
        }
        Ok(Self(bps))
    }

    /// Create a rate from a ratio in `0.0..=1.0`, rounded to the nearest basis point.
    pub fn from_ratio(ratio: f64) -> CatalogResult<Self> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(CatalogError::invalid_argument(
                "commission_rate",
                "Category commission_rate can not be less than 0 and can not be more than 1",
            ));
        }
        Self::from_basis_points((ratio * f64::from(Self::MAX_BASIS_POINTS)).round() as u16)
    }

    /// Rate in basis points
    pub fn basis_points(self) -> u16 {
        self.0
    }

    /// Rate as a ratio
    pub fn as_ratio(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX_BASIS_POINTS)
    }
}

impl TryFrom<u16> for CommissionRate {
    type Error = CatalogError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_basis_points(value)
    }
}

impl From<CommissionRate> for u16 {
    fn from(rate: CommissionRate) -> Self {
        rate.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_from_stored_byte() {
        assert_eq!(State::try_from(0).unwrap(), State::Disabled);
        assert_eq!(State::try_from(1).unwrap(), State::Enabled);
        assert!(State::try_from(2).is_err());
        assert!(State::default().is_enabled());
    }

    #[test]
    fn commission_rate_bounds() {
        assert_eq!(CommissionRate::from_ratio(0.0).unwrap(), CommissionRate::ZERO);
        assert_eq!(CommissionRate::from_ratio(1.0).unwrap().basis_points(), 10_000);
        assert_eq!(CommissionRate::from_ratio(0.125).unwrap().basis_points(), 1_250);
        assert!(CommissionRate::from_ratio(-0.01).is_err());
        assert!(CommissionRate::from_ratio(1.01).is_err());
        assert!(CommissionRate::from_ratio(f64::NAN).is_err());
        assert!(CommissionRate::from_basis_points(10_001).is_err());
        assert!((CommissionRate::from_basis_points(250).unwrap().as_ratio() - 0.025).abs() < 1e-9);
    }

    #[test]
    fn commission_rate_deserialization_is_checked() {
        let rate: CommissionRate = serde_json::from_str("500").unwrap();
        assert_eq!(rate.basis_points(), 500);
        assert!(serde_json::from_str::<CommissionRate>("20000").is_err());
    }
}
