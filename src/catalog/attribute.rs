// Copyright 2025 Cowboy AI, LLC.

//! Product attributes, their values and the categories they apply to

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Category;
use crate::entity::{
    AggregateRoot, AttributeMarker, AttributeValueMarker, AuditInfo, CategoryMarker, EntityId,
    SellerMarker,
};
use crate::errors::{CatalogError, CatalogResult};
use crate::validation::{optional_max_length, required_text};

/// Maximum length of an attribute name.
pub const MAX_NAME_LENGTH: usize = 128;
/// Maximum length of an attribute description.
pub const MAX_DESCRIPTION_LENGTH: usize = 256;
/// Maximum length of an attribute value.
pub const MAX_VALUE_LENGTH: usize = 256;

/// A product attribute such as "Color" or "Storage".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AttributeRecord")]
pub struct Attribute {
    id: EntityId<AttributeMarker>,
    seller_id: Option<EntityId<SellerMarker>>,
    name: String,
    description: Option<String>,
    audit: AuditInfo,
    version: u64,
}

impl Attribute {
    /// Create an attribute.
    pub fn new(
        seller_id: Option<EntityId<SellerMarker>>,
        name: impl Into<String>,
        description: Option<String>,
    ) -> CatalogResult<Self> {
        let mut attribute = Self {
            id: EntityId::new(),
            seller_id,
            name: String::new(),
            description: None,
            audit: AuditInfo::now(),
            version: 0,
        };
        attribute.set_name(name)?;
        attribute.set_description(description)?;
        Ok(attribute)
    }

    /// Attribute ID
    pub fn id(&self) -> EntityId<AttributeMarker> {
        self.id
    }

    /// Owning seller, if any
    pub fn seller_id(&self) -> Option<EntityId<SellerMarker>> {
        self.seller_id
    }

    /// Name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Audit timestamps
    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    /// Set the owning seller.
    pub fn set_seller_id(&mut self, seller_id: Option<EntityId<SellerMarker>>) {
        self.seller_id = seller_id;
        self.audit.touch();
    }

    /// Set the name (required, at most 128 characters).
    pub fn set_name(&mut self, name: impl Into<String>) -> CatalogResult<()> {
        self.name = required_text("Attribute", "name", name.into(), MAX_NAME_LENGTH)?;
        self.audit.touch();
        Ok(())
    }

    /// Set the description (optional, at most 256 characters).
    pub fn set_description(&mut self, description: Option<String>) -> CatalogResult<()> {
        self.description =
            optional_max_length("Attribute", "description", description, MAX_DESCRIPTION_LENGTH)?;
        self.audit.touch();
        Ok(())
    }
}

impl AggregateRoot for Attribute {
    type Id = EntityId<AttributeMarker>;

    const ENTITY_TYPE: &'static str = "Attribute";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn increment_version(&mut self) {
        self.version += 1;
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name:{}", self.name)
    }
}

#[derive(Deserialize)]
struct AttributeRecord {
    id: EntityId<AttributeMarker>,
    seller_id: Option<EntityId<SellerMarker>>,
    name: String,
    description: Option<String>,
    audit: AuditInfo,
    version: u64,
}

impl TryFrom<AttributeRecord> for Attribute {
    type Error = CatalogError;

    fn try_from(record: AttributeRecord) -> CatalogResult<Self> {
        Ok(Self {
            id: record.id,
            seller_id: record.seller_id,
            name: required_text("Attribute", "name", record.name, MAX_NAME_LENGTH)?,
            description: optional_max_length(
                "Attribute",
                "description",
                record.description,
                MAX_DESCRIPTION_LENGTH,
            )?,
            audit: record.audit,
            version: record.version,
        })
    }
}

/// One selectable value of an attribute, e.g. "Red" for "Color".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AttributeValueRecord")]
pub struct AttributeValue {
    id: EntityId<AttributeValueMarker>,
    attribute_id: EntityId<AttributeMarker>,
    value: Option<String>,
}

impl AttributeValue {
    /// Create a value of `attribute`.
    pub fn new(attribute: &Attribute, value: Option<String>) -> CatalogResult<Self> {
        let mut attribute_value = Self {
            id: EntityId::new(),
            attribute_id: attribute.id(),
            value: None,
        };
        attribute_value.set_value(value)?;
        Ok(attribute_value)
    }

    /// Value ID
    pub fn id(&self) -> EntityId<AttributeValueMarker> {
        self.id
    }

    /// Attribute this value belongs to
    pub fn attribute_id(&self) -> EntityId<AttributeMarker> {
        self.attribute_id
    }

    /// The value text
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Move the value to another attribute.
    pub fn set_attribute(&mut self, attribute: &Attribute) {
        self.attribute_id = attribute.id();
    }

    /// Set the value (optional, at most 256 characters).
    pub fn set_value(&mut self, value: Option<String>) -> CatalogResult<()> {
        self.value = optional_max_length("AttributeValue", "value", value, MAX_VALUE_LENGTH)?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct AttributeValueRecord {
    id: EntityId<AttributeValueMarker>,
    attribute_id: EntityId<AttributeMarker>,
    value: Option<String>,
}

impl TryFrom<AttributeValueRecord> for AttributeValue {
    type Error = CatalogError;

    fn try_from(record: AttributeValueRecord) -> CatalogResult<Self> {
        Ok(Self {
            id: record.id,
            attribute_id: record.attribute_id,
            value: optional_max_length("AttributeValue", "value", record.value, MAX_VALUE_LENGTH)?,
        })
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value:{}", self.value.as_deref().unwrap_or_default())
    }
}

/// Association of an attribute with a category whose products carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeCategory {
    attribute_id: EntityId<AttributeMarker>,
    category_id: EntityId<CategoryMarker>,
}

impl AttributeCategory {
    /// Link `attribute` to `category`.
    pub fn new(attribute: &Attribute, category: &Category) -> Self {
        Self {
            attribute_id: attribute.id(),
            category_id: category.id(),
        }
    }

    /// Linked attribute
    pub fn attribute_id(&self) -> EntityId<AttributeMarker> {
        self.attribute_id
    }

    /// Linked category
    pub fn category_id(&self) -> EntityId<CategoryMarker> {
        self.category_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_validation() {
        let attribute = Attribute::new(None, "Color", Some("Primary color".into())).unwrap();
        assert_eq!(attribute.name(), "Color");
        assert_eq!(attribute.description(), Some("Primary color"));
        assert_eq!(attribute.to_string(), "Name:Color");

        assert!(Attribute::new(None, "", None).unwrap_err().is_invalid_argument());
        assert!(Attribute::new(None, "n".repeat(MAX_NAME_LENGTH + 1), None).is_err());
        assert!(Attribute::new(None, "Color", Some("d".repeat(MAX_DESCRIPTION_LENGTH + 1))).is_err());
    }

    #[test]
    fn attribute_value_belongs_to_attribute() {
        let color = Attribute::new(None, "Color", None).unwrap();
        let size = Attribute::new(None, "Size", None).unwrap();
        let mut red = AttributeValue::new(&color, Some("Red".into())).unwrap();
        assert_eq!(red.attribute_id(), color.id());

        red.set_attribute(&size);
        assert_eq!(red.attribute_id(), size.id());
        assert!(red.set_value(Some("v".repeat(MAX_VALUE_LENGTH + 1))).is_err());
        assert_eq!(red.value(), Some("Red"));
    }

    #[test]
    fn stored_attributes_are_revalidated() {
        let color = Attribute::new(None, "Color", None).unwrap();
        let json = serde_json::to_value(&color).unwrap();
        assert_eq!(serde_json::from_value::<Attribute>(json.clone()).unwrap(), color);

        let mut blank = json;
        blank["name"] = " ".into();
        let err = serde_json::from_value::<Attribute>(blank).unwrap_err();
        assert!(err.to_string().contains("name"));

        let red = AttributeValue::new(&color, Some("Red".into())).unwrap();
        let mut long = serde_json::to_value(&red).unwrap();
        long["value"] = "v".repeat(MAX_VALUE_LENGTH + 1).into();
        assert!(serde_json::from_value::<AttributeValue>(long).is_err());
    }
}
