// Copyright 2025 Cowboy AI, LLC.

//! Category aggregate

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CommissionRate, State};
use crate::category_code::CategoryCode;
use crate::entity::{AggregateRoot, AuditInfo, CategoryMarker, EntityId, SellerMarker};
use crate::errors::{CatalogError, CatalogResult};
use crate::validation::{optional_max_length, required_text};

const ENTITY: &str = "Category";

/// Maximum length of a category name.
pub const MAX_NAME_LENGTH: usize = 128;
/// Maximum length of a category icon reference.
pub const MAX_ICON_LENGTH: usize = 256;
/// Maximum length of a category image reference.
pub const MAX_IMAGE_LENGTH: usize = 256;
/// Maximum length of a category description.
pub const MAX_DESCRIPTION_LENGTH: usize = 256;

/// Input for creating a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    /// Owning seller; `None` for platform categories
    pub seller_id: Option<EntityId<SellerMarker>>,
    /// Display name
    pub name: String,
    /// Icon reference
    pub icon: String,
    /// Optional image reference
    pub image: Option<String>,
    /// Platform commission on products in this category
    pub commission_rate: CommissionRate,
    /// Description
    pub description: String,
    /// Publication state
    pub state: State,
}

/// A node of the product category tree.
///
/// The position in the tree is carried twice: `parent_id` for direct lookups
/// and `code` for subtree queries. The code of a child is always the code of
/// its parent plus one segment, so both change together through
/// [`Category::reparent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CategoryRecord")]
pub struct Category {
    id: EntityId<CategoryMarker>,
    seller_id: Option<EntityId<SellerMarker>>,
    parent_id: Option<EntityId<CategoryMarker>>,
    code: CategoryCode,
    name: String,
    icon: String,
    image: Option<String>,
    commission_rate: CommissionRate,
    description: String,
    state: State,
    audit: AuditInfo,
    version: u64,
}

impl Category {
    /// Create a category at `code` below `parent`.
    pub fn new(
        input: NewCategory,
        parent: Option<&Category>,
        code: CategoryCode,
    ) -> CatalogResult<Self> {
        check_position(parent.map(Category::code), &code)?;
        let mut category = Self {
            id: EntityId::new(),
            seller_id: input.seller_id,
            parent_id: parent.map(Category::id),
            code,
            name: String::new(),
            icon: String::new(),
            image: None,
            commission_rate: input.commission_rate,
            description: String::new(),
            state: input.state,
            audit: AuditInfo::now(),
            version: 0,
        };
        category.set_name(input.name)?;
        category.set_icon(input.icon)?;
        category.set_image(input.image)?;
        category.set_description(input.description)?;
        Ok(category)
    }

    /// Category ID
    pub fn id(&self) -> EntityId<CategoryMarker> {
        self.id
    }

    /// Owning seller, if any
    pub fn seller_id(&self) -> Option<EntityId<SellerMarker>> {
        self.seller_id
    }

    /// Direct parent, if any
    pub fn parent_id(&self) -> Option<EntityId<CategoryMarker>> {
        self.parent_id
    }

    /// Path code in the category tree
    pub fn code(&self) -> &CategoryCode {
        &self.code
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Icon reference
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Image reference
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Commission rate
    pub fn commission_rate(&self) -> CommissionRate {
        self.commission_rate
    }

    /// Description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Publication state
    pub fn state(&self) -> State {
        self.state
    }

    /// Audit timestamps
    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    /// Depth in the tree, 1 for root categories
    pub fn depth(&self) -> usize {
        self.code.depth()
    }

    /// Set the owning seller.
    pub fn set_seller_id(&mut self, seller_id: Option<EntityId<SellerMarker>>) {
        self.seller_id = seller_id;
        self.audit.touch();
    }

    /// Move this category below `parent` at `code`.
    ///
    /// `code` must be a direct child code of the parent's code, or a
    /// single-segment code when `parent` is `None`.
    pub fn reparent(&mut self, parent: Option<&Category>, code: CategoryCode) -> CatalogResult<()> {
        check_position(parent.map(Category::code), &code)?;
        self.parent_id = parent.map(Category::id);
        self.code = code;
        self.audit.touch();
        Ok(())
    }

    /// Follow an ancestor moved from `old_root` to `new_root`.
    pub(crate) fn rebase(
        &mut self,
        old_root: &CategoryCode,
        new_root: &CategoryCode,
    ) -> CatalogResult<()> {
        self.code = self.code.rebase(old_root, new_root)?;
        self.audit.touch();
        Ok(())
    }

    /// Set the name (required, at most 128 characters).
    pub fn set_name(&mut self, name: impl Into<String>) -> CatalogResult<()> {
        self.name = required_text(ENTITY, "name", name.into(), MAX_NAME_LENGTH)?;
        self.audit.touch();
        Ok(())
    }

    /// Set the icon (required, at most 256 characters).
    pub fn set_icon(&mut self, icon: impl Into<String>) -> CatalogResult<()> {
        self.icon = required_text(ENTITY, "icon", icon.into(), MAX_ICON_LENGTH)?;
        self.audit.touch();
        Ok(())
    }

    /// Set the image (optional, at most 256 characters).
    pub fn set_image(&mut self, image: Option<String>) -> CatalogResult<()> {
        self.image = optional_max_length(ENTITY, "image", image, MAX_IMAGE_LENGTH)?;
        self.audit.touch();
        Ok(())
    }

    /// Set the commission rate.
    pub fn set_commission_rate(&mut self, rate: CommissionRate) {
        self.commission_rate = rate;
        self.audit.touch();
    }

    /// Set the description (required, at most 256 characters).
    pub fn set_description(&mut self, description: impl Into<String>) -> CatalogResult<()> {
        self.description =
            required_text(ENTITY, "description", description.into(), MAX_DESCRIPTION_LENGTH)?;
        self.audit.touch();
        Ok(())
    }

    /// Set the publication state.
    pub fn set_state(&mut self, state: State) {
        self.state = state;
        self.audit.touch();
    }
}

fn check_position(parent_code: Option<&CategoryCode>, code: &CategoryCode) -> CatalogResult<()> {
    if code.parent().as_ref() != parent_code {
        let parent = parent_code.map_or_else(|| "the root".to_string(), ToString::to_string);
        return Err(CatalogError::invalid_argument(
            "code",
            format!("Category code {code} is not a direct child of {parent}"),
        ));
    }
    Ok(())
}

/// Stored form of a category, validated on the way in.
#[derive(Deserialize)]
struct CategoryRecord {
    id: EntityId<CategoryMarker>,
    seller_id: Option<EntityId<SellerMarker>>,
    parent_id: Option<EntityId<CategoryMarker>>,
    code: CategoryCode,
    name: String,
    icon: String,
    image: Option<String>,
    commission_rate: CommissionRate,
    description: String,
    state: State,
    audit: AuditInfo,
    version: u64,
}

impl TryFrom<CategoryRecord> for Category {
    type Error = CatalogError;

    fn try_from(record: CategoryRecord) -> CatalogResult<Self> {
        // Only the parent id is stored, so check the depth it implies.
        if record.parent_id.is_some() != (record.code.depth() > 1) {
            return Err(CatalogError::invalid_argument(
                "parent_id",
                format!("parent does not match category code {}", record.code),
            ));
        }
        Ok(Self {
            id: record.id,
            seller_id: record.seller_id,
            parent_id: record.parent_id,
            code: record.code,
            name: required_text(ENTITY, "name", record.name, MAX_NAME_LENGTH)?,
            icon: required_text(ENTITY, "icon", record.icon, MAX_ICON_LENGTH)?,
            image: optional_max_length(ENTITY, "image", record.image, MAX_IMAGE_LENGTH)?,
            commission_rate: record.commission_rate,
            description: required_text(
                ENTITY,
                "description",
                record.description,
                MAX_DESCRIPTION_LENGTH,
            )?,
            state: record.state,
            audit: record.audit,
            version: record.version,
        })
    }
}

impl AggregateRoot for Category {
    type Id = EntityId<CategoryMarker>;

    const ENTITY_TYPE: &'static str = ENTITY;

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

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code:{} - Name:{}", self.code, self.name)
    }
}
