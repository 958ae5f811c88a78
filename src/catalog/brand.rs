// Copyright 2025 Cowboy AI, LLC.

//! Brand aggregate and its category links

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Category, State};
use crate::entity::{AggregateRoot, AuditInfo, BrandMarker, CategoryMarker, EntityId};
use crate::errors::{CatalogError, CatalogResult};
use crate::validation::{optional_max_length, required_text};

const ENTITY: &str = "Brand";

/// Maximum length of a brand name.
pub const MAX_NAME_LENGTH: usize = 128;
/// Maximum length of a logo reference.
pub const MAX_LOGO_LENGTH: usize = 256;
/// Maximum length of an image reference.
pub const MAX_IMAGE_LENGTH: usize = 256;
/// Maximum length of a large image reference.
pub const MAX_BIG_IMAGE_LENGTH: usize = 256;
/// The index letter is a single character.
pub const MAX_FIRST_WORD_LENGTH: usize = 1;
/// Maximum length of the short description.
pub const MAX_BRIEF_LENGTH: usize = 256;

/// Input for creating a brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBrand {
    /// Display order (0, 1, 2, ...)
    pub sequence: i32,
    /// Display name
    pub name: String,
    /// Logo reference
    pub logo: String,
    /// Optional image reference
    pub image: Option<String>,
    /// Optional large image reference
    pub big_image: Option<String>,
    /// Index letter used for A–Z brand listings
    pub first_word: String,
    /// Short description
    pub brief: String,
    /// Long-form brand story
    pub story: Option<String>,
    /// Publication state
    pub state: State,
}

/// A product brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BrandRecord")]
pub struct Brand {
    id: EntityId<BrandMarker>,
    sequence: i32,
    name: String,
    logo: String,
    image: Option<String>,
    big_image: Option<String>,
    first_word: String,
    brief: String,
    story: Option<String>,
    state: State,
    audit: AuditInfo,
    version: u64,
}

impl Brand {
    /// Create a brand from validated input.
    pub fn new(input: NewBrand) -> CatalogResult<Self> {
        let mut brand = Self {
            id: EntityId::new(),
            sequence: input.sequence,
            name: String::new(),
            logo: String::new(),
            image: None,
            big_image: None,
            first_word: String::new(),
            brief: String::new(),
            story: input.story,
            state: input.state,
            audit: AuditInfo::now(),
            version: 0,
        };
        brand.set_name(input.name)?;
        brand.set_logo(input.logo)?;
        brand.set_image(input.image)?;
        brand.set_big_image(input.big_image)?;
        brand.set_first_word(input.first_word)?;
        brand.set_brief(input.brief)?;
        Ok(brand)
    }

    /// Brand ID
    pub fn id(&self) -> EntityId<BrandMarker> {
        self.id
    }

    /// Display order
    pub fn sequence(&self) -> i32 {
        self.sequence
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logo reference
    pub fn logo(&self) -> &str {
        &self.logo
    }

    /// Image reference
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Large image reference
    pub fn big_image(&self) -> Option<&str> {
        self.big_image.as_deref()
    }

    /// Index letter
    pub fn first_word(&self) -> &str {
        &self.first_word
    }

    /// Short description
    pub fn brief(&self) -> &str {
        &self.brief
    }

    /// Brand story
    pub fn story(&self) -> Option<&str> {
        self.story.as_deref()
    }

    /// Publication state
    pub fn state(&self) -> State {
        self.state
    }

    /// Audit timestamps
    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    /// Set the display order.
    pub fn set_sequence(&mut self, sequence: i32) {
        self.sequence = sequence;
        self.audit.touch();
    }

    /// Set the name (required, at most 128 characters).
    pub fn set_name(&mut self, name: impl Into<String>) -> CatalogResult<()> {
        self.name = required_text(ENTITY, "name", name.into(), MAX_NAME_LENGTH)?;
        self.audit.touch();
        Ok(())
    }

    /// Set the logo (required, at most 256 characters).
    pub fn set_logo(&mut self, logo: impl Into<String>) -> CatalogResult<()> {
        self.logo = required_text(ENTITY, "logo", logo.into(), MAX_LOGO_LENGTH)?;
        self.audit.touch();
        Ok(())
    }

    /// Set the image (optional, at most 256 characters).
    pub fn set_image(&mut self, image: Option<String>) -> CatalogResult<()> {
        self.image = optional_max_length(ENTITY, "image", image, MAX_IMAGE_LENGTH)?;
        self.audit.touch();
        Ok(())
    }

    /// Set the large image (optional, at most 256 characters).
    pub fn set_big_image(&mut self, big_image: Option<String>) -> CatalogResult<()> {
        self.big_image =
            optional_max_length(ENTITY, "big_image", big_image, MAX_BIG_IMAGE_LENGTH)?;
        self.audit.touch();
        Ok(())
    }

    /// Set the index letter (required, one character).
    pub fn set_first_word(&mut self, first_word: impl Into<String>) -> CatalogResult<()> {
        self.first_word =
            required_text(ENTITY, "first_word", first_word.into(), MAX_FIRST_WORD_LENGTH)?;
        self.audit.touch();
        Ok(())
    }

    /// Set the short description (required, at most 256 characters).
    pub fn set_brief(&mut self, brief: impl Into<String>) -> CatalogResult<()> {
        self.brief = required_text(ENTITY, "brief", brief.into(), MAX_BRIEF_LENGTH)?;
        self.audit.touch();
        Ok(())
    }

    /// Set the story; unbounded.
    pub fn set_story(&mut self, story: Option<String>) {
        self.story = story;
        self.audit.touch();
    }

    /// Set the publication state.
    pub fn set_state(&mut self, state: State) {
        self.state = state;
        self.audit.touch();
    }
}

#[derive(Deserialize)]
struct BrandRecord {
    id: EntityId<BrandMarker>,
    sequence: i32,
    name: String,
    logo: String,
    image: Option<String>,
    big_image: Option<String>,
    first_word: String,
    brief: String,
    story: Option<String>,
    state: State,
    audit: AuditInfo,
    version: u64,
}

impl TryFrom<BrandRecord> for Brand {
    type Error = CatalogError;

    fn try_from(record: BrandRecord) -> CatalogResult<Self> {
        Ok(Self {
            id: record.id,
            sequence: record.sequence,
            name: required_text(ENTITY, "name", record.name, MAX_NAME_LENGTH)?,
            logo: required_text(ENTITY, "logo", record.logo, MAX_LOGO_LENGTH)?,
            image: optional_max_length(ENTITY, "image", record.image, MAX_IMAGE_LENGTH)?,
            big_image: optional_max_length(
                ENTITY,
                "big_image",
                record.big_image,
                MAX_BIG_IMAGE_LENGTH,
            )?,
            first_word: required_text(
                ENTITY,
                "first_word",
                record.first_word,
                MAX_FIRST_WORD_LENGTH,
            )?,
            brief: required_text(ENTITY, "brief", record.brief, MAX_BRIEF_LENGTH)?,
            story: record.story,
            state: record.state,
            audit: record.audit,
            version: record.version,
        })
    }
}

impl AggregateRoot for Brand {
    type Id = EntityId<BrandMarker>;

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

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence:{} - Name:{}", self.sequence, self.name)
    }
}

/// Association of a brand with a category it sells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryBrand {
    category_id: EntityId<CategoryMarker>,
    brand_id: EntityId<BrandMarker>,
}

impl CategoryBrand {
    /// Link `brand` to `category`.
    pub fn new(category: &Category, brand: &Brand) -> Self {
        Self {
            category_id: category.id(),
            brand_id: brand.id(),
        }
    }

    /// Linked category
    pub fn category_id(&self) -> EntityId<CategoryMarker> {
        self.category_id
    }

    /// Linked brand
    pub fn brand_id(&self) -> EntityId<BrandMarker> {
        self.brand_id
    }
}

impl fmt::Display for CategoryBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId:{} - BrandId:{}", self.category_id, self.brand_id)
    }
}
