// Copyright 2025 Cowboy AI, LLC.

//! # Mall Catalog
//!
//! Product catalog domain for the mall backend.
//!
//! The heart of the crate is the category code algebra in [`category_code`]:
//! every category stores a dotted path code (`00001.00042.00005`) made of
//! fixed-width segments, so subtree queries, sibling allocation and
//! reparenting are string operations instead of tree walks.
//!
//! Around it sit:
//! - **Entities**: [`Category`], [`Brand`], [`Attribute`] and their links,
//!   built through validated setters
//! - **Domain services**: [`CategoryManager`] allocates and rebases codes,
//!   [`AttributeManager`] creates attributes
//! - **Application services**: [`AttributeAppService`] maps entities to DTOs
//!   with paging bounded by [`CatalogSettings`]
//! - **Repositories**: the async [`Repository`] trait with an in-memory
//!   implementation using optimistic versioning
//!
//! ## Example
//!
//! ```rust
//! use mall_catalog::category_code::{append_code, create_code, next_code, parent_prefix};
//!
//! let code = create_code(&[4, 2]).unwrap().unwrap();
//! assert_eq!(code, "00004.00002");
//! assert_eq!(next_code("00019.00055.00001").unwrap(), "00019.00055.00002");
//! assert_eq!(parent_prefix("00019.00055.00001").unwrap(), Some("00019.00055"));
//! assert_eq!(append_code(None, "00001").unwrap(), "00001");
//! ```

#![warn(missing_docs)]

pub mod category_code;
pub mod dto;

mod attribute_service;
mod catalog;
mod category_manager;
mod entity;
mod errors;
mod repository;
mod settings;
mod validation;

pub use attribute_service::{AttributeAppService, AttributeId, AttributeManager};
pub use catalog::{
    Attribute, AttributeCategory, AttributeValue, Brand, Category, CategoryBrand,
    CommissionRate, NewBrand, NewCategory, State,
};
pub use category_code::CategoryCode;
pub use category_manager::{CategoryId, CategoryManager};
pub use entity::{AggregateRoot, AuditInfo, EntityId};
pub use errors::{CatalogError, CatalogResult};
pub use repository::{InMemoryRepository, Repository};
pub use settings::{AttributeSettings, CatalogSettings, CategorySettings};

// Re-export marker types
pub mod markers {
    //! Marker types for phantom type parameters
    pub use crate::entity::{
        AttributeMarker, AttributeValueMarker, BrandMarker, CategoryMarker, SellerMarker,
    };
}
