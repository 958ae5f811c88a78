// Copyright 2025 Cowboy AI, LLC.

//! Entity identity and audit lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

/// A typed entity ID using phantom types for type safety
///
/// The phantom type parameter ensures that IDs for different catalog
/// entities cannot be mixed up at compile time.
///
/// # Examples
///
/// ```rust
/// use mall_catalog::{EntityId, markers::{BrandMarker, CategoryMarker}};
///
/// let category_id = EntityId::<CategoryMarker>::new();
/// let brand_id = EntityId::<BrandMarker>::new();
///
/// // These are different types - won't compile if mixed up:
/// // let _: EntityId<CategoryMarker> = brand_id;
/// assert_ne!(category_id.as_uuid(), brand_id.as_uuid());
/// ```
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId<T> {
    id: Uuid,
    #[serde(skip)]
    _phantom: PhantomData<fn() -> T>,
}

impl<T> EntityId<T> {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create an entity ID from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.id
    }
}

// Manual impls so the marker type needs no derives of its own.
impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityId<T> {}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityId").field(&self.id).finish()
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> Default for EntityId<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<EntityId<T>> for Uuid {
    fn from(id: EntityId<T>) -> Self {
        id.id
    }
}

/// Creation and modification timestamps of an audited entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditInfo {
    /// When this entity was created
    pub created_at: DateTime<Utc>,
    /// When this entity was last updated
    pub updated_at: DateTime<Utc>,
}

impl AuditInfo {
    /// Stamp a freshly created entity
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for AuditInfo {
    fn default() -> Self {
        Self::now()
    }
}

/// Aggregate roots are the entry points for modifying aggregates.
///
/// The version is used by repositories for optimistic concurrency: an
/// aggregate is saved with the version it was loaded at, and the store
/// bumps it on success.
pub trait AggregateRoot: Sized {
    /// The type of ID for this aggregate
    type Id: Copy + Eq + std::hash::Hash + fmt::Display + Send + Sync + 'static;

    /// Name used in error messages and logs
    const ENTITY_TYPE: &'static str;

    /// Get the aggregate's ID
    fn id(&self) -> Self::Id;

    /// Get the aggregate's version for optimistic concurrency
    fn version(&self) -> u64;

    /// Increment the version
    fn increment_version(&mut self);
}

/// Marker for category entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryMarker;

/// Marker for brand entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrandMarker;

/// Marker for attribute entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeMarker;

/// Marker for attribute value entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeValueMarker;

/// Marker for sellers owning catalog entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SellerMarker;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::thread;
    use std::time::Duration;

    /// Test EntityId creation and uniqueness
    ///
    /// ```mermaid
    /// graph LR
    ///     A[EntityId::new] -->|UUID v4| B[Unique ID]
    ///     C[EntityId::new] -->|UUID v4| D[Different ID]
    ///     B -->|Not Equal| D
    /// ```
    #[test]
    fn test_entity_id_new() {
        let id1 = EntityId::<CategoryMarker>::new();
        let id2 = EntityId::<CategoryMarker>::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_uuid().is_nil());
    }

    #[test]
    fn test_entity_id_from_uuid_and_display() {
        let uuid = Uuid::new_v4();
        let id = EntityId::<BrandMarker>::from_uuid(uuid);

        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(format!("{id}"), format!("{uuid}"));
        assert_eq!(Uuid::from(id), uuid);
    }

    #[test]
    fn test_entity_id_serializes_as_plain_uuid() {
        let uuid = Uuid::new_v4();
        let id = EntityId::<AttributeMarker>::from_uuid(uuid);

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));

        let back: EntityId<AttributeMarker> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_entity_id_as_key() {
        let mut map = HashMap::new();
        let id1 = EntityId::<CategoryMarker>::new();
        let id2 = EntityId::<CategoryMarker>::new();

        map.insert(id1, "value1");
        map.insert(id2, "value2");

        assert_eq!(map.get(&id1), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    /// Test audit touch updates only the modification time
    ///
    /// ```mermaid
    /// graph TD
    ///     A[AuditInfo::now] -->|touch()| B[Updated]
    ///     A -->|created_at| C[Unchanged]
    ///     A -->|updated_at| D[Changed]
    /// ```
    #[test]
    fn test_audit_touch() {
        let mut audit = AuditInfo::now();
        assert_eq!(audit.created_at, audit.updated_at);
        let created = audit.created_at;

        thread::sleep(Duration::from_millis(5));
        audit.touch();

        assert_eq!(audit.created_at, created);
        assert!(audit.updated_at > created);
    }
}
