// Copyright 2025 Cowboy AI, LLC.

//! Aggregate repositories

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entity::AggregateRoot;
use crate::errors::{CatalogError, CatalogResult};

/// Repository trait for loading and saving aggregates
#[async_trait]
pub trait Repository<A>: Send + Sync
where
    A: AggregateRoot + Send + Sync,
{
    /// Load aggregate by ID
    async fn load(&self, id: A::Id) -> CatalogResult<Option<A>>;

    /// Save an aggregate and return the stored version.
    ///
    /// The aggregate must carry the version it was loaded at (0 for new
    /// aggregates); a stale version fails with `ConcurrencyConflict`.
    async fn save(&self, aggregate: &A) -> CatalogResult<A>;

    /// Save several aggregates as one unit.
    ///
    /// Every version is checked before anything is written, so a single
    /// conflict leaves the whole batch unsaved.
    async fn save_all(&self, aggregates: &[A]) -> CatalogResult<Vec<A>>;

    /// Delete an aggregate, returning whether it existed
    async fn delete(&self, id: A::Id) -> CatalogResult<bool>;

    /// All stored aggregates, in no particular order
    async fn list(&self) -> CatalogResult<Vec<A>>;

    /// Number of stored aggregates
    async fn count(&self) -> CatalogResult<usize>;

    /// Load an aggregate that must exist
    async fn get(&self, id: A::Id) -> CatalogResult<A> {
        self.load(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(A::ENTITY_TYPE, id))
    }
}

/// In-memory repository
pub struct InMemoryRepository<A: AggregateRoot> {
    storage: Arc<RwLock<HashMap<A::Id, A>>>,
}

impl<A: AggregateRoot> Clone for InMemoryRepository<A> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<A: AggregateRoot> Default for InMemoryRepository<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AggregateRoot> InMemoryRepository<A> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn check_version<A: AggregateRoot>(storage: &HashMap<A::Id, A>, aggregate: &A) -> CatalogResult<()> {
    match storage.get(&aggregate.id()) {
        Some(_) if aggregate.version() == 0 => Err(CatalogError::AlreadyExists(format!(
            "{} {}",
            A::ENTITY_TYPE,
            aggregate.id()
        ))),
        stored => {
            let stored_version = stored.map_or(0, AggregateRoot::version);
            if stored_version != aggregate.version() {
                return Err(CatalogError::ConcurrencyConflict {
                    expected: aggregate.version(),
                    actual: stored_version,
                });
            }
            Ok(())
        }
    }
}

fn store<A: AggregateRoot + Clone>(storage: &mut HashMap<A::Id, A>, aggregate: &A) -> A {
    let mut saved = aggregate.clone();
    saved.increment_version();
    storage.insert(saved.id(), saved.clone());
    saved
}

#[async_trait]
impl<A> Repository<A> for InMemoryRepository<A>
where
    A: AggregateRoot + Clone + Send + Sync,
{
    async fn load(&self, id: A::Id) -> CatalogResult<Option<A>> {
        Ok(self.storage.read().await.get(&id).cloned())
    }

    async fn save(&self, aggregate: &A) -> CatalogResult<A> {
        let mut storage = self.storage.write().await;
        check_version(&storage, aggregate)?;
        Ok(store(&mut storage, aggregate))
    }

    async fn save_all(&self, aggregates: &[A]) -> CatalogResult<Vec<A>> {
        let mut storage = self.storage.write().await;
        for aggregate in aggregates {
            check_version(&storage, aggregate)?;
        }
        Ok(aggregates
            .iter()
            .map(|aggregate| store(&mut storage, aggregate))
            .collect())
    }

    async fn delete(&self, id: A::Id) -> CatalogResult<bool> {
        Ok(self.storage.write().await.remove(&id).is_some())
    }

    async fn list(&self) -> CatalogResult<Vec<A>> {
        Ok(self.storage.read().await.values().cloned().collect())
    }

    async fn count(&self) -> CatalogResult<usize> {
        Ok(self.storage.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Attribute;

    #[tokio::test]
    async fn test_save_and_load() {
        let repo: InMemoryRepository<Attribute> = InMemoryRepository::new();
        let attribute = Attribute::new(None, "Color", None).unwrap();

        let saved = repo.save(&attribute).await.unwrap();
        assert_eq!(saved.version(), 1);

        let loaded = repo.load(attribute.id()).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_stale_save_is_rejected() {
        let repo: InMemoryRepository<Attribute> = InMemoryRepository::new();
        let attribute = Attribute::new(None, "Color", None).unwrap();
        let first = repo.save(&attribute).await.unwrap();
        let second = repo.save(&first).await.unwrap();
        assert_eq!(second.version(), 2);

        // Saving the older copy again must not overwrite the stored one.
        let err = repo.save(&first).await.unwrap_err();
        assert_eq!(
            err,
            CatalogError::ConcurrencyConflict {
                expected: 1,
                actual: 2
            }
        );
    }

    #[tokio::test]
    async fn test_new_aggregate_with_stored_id_already_exists() {
        let repo: InMemoryRepository<Attribute> = InMemoryRepository::new();
        let attribute = Attribute::new(None, "Color", None).unwrap();
        repo.save(&attribute).await.unwrap();

        let err = repo.save(&attribute).await.unwrap_err();
        assert!(matches!(err, CatalogError::AlreadyExists(_)));
        assert_eq!(repo.get(attribute.id()).await.unwrap().version(), 1);
    }

    #[tokio::test]
    async fn test_save_all_is_all_or_nothing() {
        let repo: InMemoryRepository<Attribute> = InMemoryRepository::new();
        let color = repo
            .save(&Attribute::new(None, "Color", None).unwrap())
            .await
            .unwrap();
        let stale = color.clone();
        let color = repo.save(&color).await.unwrap();
        let size = Attribute::new(None, "Size", None).unwrap();

        let err = repo.save_all(&[size.clone(), stale]).await.unwrap_err();
        assert!(err.is_concurrency_error());
        assert!(repo.load(size.id()).await.unwrap().is_none());

        let saved = repo.save_all(&[size, color]).await.unwrap();
        assert_eq!(
            saved.iter().map(AggregateRoot::version).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let repo: InMemoryRepository<Attribute> = InMemoryRepository::new();
        let attribute = Attribute::new(None, "Size", None).unwrap();
        let id = attribute.id();

        assert!(repo.get(id).await.unwrap_err().is_not_found());
        repo.save(&attribute).await.unwrap();
        assert!(repo.get(id).await.is_ok());

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo: InMemoryRepository<Attribute> = InMemoryRepository::new();
        let other = repo.clone();
        repo.save(&Attribute::new(None, "Color", None).unwrap())
            .await
            .unwrap();
        assert_eq!(other.count().await.unwrap(), 1);
    }
}
