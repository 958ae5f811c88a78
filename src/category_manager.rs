// Copyright 2025 Cowboy AI, LLC.

//! Category tree maintenance
//!
//! The manager owns code allocation: a new category receives the code after
//! its last sibling, and a moved category takes the next free code below its
//! new parent, with every descendant rebased onto it.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::catalog::{Category, NewCategory};
use crate::category_code::CategoryCode;
use crate::dto::{build_category_tree, CategoryTreeNode};
use crate::entity::{CategoryMarker, EntityId};
use crate::errors::{CatalogError, CatalogResult};
use crate::repository::Repository;

/// Category ID
pub type CategoryId = EntityId<CategoryMarker>;

/// Domain service that keeps category codes consistent with the tree
pub struct CategoryManager {
    repository: Arc<dyn Repository<Category>>,
    // Serializes allocation so concurrent writers never draw the same code.
    write_lock: Mutex<()>,
}

impl CategoryManager {
    /// Create a manager over a category repository
    pub fn new(repository: Arc<dyn Repository<Category>>) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
        }
    }

    /// Create a category below `parent_id`, or as a root when `None`.
    pub async fn create(
        &self,
        input: NewCategory,
        parent_id: Option<CategoryId>,
    ) -> CatalogResult<Category> {
        let _guard = self.write_lock.lock().await;

        let parent = self.load_parent(parent_id).await?;
        let code = self.next_child_code(parent.as_ref()).await?;
        let category = Category::new(input, parent.as_ref(), code)?;
        let saved = self.repository.save(&category).await?;

        info!(
            category_id = %saved.id(),
            code = %saved.code(),
            "Created category"
        );
        Ok(saved)
    }

    /// Move a category (and its subtree) below `new_parent_id`.
    pub async fn move_to(
        &self,
        id: CategoryId,
        new_parent_id: Option<CategoryId>,
    ) -> CatalogResult<Category> {
        let _guard = self.write_lock.lock().await;

        let mut category = self.repository.get(id).await?;
        if category.parent_id() == new_parent_id {
            debug!(category_id = %id, "Category already under requested parent");
            return Ok(category);
        }

        let new_parent = self.load_parent(new_parent_id).await?;
        if let Some(parent) = &new_parent {
            if parent.id() == id || category.code().is_ancestor_of(parent.code()) {
                warn!(category_id = %id, parent_id = %parent.id(), "Rejected cyclic category move");
                return Err(CatalogError::InvalidOperation {
                    reason: format!(
                        "Category {} can not be moved below itself or its descendant {}",
                        category.code(),
                        parent.code()
                    ),
                });
            }
        }

        let old_code = category.code().clone();
        let new_code = self.next_child_code(new_parent.as_ref()).await?;

        let mut descendants = self.descendants_of(&old_code).await?;
        for descendant in &mut descendants {
            descendant.rebase(&old_code, &new_code)?;
        }
        category.reparent(new_parent.as_ref(), new_code)?;

        // The subtree is written as one batch; a failure leaves every code as it was.
        let mut batch = Vec::with_capacity(descendants.len() + 1);
        batch.push(category);
        batch.extend(descendants);
        let mut saved = self.repository.save_all(&batch).await?;
        let moved = saved.swap_remove(0);

        info!(
            category_id = %id,
            from = %old_code,
            to = %moved.code(),
            descendants = saved.len(),
            "Moved category"
        );
        Ok(moved)
    }

    /// Children of `parent_id` (roots when `None`), ordered by code.
    ///
    /// With `recursive` the whole subtree is returned.
    pub async fn children(
        &self,
        parent_id: Option<CategoryId>,
        recursive: bool,
    ) -> CatalogResult<Vec<Category>> {
        let parent = self.load_parent(parent_id).await?;
        let mut all = self.repository.list().await?;
        all.retain(|c| match (&parent, recursive) {
            (Some(parent), true) => parent.code().is_ancestor_of(c.code()),
            (Some(parent), false) => c.code().parent().as_ref() == Some(parent.code()),
            (None, true) => true,
            (None, false) => c.depth() == 1,
        });
        all.sort_by(|a, b| a.code().cmp(b.code()));
        Ok(all)
    }

    /// Look a category up by its code.
    pub async fn find_by_code(&self, code: &CategoryCode) -> CatalogResult<Option<Category>> {
        let all = self.repository.list().await?;
        Ok(all.into_iter().find(|c| c.code() == code))
    }

    /// Delete a leaf category.
    pub async fn delete(&self, id: CategoryId) -> CatalogResult<()> {
        let _guard = self.write_lock.lock().await;

        let category = self.repository.get(id).await?;
        if !self.descendants_of(category.code()).await?.is_empty() {
            return Err(CatalogError::InvalidOperation {
                reason: format!("Category {} still has children", category.code()),
            });
        }
        self.repository.delete(id).await?;
        info!(category_id = %id, code = %category.code(), "Deleted category");
        Ok(())
    }

    /// The whole category forest.
    pub async fn tree(&self) -> CatalogResult<Vec<CategoryTreeNode>> {
        let all = self.repository.list().await?;
        Ok(build_category_tree(&all))
    }

    async fn load_parent(&self, parent_id: Option<CategoryId>) -> CatalogResult<Option<Category>> {
        match parent_id {
            Some(id) => Ok(Some(self.repository.get(id).await?)),
            None => Ok(None),
        }
    }

    async fn descendants_of(&self, code: &CategoryCode) -> CatalogResult<Vec<Category>> {
        let mut all = self.repository.list().await?;
        all.retain(|c| code.is_ancestor_of(c.code()));
        Ok(all)
    }

    async fn next_child_code(&self, parent: Option<&Category>) -> CatalogResult<CategoryCode> {
        let parent_code = parent.map(Category::code);
        let last_sibling = self
            .repository
            .list()
            .await?
            .into_iter()
            .map(|c| c.code().clone())
            .filter(|code| code.parent().as_ref() == parent_code)
            .max();

        let code = match (last_sibling, parent_code) {
            (Some(last), _) => last.next()?,
            (None, Some(parent)) => parent.child(1)?,
            (None, None) => CategoryCode::root(1)?,
        };
        debug!(code = %code, "Allocated category code");
        Ok(code)
    }
}
