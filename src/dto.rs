// Copyright 2025 Cowboy AI, LLC.

//! Data transfer objects for the catalog services
//!
//! DTOs flatten typed IDs to plain UUIDs and codes to strings so they can be
//! serialized for any outer surface. Each carries a JSON schema.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Attribute, Brand, Category, State};
use crate::category_code::CategoryCode;

/// Read model of a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryDto {
    /// Category ID
    pub id: Uuid,
    /// Owning seller
    pub seller_id: Option<Uuid>,
    /// Direct parent
    pub parent_id: Option<Uuid>,
    /// Path code, e.g. `00001.00004`
    pub code: String,
    /// Display name
    pub name: String,
    /// Icon reference
    pub icon: String,
    /// Image reference
    pub image: Option<String>,
    /// Commission in basis points
    pub commission_rate_bps: u16,
    /// Description
    pub description: String,
    /// Publication state
    pub state: State,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl From<&Category> for CategoryDto {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id().into(),
            seller_id: category.seller_id().map(Into::into),
            parent_id: category.parent_id().map(Into::into),
            code: category.code().to_string(),
            name: category.name().to_string(),
            icon: category.icon().to_string(),
            image: category.image().map(str::to_string),
            commission_rate_bps: category.commission_rate().basis_points(),
            description: category.description().to_string(),
            state: category.state(),
            created_at: category.audit().created_at,
            updated_at: category.audit().updated_at,
        }
    }
}

/// Read model of a brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BrandDto {
    /// Brand ID
    pub id: Uuid,
    /// Display order
    pub sequence: i32,
    /// Display name
    pub name: String,
    /// Logo reference
    pub logo: String,
    /// Image reference
    pub image: Option<String>,
    /// Large image reference
    pub big_image: Option<String>,
    /// Index letter
    pub first_word: String,
    /// Short description
    pub brief: String,
    /// Brand story
    pub story: Option<String>,
    /// Publication state
    pub state: State,
}

impl From<&Brand> for BrandDto {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id().into(),
            sequence: brand.sequence(),
            name: brand.name().to_string(),
            logo: brand.logo().to_string(),
            image: brand.image().map(str::to_string),
            big_image: brand.big_image().map(str::to_string),
            first_word: brand.first_word().to_string(),
            brief: brand.brief().to_string(),
            story: brand.story().map(str::to_string),
            state: brand.state(),
        }
    }
}

/// Read model of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AttributeDto {
    /// Attribute ID
    pub id: Uuid,
    /// Owning seller
    pub seller_id: Option<Uuid>,
    /// Name
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl From<&Attribute> for AttributeDto {
    fn from(attribute: &Attribute) -> Self {
        Self {
            id: attribute.id().into(),
            seller_id: attribute.seller_id().map(Into::into),
            name: attribute.name().to_string(),
            description: attribute.description().map(str::to_string),
            created_at: attribute.audit().created_at,
            updated_at: attribute.audit().updated_at,
        }
    }
}

/// Input for creating an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateAttributeDto {
    /// Owning seller
    pub seller_id: Option<Uuid>,
    /// Name
    pub name: String,
    /// Description
    pub description: Option<String>,
}

/// Input for updating an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateAttributeDto {
    /// Name
    pub name: String,
    /// Description
    pub description: Option<String>,
}

/// Paging and sorting of a list query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PagedRequest {
    /// Number of items to skip
    pub skip_count: usize,
    /// Page size requested by the caller
    pub max_result_count: usize,
    /// Sort expression, e.g. `name` or `created_at desc`
    pub sorting: Option<String>,
}

impl Default for PagedRequest {
    fn default() -> Self {
        Self {
            skip_count: 0,
            max_result_count: 10,
            sorting: None,
        }
    }
}

/// One page of a list query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PagedResult<T> {
    /// Items in the whole result set
    pub total_count: usize,
    /// Items on this page
    pub items: Vec<T>,
}

/// A category with its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryTreeNode {
    /// The category
    pub category: CategoryDto,
    /// Direct children, ordered by code
    pub children: Vec<CategoryTreeNode>,
}

/// Assemble a forest from a flat category list.
///
/// Parents are found through the code prefix, so the list needs no
/// `parent_id` consistency. A category whose parent code is not in the list
/// becomes a root of the forest.
pub fn build_category_tree(categories: &[Category]) -> Vec<CategoryTreeNode> {
    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by(|a, b| a.code().cmp(b.code()));

    let known: BTreeMap<&CategoryCode, usize> = sorted
        .iter()
        .enumerate()
        .map(|(index, category)| (category.code(), index))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); sorted.len()];
    let mut roots = Vec::new();
    for (index, category) in sorted.iter().enumerate() {
        let parent = category
            .code()
            .parent()
            .and_then(|code| known.get(&code).copied());
        match parent {
            Some(parent) => children[parent].push(index),
            None => roots.push(index),
        }
    }

    fn assemble(index: usize, sorted: &[&Category], children: &[Vec<usize>]) -> CategoryTreeNode {
        CategoryTreeNode {
            category: CategoryDto::from(sorted[index]),
            children: children[index]
                .iter()
                .map(|child| assemble(*child, sorted, children))
                .collect(),
        }
    }

    roots
        .into_iter()
        .map(|root| assemble(root, &sorted, &children))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CommissionRate, NewCategory};

    fn category(parent: Option<&Category>, code: &str, name: &str) -> Category {
        Category::new(
            NewCategory {
                seller_id: None,
                name: name.to_string(),
                icon: "icon".to_string(),
                image: None,
                commission_rate: CommissionRate::ZERO,
                description: name.to_string(),
                state: State::Enabled,
            },
            parent,
            CategoryCode::parse(code).unwrap(),
        )
        .unwrap()
    }

    fn names(nodes: &[CategoryTreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.category.name.as_str()).collect()
    }

    #[test]
    fn tree_follows_codes() {
        let books = category(None, "00001", "Books");
        let novels = category(Some(&books), "00001.00001", "Novels");
        let categories = vec![
            category(None, "00002", "Toys"),
            category(Some(&books), "00001.00002", "Comics"),
            category(Some(&novels), "00001.00001.00001", "Sci-Fi"),
            books,
            novels,
        ];

        let tree = build_category_tree(&categories);
        assert_eq!(names(&tree), vec!["Books", "Toys"]);
        assert_eq!(names(&tree[0].children), vec!["Novels", "Comics"]);
        assert_eq!(names(&tree[0].children[0].children), vec!["Sci-Fi"]);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn orphans_become_roots() {
        let missing = category(None, "00007", "Missing");
        let categories = vec![
            category(None, "00001", "Books"),
            category(Some(&missing), "00007.00001", "Orphan"),
        ];
        let tree = build_category_tree(&categories);
        assert_eq!(names(&tree), vec!["Books", "Orphan"]);
    }

    #[test]
    fn dto_flattens_ids() {
        let books = category(None, "00001", "Books");
        let dto = CategoryDto::from(&books);
        assert_eq!(dto.id, *books.id().as_uuid());
        assert_eq!(dto.code, "00001");
        assert_eq!(dto.parent_id, None);
    }

    #[test]
    fn paged_request_defaults() {
        let request: PagedRequest = serde_json::from_str("{\"skip_count\": 5}").unwrap();
        assert_eq!(request.skip_count, 5);
        assert_eq!(request.max_result_count, 10);
        assert_eq!(request.sorting, None);
    }
}
