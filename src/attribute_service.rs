// Copyright 2025 Cowboy AI, LLC.

//! Attribute domain service and application service

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::Attribute;
use crate::dto::{AttributeDto, CreateAttributeDto, PagedRequest, PagedResult, UpdateAttributeDto};
use crate::entity::{AttributeMarker, EntityId, SellerMarker};
use crate::errors::{CatalogError, CatalogResult};
use crate::repository::Repository;
use crate::settings::AttributeSettings;

/// Attribute ID
pub type AttributeId = EntityId<AttributeMarker>;

/// Domain service creating attributes
#[derive(Clone)]
pub struct AttributeManager {
    repository: Arc<dyn Repository<Attribute>>,
}

impl AttributeManager {
    /// Create a manager over an attribute repository
    pub fn new(repository: Arc<dyn Repository<Attribute>>) -> Self {
        Self { repository }
    }

    /// Validate and store a new attribute.
    pub async fn create(
        &self,
        seller_id: Option<EntityId<SellerMarker>>,
        name: impl Into<String>,
        description: Option<String>,
    ) -> CatalogResult<Attribute> {
        let attribute = Attribute::new(seller_id, name, description)?;
        let saved = self.repository.save(&attribute).await?;
        info!(attribute_id = %saved.id(), name = saved.name(), "Created attribute");
        Ok(saved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKey {
    Name,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sorting {
    key: SortKey,
    descending: bool,
}

impl Sorting {
    fn parse(expression: Option<&str>) -> CatalogResult<Self> {
        let expression = match expression.map(str::trim) {
            None | Some("") => {
                return Ok(Self {
                    key: SortKey::CreatedAt,
                    descending: false,
                })
            }
            Some(expression) => expression,
        };

        let mut parts = expression.split_whitespace();
        let key = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            Some("name") => SortKey::Name,
            Some("created_at") | Some("creationtime") => SortKey::CreatedAt,
            _ => {
                return Err(CatalogError::invalid_argument(
                    "sorting",
                    format!("unsupported sort field in `{expression}`"),
                ))
            }
        };
        let descending = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => false,
            Some("desc") => true,
            Some(other) => {
                return Err(CatalogError::invalid_argument(
                    "sorting",
                    format!("unsupported sort direction `{other}`"),
                ))
            }
        };
        if parts.next().is_some() {
            return Err(CatalogError::invalid_argument(
                "sorting",
                format!("unexpected trailing input in `{expression}`"),
            ));
        }
        Ok(Self { key, descending })
    }

    fn compare(&self, a: &Attribute, b: &Attribute) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => a.name().cmp(b.name()),
            SortKey::CreatedAt => a.audit().created_at.cmp(&b.audit().created_at),
        }
        .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Application service mapping attributes to DTOs
pub struct AttributeAppService {
    repository: Arc<dyn Repository<Attribute>>,
    manager: AttributeManager,
    settings: AttributeSettings,
}

impl AttributeAppService {
    /// Create the service
    pub fn new(repository: Arc<dyn Repository<Attribute>>, settings: AttributeSettings) -> Self {
        Self {
            manager: AttributeManager::new(Arc::clone(&repository)),
            repository,
            settings,
        }
    }

    /// One page of attributes; the page size is capped by `max_page_size`.
    pub async fn get_list_paged(
        &self,
        request: PagedRequest,
    ) -> CatalogResult<PagedResult<AttributeDto>> {
        let sorting = Sorting::parse(request.sorting.as_deref())?;
        let max_page_size = self.settings.max_page_size as usize;
        let take = request.max_result_count.min(max_page_size);
        if take < request.max_result_count {
            debug!(
                requested = request.max_result_count,
                max_page_size, "Clamped attribute page size"
            );
        }

        let mut attributes = self.repository.list().await?;
        attributes.sort_by(|a, b| sorting.compare(a, b));
        let total_count = attributes.len();
        let items = attributes
            .iter()
            .skip(request.skip_count)
            .take(take)
            .map(AttributeDto::from)
            .collect();

        Ok(PagedResult { total_count, items })
    }

    /// All attributes, oldest first.
    pub async fn get_list(&self) -> CatalogResult<Vec<AttributeDto>> {
        let sorting = Sorting::parse(None)?;
        let mut attributes = self.repository.list().await?;
        attributes.sort_by(|a, b| sorting.compare(a, b));
        Ok(attributes.iter().map(AttributeDto::from).collect())
    }

    /// One attribute by ID.
    pub async fn get(&self, id: Uuid) -> CatalogResult<AttributeDto> {
        let attribute = self.repository.get(AttributeId::from_uuid(id)).await?;
        Ok(AttributeDto::from(&attribute))
    }

    /// Create an attribute.
    pub async fn create(&self, input: CreateAttributeDto) -> CatalogResult<AttributeDto> {
        let seller_id = input.seller_id.map(EntityId::from_uuid);
        let attribute = self
            .manager
            .create(seller_id, input.name, input.description)
            .await?;
        Ok(AttributeDto::from(&attribute))
    }

    /// Replace the name and description of an attribute.
    pub async fn update(&self, id: Uuid, input: UpdateAttributeDto) -> CatalogResult<AttributeDto> {
        let mut attribute = self.repository.get(AttributeId::from_uuid(id)).await?;
        attribute.set_name(input.name)?;
        attribute.set_description(input.description)?;
        let saved = self.repository.save(&attribute).await?;
        info!(attribute_id = %saved.id(), "Updated attribute");
        Ok(AttributeDto::from(&saved))
    }

    /// Delete an attribute.
    pub async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        let id = AttributeId::from_uuid(id);
        if !self.repository.delete(id).await? {
            return Err(CatalogError::not_found("Attribute", id));
        }
        info!(attribute_id = %id, "Deleted attribute");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;

    fn service(max_page_size: u32) -> AttributeAppService {
        AttributeAppService::new(
            Arc::new(InMemoryRepository::<Attribute>::new()),
            AttributeSettings { max_page_size },
        )
    }

    fn create(name: &str) -> CreateAttributeDto {
        CreateAttributeDto {
            seller_id: None,
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn sorting_expressions() {
        assert_eq!(
            Sorting::parse(Some("name desc")).unwrap(),
            Sorting {
                key: SortKey::Name,
                descending: true
            }
        );
        assert_eq!(
            Sorting::parse(Some(" Name ")).unwrap(),
            Sorting {
                key: SortKey::Name,
                descending: false
            }
        );
        assert_eq!(Sorting::parse(Some("")).unwrap().key, SortKey::CreatedAt);
        assert!(Sorting::parse(Some("price")).is_err());
        assert!(Sorting::parse(Some("name sideways")).is_err());
        assert!(Sorting::parse(Some("name desc extra")).is_err());
    }

    #[tokio::test]
    async fn paged_list_clamps_page_size() {
        let service = service(2);
        for name in ["Color", "Size", "Material"] {
            service.create(create(name)).await.unwrap();
        }

        let page = service
            .get_list_paged(PagedRequest {
                skip_count: 0,
                max_result_count: 50,
                sorting: Some("name".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(page.total_count, 3);
        let names: Vec<&str> = page.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Color", "Material"]);

        let page = service
            .get_list_paged(PagedRequest {
                skip_count: 2,
                max_result_count: 50,
                sorting: Some("name".to_string()),
            })
            .await
            .unwrap();
        let names: Vec<&str> = page.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Size"]);
    }

    #[tokio::test]
    async fn equal_timestamps_sort_by_id() {
        let repository = Arc::new(InMemoryRepository::<Attribute>::new());
        let service = AttributeAppService::new(repository.clone(), AttributeSettings::default());
        let stored = |id: &str, name: &str| -> Attribute {
            serde_json::from_value(serde_json::json!({
                "id": id,
                "seller_id": null,
                "name": name,
                "description": null,
                "audit": {
                    "created_at": "2025-01-01T00:00:00Z",
                    "updated_at": "2025-01-01T00:00:00Z"
                },
                "version": 0
            }))
            .unwrap()
        };
        for attribute in [
            stored("00000000-0000-4000-8000-000000000003", "Material"),
            stored("00000000-0000-4000-8000-000000000001", "Size"),
            stored("00000000-0000-4000-8000-000000000002", "Color"),
        ] {
            repository.save(&attribute).await.unwrap();
        }

        for _ in 0..3 {
            let page = service.get_list_paged(PagedRequest::default()).await.unwrap();
            let names: Vec<&str> = page.items.iter().map(|a| a.name.as_str()).collect();
            assert_eq!(names, vec!["Size", "Color", "Material"]);
        }
    }

    #[tokio::test]
    async fn create_update_delete() {
        let service = service(100);
        let created = service.create(create("Color")).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateAttributeDto {
                    name: "Colour".to_string(),
                    description: Some("Primary colour".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Colour");
        assert_eq!(service.get(created.id).await.unwrap(), updated);
        assert_eq!(service.get_list().await.unwrap().len(), 1);

        service.delete(created.id).await.unwrap();
        assert!(service.get(created.id).await.unwrap_err().is_not_found());
        assert!(service.delete(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn invalid_input_is_rejected() {
        let service = service(100);
        let err = service.create(create("  ")).await.unwrap_err();
        assert!(err.is_invalid_argument());

        let created = service.create(create("Color")).await.unwrap();
        let err = service
            .update(
                created.id,
                UpdateAttributeDto {
                    name: String::new(),
                    description: None,
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(service.get(created.id).await.unwrap().name, "Color");
    }
}
