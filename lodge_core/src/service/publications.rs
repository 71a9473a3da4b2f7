use sea_orm::sea_query::Expr;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    entity::prelude::*,
    ids::{CategoryId, PublicationId},
    pagination::{paginate, Paged},
    service::search::any_contains,
    visibility::{Gated, Viewer},
};

pub const PUBLICATIONS_PAGE_SIZE: u64 = 9;
const RELATED_LIMIT: u64 = 3;

#[derive(Debug, Error)]
pub enum PublicationsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("publication not found")]
    NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationFilter {
    pub category: Option<String>,
    pub query: Option<String>,
    pub page: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: PublicationCategoryModel,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicationDetail {
    pub publication: PublicationModel,
    pub categories: Vec<PublicationCategoryModel>,
    pub related: Vec<PublicationModel>,
}

#[derive(Clone)]
pub struct PublicationsService {
    db: DatabaseConnection,
}

impl PublicationsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ids_in_categories(
        &self,
        categories: Vec<CategoryId>,
    ) -> Result<Vec<PublicationId>, DbErr> {
        PublicationCategoryLink::find()
            .select_only()
            .column(PublicationCategoryLinkColumn::PublicationId)
            .distinct()
            .filter(PublicationCategoryLinkColumn::CategoryId.is_in(categories))
            .into_tuple()
            .all(&self.db)
            .await
    }

    /// Visible publications, newest first, narrowed by category slug and
    /// free text.
    pub async fn list(
        &self,
        viewer: Viewer,
        filter: &PublicationFilter,
    ) -> Result<Paged<PublicationModel>, PublicationsServiceError> {
        let mut select = Publication::find_visible(viewer);

        if let Some(slug) = filter.category.as_deref().filter(|slug| !slug.is_empty()) {
            let category = PublicationCategory::find()
                .filter(PublicationCategoryColumn::Slug.eq(slug))
                .one(&self.db)
                .await?;
            let ids = match category {
                Some(category) => self.ids_in_categories(vec![category.id]).await?,
                None => Vec::new(),
            };
            select = select.filter(PublicationColumn::Id.is_in(ids));
        }

        if let Some(query) = filter.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            select = select.filter(any_contains(
                &[
                    PublicationColumn::Title,
                    PublicationColumn::Body,
                    PublicationColumn::Subtitle,
                ],
                query,
            ));
        }

        let select = select.order_by_desc(PublicationColumn::PublishedAt);
        Ok(paginate(&self.db, select, PUBLICATIONS_PAGE_SIZE, filter.page).await?)
    }

    /// Categories holding at least one publication, by name.
    pub async fn categories_with_counts(
        &self,
    ) -> Result<Vec<CategoryCount>, PublicationsServiceError> {
        let counts: Vec<(CategoryId, i64)> = PublicationCategoryLink::find()
            .select_only()
            .column(PublicationCategoryLinkColumn::CategoryId)
            .column_as(
                Expr::col(PublicationCategoryLinkColumn::PublicationId).count(),
                "total",
            )
            .group_by(PublicationCategoryLinkColumn::CategoryId)
            .into_tuple()
            .all(&self.db)
            .await?;

        let categories = PublicationCategory::find()
            .order_by_asc(PublicationCategoryColumn::Name)
            .all(&self.db)
            .await?;

        Ok(categories
            .into_iter()
            .filter_map(|category| {
                counts
                    .iter()
                    .find(|(id, _)| *id == category.id)
                    .filter(|(_, total)| *total > 0)
                    .map(|(_, total)| CategoryCount {
                        category,
                        total: *total as u64,
                    })
            })
            .collect())
    }

    /// Loads a publication and counts the view.
    pub async fn detail(
        &self,
        slug: &str,
        viewer: Viewer,
    ) -> Result<PublicationDetail, PublicationsServiceError> {
        let mut publication = Publication::find_visible(viewer)
            .filter(PublicationColumn::Slug.eq(slug))
            .one(&self.db)
            .await?
            .ok_or(PublicationsServiceError::NotFound)?;

        Publication::update_many()
            .col_expr(
                PublicationColumn::Visits,
                Expr::col(PublicationColumn::Visits).add(1),
            )
            .filter(PublicationColumn::Id.eq(publication.id))
            .exec(&self.db)
            .await?;
        publication.visits += 1;
        debug!(publication = %publication.slug, visits = publication.visits, "publication viewed");

        let category_ids: Vec<CategoryId> = PublicationCategoryLink::find()
            .select_only()
            .column(PublicationCategoryLinkColumn::CategoryId)
            .filter(PublicationCategoryLinkColumn::PublicationId.eq(publication.id))
            .into_tuple()
            .all(&self.db)
            .await?;

        if category_ids.is_empty() {
            return Ok(PublicationDetail {
                publication,
                categories: Vec::new(),
                related: Vec::new(),
            });
        }

        let categories = PublicationCategory::find()
            .filter(PublicationCategoryColumn::Id.is_in(category_ids.clone()))
            .order_by_asc(PublicationCategoryColumn::Name)
            .all(&self.db)
            .await?;

        let related = self.related(&publication, category_ids, viewer).await?;

        Ok(PublicationDetail {
            publication,
            categories,
            related,
        })
    }

    async fn related(
        &self,
        publication: &PublicationModel,
        categories: Vec<CategoryId>,
        viewer: Viewer,
    ) -> Result<Vec<PublicationModel>, DbErr> {
        let ids: Vec<PublicationId> = self
            .ids_in_categories(categories)
            .await?
            .into_iter()
            .filter(|id| *id != publication.id)
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Publication::find_visible(viewer)
            .filter(PublicationColumn::Id.is_in(ids))
            .order_by_desc(PublicationColumn::PublishedAt)
            .limit(RELATED_LIMIT)
            .all(&self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::test_utils;

    async fn setup_test_service() -> PublicationsService {
        PublicationsService::new(test_utils::setup_test_db().await)
    }

    #[tokio::test]
    async fn test_list_paginates_newest_first() {
        let service = setup_test_service().await;
        let now = Utc::now();
        for n in 0..11 {
            test_utils::publication(&format!("p{n:02}"), now - Duration::days(n))
                .insert(&service.db)
                .await
                .unwrap();
        }

        let first = service
            .list(Viewer::Public, &PublicationFilter::default())
            .await
            .unwrap();
        assert_eq!(first.items.len(), 9);
        assert_eq!(first.items[0].slug, "p00");
        assert_eq!(first.num_pages, 2);

        let last = service
            .list(
                Viewer::Public,
                &PublicationFilter {
                    page: Some(7),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(last.number, 2);
        assert_eq!(last.items.len(), 2);
    }

    #[tokio::test]
    async fn test_list_filters_by_category_and_query() {
        let service = setup_test_service().await;
        let history = test_utils::category("historia").insert(&service.db).await.unwrap();
        let mut tagged = test_utils::publication("fundacion", Utc::now());
        tagged.body = Set("La fundación del taller".to_owned());
        let tagged = tagged.insert(&service.db).await.unwrap();
        test_utils::link_category(&service.db, tagged.id, history.id).await;
        test_utils::publication("otra", Utc::now())
            .insert(&service.db)
            .await
            .unwrap();

        let by_category = service
            .list(
                Viewer::Public,
                &PublicationFilter {
                    category: Some("historia".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_category.total, 1);

        let unknown = service
            .list(
                Viewer::Public,
                &PublicationFilter {
                    category: Some("nada".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(unknown.total, 0);

        let by_query = service
            .list(
                Viewer::Public,
                &PublicationFilter {
                    query: Some("TALLER".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_query.total, 1);
        assert_eq!(by_query.items[0].slug, "fundacion");
    }

    #[tokio::test]
    async fn test_categories_with_counts_skip_empty() {
        let service = setup_test_service().await;
        let used = test_utils::category("ritual").insert(&service.db).await.unwrap();
        test_utils::category("vacia").insert(&service.db).await.unwrap();
        for slug in ["a", "b"] {
            let publication = test_utils::publication(slug, Utc::now())
                .insert(&service.db)
                .await
                .unwrap();
            test_utils::link_category(&service.db, publication.id, used.id).await;
        }

        let counts = service.categories_with_counts().await.unwrap();

        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].category.slug, "ritual");
        assert_eq!(counts[0].total, 2);
    }

    #[tokio::test]
    async fn test_detail_counts_each_view() {
        let service = setup_test_service().await;
        test_utils::publication("vista", Utc::now())
            .insert(&service.db)
            .await
            .unwrap();

        let first = service.detail("vista", Viewer::Public).await.unwrap();
        let second = service.detail("vista", Viewer::Public).await.unwrap();

        assert_eq!(first.publication.visits, 1);
        assert_eq!(second.publication.visits, 2);
    }

    #[tokio::test]
    async fn test_detail_hides_members_only_from_public() {
        let service = setup_test_service().await;
        let mut private = test_utils::publication("interna", Utc::now());
        private.members_only = Set(true);
        private.insert(&service.db).await.unwrap();

        assert!(matches!(
            service.detail("interna", Viewer::Public).await,
            Err(PublicationsServiceError::NotFound)
        ));

        let stored = Publication::find()
            .filter(PublicationColumn::Slug.eq("interna"))
            .one(&service.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.visits, 0);
    }

    #[tokio::test]
    async fn test_related_share_a_category() {
        let service = setup_test_service().await;
        let now = Utc::now();
        let shared = test_utils::category("simbolos").insert(&service.db).await.unwrap();
        let other = test_utils::category("noticias").insert(&service.db).await.unwrap();

        let main = test_utils::publication("principal", now)
            .insert(&service.db)
            .await
            .unwrap();
        test_utils::link_category(&service.db, main.id, shared.id).await;

        for n in 1..=4 {
            let related = test_utils::publication(&format!("rel{n}"), now - Duration::days(n))
                .insert(&service.db)
                .await
                .unwrap();
            test_utils::link_category(&service.db, related.id, shared.id).await;
            test_utils::link_category(&service.db, related.id, other.id).await;
        }
        let unrelated = test_utils::publication("ajena", now)
            .insert(&service.db)
            .await
            .unwrap();
        test_utils::link_category(&service.db, unrelated.id, other.id).await;

        let detail = service.detail("principal", Viewer::Public).await.unwrap();

        let slugs: Vec<_> = detail.related.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["rel1", "rel2", "rel3"]);
        assert_eq!(detail.categories.len(), 1);
    }
}
