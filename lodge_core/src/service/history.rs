use serde::Serialize;
use thiserror::Error;

use crate::{
    entity::prelude::*,
    ids::HistoricalEventId,
    visibility::{Gated, Viewer},
};

const PUBLIC_DOCUMENTS: u64 = 6;
const PRIVATE_DOCUMENTS: u64 = 10;
const FEATURED_IMAGES: u64 = 12;
pub const HISTORY_PAGE_SLUG: &str = "historia";

#[derive(Debug, Error)]
pub enum HistoryServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("historical event not found")]
    NotFound,
}

#[derive(Debug, Clone, Serialize)]
pub struct Decade {
    pub decade: i32,
    pub events: Vec<HistoricalEventModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoricalEventDetail {
    pub event: HistoricalEventModel,
    pub documents: Vec<HistoricalDocumentModel>,
}

#[derive(Clone)]
pub struct HistoryService {
    db: DatabaseConnection,
}

impl HistoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every historical event grouped by decade, most recent decade and
    /// event first.
    pub async fn timeline(&self) -> Result<Vec<Decade>, HistoryServiceError> {
        let events = HistoricalEvent::find()
            .order_by_desc(HistoricalEventColumn::OccurredOn)
            .order_by_asc(HistoricalEventColumn::SortOrder)
            .all(&self.db)
            .await?;

        let mut decades: Vec<Decade> = Vec::new();
        for event in events {
            let decade = event.decade();
            match decades.last_mut() {
                Some(current) if current.decade == decade => current.events.push(event),
                _ => decades.push(Decade {
                    decade,
                    events: vec![event],
                }),
            }
        }

        Ok(decades)
    }

    pub async fn event_detail(
        &self,
        id: HistoricalEventId,
        viewer: Viewer,
    ) -> Result<HistoricalEventDetail, HistoryServiceError> {
        let event = HistoricalEvent::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(HistoryServiceError::NotFound)?;

        let documents = HistoricalDocument::visible_to(event.find_related(HistoricalDocument), viewer)
            .order_by_asc(HistoricalDocumentColumn::DatedOn)
            .all(&self.db)
            .await?;

        Ok(HistoricalEventDetail { event, documents })
    }

    pub async fn public_documents(&self) -> Result<Vec<HistoricalDocumentModel>, HistoryServiceError> {
        Ok(HistoricalDocument::find_visible(Viewer::Public)
            .order_by_desc(HistoricalDocumentColumn::DatedOn)
            .limit(PUBLIC_DOCUMENTS)
            .all(&self.db)
            .await?)
    }

    /// Featured gallery pictures, most recent first.
    pub async fn featured_images(&self) -> Result<Vec<HistoricalImageModel>, HistoryServiceError> {
        Ok(HistoricalImage::find()
            .filter(HistoricalImageColumn::Featured.eq(true))
            .order_by_desc(HistoricalImageColumn::TakenOn)
            .order_by_asc(HistoricalImageColumn::SortOrder)
            .limit(FEATURED_IMAGES)
            .all(&self.db)
            .await?)
    }

    /// Documents reserved to members, for the members area.
    pub async fn private_documents(&self) -> Result<Vec<HistoricalDocumentModel>, HistoryServiceError> {
        Ok(HistoricalDocument::find_visible(Viewer::Member)
            .filter(HistoricalDocumentColumn::MembersOnly.eq(true))
            .order_by_desc(HistoricalDocumentColumn::DatedOn)
            .limit(PRIVATE_DOCUMENTS)
            .all(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    async fn setup_test_service() -> HistoryService {
        HistoryService::new(test_utils::setup_test_db().await)
    }

    #[tokio::test]
    async fn test_timeline_groups_by_decade_descending() {
        let service = setup_test_service().await;
        for (title, date) in [
            ("Fundación", test_utils::date(1980, 3, 21)),
            ("Templo", test_utils::date(1987, 6, 24)),
            ("Aniversario", test_utils::date(2005, 3, 21)),
            ("Carta", test_utils::date(1999, 1, 1)),
        ] {
            test_utils::historical_event(title, date)
                .insert(&service.db)
                .await
                .unwrap();
        }

        let timeline = service.timeline().await.unwrap();

        let decades: Vec<_> = timeline.iter().map(|d| d.decade).collect();
        assert_eq!(decades, vec![2000, 1990, 1980]);
        let eighties: Vec<_> = timeline[2].events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(eighties, vec!["Templo", "Fundación"]);
    }

    #[tokio::test]
    async fn test_timeline_empty() {
        let service = setup_test_service().await;

        assert!(service.timeline().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_event_detail_filters_documents() {
        let service = setup_test_service().await;
        let event = test_utils::historical_event("Fundación", test_utils::date(1980, 3, 21))
            .insert(&service.db)
            .await
            .unwrap();
        test_utils::historical_document("Acta", Some(event.id))
            .insert(&service.db)
            .await
            .unwrap();
        let mut private = test_utils::historical_document("Ritual", Some(event.id));
        private.members_only = Set(true);
        private.insert(&service.db).await.unwrap();
        test_utils::historical_document("Suelto", None)
            .insert(&service.db)
            .await
            .unwrap();

        let public = service.event_detail(event.id, Viewer::Public).await.unwrap();
        let member = service.event_detail(event.id, Viewer::Member).await.unwrap();

        assert_eq!(public.documents.len(), 1);
        assert_eq!(member.documents.len(), 2);
        assert!(matches!(
            service.event_detail(HistoricalEventId::new(), Viewer::Member).await,
            Err(HistoryServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_public_and_private_documents() {
        let service = setup_test_service().await;
        test_utils::historical_document("Abierto", None)
            .insert(&service.db)
            .await
            .unwrap();
        let mut private = test_utils::historical_document("Reservado", None);
        private.members_only = Set(true);
        private.insert(&service.db).await.unwrap();

        let public = service.public_documents().await.unwrap();
        let private = service.private_documents().await.unwrap();

        assert_eq!(public.len(), 1);
        assert_eq!(public[0].title, "Abierto");
        assert_eq!(private.len(), 1);
        assert_eq!(private[0].title, "Reservado");
    }

    #[tokio::test]
    async fn test_featured_images_newest_first_and_capped() {
        let service = setup_test_service().await;
        for year in 1990..2005 {
            test_utils::historical_image(&format!("foto-{year}"), Some(test_utils::date(year, 6, 1)))
                .insert(&service.db)
                .await
                .unwrap();
        }
        let mut plain = test_utils::historical_image("sin-destacar", Some(test_utils::date(2010, 1, 1)));
        plain.featured = Set(false);
        plain.insert(&service.db).await.unwrap();

        let images = service.featured_images().await.unwrap();

        assert_eq!(images.len(), 12);
        assert_eq!(images[0].title, "foto-2004");
        assert!(images.iter().all(|image| image.featured));
    }
}
