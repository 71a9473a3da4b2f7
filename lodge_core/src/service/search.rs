use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    Condition,
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    entity::prelude::*,
    visibility::{Gated, Viewer},
};

pub const MIN_QUERY_CHARS: usize = 3;
const RESULTS_PER_KIND: u64 = 5;

#[derive(Debug, Error)]
pub enum SearchServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),
}

/// Case-insensitive substring match of `needle` against `column`.
///
/// `%`, `_` and `\` in the needle match literally.
pub fn icontains<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');

    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

/// Any of `columns` contains `needle`.
pub fn any_contains<C: ColumnTrait>(columns: &[C], needle: &str) -> Condition {
    columns
        .iter()
        .fold(Condition::any(), |cond, column| cond.add(icontains(*column, needle)))
}

#[derive(Debug, Clone, Serialize)]
pub struct Hits<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Default for Hits<T> {
    fn default() -> Self {
        Hits {
            items: Vec::new(),
            total: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub query: String,
    /// False when the query was too short to run.
    pub searched: bool,
    pub publications: Hits<PublicationModel>,
    pub courses: Hits<CourseModel>,
    pub events: Hits<EventModel>,
    pub pages: Hits<PageModel>,
}

impl SearchResults {
    pub fn total(&self) -> u64 {
        self.publications.total + self.courses.total + self.events.total + self.pages.total
    }
}

#[derive(Clone)]
pub struct SearchService {
    db: DatabaseConnection,
}

impl SearchService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn hits<E>(
        &self,
        viewer: Viewer,
        columns: &[E::Column],
        needle: &str,
    ) -> Result<Hits<E::Model>, DbErr>
    where
        E: Gated,
        E::Model: Sync,
    {
        let select = E::find_visible(viewer).filter(any_contains(columns, needle));
        let total = select.clone().count(&self.db).await?;
        let items = select.limit(RESULTS_PER_KIND).all(&self.db).await?;
        Ok(Hits { items, total })
    }

    /// Searches publications, courses, events and pages. Queries shorter
    /// than [`MIN_QUERY_CHARS`] characters return no sections.
    pub async fn search(
        &self,
        query: &str,
        viewer: Viewer,
    ) -> Result<SearchResults, SearchServiceError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(SearchResults {
                query: query.to_owned(),
                ..Default::default()
            });
        }

        Ok(SearchResults {
            query: query.to_owned(),
            searched: true,
            publications: self
                .hits::<Publication>(
                    viewer,
                    &[
                        PublicationColumn::Title,
                        PublicationColumn::Body,
                        PublicationColumn::Subtitle,
                    ],
                    query,
                )
                .await?,
            courses: self
                .hits::<Course>(
                    viewer,
                    &[
                        CourseColumn::Title,
                        CourseColumn::Description,
                        CourseColumn::Summary,
                    ],
                    query,
                )
                .await?,
            events: self
                .hits::<Event>(viewer, &[EventColumn::Title, EventColumn::Description], query)
                .await?,
            pages: self
                .hits::<Page>(
                    viewer,
                    &[PageColumn::Title, PageColumn::Body, PageColumn::Subtitle],
                    query,
                )
                .await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use proptest::prelude::*;

    use super::*;
    use crate::test_utils;

    async fn setup_test_service() -> SearchService {
        SearchService::new(test_utils::setup_test_db().await)
    }

    #[tokio::test]
    async fn test_short_query_returns_no_sections() {
        let service = setup_test_service().await;
        test_utils::page("ab").insert(&service.db).await.unwrap();

        let results = service.search("  ab  ", Viewer::Member).await.unwrap();

        assert!(!results.searched);
        assert_eq!(results.total(), 0);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_across_kinds() {
        let service = setup_test_service().await;
        let mut publication = test_utils::publication("luz", Utc::now());
        publication.title = Set("La Luz del Oriente".to_owned());
        publication.insert(&service.db).await.unwrap();
        let mut course = test_utils::course("curso-luz");
        course.summary = Set("Estudio de la LUZ".to_owned());
        course.insert(&service.db).await.unwrap();
        let mut event = test_utils::event("tenida-luz", Utc::now());
        event.description = Set("Ceremonia de luz".to_owned());
        event.insert(&service.db).await.unwrap();

        let results = service.search("luz", Viewer::Public).await.unwrap();

        assert!(results.searched);
        assert_eq!(results.publications.total, 1);
        assert_eq!(results.courses.total, 1);
        assert_eq!(results.events.total, 1);
        assert_eq!(results.total(), 3);
    }

    #[tokio::test]
    async fn test_results_capped_with_full_total() {
        let service = setup_test_service().await;
        for n in 0..7 {
            let mut page = test_utils::page(&format!("templo-{n}"));
            page.title = Set(format!("Templo {n}"));
            page.insert(&service.db).await.unwrap();
        }

        let results = service.search("templo", Viewer::Public).await.unwrap();

        assert_eq!(results.pages.items.len(), 5);
        assert_eq!(results.pages.total, 7);
    }

    #[tokio::test]
    async fn test_wildcards_match_literally() {
        let service = setup_test_service().await;
        let mut page = test_utils::page("porcentaje");
        page.title = Set("Cien por ciento".to_owned());
        page.insert(&service.db).await.unwrap();

        let results = service.search("%%%", Viewer::Public).await.unwrap();

        assert!(results.searched);
        assert_eq!(results.pages.total, 0);
    }

    #[tokio::test]
    async fn test_members_only_hits_need_membership() {
        let service = setup_test_service().await;
        let mut course = test_utils::course("secreto");
        course.title = Set("Grado secreto".to_owned());
        course.members_only = Set(true);
        course.insert(&service.db).await.unwrap();

        let public = service.search("secreto", Viewer::Public).await.unwrap();
        let member = service.search("secreto", Viewer::Member).await.unwrap();

        assert_eq!(public.courses.total, 0);
        assert_eq!(member.courses.total, 1);
    }

    fn viewer() -> impl Strategy<Value = Viewer> {
        prop_oneof![Just(Viewer::Public), Just(Viewer::Member)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn inactive_content_never_matches(
            members_only in any::<bool>(),
            viewer in viewer(),
            field in 0usize..3,
        ) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let results = runtime.block_on(async {
                let service = setup_test_service().await;
                let mut publication = test_utils::publication("oculta", Utc::now());
                let mut page = test_utils::page("oculta");
                let mut course = test_utils::course("oculta");
                let mut event = test_utils::event("oculta", Utc::now());
                let text = "acacia".to_owned();
                match field {
                    0 => {
                        publication.title = Set(text.clone());
                        page.title = Set(text.clone());
                        course.title = Set(text.clone());
                        event.title = Set(text);
                    }
                    1 => {
                        publication.body = Set(text.clone());
                        page.body = Set(text.clone());
                        course.description = Set(text.clone());
                        event.description = Set(text);
                    }
                    _ => {
                        publication.subtitle = Set(Some(text.clone()));
                        page.subtitle = Set(Some(text.clone()));
                        course.summary = Set(text.clone());
                        event.description = Set(text);
                    }
                }
                publication.is_active = Set(false);
                publication.members_only = Set(members_only);
                page.is_active = Set(false);
                page.members_only = Set(members_only);
                course.is_active = Set(false);
                course.members_only = Set(members_only);
                event.is_active = Set(false);
                event.members_only = Set(members_only);
                publication.insert(&service.db).await.unwrap();
                page.insert(&service.db).await.unwrap();
                course.insert(&service.db).await.unwrap();
                event.insert(&service.db).await.unwrap();

                service.search("ACACIA", viewer).await.unwrap()
            });

            prop_assert!(results.searched);
            prop_assert_eq!(results.total(), 0);
        }
    }
}
