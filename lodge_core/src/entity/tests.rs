#[cfg(test)]
mod entity_tests {
    use chrono::Utc;

    use crate::entity::prelude::*;
    use crate::test_utils::{self, setup_test_db};

    #[tokio::test]
    async fn test_create_and_find_course_by_slug() {
        let db = setup_test_db().await;

        let created = test_utils::course("simbolismo").insert(&db).await.unwrap();

        let found = Course::find()
            .filter(CourseColumn::Slug.eq("simbolismo"))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, created);
        assert_eq!(found.audience, Audience::All);
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let db = setup_test_db().await;
        test_utils::publication("aviso", Utc::now())
            .insert(&db)
            .await
            .unwrap();

        let duplicate = test_utils::publication("aviso", Utc::now()).insert(&db).await;

        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_rank_in_use_cannot_be_deleted() {
        let db = setup_test_db().await;
        let member = test_utils::insert_member_with_rank(&db, "Juan", 2).await;

        let rank = Rank::find_by_id(member.rank_id).one(&db).await.unwrap().unwrap();
        let deleted = rank.delete(&db).await;

        assert!(deleted.is_err());
        assert_eq!(Rank::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_deleting_course_drops_enrollments_and_materials() {
        let db = setup_test_db().await;
        let course = test_utils::course("intro").insert(&db).await.unwrap();
        let member = test_utils::insert_member_with_rank(&db, "Juan", 1).await;
        test_utils::material("Lectura", Some(course.id))
            .insert(&db)
            .await
            .unwrap();
        CourseEnrollmentActiveModel {
            course_id: Set(course.id),
            member_id: Set(member.id),
            enrolled_at: Set(Utc::now()),
        }
        .insert(&db)
        .await
        .unwrap();

        course.delete(&db).await.unwrap();

        assert_eq!(CourseEnrollment::find().count(&db).await.unwrap(), 0);
        assert_eq!(Material::find().count(&db).await.unwrap(), 0);
        assert_eq!(Member::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_attendance_rejected() {
        let db = setup_test_db().await;
        let event = test_utils::event("tenida", Utc::now()).insert(&db).await.unwrap();
        let member = test_utils::insert_member_with_rank(&db, "Juan", 1).await;
        let attend = || EventAttendanceActiveModel {
            event_id: Set(event.id),
            member_id: Set(member.id),
            confirmed_at: Set(Utc::now()),
        };

        attend().insert(&db).await.unwrap();

        assert!(attend().insert(&db).await.is_err());
    }

    #[tokio::test]
    async fn test_deleting_historical_event_keeps_documents() {
        let db = setup_test_db().await;
        let event = test_utils::historical_event("Fundación", test_utils::date(1980, 3, 21))
            .insert(&db)
            .await
            .unwrap();
        let document = test_utils::historical_document("Carta patente", Some(event.id))
            .insert(&db)
            .await
            .unwrap();

        event.delete(&db).await.unwrap();

        let document = HistoricalDocument::find_by_id(document.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(document.historical_event_id, None);
    }

    #[tokio::test]
    async fn test_page_sections_relation() {
        let db = setup_test_db().await;
        let page = test_utils::page("acerca").insert(&db).await.unwrap();
        test_utils::section(page.id, "Origen", 1).insert(&db).await.unwrap();
        test_utils::section(page.id, "Hoy", 2).insert(&db).await.unwrap();

        let sections = page.find_related(Section).all(&db).await.unwrap();

        assert_eq!(sections.len(), 2);
    }

    #[tokio::test]
    async fn test_member_status_and_position_helpers() {
        let db = setup_test_db().await;
        let rank = test_utils::rank(3).insert(&db).await.unwrap();
        let position = test_utils::position("Orador", PositionTier::Officer, 4)
            .insert(&db)
            .await
            .unwrap();
        let mut member = test_utils::member("Pedro", rank.id);
        member.status = Set(MemberStatus::Honorary);
        member.position_id = Set(Some(position.id));
        member.position_started_on = Set(Some(test_utils::date(2024, 1, 1)));
        member.position_ends_on = Set(Some(test_utils::date(2024, 12, 31)));
        let member = member.insert(&db).await.unwrap();

        assert_eq!(member.status.label(), "Honorario");
        assert!(member.holds_position_on(test_utils::date(2024, 6, 1)));
        assert!(!member.holds_position_on(test_utils::date(2025, 1, 1)));

        position.delete(&db).await.unwrap();
        let member = Member::find_by_id(member.id).one(&db).await.unwrap().unwrap();
        assert_eq!(member.position_id, None);
    }

    #[tokio::test]
    async fn test_publication_tags() {
        let db = setup_test_db().await;
        let mut publication = test_utils::publication("etiquetas", Utc::now());
        publication.tags = Set(" rito, , historia ,logia".to_owned());
        let publication = publication.insert(&db).await.unwrap();

        assert_eq!(publication.tag_list(), vec!["rito", "historia", "logia"]);
    }
}
