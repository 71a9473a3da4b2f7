use sea_orm_migration::prelude::*;

mod m20251001_000001_create_site_tables;
mod m20251001_000002_create_membership_tables;
mod m20251001_000003_create_education_tables;
mod m20251001_000004_create_calendar_tables;
mod m20251001_000005_create_publication_tables;
mod m20251001_000006_create_showcase_tables;
mod m20251001_000007_create_contact_message_table;
mod m20251001_000008_create_directory_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_site_tables::Migration),
            Box::new(m20251001_000002_create_membership_tables::Migration),
            Box::new(m20251001_000003_create_education_tables::Migration),
            Box::new(m20251001_000004_create_calendar_tables::Migration),
            Box::new(m20251001_000005_create_publication_tables::Migration),
            Box::new(m20251001_000006_create_showcase_tables::Migration),
            Box::new(m20251001_000007_create_contact_message_table::Migration),
            Box::new(m20251001_000008_create_directory_tables::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Database;

    #[tokio::test]
    async fn test_migrations_okay() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        let schema_manager = SchemaManager::new(&db);

        Migrator::refresh(&db).await?;

        for table in [
            "site_config",
            "page",
            "section",
            "menu_item",
            "rank",
            "position",
            "member",
            "course",
            "course_enrollment",
            "material",
            "library_item",
            "event",
            "event_attendance",
            "meeting",
            "publication",
            "publication_category",
            "publication_category_link",
            "statistic",
            "historical_event",
            "historical_document",
            "quote",
            "carousel_slide",
            "testimonial",
            "principle",
            "activity",
            "contact_message",
            "sister_lodge",
            "contact_channel",
            "office_hours",
            "historical_image",
        ] {
            assert!(schema_manager.has_table(table).await?, "missing table {table}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_migrations_roll_back() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        let schema_manager = SchemaManager::new(&db);

        Migrator::up(&db, None).await?;
        Migrator::down(&db, None).await?;

        assert!(!schema_manager.has_table("member").await?);
        assert!(!schema_manager.has_table("site_config").await?);
        assert!(!schema_manager.has_table("historical_image").await?);
        Ok(())
    }
}
