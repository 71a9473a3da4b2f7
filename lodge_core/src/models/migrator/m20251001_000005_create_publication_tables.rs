use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Publication::Table)
                    .col(pk_uuid(Publication::Id))
                    .col(string(Publication::Title))
                    .col(string_uniq(Publication::Slug))
                    .col(string_null(Publication::Subtitle))
                    .col(text(Publication::Summary))
                    .col(text(Publication::Body))
                    .col(string_null(Publication::AuthorName))
                    .col(timestamp_with_time_zone(Publication::PublishedAt))
                    .col(string(Publication::Tags))
                    .col(boolean(Publication::IsActive))
                    .col(boolean(Publication::Featured))
                    .col(boolean(Publication::Important))
                    .col(boolean(Publication::MembersOnly))
                    .col(big_integer(Publication::Visits))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_publication_published_at")
                    .table(Publication::Table)
                    .col(Publication::PublishedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PublicationCategory::Table)
                    .col(pk_uuid(PublicationCategory::Id))
                    .col(string(PublicationCategory::Name))
                    .col(string_uniq(PublicationCategory::Slug))
                    .col(string(PublicationCategory::Description))
                    .col(integer(PublicationCategory::SortOrder))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PublicationCategoryLink::Table)
                    .col(uuid(PublicationCategoryLink::PublicationId))
                    .col(uuid(PublicationCategoryLink::CategoryId))
                    .primary_key(
                        Index::create()
                            .col(PublicationCategoryLink::PublicationId)
                            .col(PublicationCategoryLink::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_publication_category_link_publication_id")
                            .from(
                                PublicationCategoryLink::Table,
                                PublicationCategoryLink::PublicationId,
                            )
                            .to(Publication::Table, Publication::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_publication_category_link_category_id")
                            .from(
                                PublicationCategoryLink::Table,
                                PublicationCategoryLink::CategoryId,
                            )
                            .to(PublicationCategory::Table, PublicationCategory::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_publication_category_link_category_id")
                    .table(PublicationCategoryLink::Table)
                    .col(PublicationCategoryLink::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PublicationCategoryLink::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PublicationCategory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Publication::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Publication {
    Table,
    Id,
    Title,
    Slug,
    Subtitle,
    Summary,
    Body,
    AuthorName,
    PublishedAt,
    Tags,
    IsActive,
    Featured,
    Important,
    MembersOnly,
    Visits,
}

#[derive(DeriveIden)]
enum PublicationCategory {
    Table,
    Id,
    Name,
    Slug,
    Description,
    SortOrder,
}

#[derive(DeriveIden)]
enum PublicationCategoryLink {
    Table,
    PublicationId,
    CategoryId,
}
