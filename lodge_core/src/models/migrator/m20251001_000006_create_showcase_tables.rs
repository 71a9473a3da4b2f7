use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Statistic::Table)
                    .col(pk_uuid(Statistic::Id))
                    .col(string(Statistic::Title))
                    .col(string(Statistic::RawValue))
                    .col(string_null(Statistic::Subtitle))
                    .col(string_null(Statistic::Icon))
                    .col(string_len(Statistic::Category, 20))
                    .col(boolean(Statistic::IsAutomatic))
                    .col(string_len_null(Statistic::AutomaticKind, 50))
                    .col(integer(Statistic::SortOrder))
                    .col(boolean(Statistic::IsActive))
                    .col(boolean(Statistic::Featured))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HistoricalEvent::Table)
                    .col(pk_uuid(HistoricalEvent::Id))
                    .col(string(HistoricalEvent::Title))
                    .col(date(HistoricalEvent::OccurredOn))
                    .col(string_null(HistoricalEvent::DateLabel))
                    .col(text(HistoricalEvent::Description))
                    .col(text(HistoricalEvent::Summary))
                    .col(string_null(HistoricalEvent::VideoUrl))
                    .col(integer(HistoricalEvent::SortOrder))
                    .col(boolean(HistoricalEvent::IsMilestone))
                    .col(string(HistoricalEvent::Category))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HistoricalDocument::Table)
                    .col(pk_uuid(HistoricalDocument::Id))
                    .col(string(HistoricalDocument::Title))
                    .col(text(HistoricalDocument::Description))
                    .col(date_null(HistoricalDocument::DatedOn))
                    .col(string(HistoricalDocument::Kind))
                    .col(uuid_null(HistoricalDocument::HistoricalEventId))
                    .col(boolean(HistoricalDocument::IsActive))
                    .col(boolean(HistoricalDocument::MembersOnly))
                    .col(boolean(HistoricalDocument::Downloadable))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_historical_document_event_id")
                            .from(HistoricalDocument::Table, HistoricalDocument::HistoricalEventId)
                            .to(HistoricalEvent::Table, HistoricalEvent::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Quote::Table)
                    .col(pk_uuid(Quote::Id))
                    .col(text(Quote::Content))
                    .col(string(Quote::Author))
                    .col(string(Quote::Category))
                    .col(boolean(Quote::IsActive))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CarouselSlide::Table)
                    .col(pk_uuid(CarouselSlide::Id))
                    .col(string(CarouselSlide::Title))
                    .col(string_null(CarouselSlide::Subtitle))
                    .col(string_null(CarouselSlide::Link))
                    .col(string(CarouselSlide::ButtonText))
                    .col(integer(CarouselSlide::SortOrder))
                    .col(boolean(CarouselSlide::IsActive))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Testimonial::Table)
                    .col(pk_uuid(Testimonial::Id))
                    .col(string(Testimonial::Author))
                    .col(string(Testimonial::Role))
                    .col(text(Testimonial::Content))
                    .col(date(Testimonial::DatedOn))
                    .col(integer(Testimonial::SortOrder))
                    .col(boolean(Testimonial::Featured))
                    .col(boolean(Testimonial::IsActive))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Principle::Table)
                    .col(pk_uuid(Principle::Id))
                    .col(string(Principle::Title))
                    .col(string_uniq(Principle::Slug))
                    .col(text(Principle::Summary))
                    .col(text(Principle::Description))
                    .col(string(Principle::Symbol))
                    .col(string_len(Principle::Pillar, 10))
                    .col(integer(Principle::SortOrder))
                    .col(boolean(Principle::Featured))
                    .col(boolean(Principle::IsActive))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .col(pk_uuid(Activity::Id))
                    .col(string(Activity::Title))
                    .col(text(Activity::Description))
                    .col(string(Activity::Icon))
                    .col(integer(Activity::SortOrder))
                    .col(boolean(Activity::IsActive))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activity::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Principle::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Testimonial::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CarouselSlide::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quote::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HistoricalDocument::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HistoricalEvent::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Statistic::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Statistic {
    Table,
    Id,
    Title,
    RawValue,
    Subtitle,
    Icon,
    Category,
    IsAutomatic,
    AutomaticKind,
    SortOrder,
    IsActive,
    Featured,
}

#[derive(DeriveIden)]
enum HistoricalEvent {
    Table,
    Id,
    Title,
    OccurredOn,
    DateLabel,
    Description,
    Summary,
    VideoUrl,
    SortOrder,
    IsMilestone,
    Category,
}

#[derive(DeriveIden)]
enum HistoricalDocument {
    Table,
    Id,
    Title,
    Description,
    DatedOn,
    Kind,
    HistoricalEventId,
    IsActive,
    MembersOnly,
    Downloadable,
}

#[derive(DeriveIden)]
enum Quote {
    Table,
    Id,
    Content,
    Author,
    Category,
    IsActive,
}

#[derive(DeriveIden)]
enum CarouselSlide {
    Table,
    Id,
    Title,
    Subtitle,
    Link,
    ButtonText,
    SortOrder,
    IsActive,
}

#[derive(DeriveIden)]
enum Testimonial {
    Table,
    Id,
    Author,
    Role,
    Content,
    DatedOn,
    SortOrder,
    Featured,
    IsActive,
}

#[derive(DeriveIden)]
enum Principle {
    Table,
    Id,
    Title,
    Slug,
    Summary,
    Description,
    Symbol,
    Pillar,
    SortOrder,
    Featured,
    IsActive,
}

#[derive(DeriveIden)]
enum Activity {
    Table,
    Id,
    Title,
    Description,
    Icon,
    SortOrder,
    IsActive,
}
