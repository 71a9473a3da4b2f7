use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SisterLodge::Table)
                    .col(pk_uuid(SisterLodge::Id))
                    .col(string(SisterLodge::Name))
                    .col(string(SisterLodge::Location))
                    .col(integer_null(SisterLodge::Founded))
                    .col(text(SisterLodge::Description))
                    .col(string_len(SisterLodge::Flag, 10))
                    .col(string_len(SisterLodge::Region, 20))
                    .col(integer(SisterLodge::SortOrder))
                    .col(boolean(SisterLodge::IsActive))
                    .col(boolean(SisterLodge::Featured))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sister_lodge_region_order")
                    .table(SisterLodge::Table)
                    .col(SisterLodge::Region)
                    .col(SisterLodge::SortOrder)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContactChannel::Table)
                    .col(pk_uuid(ContactChannel::Id))
                    .col(string_len(ContactChannel::Kind, 20))
                    .col(string(ContactChannel::Title))
                    .col(string_len(ContactChannel::Value, 500))
                    .col(string_null(ContactChannel::Icon))
                    .col(integer(ContactChannel::SortOrder))
                    .col(boolean(ContactChannel::IsActive))
                    .col(boolean(ContactChannel::IsPrimary))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OfficeHours::Table)
                    .col(pk_uuid(OfficeHours::Id))
                    .col(integer(OfficeHours::Weekday))
                    .col(time(OfficeHours::OpensAt))
                    .col(time(OfficeHours::ClosesAt))
                    .col(boolean(OfficeHours::Closed))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HistoricalImage::Table)
                    .col(pk_uuid(HistoricalImage::Id))
                    .col(string(HistoricalImage::Title))
                    .col(text(HistoricalImage::Description))
                    .col(string(HistoricalImage::ImagePath))
                    .col(date_null(HistoricalImage::TakenOn))
                    .col(string_len(HistoricalImage::Category, 20))
                    .col(uuid_null(HistoricalImage::HistoricalEventId))
                    .col(boolean(HistoricalImage::Featured))
                    .col(integer(HistoricalImage::SortOrder))
                    .col(timestamp_with_time_zone(HistoricalImage::UploadedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_historical_image_event_id")
                            .from(HistoricalImage::Table, HistoricalImage::HistoricalEventId)
                            .to(HistoricalEvent::Table, HistoricalEvent::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HistoricalImage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OfficeHours::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContactChannel::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SisterLodge::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SisterLodge {
    Table,
    Id,
    Name,
    Location,
    Founded,
    Description,
    Flag,
    Region,
    SortOrder,
    IsActive,
    Featured,
}

#[derive(DeriveIden)]
enum ContactChannel {
    Table,
    Id,
    Kind,
    Title,
    Value,
    Icon,
    SortOrder,
    IsActive,
    IsPrimary,
}

#[derive(DeriveIden)]
enum OfficeHours {
    Table,
    Id,
    Weekday,
    OpensAt,
    ClosesAt,
    Closed,
}

#[derive(DeriveIden)]
enum HistoricalImage {
    Table,
    Id,
    Title,
    Description,
    ImagePath,
    TakenOn,
    Category,
    HistoricalEventId,
    Featured,
    SortOrder,
    UploadedAt,
}

#[derive(DeriveIden)]
enum HistoricalEvent {
    Table,
    Id,
}
