use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .col(pk_uuid(Event::Id))
                    .col(string(Event::Title))
                    .col(string_uniq(Event::Slug))
                    .col(string_len(Event::Kind, 30))
                    .col(text(Event::Description))
                    .col(text(Event::Summary))
                    .col(timestamp_with_time_zone(Event::StartsAt))
                    .col(timestamp_with_time_zone_null(Event::EndsAt))
                    .col(string(Event::Venue))
                    .col(string_null(Event::Address))
                    .col(uuid_null(Event::OrganizerId))
                    .col(integer(Event::Capacity))
                    .col(boolean(Event::IsActive))
                    .col(boolean(Event::MembersOnly))
                    .col(boolean(Event::Featured))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_organizer_id")
                            .from(Event::Table, Event::OrganizerId)
                            .to(Member::Table, Member::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_starts_at")
                    .table(Event::Table)
                    .col(Event::StartsAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventAttendance::Table)
                    .col(uuid(EventAttendance::EventId))
                    .col(uuid(EventAttendance::MemberId))
                    .col(timestamp_with_time_zone(EventAttendance::ConfirmedAt))
                    .primary_key(
                        Index::create()
                            .col(EventAttendance::EventId)
                            .col(EventAttendance::MemberId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_attendance_event_id")
                            .from(EventAttendance::Table, EventAttendance::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_attendance_member_id")
                            .from(EventAttendance::Table, EventAttendance::MemberId)
                            .to(Member::Table, Member::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Meeting::Table)
                    .col(pk_uuid(Meeting::Id))
                    .col(integer(Meeting::Weekday))
                    .col(time(Meeting::Time))
                    .col(string_len(Meeting::Audience, 20))
                    .col(string(Meeting::Venue))
                    .col(string(Meeting::Address))
                    .col(boolean(Meeting::IsActive))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Meeting::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventAttendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Event {
    Table,
    Id,
    Title,
    Slug,
    Kind,
    Description,
    Summary,
    StartsAt,
    EndsAt,
    Venue,
    Address,
    OrganizerId,
    Capacity,
    IsActive,
    MembersOnly,
    Featured,
}

#[derive(DeriveIden)]
enum EventAttendance {
    Table,
    EventId,
    MemberId,
    ConfirmedAt,
}

#[derive(DeriveIden)]
enum Meeting {
    Table,
    Id,
    Weekday,
    Time,
    Audience,
    Venue,
    Address,
    IsActive,
}

#[derive(DeriveIden)]
enum Member {
    Table,
    Id,
}
