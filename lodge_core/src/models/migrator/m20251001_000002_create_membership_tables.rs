use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rank::Table)
                    .col(pk_uuid(Rank::Id))
                    .col(integer_uniq(Rank::Number))
                    .col(string(Rank::Name))
                    .col(text(Rank::Description))
                    .col(string(Rank::Symbol))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Position::Table)
                    .col(pk_uuid(Position::Id))
                    .col(string(Position::Name))
                    .col(string(Position::Abbreviation))
                    .col(string_len(Position::Tier, 20))
                    .col(integer(Position::SortOrder))
                    .col(boolean(Position::IsActive))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .col(pk_uuid(Member::Id))
                    .col(string(Member::FullName))
                    .col(string_null(Member::LodgeName))
                    .col(string_len(Member::Status, 20))
                    .col(uuid(Member::RankId))
                    .col(uuid_null(Member::PositionId))
                    .col(date_null(Member::PositionStartedOn))
                    .col(date_null(Member::PositionEndsOn))
                    .col(string_null(Member::Email))
                    .col(string_null(Member::Phone))
                    .col(string_null(Member::Address))
                    .col(date(Member::JoinedOn))
                    .col(boolean(Member::IsPublic))
                    .col(integer(Member::SortOrder))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_rank_id")
                            .from(Member::Table, Member::RankId)
                            .to(Rank::Table, Rank::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_position_id")
                            .from(Member::Table, Member::PositionId)
                            .to(Position::Table, Position::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_status")
                    .table(Member::Table)
                    .col(Member::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Member::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Position::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rank::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Rank {
    Table,
    Id,
    Number,
    Name,
    Description,
    Symbol,
}

#[derive(DeriveIden)]
enum Position {
    Table,
    Id,
    Name,
    Abbreviation,
    Tier,
    SortOrder,
    IsActive,
}

#[derive(DeriveIden)]
enum Member {
    Table,
    Id,
    FullName,
    LodgeName,
    Status,
    RankId,
    PositionId,
    PositionStartedOn,
    PositionEndsOn,
    Email,
    Phone,
    Address,
    JoinedOn,
    IsPublic,
    SortOrder,
}
