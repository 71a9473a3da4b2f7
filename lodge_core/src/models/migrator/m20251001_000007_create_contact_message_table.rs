use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20251001_000007_create_contact_message_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactMessage::Table)
                    .col(ColumnDef::new(ContactMessage::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ContactMessage::Name).string().not_null())
                    .col(ColumnDef::new(ContactMessage::Email).string().not_null())
                    .col(ColumnDef::new(ContactMessage::Subject).string_len(20).not_null())
                    .col(ColumnDef::new(ContactMessage::CustomSubject).string())
                    .col(ColumnDef::new(ContactMessage::Message).text().not_null())
                    .col(
                        ColumnDef::new(ContactMessage::SentAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContactMessage::SourceIp).string())
                    .col(
                        ColumnDef::new(ContactMessage::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ContactMessage::IsAnswered)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contact_message_sent_at")
                    .table(ContactMessage::Table)
                    .col(ContactMessage::SentAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContactMessage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ContactMessage {
    Table,
    Id,
    Name,
    Email,
    Subject,
    CustomSubject,
    Message,
    SentAt,
    SourceIp,
    IsRead,
    IsAnswered,
}
