use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteConfig::Table)
                    .col(pk_uuid(SiteConfig::Id))
                    .col(integer_uniq(SiteConfig::Slot))
                    .col(string(SiteConfig::SiteName))
                    .col(string(SiteConfig::Motto))
                    .col(string(SiteConfig::LogoSymbol))
                    .col(string(SiteConfig::LogoText))
                    .col(string_len(SiteConfig::PrimaryColor, 7))
                    .col(string_len(SiteConfig::SecondaryColor, 7))
                    .col(string_null(SiteConfig::LmsUrl))
                    .col(string_null(SiteConfig::LmsLoginUrl))
                    .col(string_null(SiteConfig::LmsButtonText))
                    .col(text(SiteConfig::MetaDescription))
                    .col(string(SiteConfig::MetaKeywords))
                    .col(string_null(SiteConfig::FacebookUrl))
                    .col(string_null(SiteConfig::TwitterUrl))
                    .col(string_null(SiteConfig::InstagramUrl))
                    .col(string_null(SiteConfig::YoutubeUrl))
                    .col(string(SiteConfig::CopyrightText))
                    .col(integer(SiteConfig::FoundingYear))
                    .col(timestamp_with_time_zone(SiteConfig::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Page::Table)
                    .col(pk_uuid(Page::Id))
                    .col(string(Page::Title))
                    .col(string_uniq(Page::Slug))
                    .col(string_null(Page::Subtitle))
                    .col(text(Page::Body))
                    .col(text(Page::Excerpt))
                    .col(string_null(Page::MetaTitle))
                    .col(string_null(Page::MetaDescription))
                    .col(timestamp_with_time_zone(Page::PublishedAt))
                    .col(boolean(Page::IsActive))
                    .col(boolean(Page::Featured))
                    .col(integer(Page::SortOrder))
                    .col(boolean(Page::MembersOnly))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section::Table)
                    .col(pk_uuid(Section::Id))
                    .col(uuid(Section::PageId))
                    .col(string(Section::Title))
                    .col(string_null(Section::Subtitle))
                    .col(string_len(Section::Kind, 20))
                    .col(text(Section::Body))
                    .col(integer(Section::SortOrder))
                    .col(boolean(Section::DarkBackground))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_page_id")
                            .from(Section::Table, Section::PageId)
                            .to(Page::Table, Page::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_section_page_id")
                    .table(Section::Table)
                    .col(Section::PageId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MenuItem::Table)
                    .col(pk_uuid(MenuItem::Id))
                    .col(string(MenuItem::Title))
                    .col(string_uniq(MenuItem::Slug))
                    .col(string_len(MenuItem::LinkKind, 20))
                    .col(string(MenuItem::Target))
                    .col(uuid_null(MenuItem::PageId))
                    .col(uuid_null(MenuItem::ParentId))
                    .col(integer(MenuItem::SortOrder))
                    .col(string_null(MenuItem::Icon))
                    .col(boolean(MenuItem::IsActive))
                    .col(boolean(MenuItem::MembersOnly))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_item_page_id")
                            .from(MenuItem::Table, MenuItem::PageId)
                            .to(Page::Table, Page::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_item_parent_id")
                            .from(MenuItem::Table, MenuItem::ParentId)
                            .to(MenuItem::Table, MenuItem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MenuItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Section::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Page::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SiteConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SiteConfig {
    Table,
    Id,
    Slot,
    SiteName,
    Motto,
    LogoSymbol,
    LogoText,
    PrimaryColor,
    SecondaryColor,
    LmsUrl,
    LmsLoginUrl,
    LmsButtonText,
    MetaDescription,
    MetaKeywords,
    FacebookUrl,
    TwitterUrl,
    InstagramUrl,
    YoutubeUrl,
    CopyrightText,
    FoundingYear,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Page {
    Table,
    Id,
    Title,
    Slug,
    Subtitle,
    Body,
    Excerpt,
    MetaTitle,
    MetaDescription,
    PublishedAt,
    IsActive,
    Featured,
    SortOrder,
    MembersOnly,
}

#[derive(DeriveIden)]
enum Section {
    Table,
    Id,
    PageId,
    Title,
    Subtitle,
    Kind,
    Body,
    SortOrder,
    DarkBackground,
}

#[derive(DeriveIden)]
enum MenuItem {
    Table,
    Id,
    Title,
    Slug,
    LinkKind,
    Target,
    PageId,
    ParentId,
    SortOrder,
    Icon,
    IsActive,
    MembersOnly,
}
