use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .col(pk_uuid(Course::Id))
                    .col(string(Course::Title))
                    .col(string_uniq(Course::Slug))
                    .col(text(Course::Summary))
                    .col(text(Course::Description))
                    .col(string_len(Course::Audience, 20))
                    .col(uuid_null(Course::InstructorId))
                    .col(date_null(Course::StartsOn))
                    .col(date_null(Course::EndsOn))
                    .col(integer(Course::Lessons))
                    .col(integer(Course::DurationHours))
                    .col(string_null(Course::LmsUrl))
                    .col(boolean(Course::IsActive))
                    .col(boolean(Course::MembersOnly))
                    .col(boolean(Course::Featured))
                    .col(integer(Course::SortOrder))
                    .col(integer(Course::Capacity))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_instructor_id")
                            .from(Course::Table, Course::InstructorId)
                            .to(Member::Table, Member::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseEnrollment::Table)
                    .col(uuid(CourseEnrollment::CourseId))
                    .col(uuid(CourseEnrollment::MemberId))
                    .col(timestamp_with_time_zone(CourseEnrollment::EnrolledAt))
                    .primary_key(
                        Index::create()
                            .col(CourseEnrollment::CourseId)
                            .col(CourseEnrollment::MemberId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_enrollment_course_id")
                            .from(CourseEnrollment::Table, CourseEnrollment::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_enrollment_member_id")
                            .from(CourseEnrollment::Table, CourseEnrollment::MemberId)
                            .to(Member::Table, Member::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_enrollment_member_id")
                    .table(CourseEnrollment::Table)
                    .col(CourseEnrollment::MemberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Material::Table)
                    .col(pk_uuid(Material::Id))
                    .col(string(Material::Title))
                    .col(text(Material::Description))
                    .col(string_len(Material::Kind, 20))
                    .col(uuid_null(Material::CourseId))
                    .col(string_null(Material::ExternalUrl))
                    .col(string_null(Material::Author))
                    .col(date_null(Material::PublishedOn))
                    .col(boolean(Material::IsActive))
                    .col(boolean(Material::MembersOnly))
                    .col(boolean(Material::Downloadable))
                    .col(integer(Material::SortOrder))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_material_course_id")
                            .from(Material::Table, Material::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LibraryItem::Table)
                    .col(pk_uuid(LibraryItem::Id))
                    .col(string(LibraryItem::Title))
                    .col(string(LibraryItem::Author))
                    .col(text(LibraryItem::Description))
                    .col(string(LibraryItem::Category))
                    .col(integer_null(LibraryItem::PublishedYear))
                    .col(string_null(LibraryItem::Publisher))
                    .col(string_null(LibraryItem::ExternalUrl))
                    .col(boolean(LibraryItem::IsAvailable))
                    .col(boolean(LibraryItem::MembersOnly))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LibraryItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Material::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseEnrollment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Course {
    Table,
    Id,
    Title,
    Slug,
    Summary,
    Description,
    Audience,
    InstructorId,
    StartsOn,
    EndsOn,
    Lessons,
    DurationHours,
    LmsUrl,
    IsActive,
    MembersOnly,
    Featured,
    SortOrder,
    Capacity,
}

#[derive(DeriveIden)]
enum CourseEnrollment {
    Table,
    CourseId,
    MemberId,
    EnrolledAt,
}

#[derive(DeriveIden)]
enum Material {
    Table,
    Id,
    Title,
    Description,
    Kind,
    CourseId,
    ExternalUrl,
    Author,
    PublishedOn,
    IsActive,
    MembersOnly,
    Downloadable,
    SortOrder,
}

#[derive(DeriveIden)]
enum LibraryItem {
    Table,
    Id,
    Title,
    Author,
    Description,
    Category,
    PublishedYear,
    Publisher,
    ExternalUrl,
    IsAvailable,
    MembersOnly,
}

#[derive(DeriveIden)]
enum Member {
    Table,
    Id,
}
