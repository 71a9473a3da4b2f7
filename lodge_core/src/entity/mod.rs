// sea-orm entities for every table the site reads or writes.

pub mod activity;
pub mod carousel_slide;
pub mod contact_channel;
pub mod contact_message;
pub mod course;
pub mod course_enrollment;
pub mod event;
pub mod event_attendance;
pub mod historical_document;
pub mod historical_event;
pub mod historical_image;
pub mod library_item;
pub mod material;
pub mod meeting;
pub mod member;
pub mod menu_item;
pub mod office_hours;
pub mod page;
pub mod position;
pub mod principle;
pub mod publication;
pub mod publication_category;
pub mod publication_category_link;
pub mod quote;
pub mod rank;
pub mod section;
pub mod sister_lodge;
pub mod site_config;
pub mod statistic;
pub mod testimonial;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use super::activity::{
        ActiveModel as ActivityActiveModel, Column as ActivityColumn, Entity as Activity, Model as ActivityModel,
    };
    pub use super::carousel_slide::{
        ActiveModel as CarouselSlideActiveModel, Column as CarouselSlideColumn, Entity as CarouselSlide, Model as CarouselSlideModel,
    };
    pub use super::contact_channel::{
        ActiveModel as ContactChannelActiveModel, Column as ContactChannelColumn, Entity as ContactChannel, Model as ContactChannelModel,
    };
    pub use super::contact_message::{
        ActiveModel as ContactMessageActiveModel, Column as ContactMessageColumn, Entity as ContactMessage, Model as ContactMessageModel,
    };
    pub use super::course::{
        ActiveModel as CourseActiveModel, Column as CourseColumn, Entity as Course, Model as CourseModel,
    };
    pub use super::course_enrollment::{
        ActiveModel as CourseEnrollmentActiveModel, Column as CourseEnrollmentColumn, Entity as CourseEnrollment, Model as CourseEnrollmentModel,
    };
    pub use super::event::{
        ActiveModel as EventActiveModel, Column as EventColumn, Entity as Event, Model as EventModel,
    };
    pub use super::event_attendance::{
        ActiveModel as EventAttendanceActiveModel, Column as EventAttendanceColumn, Entity as EventAttendance, Model as EventAttendanceModel,
    };
    pub use super::historical_document::{
        ActiveModel as HistoricalDocumentActiveModel, Column as HistoricalDocumentColumn, Entity as HistoricalDocument, Model as HistoricalDocumentModel,
    };
    pub use super::historical_event::{
        ActiveModel as HistoricalEventActiveModel, Column as HistoricalEventColumn, Entity as HistoricalEvent, Model as HistoricalEventModel,
    };
    pub use super::historical_image::{
        ActiveModel as HistoricalImageActiveModel, Column as HistoricalImageColumn, Entity as HistoricalImage, Model as HistoricalImageModel,
    };
    pub use super::library_item::{
        ActiveModel as LibraryItemActiveModel, Column as LibraryItemColumn, Entity as LibraryItem, Model as LibraryItemModel,
    };
    pub use super::material::{
        ActiveModel as MaterialActiveModel, Column as MaterialColumn, Entity as Material, Model as MaterialModel,
    };
    pub use super::meeting::{
        ActiveModel as MeetingActiveModel, Column as MeetingColumn, Entity as Meeting, Model as MeetingModel,
    };
    pub use super::member::{
        ActiveModel as MemberActiveModel, Column as MemberColumn, Entity as Member, Model as MemberModel,
    };
    pub use super::menu_item::{
        ActiveModel as MenuItemActiveModel, Column as MenuItemColumn, Entity as MenuItem, Model as MenuItemModel,
    };
    pub use super::office_hours::{
        ActiveModel as OfficeHoursActiveModel, Column as OfficeHoursColumn, Entity as OfficeHours, Model as OfficeHoursModel,
    };
    pub use super::page::{
        ActiveModel as PageActiveModel, Column as PageColumn, Entity as Page, Model as PageModel,
    };
    pub use super::position::{
        ActiveModel as PositionActiveModel, Column as PositionColumn, Entity as Position, Model as PositionModel,
    };
    pub use super::principle::{
        ActiveModel as PrincipleActiveModel, Column as PrincipleColumn, Entity as Principle, Model as PrincipleModel,
    };
    pub use super::publication::{
        ActiveModel as PublicationActiveModel, Column as PublicationColumn, Entity as Publication, Model as PublicationModel,
    };
    pub use super::publication_category::{
        ActiveModel as PublicationCategoryActiveModel, Column as PublicationCategoryColumn, Entity as PublicationCategory, Model as PublicationCategoryModel,
    };
    pub use super::publication_category_link::{
        ActiveModel as PublicationCategoryLinkActiveModel, Column as PublicationCategoryLinkColumn, Entity as PublicationCategoryLink, Model as PublicationCategoryLinkModel,
    };
    pub use super::quote::{
        ActiveModel as QuoteActiveModel, Column as QuoteColumn, Entity as Quote, Model as QuoteModel,
    };
    pub use super::rank::{
        ActiveModel as RankActiveModel, Column as RankColumn, Entity as Rank, Model as RankModel,
    };
    pub use super::section::{
        ActiveModel as SectionActiveModel, Column as SectionColumn, Entity as Section, Model as SectionModel,
    };
    pub use super::sister_lodge::{
        ActiveModel as SisterLodgeActiveModel, Column as SisterLodgeColumn, Entity as SisterLodge, Model as SisterLodgeModel,
    };
    pub use super::site_config::{
        ActiveModel as SiteConfigActiveModel, Column as SiteConfigColumn, Entity as SiteConfig, Model as SiteConfigModel,
    };
    pub use super::statistic::{
        ActiveModel as StatisticActiveModel, Column as StatisticColumn, Entity as Statistic, Model as StatisticModel,
    };
    pub use super::testimonial::{
        ActiveModel as TestimonialActiveModel, Column as TestimonialColumn, Entity as Testimonial, Model as TestimonialModel,
    };

    pub use super::contact_channel::ChannelKind;
    pub use super::contact_message::ContactSubject;
    pub use super::course::Audience;
    pub use super::event::EventKind;
    pub use super::historical_image::ImageCategory;
    pub use super::member::MemberStatus;
    pub use super::menu_item::LinkKind;
    pub use super::position::PositionTier;
    pub use super::principle::Pillar;
    pub use super::section::SectionKind;
    pub use super::sister_lodge::LodgeRegion;
    pub use super::statistic::StatisticCategory;

    pub use sea_orm::{
        ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, Database, DatabaseConnection,
        DbConn, DbErr, EntityTrait, ModelTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder,
        QuerySelect, Related, RelationTrait, Select, Set, TransactionTrait, Unchanged,
    };
}
