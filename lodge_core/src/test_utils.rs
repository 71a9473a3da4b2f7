//! Helpers shared by the test suites of this crate and of the web front.
//!
//! Fixture builders return fully populated active models with plain
//! defaults (active, public, unlimited capacity). Tweak the fields a test
//! cares about and insert.
//!
//! ```ignore
//! let db = test_utils::setup_test_db().await;
//! let mut course = test_utils::course("intro");
//! course.capacity = Set(1);
//! let course = course.insert(&db).await.unwrap();
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use crate::entity::{
    contact_channel, course, event, historical_document, historical_event, historical_image,
    library_item, material, meeting, member, menu_item, office_hours, page, position,
    principle, publication, publication_category, publication_category_link, quote, rank, section,
    sister_lodge, site_config, statistic,
};
use crate::entity::prelude::*;
use crate::ids::*;
use crate::models::migrator::Migrator;

/// Create and migrate a fresh in-memory database.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub fn site_config(founding_year: i32) -> site_config::ActiveModel {
    site_config::ActiveModel {
        id: Set(SiteConfigId::new()),
        slot: Set(site_config::SINGLETON_SLOT),
        site_name: Set("Kukulkan No. 41".to_owned()),
        motto: Set("Libertad, Igualdad, Fraternidad".to_owned()),
        logo_symbol: Set("∴".to_owned()),
        logo_text: Set("R∴L∴S∴".to_owned()),
        primary_color: Set("#1a2a4a".to_owned()),
        secondary_color: Set("#c9a227".to_owned()),
        lms_url: Set(None),
        lms_login_url: Set(None),
        lms_button_text: Set(None),
        meta_description: Set("Logia simbólica".to_owned()),
        meta_keywords: Set("logia, masonería".to_owned()),
        facebook_url: Set(None),
        twitter_url: Set(None),
        instagram_url: Set(None),
        youtube_url: Set(None),
        copyright_text: Set("Todos los derechos reservados".to_owned()),
        founding_year: Set(founding_year),
        updated_at: Set(Utc::now()),
    }
}

pub fn rank(number: i32) -> rank::ActiveModel {
    rank::ActiveModel {
        id: Set(RankId::new()),
        number: Set(number),
        name: Set(format!("Grado {number}")),
        description: Set(String::new()),
        symbol: Set("∴".to_owned()),
    }
}

pub fn position(name: &str, tier: PositionTier, sort_order: i32) -> position::ActiveModel {
    position::ActiveModel {
        id: Set(PositionId::new()),
        name: Set(name.to_owned()),
        abbreviation: Set(name.chars().take(3).collect()),
        tier: Set(tier),
        sort_order: Set(sort_order),
        is_active: Set(true),
    }
}

pub fn member(full_name: &str, rank_id: RankId) -> member::ActiveModel {
    member::ActiveModel {
        id: Set(MemberId::new()),
        full_name: Set(full_name.to_owned()),
        lodge_name: Set(None),
        status: Set(MemberStatus::Active),
        rank_id: Set(rank_id),
        position_id: Set(None),
        position_started_on: Set(None),
        position_ends_on: Set(None),
        email: Set(None),
        phone: Set(None),
        address: Set(None),
        joined_on: Set(date(2015, 3, 1)),
        is_public: Set(true),
        sort_order: Set(0),
    }
}

/// Inserts a rank with the given ordinal and an active member holding it.
pub async fn insert_member_with_rank(
    db: &DatabaseConnection,
    full_name: &str,
    rank_number: i32,
) -> MemberModel {
    let rank = match Rank::find()
        .filter(RankColumn::Number.eq(rank_number))
        .one(db)
        .await
        .expect("rank lookup")
    {
        Some(rank) => rank,
        None => rank(rank_number).insert(db).await.expect("insert rank"),
    };
    member(full_name, rank.id)
        .insert(db)
        .await
        .expect("insert member")
}

pub fn course(slug: &str) -> course::ActiveModel {
    course::ActiveModel {
        id: Set(CourseId::new()),
        title: Set(format!("Curso {slug}")),
        slug: Set(slug.to_owned()),
        summary: Set(String::new()),
        description: Set(String::new()),
        audience: Set(Audience::All),
        instructor_id: Set(None),
        starts_on: Set(None),
        ends_on: Set(None),
        lessons: Set(4),
        duration_hours: Set(0),
        lms_url: Set(None),
        is_active: Set(true),
        members_only: Set(false),
        featured: Set(false),
        sort_order: Set(0),
        capacity: Set(0),
    }
}

pub fn material(title: &str, course_id: Option<CourseId>) -> material::ActiveModel {
    material::ActiveModel {
        id: Set(MaterialId::new()),
        title: Set(title.to_owned()),
        description: Set(String::new()),
        kind: Set("pdf".to_owned()),
        course_id: Set(course_id),
        external_url: Set(None),
        author: Set(None),
        published_on: Set(None),
        is_active: Set(true),
        members_only: Set(false),
        downloadable: Set(true),
        sort_order: Set(0),
    }
}

pub fn library_item(title: &str) -> library_item::ActiveModel {
    library_item::ActiveModel {
        id: Set(LibraryItemId::new()),
        title: Set(title.to_owned()),
        author: Set("Anónimo".to_owned()),
        description: Set(String::new()),
        category: Set("historia".to_owned()),
        published_year: Set(None),
        publisher: Set(None),
        external_url: Set(None),
        is_available: Set(true),
        members_only: Set(false),
    }
}

pub fn event(slug: &str, starts_at: DateTime<Utc>) -> event::ActiveModel {
    event::ActiveModel {
        id: Set(EventId::new()),
        title: Set(format!("Evento {slug}")),
        slug: Set(slug.to_owned()),
        kind: Set(EventKind::RegularMeeting),
        description: Set(String::new()),
        summary: Set(String::new()),
        starts_at: Set(starts_at),
        ends_at: Set(None),
        venue: Set("Templo".to_owned()),
        address: Set(None),
        organizer_id: Set(None),
        capacity: Set(0),
        is_active: Set(true),
        members_only: Set(false),
        featured: Set(false),
    }
}

pub fn meeting(weekday: i32) -> meeting::ActiveModel {
    meeting::ActiveModel {
        id: Set(MeetingId::new()),
        weekday: Set(weekday),
        time: Set(NaiveTime::from_hms_opt(20, 0, 0).expect("valid fixture time")),
        audience: Set(Audience::Apprentice),
        venue: Set("Templo Principal".to_owned()),
        address: Set("Calle 1".to_owned()),
        is_active: Set(true),
    }
}

pub fn publication(slug: &str, published_at: DateTime<Utc>) -> publication::ActiveModel {
    publication::ActiveModel {
        id: Set(PublicationId::new()),
        title: Set(format!("Publicación {slug}")),
        slug: Set(slug.to_owned()),
        subtitle: Set(None),
        summary: Set(String::new()),
        body: Set(String::new()),
        author_name: Set(None),
        published_at: Set(published_at),
        tags: Set(String::new()),
        is_active: Set(true),
        featured: Set(false),
        important: Set(false),
        members_only: Set(false),
        visits: Set(0),
    }
}

pub fn category(slug: &str) -> publication_category::ActiveModel {
    publication_category::ActiveModel {
        id: Set(CategoryId::new()),
        name: Set(slug.to_uppercase()),
        slug: Set(slug.to_owned()),
        description: Set(String::new()),
        sort_order: Set(0),
    }
}

pub async fn link_category(
    db: &DatabaseConnection,
    publication_id: PublicationId,
    category_id: CategoryId,
) {
    publication_category_link::ActiveModel {
        publication_id: Set(publication_id),
        category_id: Set(category_id),
    }
    .insert(db)
    .await
    .expect("link category");
}

pub fn statistic(title: &str, raw_value: &str) -> statistic::ActiveModel {
    statistic::ActiveModel {
        id: Set(StatisticId::new()),
        title: Set(title.to_owned()),
        raw_value: Set(raw_value.to_owned()),
        subtitle: Set(None),
        icon: Set(None),
        category: Set(StatisticCategory::General),
        is_automatic: Set(false),
        automatic_kind: Set(None),
        sort_order: Set(0),
        is_active: Set(true),
        featured: Set(false),
    }
}

pub fn historical_event(title: &str, occurred_on: NaiveDate) -> historical_event::ActiveModel {
    historical_event::ActiveModel {
        id: Set(HistoricalEventId::new()),
        title: Set(title.to_owned()),
        occurred_on: Set(occurred_on),
        date_label: Set(None),
        description: Set(String::new()),
        summary: Set(String::new()),
        video_url: Set(None),
        sort_order: Set(0),
        is_milestone: Set(false),
        category: Set("general".to_owned()),
    }
}

pub fn historical_document(
    title: &str,
    historical_event_id: Option<HistoricalEventId>,
) -> historical_document::ActiveModel {
    historical_document::ActiveModel {
        id: Set(HistoricalDocumentId::new()),
        title: Set(title.to_owned()),
        description: Set(String::new()),
        dated_on: Set(None),
        kind: Set("acta".to_owned()),
        historical_event_id: Set(historical_event_id),
        is_active: Set(true),
        members_only: Set(false),
        downloadable: Set(false),
    }
}

pub fn quote(content: &str, author: &str) -> quote::ActiveModel {
    quote::ActiveModel {
        id: Set(QuoteId::new()),
        content: Set(content.to_owned()),
        author: Set(author.to_owned()),
        category: Set("reflexion".to_owned()),
        is_active: Set(true),
    }
}

pub fn page(slug: &str) -> page::ActiveModel {
    page::ActiveModel {
        id: Set(PageId::new()),
        title: Set(format!("Página {slug}")),
        slug: Set(slug.to_owned()),
        subtitle: Set(None),
        body: Set(String::new()),
        excerpt: Set(String::new()),
        meta_title: Set(None),
        meta_description: Set(None),
        published_at: Set(Utc::now()),
        is_active: Set(true),
        featured: Set(false),
        sort_order: Set(0),
        members_only: Set(false),
    }
}

pub fn section(page_id: PageId, title: &str, sort_order: i32) -> section::ActiveModel {
    section::ActiveModel {
        id: Set(SectionId::new()),
        page_id: Set(page_id),
        title: Set(title.to_owned()),
        subtitle: Set(None),
        kind: Set(SectionKind::Text),
        body: Set(String::new()),
        sort_order: Set(sort_order),
        dark_background: Set(false),
    }
}

pub fn menu_item(slug: &str, parent_id: Option<MenuItemId>) -> menu_item::ActiveModel {
    menu_item::ActiveModel {
        id: Set(MenuItemId::new()),
        title: Set(slug.to_uppercase()),
        slug: Set(slug.to_owned()),
        link_kind: Set(LinkKind::Named),
        target: Set(format!("/{slug}/")),
        page_id: Set(None),
        parent_id: Set(parent_id),
        sort_order: Set(0),
        icon: Set(None),
        is_active: Set(true),
        members_only: Set(false),
    }
}

pub fn sister_lodge(name: &str, region: LodgeRegion, sort_order: i32) -> sister_lodge::ActiveModel {
    sister_lodge::ActiveModel {
        id: Set(SisterLodgeId::new()),
        name: Set(name.to_owned()),
        location: Set("Mérida, Yucatán".to_owned()),
        founded: Set(None),
        description: Set(String::new()),
        flag: Set("🏛️".to_owned()),
        region: Set(region),
        sort_order: Set(sort_order),
        is_active: Set(true),
        featured: Set(false),
    }
}

pub fn contact_channel(title: &str, kind: ChannelKind, value: &str) -> contact_channel::ActiveModel {
    contact_channel::ActiveModel {
        id: Set(ContactChannelId::new()),
        kind: Set(kind),
        title: Set(title.to_owned()),
        value: Set(value.to_owned()),
        icon: Set(None),
        sort_order: Set(0),
        is_active: Set(true),
        is_primary: Set(false),
    }
}

pub fn office_hours(weekday: i32) -> office_hours::ActiveModel {
    office_hours::ActiveModel {
        id: Set(OfficeHoursId::new()),
        weekday: Set(weekday),
        opens_at: Set(NaiveTime::from_hms_opt(9, 0, 0).expect("valid fixture time")),
        closes_at: Set(NaiveTime::from_hms_opt(14, 0, 0).expect("valid fixture time")),
        closed: Set(false),
    }
}

pub fn historical_image(title: &str, taken_on: Option<NaiveDate>) -> historical_image::ActiveModel {
    historical_image::ActiveModel {
        id: Set(HistoricalImageId::new()),
        title: Set(title.to_owned()),
        description: Set(String::new()),
        image_path: Set(format!("historia/galeria/{title}.jpg")),
        taken_on: Set(taken_on),
        category: Set(ImageCategory::Events),
        historical_event_id: Set(None),
        featured: Set(true),
        sort_order: Set(0),
        uploaded_at: Set(Utc::now()),
    }
}

pub fn principle(slug: &str, pillar: Pillar, sort_order: i32) -> principle::ActiveModel {
    principle::ActiveModel {
        id: Set(PrincipleId::new()),
        title: Set(slug.to_uppercase()),
        slug: Set(slug.to_owned()),
        summary: Set(String::new()),
        description: Set(String::new()),
        symbol: Set("∴".to_owned()),
        pillar: Set(pillar),
        sort_order: Set(sort_order),
        featured: Set(false),
        is_active: Set(true),
    }
}
