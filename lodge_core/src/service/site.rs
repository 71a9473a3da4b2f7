use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::{
    entity::{prelude::*, site_config},
    ids::{MenuItemId, PageId},
    visibility::{Gated, Viewer},
};

pub const DEFAULT_LMS_URL: &str = "https://moodle.kukulkan41.org";
pub const DEFAULT_LMS_LOGIN_URL: &str = "https://moodle.kukulkan41.org/login";
pub const DEFAULT_LMS_BUTTON_TEXT: &str = "Ir a Moodle";
const DEFAULT_PHRASE: (&str, &str) = ("La luz disipa las sombras", "Masonería");
pub const FREEMASONRY_PAGE_SLUG: &str = "masoneria";

#[derive(Debug, Error)]
pub enum SiteServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("page not found")]
    PageNotFound,

    #[error("the site is already configured")]
    AlreadyConfigured,

    #[error("parent menu item not found")]
    ParentNotFound,

    #[error("menu items nest only one level deep")]
    NestingTooDeep,
}

/// Site wide settings with defaults filled in for anything unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSettings {
    pub site_name: String,
    pub motto: String,
    pub logo_symbol: String,
    pub logo_text: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub lms_url: String,
    pub lms_login_url: String,
    pub lms_button_text: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub copyright_text: String,
    pub founding_year: i32,
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            site_name: "Logia Kukulkan #41".to_owned(),
            motto: "\"Pulir la piedra bruta para construir el templo interior\"".to_owned(),
            logo_symbol: "∴".to_owned(),
            logo_text: "Logia Kukulkan #41 · Mérida".to_owned(),
            primary_color: "#7b1e3a".to_owned(),
            secondary_color: "#FFD700".to_owned(),
            lms_url: DEFAULT_LMS_URL.to_owned(),
            lms_login_url: DEFAULT_LMS_LOGIN_URL.to_owned(),
            lms_button_text: DEFAULT_LMS_BUTTON_TEXT.to_owned(),
            meta_description: String::new(),
            meta_keywords: String::new(),
            facebook_url: None,
            twitter_url: None,
            instagram_url: None,
            youtube_url: None,
            copyright_text: "Todos los derechos reservados".to_owned(),
            founding_year: super::statistics::DEFAULT_FOUNDING_YEAR,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl From<SiteConfigModel> for SiteSettings {
    fn from(config: SiteConfigModel) -> Self {
        SiteSettings {
            site_name: config.site_name,
            motto: config.motto,
            logo_symbol: config.logo_symbol,
            logo_text: config.logo_text,
            primary_color: config.primary_color,
            secondary_color: config.secondary_color,
            lms_url: non_blank(config.lms_url).unwrap_or_else(|| DEFAULT_LMS_URL.to_owned()),
            lms_login_url: non_blank(config.lms_login_url)
                .unwrap_or_else(|| DEFAULT_LMS_LOGIN_URL.to_owned()),
            lms_button_text: non_blank(config.lms_button_text)
                .unwrap_or_else(|| DEFAULT_LMS_BUTTON_TEXT.to_owned()),
            meta_description: config.meta_description,
            meta_keywords: config.meta_keywords,
            facebook_url: non_blank(config.facebook_url),
            twitter_url: non_blank(config.twitter_url),
            instagram_url: non_blank(config.instagram_url),
            youtube_url: non_blank(config.youtube_url),
            copyright_text: config.copyright_text,
            founding_year: config.founding_year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub title: String,
    pub href: String,
    pub icon: Option<String>,
    pub children: Vec<NavItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Phrase {
    pub content: String,
    pub author: String,
}

/// Everything the home page lists besides the statistics snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct HomeShowcase {
    pub carousel: Vec<CarouselSlideModel>,
    pub principles: Vec<PrincipleModel>,
    pub latest_publications: Vec<PublicationModel>,
    pub upcoming_events: Vec<EventModel>,
    pub milestones: Vec<HistoricalEventModel>,
    pub featured_courses: Vec<CourseModel>,
    pub testimonials: Vec<TestimonialModel>,
}

/// Active principles split by the column of the temple they belong to.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrincipleColumns {
    pub north: Vec<PrincipleModel>,
    pub south: Vec<PrincipleModel>,
    pub central: Vec<PrincipleModel>,
}

/// Active friendly lodges by region.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LodgeDirectory {
    pub world: Vec<SisterLodgeModel>,
    pub mexico: Vec<SisterLodgeModel>,
    pub yucatan: Vec<SisterLodgeModel>,
}

impl LodgeDirectory {
    pub fn regions(&self) -> [(LodgeRegion, &[SisterLodgeModel]); 3] {
        [
            (LodgeRegion::World, self.world.as_slice()),
            (LodgeRegion::Mexico, self.mexico.as_slice()),
            (LodgeRegion::Yucatan, self.yucatan.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty() && self.mexico.is_empty() && self.yucatan.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapEntry {
    pub path: String,
    pub last_modified: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct SiteService {
    db: DatabaseConnection,
}

impl SiteService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn settings(&self) -> Result<SiteSettings, SiteServiceError> {
        let config = SiteConfig::find().one(&self.db).await?;
        Ok(config.map(SiteSettings::from).unwrap_or_default())
    }

    /// Stores the site configuration. Only one may ever exist.
    pub async fn create_site_config(
        &self,
        mut config: SiteConfigActiveModel,
    ) -> Result<SiteConfigModel, SiteServiceError> {
        let txn = self.db.begin().await?;

        if SiteConfig::find().count(&txn).await? > 0 {
            return Err(SiteServiceError::AlreadyConfigured);
        }

        config.slot = Set(site_config::SINGLETON_SLOT);
        config.updated_at = Set(Utc::now());
        let created = config.insert(&txn).await?;

        txn.commit().await?;
        info!(site = %created.site_name, "site configured");
        Ok(created)
    }

    pub async fn create_menu_item(
        &self,
        item: MenuItemActiveModel,
    ) -> Result<MenuItemModel, SiteServiceError> {
        let parent_id: Option<MenuItemId> = match &item.parent_id {
            ActiveValue::Set(parent_id) | ActiveValue::Unchanged(parent_id) => *parent_id,
            ActiveValue::NotSet => None,
        };

        if let Some(parent_id) = parent_id {
            let parent = MenuItem::find_by_id(parent_id)
                .one(&self.db)
                .await?
                .ok_or(SiteServiceError::ParentNotFound)?;
            if parent.parent_id.is_some() {
                return Err(SiteServiceError::NestingTooDeep);
            }
        }

        Ok(item.insert(&self.db).await?)
    }

    /// Top level menu entries in order, each with its visible children.
    pub async fn navigation(&self, viewer: Viewer) -> Result<Vec<NavItem>, SiteServiceError> {
        let items = MenuItem::find_visible(viewer)
            .order_by_asc(MenuItemColumn::SortOrder)
            .all(&self.db)
            .await?;

        let page_ids: Vec<PageId> = items.iter().filter_map(|item| item.page_id).collect();
        let pages = if page_ids.is_empty() {
            Vec::new()
        } else {
            Page::find_visible(viewer)
                .filter(PageColumn::Id.is_in(page_ids))
                .all(&self.db)
                .await?
        };

        let href = |item: &MenuItemModel| -> Option<String> {
            match item.link_kind {
                LinkKind::Named | LinkKind::External => Some(item.target.clone()),
                LinkKind::Page => item
                    .page_id
                    .and_then(|id| pages.iter().find(|page| page.id == id))
                    .map(|page| format!("/page/{}/", page.slug)),
            }
        };

        let to_nav = |item: &MenuItemModel, children: Vec<NavItem>| {
            href(item).map(|href| NavItem {
                title: item.title.clone(),
                href,
                icon: item.icon.clone(),
                children,
            })
        };

        let nav = items
            .iter()
            .filter(|item| item.parent_id.is_none())
            .filter_map(|parent| {
                let children = items
                    .iter()
                    .filter(|child| child.parent_id == Some(parent.id))
                    .filter_map(|child| to_nav(child, Vec::new()))
                    .collect();
                to_nav(parent, children)
            })
            .collect();

        Ok(nav)
    }

    pub async fn page_by_slug(
        &self,
        slug: &str,
        viewer: Viewer,
    ) -> Result<(PageModel, Vec<SectionModel>), SiteServiceError> {
        let page = Page::find_visible(viewer)
            .filter(PageColumn::Slug.eq(slug))
            .one(&self.db)
            .await?
            .ok_or(SiteServiceError::PageNotFound)?;

        let sections = page
            .find_related(Section)
            .order_by_asc(SectionColumn::SortOrder)
            .all(&self.db)
            .await?;

        Ok((page, sections))
    }

    /// A random active quote, or the house phrase when there is none.
    pub async fn phrase_of_day(&self) -> Result<Phrase, SiteServiceError> {
        let active = || Quote::find().filter(QuoteColumn::IsActive.eq(true));
        let total = active().count(&self.db).await?;

        if total == 0 {
            return Ok(Phrase {
                content: DEFAULT_PHRASE.0.to_owned(),
                author: DEFAULT_PHRASE.1.to_owned(),
            });
        }

        let offset = rand::rng().random_range(0..total);
        let quote = active()
            .order_by_asc(QuoteColumn::Id)
            .offset(offset)
            .one(&self.db)
            .await?;

        Ok(match quote {
            Some(quote) => Phrase {
                content: quote.content,
                author: quote.author,
            },
            None => Phrase {
                content: DEFAULT_PHRASE.0.to_owned(),
                author: DEFAULT_PHRASE.1.to_owned(),
            },
        })
    }

    pub async fn home_showcase(
        &self,
        viewer: Viewer,
        now: DateTime<Utc>,
    ) -> Result<HomeShowcase, SiteServiceError> {
        let db = &self.db;

        Ok(HomeShowcase {
            carousel: CarouselSlide::find()
                .filter(CarouselSlideColumn::IsActive.eq(true))
                .order_by_asc(CarouselSlideColumn::SortOrder)
                .all(db)
                .await?,
            principles: Principle::find()
                .filter(PrincipleColumn::IsActive.eq(true))
                .filter(PrincipleColumn::Featured.eq(true))
                .order_by_asc(PrincipleColumn::Pillar)
                .order_by_asc(PrincipleColumn::SortOrder)
                .limit(6)
                .all(db)
                .await?,
            latest_publications: Publication::find_visible(viewer)
                .order_by_desc(PublicationColumn::PublishedAt)
                .limit(3)
                .all(db)
                .await?,
            upcoming_events: Event::find_visible(viewer)
                .filter(EventColumn::StartsAt.gte(now))
                .order_by_asc(EventColumn::StartsAt)
                .limit(4)
                .all(db)
                .await?,
            milestones: HistoricalEvent::find()
                .filter(HistoricalEventColumn::IsMilestone.eq(true))
                .order_by_desc(HistoricalEventColumn::OccurredOn)
                .limit(6)
                .all(db)
                .await?,
            featured_courses: Course::find_visible(viewer)
                .filter(CourseColumn::Featured.eq(true))
                .order_by_asc(CourseColumn::SortOrder)
                .limit(4)
                .all(db)
                .await?,
            testimonials: Testimonial::find()
                .filter(TestimonialColumn::IsActive.eq(true))
                .filter(TestimonialColumn::Featured.eq(true))
                .order_by_desc(TestimonialColumn::DatedOn)
                .limit(3)
                .all(db)
                .await?,
        })
    }

    pub async fn principles_by_pillar(&self) -> Result<PrincipleColumns, SiteServiceError> {
        let principles = Principle::find()
            .filter(PrincipleColumn::IsActive.eq(true))
            .order_by_asc(PrincipleColumn::SortOrder)
            .all(&self.db)
            .await?;

        let mut columns = PrincipleColumns::default();
        for principle in principles {
            match principle.pillar {
                Pillar::North => columns.north.push(principle),
                Pillar::South => columns.south.push(principle),
                Pillar::Central => columns.central.push(principle),
            }
        }
        Ok(columns)
    }

    pub async fn sister_lodges(&self) -> Result<LodgeDirectory, SiteServiceError> {
        let lodges = SisterLodge::find()
            .filter(SisterLodgeColumn::IsActive.eq(true))
            .order_by_asc(SisterLodgeColumn::SortOrder)
            .order_by_asc(SisterLodgeColumn::Name)
            .all(&self.db)
            .await?;

        let mut directory = LodgeDirectory::default();
        for lodge in lodges {
            match lodge.region {
                LodgeRegion::World => directory.world.push(lodge),
                LodgeRegion::Mexico => directory.mexico.push(lodge),
                LodgeRegion::Yucatan => directory.yucatan.push(lodge),
            }
        }
        Ok(directory)
    }

    /// Public paths worth indexing.
    pub async fn sitemap_entries(&self) -> Result<Vec<SitemapEntry>, SiteServiceError> {
        let db = &self.db;
        let viewer = Viewer::Public;
        let mut entries: Vec<SitemapEntry> = ["/", "/freemasonry/"]
            .into_iter()
            .map(|path| SitemapEntry {
                path: path.to_owned(),
                last_modified: None,
            })
            .collect();

        for page in Page::find_visible(viewer).all(db).await? {
            entries.push(SitemapEntry {
                path: format!("/page/{}/", page.slug),
                last_modified: Some(page.published_at.date_naive()),
            });
        }
        for publication in Publication::find_visible(viewer).all(db).await? {
            entries.push(SitemapEntry {
                path: format!("/publication/{}/", publication.slug),
                last_modified: Some(publication.published_at.date_naive()),
            });
        }
        for event in Event::find_visible(viewer).all(db).await? {
            entries.push(SitemapEntry {
                path: format!("/event/{}/", event.slug),
                last_modified: None,
            });
        }
        for course in Course::find_visible(viewer).all(db).await? {
            entries.push(SitemapEntry {
                path: format!("/education/course/{}/", course.slug),
                last_modified: None,
            });
        }

        Ok(entries)
    }
}
