use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sea_orm::{sea_query::Expr, DatabaseConnection, QuerySelect};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use super::calendar::first_meeting;
use crate::{entity::prelude::*, ids::MemberId};

/// Founding year assumed when the site has not been configured yet.
pub const DEFAULT_FOUNDING_YEAR: i32 = 1980;
const DEFAULT_SITE_NAME: &str = "Kukulkan No. 41";

#[derive(Debug, Error)]
pub enum StatisticsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),
}

/// The aggregations an automatic statistic can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AutomaticKind {
    ActiveMembers,
    ActiveCourses,
    UpcomingEvents,
    ActivePublications,
    Ranks,
    YearsSinceFounding,
    ActiveMeetings,
    NewMembersThisYear,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown automatic statistic kind `{0}`")]
pub struct UnknownAutomaticKind(pub String);

impl AutomaticKind {
    pub const ALL: [AutomaticKind; 8] = [
        AutomaticKind::ActiveMembers,
        AutomaticKind::ActiveCourses,
        AutomaticKind::UpcomingEvents,
        AutomaticKind::ActivePublications,
        AutomaticKind::Ranks,
        AutomaticKind::YearsSinceFounding,
        AutomaticKind::ActiveMeetings,
        AutomaticKind::NewMembersThisYear,
    ];

    /// Name stored in `statistic.automatic_kind`.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AutomaticKind::ActiveMembers => "total_miembros",
            AutomaticKind::ActiveCourses => "total_cursos",
            AutomaticKind::UpcomingEvents => "total_eventos",
            AutomaticKind::ActivePublications => "total_publicaciones",
            AutomaticKind::Ranks => "total_grados",
            AutomaticKind::YearsSinceFounding => "total_logia",
            AutomaticKind::ActiveMeetings => "total_tenidas",
            AutomaticKind::NewMembersThisYear => "total_hermanos_nuevos",
        }
    }
}

impl FromStr for AutomaticKind {
    type Err = UnknownAutomaticKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AutomaticKind::ALL
            .into_iter()
            .find(|kind| kind.wire_name() == s)
            .ok_or_else(|| UnknownAutomaticKind(s.to_owned()))
    }
}

/// Every counter shown on the dashboard and home page. All of them are
/// zero on an empty database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub total_members: u64,
    pub active_members: u64,
    pub inactive_members: u64,
    pub honorary_members: u64,
    pub new_members_this_year: u64,
    pub active_courses: u64,
    pub featured_courses: u64,
    pub total_materials: u64,
    pub public_materials: u64,
    pub library_available: u64,
    pub library_members_only: u64,
    pub upcoming_events: u64,
    pub past_events: u64,
    pub total_events: u64,
    pub total_publications: u64,
    pub featured_publications: u64,
    pub total_ranks: u64,
    pub historical_events: u64,
    pub milestones: u64,
    pub training_hours: u64,
    pub instructors: u64,
    pub apprentice_courses: u64,
    pub fellow_courses: u64,
    pub master_courses: u64,
    pub all_rank_courses: u64,
}

impl Counters {
    pub fn entries(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("total_members", self.total_members),
            ("active_members", self.active_members),
            ("inactive_members", self.inactive_members),
            ("honorary_members", self.honorary_members),
            ("new_members_this_year", self.new_members_this_year),
            ("active_courses", self.active_courses),
            ("featured_courses", self.featured_courses),
            ("total_materials", self.total_materials),
            ("public_materials", self.public_materials),
            ("library_available", self.library_available),
            ("library_members_only", self.library_members_only),
            ("upcoming_events", self.upcoming_events),
            ("past_events", self.past_events),
            ("total_events", self.total_events),
            ("total_publications", self.total_publications),
            ("featured_publications", self.featured_publications),
            ("total_ranks", self.total_ranks),
            ("historical_events", self.historical_events),
            ("milestones", self.milestones),
            ("training_hours", self.training_hours),
            ("instructors", self.instructors),
            ("apprentice_courses", self.apprentice_courses),
            ("fellow_courses", self.fellow_courses),
            ("master_courses", self.master_courses),
            ("all_rank_courses", self.all_rank_courses),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LodgeSummary {
    pub full_name: String,
    pub founded: i32,
    pub members: u64,
    /// Display form, e.g. `3°`.
    pub average_rank: String,
    pub workshops: u64,
    pub years: i32,
    pub meeting_day: String,
    pub meeting_time: String,
    pub venue: String,
    pub address: String,
    pub meeting_audience: String,
    pub activities: Vec<ActivityModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayStatistic {
    pub title: String,
    pub value: String,
    pub subtitle: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSnapshot {
    pub counters: Counters,
    pub years_since_founding: i32,
    pub average_rank: i32,
    pub lodge: LodgeSummary,
    pub featured_statistics: Vec<DisplayStatistic>,
}

/// Mean of the rank ordinals rounded to the nearest integer, ties to even.
/// Zero when there is nobody to average.
pub fn average_rank(ordinals: &[i32]) -> i32 {
    if ordinals.is_empty() {
        return 0;
    }
    let sum: i64 = ordinals.iter().map(|n| i64::from(*n)).sum();
    let mean = sum as f64 / ordinals.len() as f64;
    mean.round_ties_even() as i32
}

fn year_bounds(year: i32) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    let last = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);
    (first, last)
}

#[derive(Clone)]
pub struct StatisticsService {
    db: DatabaseConnection,
}

impl StatisticsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn compute_site_snapshot(&self) -> Result<SiteSnapshot, StatisticsServiceError> {
        self.compute_site_snapshot_at(Utc::now()).await
    }

    pub async fn compute_site_snapshot_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<SiteSnapshot, StatisticsServiceError> {
        let counters = self.counters_at(now).await?;
        let config = SiteConfig::find().one(&self.db).await?;
        let founded = config
            .as_ref()
            .map(|config| config.founding_year)
            .unwrap_or(DEFAULT_FOUNDING_YEAR);
        let years_since_founding = now.year() - founded;
        let average_rank = self.average_active_rank().await?;

        let lodge = self
            .lodge_summary(config.as_ref(), &counters, founded, years_since_founding, average_rank)
            .await?;
        let featured_statistics = self
            .featured_statistics_at(now, &counters, years_since_founding)
            .await?;

        Ok(SiteSnapshot {
            counters,
            years_since_founding,
            average_rank,
            lodge,
            featured_statistics,
        })
    }

    pub async fn counters_at(&self, now: DateTime<Utc>) -> Result<Counters, StatisticsServiceError> {
        let db = &self.db;
        let (year_start, year_end) = year_bounds(now.year());

        let members_with = |status: MemberStatus| {
            Member::find().filter(MemberColumn::Status.eq(status))
        };
        let active_courses = || Course::find().filter(CourseColumn::IsActive.eq(true));
        let active_events = || Event::find().filter(EventColumn::IsActive.eq(true));

        let training_hours: Option<i64> = active_courses()
            .select_only()
            .column_as(Expr::col(CourseColumn::DurationHours).sum(), "hours")
            .into_tuple::<Option<i64>>()
            .one(db)
            .await?
            .flatten();

        let instructors: Vec<MemberId> = active_courses()
            .filter(CourseColumn::InstructorId.is_not_null())
            .select_only()
            .column(CourseColumn::InstructorId)
            .distinct()
            .into_tuple()
            .all(db)
            .await?;

        let courses_for = |audience: Audience| {
            active_courses().filter(CourseColumn::Audience.eq(audience))
        };

        Ok(Counters {
            total_members: Member::find().count(db).await?,
            active_members: members_with(MemberStatus::Active).count(db).await?,
            inactive_members: members_with(MemberStatus::Inactive).count(db).await?,
            honorary_members: members_with(MemberStatus::Honorary).count(db).await?,
            new_members_this_year: Member::find()
                .filter(MemberColumn::JoinedOn.between(year_start, year_end))
                .count(db)
                .await?,
            active_courses: active_courses().count(db).await?,
            featured_courses: active_courses()
                .filter(CourseColumn::Featured.eq(true))
                .count(db)
                .await?,
            total_materials: Material::find().count(db).await?,
            public_materials: Material::find()
                .filter(MaterialColumn::MembersOnly.eq(false))
                .count(db)
                .await?,
            library_available: LibraryItem::find()
                .filter(LibraryItemColumn::IsAvailable.eq(true))
                .count(db)
                .await?,
            library_members_only: LibraryItem::find()
                .filter(LibraryItemColumn::MembersOnly.eq(true))
                .count(db)
                .await?,
            upcoming_events: active_events()
                .filter(EventColumn::StartsAt.gte(now))
                .count(db)
                .await?,
            past_events: active_events()
                .filter(EventColumn::StartsAt.lt(now))
                .count(db)
                .await?,
            total_events: active_events().count(db).await?,
            total_publications: Publication::find()
                .filter(PublicationColumn::IsActive.eq(true))
                .count(db)
                .await?,
            featured_publications: Publication::find()
                .filter(PublicationColumn::IsActive.eq(true))
                .filter(PublicationColumn::Featured.eq(true))
                .count(db)
                .await?,
            total_ranks: Rank::find().count(db).await?,
            historical_events: HistoricalEvent::find().count(db).await?,
            milestones: HistoricalEvent::find()
                .filter(HistoricalEventColumn::IsMilestone.eq(true))
                .count(db)
                .await?,
            training_hours: training_hours.map_or(0, |hours| hours.max(0) as u64),
            instructors: instructors.len() as u64,
            apprentice_courses: courses_for(Audience::Apprentice).count(db).await?,
            fellow_courses: courses_for(Audience::Fellow).count(db).await?,
            master_courses: courses_for(Audience::Master).count(db).await?,
            all_rank_courses: courses_for(Audience::All).count(db).await?,
        })
    }

    /// Average rank ordinal of the active members.
    pub async fn average_active_rank(&self) -> Result<i32, StatisticsServiceError> {
        let ordinals: Vec<i32> = Member::find()
            .filter(MemberColumn::Status.eq(MemberStatus::Active))
            .inner_join(Rank)
            .select_only()
            .column(RankColumn::Number)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(average_rank(&ordinals))
    }

    async fn lodge_summary(
        &self,
        config: Option<&SiteConfigModel>,
        counters: &Counters,
        founded: i32,
        years: i32,
        average_rank: i32,
    ) -> Result<LodgeSummary, StatisticsServiceError> {
        let site_name = config
            .map(|config| config.site_name.as_str())
            .unwrap_or(DEFAULT_SITE_NAME);

        let meeting = first_meeting(&self.db)
            .await?
            .filter(|meeting| meeting.is_active);

        let activities = Activity::find()
            .filter(ActivityColumn::IsActive.eq(true))
            .order_by_asc(ActivityColumn::SortOrder)
            .all(&self.db)
            .await?;

        let (meeting_day, meeting_time, venue, address, meeting_audience) = match meeting {
            Some(meeting) => (
                format!("Todos los {}", meeting.weekday_name().to_lowercase()),
                meeting.time.format("%H:%M hrs").to_string(),
                meeting.venue,
                meeting.address,
                meeting.audience.label().to_owned(),
            ),
            None => (
                "Todos los lunes".to_owned(),
                "19:30 hrs".to_owned(),
                "Templo Masónico \"Renacimiento\"".to_owned(),
                "Calle 60 No. 487 x 57, Centro, Mérida, Yucatán".to_owned(),
                "Todos los grados".to_owned(),
            ),
        };

        Ok(LodgeSummary {
            full_name: format!("R∴ L∴ Simbólica {site_name}"),
            founded,
            members: counters.active_members,
            average_rank: format!("{average_rank}°"),
            workshops: counters.active_courses,
            years,
            meeting_day,
            meeting_time,
            venue,
            address,
            meeting_audience,
            activities,
        })
    }

    async fn featured_statistics_at(
        &self,
        now: DateTime<Utc>,
        counters: &Counters,
        years: i32,
    ) -> Result<Vec<DisplayStatistic>, StatisticsServiceError> {
        let featured = Statistic::find()
            .filter(StatisticColumn::IsActive.eq(true))
            .filter(StatisticColumn::Featured.eq(true))
            .order_by_asc(StatisticColumn::SortOrder)
            .all(&self.db)
            .await?;

        if featured.is_empty() {
            let fallback = |title: &str, value: String, icon: &str| DisplayStatistic {
                title: title.to_owned(),
                value,
                subtitle: None,
                icon: Some(icon.to_owned()),
            };
            return Ok(vec![
                fallback("Directorio", counters.active_members.to_string(), "∴"),
                fallback("Educación", counters.active_courses.to_string(), "📚"),
                fallback("Calendario", counters.upcoming_events.to_string(), "📅"),
                fallback("Historia", years.to_string(), "📜"),
            ]);
        }

        self.display_all_at(featured, now).await
    }

    /// Active statistics of the education, members and general categories.
    pub async fn education_statistics(
        &self,
    ) -> Result<Vec<DisplayStatistic>, StatisticsServiceError> {
        let statistics = Statistic::find()
            .filter(StatisticColumn::IsActive.eq(true))
            .filter(StatisticColumn::Category.is_in([
                StatisticCategory::Education,
                StatisticCategory::Members,
                StatisticCategory::General,
            ]))
            .order_by_asc(StatisticColumn::SortOrder)
            .all(&self.db)
            .await?;

        self.display_all_at(statistics, Utc::now()).await
    }

    async fn display_all_at(
        &self,
        statistics: Vec<StatisticModel>,
        now: DateTime<Utc>,
    ) -> Result<Vec<DisplayStatistic>, StatisticsServiceError> {
        let mut shown = Vec::with_capacity(statistics.len());
        for statistic in statistics {
            let value = self.resolve_statistic_value_at(&statistic, now).await?;
            shown.push(DisplayStatistic {
                title: statistic.title,
                value,
                subtitle: statistic.subtitle,
                icon: statistic.icon,
            });
        }
        Ok(shown)
    }

    pub async fn resolve_statistic_value(
        &self,
        statistic: &StatisticModel,
    ) -> Result<String, StatisticsServiceError> {
        self.resolve_statistic_value_at(statistic, Utc::now()).await
    }

    /// The value to display for `statistic`. Manual statistics and
    /// automatic ones without a usable kind show their stored value.
    pub async fn resolve_statistic_value_at(
        &self,
        statistic: &StatisticModel,
        now: DateTime<Utc>,
    ) -> Result<String, StatisticsServiceError> {
        if !statistic.is_automatic {
            return Ok(statistic.raw_value.clone());
        }

        let kind = match statistic.automatic_kind.as_deref().map(str::trim) {
            None | Some("") => return Ok(statistic.raw_value.clone()),
            Some(name) => match name.parse::<AutomaticKind>() {
                Ok(kind) => kind,
                Err(err) => {
                    warn!(statistic = %statistic.id, %err, "falling back to stored value");
                    return Ok(statistic.raw_value.clone());
                }
            },
        };

        Ok(self.compute_kind_at(kind, now).await?.to_string())
    }

    pub async fn compute_kind_at(
        &self,
        kind: AutomaticKind,
        now: DateTime<Utc>,
    ) -> Result<i64, StatisticsServiceError> {
        let db = &self.db;
        let count = match kind {
            AutomaticKind::ActiveMembers => {
                Member::find()
                    .filter(MemberColumn::Status.eq(MemberStatus::Active))
                    .count(db)
                    .await?
            }
            AutomaticKind::ActiveCourses => {
                Course::find()
                    .filter(CourseColumn::IsActive.eq(true))
                    .count(db)
                    .await?
            }
            AutomaticKind::UpcomingEvents => {
                Event::find()
                    .filter(EventColumn::IsActive.eq(true))
                    .filter(EventColumn::StartsAt.gte(now))
                    .count(db)
                    .await?
            }
            AutomaticKind::ActivePublications => {
                Publication::find()
                    .filter(PublicationColumn::IsActive.eq(true))
                    .count(db)
                    .await?
            }
            AutomaticKind::Ranks => Rank::find().count(db).await?,
            AutomaticKind::YearsSinceFounding => {
                let years = SiteConfig::find()
                    .one(db)
                    .await?
                    .map_or(0, |config| now.year() - config.founding_year);
                return Ok(i64::from(years));
            }
            AutomaticKind::ActiveMeetings => {
                Meeting::find()
                    .filter(MeetingColumn::IsActive.eq(true))
                    .count(db)
                    .await?
            }
            AutomaticKind::NewMembersThisYear => {
                let (first, last) = year_bounds(now.year());
                Member::find()
                    .filter(MemberColumn::Status.eq(MemberStatus::Active))
                    .filter(MemberColumn::JoinedOn.between(first, last))
                    .count(db)
                    .await?
            }
        };

        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}
