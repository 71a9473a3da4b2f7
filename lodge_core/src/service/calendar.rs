use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::{DatabaseTransaction, DbBackend};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    entity::prelude::*,
    ids::{EventId, MemberId},
    visibility::{Gated, Viewer},
};

pub const FEED_LIMIT: u64 = 50;
const MEMBER_UPCOMING_LIMIT: u64 = 5;

#[derive(Debug, Error)]
pub enum CalendarServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("event not found")]
    EventNotFound,

    #[error("member not found")]
    MemberNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceOutcome {
    Confirmed,
    Cancelled,
    EventFull,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    pub event: EventModel,
    pub attendees: u64,
    pub viewer_attending: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthEvents {
    /// `YYYY-MM`
    pub month: String,
    pub events: Vec<EventModel>,
}

/// One entry of the JSON calendar feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEvent {
    pub id: EventId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "className")]
    pub class_name: String,
}

impl From<EventModel> for FeedEvent {
    fn from(event: EventModel) -> Self {
        FeedEvent {
            id: event.id,
            url: format!("/event/{}/", event.slug),
            kind: event.kind.label().to_owned(),
            class_name: format!("event-{}", event.kind.code()),
            title: event.title,
            start: event.starts_at,
            end: event.ends_at,
        }
    }
}

/// Start of `year` and start of the following one, in UTC.
fn year_bounds(year: i32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)?.and_hms_opt(0, 0, 0)?;
    Some((Utc.from_utc_datetime(&start), Utc.from_utc_datetime(&end)))
}

#[derive(Clone)]
pub struct CalendarService {
    db: DatabaseConnection,
}

impl CalendarService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn upcoming_query(viewer: Viewer, now: DateTime<Utc>) -> Select<Event> {
        Event::find_visible(viewer)
            .filter(EventColumn::StartsAt.gte(now))
            .order_by_asc(EventColumn::StartsAt)
    }

    pub async fn upcoming(
        &self,
        viewer: Viewer,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventModel>, CalendarServiceError> {
        Ok(Self::upcoming_query(viewer, now).all(&self.db).await?)
    }

    /// Events of `year` grouped by month, in chronological order.
    pub async fn events_by_month(
        &self,
        viewer: Viewer,
        year: i32,
    ) -> Result<Vec<MonthEvents>, CalendarServiceError> {
        let Some((start, end)) = year_bounds(year) else {
            return Ok(Vec::new());
        };

        let events = Event::find_visible(viewer)
            .filter(EventColumn::StartsAt.gte(start))
            .filter(EventColumn::StartsAt.lt(end))
            .order_by_asc(EventColumn::StartsAt)
            .all(&self.db)
            .await?;

        let mut months: Vec<MonthEvents> = Vec::new();
        for event in events {
            let month = event.starts_at.format("%Y-%m").to_string();
            match months.last_mut() {
                Some(current) if current.month == month => current.events.push(event),
                _ => months.push(MonthEvents {
                    month,
                    events: vec![event],
                }),
            }
        }

        Ok(months)
    }

    pub async fn active_event(&self, id: EventId) -> Result<EventModel, CalendarServiceError> {
        Event::find_by_id(id)
            .filter(EventColumn::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(CalendarServiceError::EventNotFound)
    }

    pub async fn event_detail(
        &self,
        slug: &str,
        viewer: Viewer,
        member: Option<MemberId>,
    ) -> Result<EventDetail, CalendarServiceError> {
        let event = Event::find_visible(viewer)
            .filter(EventColumn::Slug.eq(slug))
            .one(&self.db)
            .await?
            .ok_or(CalendarServiceError::EventNotFound)?;

        let attendees = attendee_count(&self.db, event.id).await?;
        let viewer_attending = match member {
            Some(member) => EventAttendance::find_by_id((event.id, member))
                .one(&self.db)
                .await?
                .is_some(),
            None => false,
        };

        Ok(EventDetail {
            event,
            attendees,
            viewer_attending,
        })
    }

    /// Confirms attendance, or cancels it when the member already attends.
    pub async fn toggle_attendance(
        &self,
        member: MemberId,
        event: EventId,
    ) -> Result<AttendanceOutcome, CalendarServiceError> {
        let txn = self.db.begin().await?;
        let event = lock_active_event(&txn, event).await?;

        if Member::find_by_id(member).one(&txn).await?.is_none() {
            return Err(CalendarServiceError::MemberNotFound);
        }

        let removed = EventAttendance::delete_by_id((event.id, member))
            .exec(&txn)
            .await?;
        if removed.rows_affected > 0 {
            txn.commit().await?;
            info!(event = %event.slug, member = %member, "attendance cancelled");
            return Ok(AttendanceOutcome::Cancelled);
        }

        EventAttendanceActiveModel {
            event_id: Set(event.id),
            member_id: Set(member),
            confirmed_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        if event.capacity > 0 {
            let attendees = attendee_count(&txn, event.id).await?;
            if attendees > event.capacity as u64 {
                txn.rollback().await?;
                debug!(event = %event.slug, "event full");
                return Ok(AttendanceOutcome::EventFull);
            }
        }

        txn.commit().await?;
        info!(event = %event.slug, member = %member, "attendance confirmed");
        Ok(AttendanceOutcome::Confirmed)
    }

    /// Upcoming events for the JSON calendar feed.
    pub async fn feed(
        &self,
        viewer: Viewer,
        now: DateTime<Utc>,
    ) -> Result<Vec<FeedEvent>, CalendarServiceError> {
        let events = Self::upcoming_query(viewer, now)
            .limit(FEED_LIMIT)
            .all(&self.db)
            .await?;

        Ok(events.into_iter().map(FeedEvent::from).collect())
    }

    /// Upcoming active events the member confirmed.
    pub async fn member_upcoming_events(
        &self,
        member: MemberId,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventModel>, CalendarServiceError> {
        let event_ids: Vec<EventId> = EventAttendance::find()
            .select_only()
            .column(EventAttendanceColumn::EventId)
            .filter(EventAttendanceColumn::MemberId.eq(member))
            .into_tuple()
            .all(&self.db)
            .await?;

        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(Self::upcoming_query(Viewer::Member, now)
            .filter(EventColumn::Id.is_in(event_ids))
            .limit(MEMBER_UPCOMING_LIMIT)
            .all(&self.db)
            .await?)
    }

    /// Active weekly meetings, Monday first.
    pub async fn meetings(&self) -> Result<Vec<MeetingModel>, CalendarServiceError> {
        Ok(Meeting::find()
            .filter(MeetingColumn::IsActive.eq(true))
            .order_by_asc(MeetingColumn::Weekday)
            .order_by_asc(MeetingColumn::Time)
            .all(&self.db)
            .await?)
    }

    /// The lodge's regular meeting, when it is active.
    pub async fn regular_meeting(&self) -> Result<Option<MeetingModel>, CalendarServiceError> {
        Ok(first_meeting(&self.db)
            .await?
            .filter(|meeting| meeting.is_active))
    }
}

/// The first meeting ever recorded, active or not. Ids are time ordered.
pub(crate) async fn first_meeting<C: ConnectionTrait>(db: &C) -> Result<Option<MeetingModel>, DbErr> {
    Meeting::find().order_by_asc(MeetingColumn::Id).one(db).await
}

async fn lock_active_event(
    txn: &DatabaseTransaction,
    id: EventId,
) -> Result<EventModel, CalendarServiceError> {
    let mut query = Event::find_by_id(id).filter(EventColumn::IsActive.eq(true));
    if txn.get_database_backend() != DbBackend::Sqlite {
        query = query.lock_exclusive();
    }
    query
        .one(txn)
        .await?
        .ok_or(CalendarServiceError::EventNotFound)
}

async fn attendee_count<C: ConnectionTrait>(db: &C, event: EventId) -> Result<u64, DbErr> {
    EventAttendance::find()
        .filter(EventAttendanceColumn::EventId.eq(event))
        .count(db)
        .await
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::test_utils;

    async fn setup_test_service() -> CalendarService {
        CalendarService::new(test_utils::setup_test_db().await)
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 20, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_toggle_twice_returns_to_not_attending() {
        let service = setup_test_service().await;
        let event = test_utils::event("tenida", Utc::now() + Duration::days(3))
            .insert(&service.db)
            .await
            .unwrap();
        let member = test_utils::insert_member_with_rank(&service.db, "Juan", 1).await;

        assert_eq!(
            service.toggle_attendance(member.id, event.id).await.unwrap(),
            AttendanceOutcome::Confirmed
        );
        assert_eq!(
            service.toggle_attendance(member.id, event.id).await.unwrap(),
            AttendanceOutcome::Cancelled
        );

        let detail = service
            .event_detail("tenida", Viewer::Member, Some(member.id))
            .await
            .unwrap();
        assert_eq!(detail.attendees, 0);
        assert!(!detail.viewer_attending);
    }

    #[tokio::test]
    async fn test_full_event_rejects_new_attendee() {
        let service = setup_test_service().await;
        let mut event = test_utils::event("cena", Utc::now() + Duration::days(3));
        event.capacity = Set(1);
        let event = event.insert(&service.db).await.unwrap();
        let first = test_utils::insert_member_with_rank(&service.db, "Uno", 1).await;
        let second = test_utils::insert_member_with_rank(&service.db, "Dos", 1).await;

        service.toggle_attendance(first.id, event.id).await.unwrap();

        assert_eq!(
            service.toggle_attendance(second.id, event.id).await.unwrap(),
            AttendanceOutcome::EventFull
        );
        assert_eq!(attendee_count(&service.db, event.id).await.unwrap(), 1);

        // The attendee already in can still cancel.
        assert_eq!(
            service.toggle_attendance(first.id, event.id).await.unwrap(),
            AttendanceOutcome::Cancelled
        );
    }

    #[tokio::test]
    async fn test_toggle_inactive_event_is_not_found() {
        let service = setup_test_service().await;
        let mut event = test_utils::event("suspendido", Utc::now());
        event.is_active = Set(false);
        let event = event.insert(&service.db).await.unwrap();
        let member = test_utils::insert_member_with_rank(&service.db, "Juan", 1).await;

        assert!(matches!(
            service.toggle_attendance(member.id, event.id).await,
            Err(CalendarServiceError::EventNotFound)
        ));
        assert!(matches!(
            service.active_event(event.id).await,
            Err(CalendarServiceError::EventNotFound)
        ));
    }

    #[tokio::test]
    async fn test_events_grouped_by_month() {
        let service = setup_test_service().await;
        for (slug, when) in [
            ("marzo-b", at(2024, 3, 20)),
            ("enero", at(2024, 1, 8)),
            ("marzo-a", at(2024, 3, 4)),
            ("otro-anio", at(2023, 12, 31)),
        ] {
            test_utils::event(slug, when).insert(&service.db).await.unwrap();
        }

        let months = service.events_by_month(Viewer::Public, 2024).await.unwrap();

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2024-01");
        assert_eq!(months[1].month, "2024-03");
        let march: Vec<_> = months[1].events.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(march, vec!["marzo-a", "marzo-b"]);
    }

    #[tokio::test]
    async fn test_feed_shape_and_order() {
        let service = setup_test_service().await;
        let now = at(2024, 5, 1);
        let mut lecture = test_utils::event("conferencia", at(2024, 5, 10));
        lecture.kind = Set(EventKind::Lecture);
        lecture.insert(&service.db).await.unwrap();
        test_utils::event("tenida", at(2024, 5, 3))
            .insert(&service.db)
            .await
            .unwrap();
        test_utils::event("pasado", at(2024, 4, 3))
            .insert(&service.db)
            .await
            .unwrap();

        let feed = service.feed(Viewer::Public, now).await.unwrap();

        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].url, "/event/tenida/");
        assert_eq!(feed[1].kind, "Conferencia");
        assert_eq!(feed[1].class_name, "event-lecture");

        let json = serde_json::to_value(&feed[0]).unwrap();
        assert!(json.get("className").is_some());
        assert!(json.get("type").is_some());
    }

    #[tokio::test]
    async fn test_member_upcoming_events() {
        let service = setup_test_service().await;
        let member = test_utils::insert_member_with_rank(&service.db, "Juan", 1).await;
        let soon = test_utils::event("pronto", Utc::now() + Duration::days(2))
            .insert(&service.db)
            .await
            .unwrap();
        test_utils::event("otro", Utc::now() + Duration::days(4))
            .insert(&service.db)
            .await
            .unwrap();
        service.toggle_attendance(member.id, soon.id).await.unwrap();

        let events = service
            .member_upcoming_events(member.id, Utc::now())
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].slug, "pronto");
    }

    #[tokio::test]
    async fn test_meetings_ordered_by_weekday() {
        let service = setup_test_service().await;
        test_utils::meeting(4).insert(&service.db).await.unwrap();
        test_utils::meeting(0).insert(&service.db).await.unwrap();
        let mut off = test_utils::meeting(2);
        off.is_active = Set(false);
        off.insert(&service.db).await.unwrap();

        let meetings = service.meetings().await.unwrap();

        let days: Vec<_> = meetings.iter().map(|m| m.weekday).collect();
        assert_eq!(days, vec![0, 4]);
    }

    #[tokio::test]
    async fn test_regular_meeting_is_first_recorded_when_active() {
        let service = setup_test_service().await;
        assert!(service.regular_meeting().await.unwrap().is_none());

        let first = test_utils::meeting(4).insert(&service.db).await.unwrap();
        test_utils::meeting(0).insert(&service.db).await.unwrap();
        assert_eq!(service.regular_meeting().await.unwrap(), Some(first.clone()));

        let mut first: MeetingActiveModel = first.into();
        first.is_active = Set(false);
        first.update(&service.db).await.unwrap();
        assert!(service.regular_meeting().await.unwrap().is_none());
    }
}
