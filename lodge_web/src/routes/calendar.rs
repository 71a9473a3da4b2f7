use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use chrono::{Datelike, Utc};
use lodge_core::{entity::prelude::EventModel, ids::EventId};
use maud::{html, Markup};

use super::{render, PageResult};
use crate::{
    error::AppError,
    extract::{Chrome, CurrentViewer},
    filters,
    notice::{Notice, NoticeQuery},
    templates, AppState,
};

fn event_path(event: &EventModel) -> String {
    format!("/event/{}/", event.slug)
}

/// `2024-03` as `marzo 2024`.
fn month_heading(month: &str) -> String {
    match month.split_once('-') {
        Some((year, number)) => match number.parse::<u32>() {
            Ok(number) if (1..=12).contains(&number) => {
                format!("{} {year}", filters::month_name(number))
            }
            _ => month.to_owned(),
        },
        None => month.to_owned(),
    }
}

fn event_row(event: &EventModel) -> Markup {
    html! {
        li class={ "event event-" (event.kind.code()) } {
            time datetime=(event.starts_at.to_rfc3339()) { (event.starts_at.format("%d/%m %H:%M")) }
            " "
            a href=(event_path(event)) { (event.title) }
            " · " span.kind { (event.kind.label()) }
            @if event.members_only { " " span.badge { "Miembros" } }
        }
    }
}

pub async fn index(State(state): State<AppState>, chrome: Chrome) -> PageResult {
    let now = Utc::now();
    let viewer = chrome.viewer();
    let calendar = &state.core.calendar;
    let upcoming = calendar.upcoming(viewer, now).await?;
    let months = calendar.events_by_month(viewer, now.year()).await?;
    let meetings = calendar.meetings().await?;

    let content = html! {
        h1 { "Calendario" }
        div id="calendar" data-feed="/api/events/" {}

        @if !meetings.is_empty() {
            section.meetings {
                h2 { "Tenidas regulares" }
                ul {
                    @for meeting in &meetings {
                        li {
                            (meeting.weekday_name()) " " (meeting.time.format("%H:%M"))
                            " · " (meeting.audience.label()) " · " (meeting.venue)
                        }
                    }
                }
            }
        }

        section.upcoming {
            h2 { "Próximos eventos" }
            @if upcoming.is_empty() {
                p { "No hay eventos programados." }
            } @else {
                ul { @for event in &upcoming { (event_row(event)) } }
            }
        }

        section.year {
            h2 { "Eventos de " (now.year()) }
            @for month in &months {
                h3 { (month_heading(&month.month)) }
                ul { @for event in &month.events { (event_row(event)) } }
            }
        }
    };

    render(templates::layout(&chrome, "Calendario", None, content))
}

pub async fn event(
    State(state): State<AppState>,
    chrome: Chrome,
    Path(slug): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> PageResult {
    let member = chrome.viewer.member_id();
    let detail = state
        .core
        .calendar
        .event_detail(&slug, chrome.viewer(), member)
        .await?;
    let event = &detail.event;

    let content = html! {
        article.event-detail {
            h1 { (event.title) }
            p.kind { (event.kind.label()) }
            p.when {
                (filters::format_date_spanish(event.starts_at.date_naive()))
                " · " (event.starts_at.format("%H:%M"))
                @if let Some(ends) = event.ends_at { " a " (ends.format("%H:%M")) }
            }
            p.venue { (event.venue) @if let Some(address) = &event.address { ", " (address) } }
            div.body { (filters::md_to_html(&event.description)) }
            p.attendance {
                (detail.attendees) " asistentes confirmados"
                @if event.capacity > 0 { " de " (event.capacity) }
            }
            @if member.is_some() {
                form method="post" action={ "/event/" (event.id) "/attend/" } {
                    button type="submit" {
                        @if detail.viewer_attending { "Cancelar asistencia" } @else { "Confirmar asistencia" }
                    }
                }
            }
            a href="/calendar/" { "« Volver al calendario" }
        }
    };

    render(templates::layout(&chrome, &event.title, query.notice(), content))
}

pub async fn attend(
    State(state): State<AppState>,
    viewer: CurrentViewer,
    Path(key): Path<String>,
) -> Result<Redirect, AppError> {
    let member = viewer.require_member()?;
    let id = EventId::parse_str(&key).map_err(|_| AppError::NotFound)?;
    let event = state.core.calendar.active_event(id).await?;
    let outcome = state.core.calendar.toggle_attendance(member.id, event.id).await?;

    Ok(Redirect::to(&Notice::from(outcome).redirect_to(&event_path(&event))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_heading() {
        assert_eq!(month_heading("2024-03"), "marzo 2024");
        assert_eq!(month_heading("2024-13"), "2024-13");
        assert_eq!(month_heading("marzo"), "marzo");
    }
}
