use axum::extract::{Path, Query, State};
use chrono::Utc;
use lodge_core::{ids::MemberId, service::members::MemberCard};
use maud::{html, Markup};
use serde::Deserialize;

use super::{page_number, render, PageResult};
use crate::{error::AppError, extract::Chrome, filters, templates, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    page: Option<String>,
}

fn member_card(card: &MemberCard) -> Markup {
    let member = &card.member;

    html! {
        article.member {
            h3 { a href={ "/member/" (member.id) "/" } { (member.full_name) } }
            @if let Some(lodge_name) = &member.lodge_name { p.lodge-name { (lodge_name) } }
            @if let Some(rank) = &card.rank {
                p.rank { (rank.symbol) " " (rank.name) " · " (filters::ordinal_spanish(rank.number.into())) " grado" }
            }
            @if let Some(position) = &card.position { p.position { (position.name) } }
        }
    }
}

pub async fn index(
    State(state): State<AppState>,
    chrome: Chrome,
    Query(query): Query<DirectoryQuery>,
) -> PageResult {
    let today = Utc::now().date_naive();
    let directory = state
        .core
        .members
        .directory(page_number(query.page.as_deref()), today)
        .await?;

    let content = html! {
        h1 { "Directorio" }
        @if !directory.officers.is_empty() {
            section.officers {
                h2 { "Oficiales" }
                @for card in &directory.officers { (member_card(card)) }
            }
        }
        section.members {
            h2 { "Hermanos (" (directory.members.total) ")" }
            @for card in &directory.members.items { (member_card(card)) }
        }
        (templates::pagination(&directory.members, |n| format!("/directory/?page={n}")))
    };

    render(templates::layout(&chrome, "Directorio", None, content))
}

pub async fn member(
    State(state): State<AppState>,
    chrome: Chrome,
    Path(id): Path<String>,
) -> PageResult {
    let id = MemberId::parse_str(&id).map_err(|_| AppError::NotFound)?;
    let card = state.core.members.public_member(id).await?;
    let member = &card.member;

    let content = html! {
        article.profile {
            (member_card(&card))
            p { "Estado: " (member.status.label()) }
            p { "Miembro desde " (filters::format_date_spanish(member.joined_on)) }
            @if chrome.viewer().is_member() {
                @if let Some(email) = &member.email { p { a href={ "mailto:" (email) } { (email) } } }
                @if let Some(phone) = &member.phone { p { (filters::phone_format(phone)) } }
            } @else if let Some(email) = &member.email {
                p { (filters::mask_email(email)) }
            }
            a href="/directory/" { "« Volver al directorio" }
        }
    };

    render(templates::layout(&chrome, &member.full_name, None, content))
}
