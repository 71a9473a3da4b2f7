use axum::extract::{Path, State};
use lodge_core::{
    entity::prelude::{PageModel, SectionKind, SectionModel},
    service::site::SiteServiceError,
};
use maud::{html, Markup};

use super::{render, PageResult};
use crate::{error::AppError, extract::Chrome, filters, templates, AppState};

/// A page some views show as their introduction, when it exists.
pub async fn intro_page(
    state: &AppState,
    chrome: &Chrome,
    slug: &str,
) -> Result<Option<(PageModel, Vec<SectionModel>)>, AppError> {
    match state.core.site.page_by_slug(slug, chrome.viewer()).await {
        Ok(found) => Ok(Some(found)),
        Err(SiteServiceError::PageNotFound) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub fn intro(intro: Option<&(PageModel, Vec<SectionModel>)>) -> Markup {
    html! {
        @if let Some((page, sections)) = intro {
            div.body { (filters::md_to_html(&page.body)) }
            @for item in sections { (section(item)) }
        }
    }
}

pub fn section(section: &SectionModel) -> Markup {
    let kind = match section.kind {
        SectionKind::Text => "text",
        SectionKind::TextImage => "text-image",
        SectionKind::Gallery => "gallery",
        SectionKind::Cards => "cards",
        SectionKind::Timeline => "timeline",
        SectionKind::Quotes => "quotes",
        SectionKind::Form => "form",
    };
    let class = if section.dark_background {
        format!("section section-{kind} section-dark")
    } else {
        format!("section section-{kind}")
    };

    html! {
        section class=(class) {
            h2 { (section.title) }
            @if let Some(subtitle) = &section.subtitle { p.subtitle { (subtitle) } }
            div.body { (filters::md_to_html(&section.body)) }
        }
    }
}

pub async fn page(
    State(state): State<AppState>,
    chrome: Chrome,
    Path(slug): Path<String>,
) -> PageResult {
    let (page, sections) = state.core.site.page_by_slug(&slug, chrome.viewer()).await?;
    let title = page.meta_title.clone().unwrap_or_else(|| page.title.clone());

    let content = html! {
        article.page {
            header {
                h1 { (page.title) }
                @if let Some(subtitle) = &page.subtitle { p.subtitle { (subtitle) } }
            }
            div.body { (filters::md_to_html(&page.body)) }
            @for item in &sections {
                (section(item))
            }
        }
    };

    render(templates::layout(&chrome, &title, None, content))
}
