use axum::extract::{Path, State};
use lodge_core::{
    config::LodgeConfig,
    entity::prelude::{HistoricalDocumentModel, HistoricalImageModel},
    ids::HistoricalEventId,
    service::history::HISTORY_PAGE_SLUG,
};
use maud::{html, Markup};

use super::{pages, render, PageResult};
use crate::{error::AppError, extract::Chrome, filters, templates, AppState};

fn documents(documents: &[HistoricalDocumentModel]) -> Markup {
    html! {
        ul.documents {
            @for document in documents {
                li {
                    strong { (document.title) }
                    " · " (document.kind)
                    @if let Some(dated_on) = document.dated_on {
                        " · " (filters::format_date_spanish(dated_on))
                    }
                    @if document.members_only { " " span.badge { "Miembros" } }
                    p { (document.description) }
                }
            }
        }
    }
}

fn gallery(config: &LodgeConfig, images: &[HistoricalImageModel]) -> Markup {
    html! {
        div.gallery-grid {
            @for image in images {
                figure {
                    img src=(config.media_href(&image.image_path)) alt=(image.title) loading="lazy";
                    figcaption {
                        strong { (image.title) }
                        " · " (image.category.label())
                        @if let Some(taken_on) = image.taken_on {
                            " · " (filters::format_date_spanish(taken_on))
                        }
                    }
                }
            }
        }
    }
}

pub async fn index(State(state): State<AppState>, chrome: Chrome) -> PageResult {
    let intro = pages::intro_page(&state, &chrome, HISTORY_PAGE_SLUG).await?;
    let timeline = state.core.history.timeline().await?;
    let images = state.core.history.featured_images().await?;
    let public_documents = state.core.history.public_documents().await?;

    let content = html! {
        h1 { "Historia de la Logia" }
        (pages::intro(intro.as_ref()))
        section.timeline {
            @for decade in &timeline {
                div.decade {
                    h2 { "Década de " (decade.decade) }
                    ol {
                        @for event in &decade.events {
                            li class=[event.is_milestone.then_some("milestone")] {
                                time datetime=(event.occurred_on.to_string()) {
                                    (event.date_label.clone().unwrap_or_else(|| event.occurred_on.format("%Y").to_string()))
                                }
                                " "
                                a href={ "/history/event/" (event.id) "/" } { (event.title) }
                                p { (event.summary) }
                            }
                        }
                    }
                }
            }
        }
        @if !images.is_empty() {
            section.gallery {
                h2 { "Galería histórica" }
                (gallery(&state.core.config, &images))
            }
        }
        @if !public_documents.is_empty() {
            section {
                h2 { "Documentos históricos" }
                (documents(&public_documents))
            }
        }
    };

    render(templates::layout(&chrome, "Historia", None, content))
}

pub async fn event(
    State(state): State<AppState>,
    chrome: Chrome,
    Path(id): Path<String>,
) -> PageResult {
    let id = HistoricalEventId::parse_str(&id).map_err(|_| AppError::NotFound)?;
    let detail = state.core.history.event_detail(id, chrome.viewer()).await?;
    let event = &detail.event;

    let content = html! {
        article.historical-event {
            h1 { (event.title) }
            p.date {
                (filters::format_date_spanish(event.occurred_on))
                " · " (filters::masonic_date(event.occurred_on))
            }
            div.body { (filters::md_to_html(&event.description)) }
            @if let Some(video) = &event.video_url {
                iframe.video src=(filters::youtube_embed(video)) allowfullscreen {}
            }
            @if !detail.documents.is_empty() {
                h2 { "Documentos" }
                (documents(&detail.documents))
            }
            a href="/history/" { "« Volver a la historia" }
        }
    };

    render(templates::layout(&chrome, &event.title, None, content))
}
