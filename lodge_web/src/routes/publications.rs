use axum::extract::{Path, Query, State};
use chrono::Utc;
use lodge_core::{entity::prelude::PublicationModel, service::publications::PublicationFilter};
use maud::{html, Markup};
use serde::Deserialize;

use super::{page_number, render, PageResult};
use crate::{extract::Chrome, filters, templates, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    category: Option<String>,
    q: Option<String>,
    page: Option<String>,
}

impl ListQuery {
    fn filter(&self) -> PublicationFilter {
        PublicationFilter {
            category: self.category.clone(),
            query: self.q.clone(),
            page: page_number(self.page.as_deref()),
        }
    }

    /// Link to page `number` keeping the other filters.
    fn page_href(&self, number: u64) -> String {
        let mut pairs = vec![("page", number.to_string())];
        for (key, value) in [("category", &self.category), ("q", &self.q)] {
            if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
                pairs.push((key, value.to_owned()));
            }
        }

        match serde_urlencoded::to_string(&pairs) {
            Ok(query) => format!("/publications/?{query}"),
            Err(_) => format!("/publications/?page={number}"),
        }
    }
}

fn publication_card(publication: &PublicationModel, query: Option<&str>) -> Markup {
    let summary = filters::truncate_chars(&publication.summary, 200);

    html! {
        article.publication.important[publication.important] {
            h2 {
                a href={ "/publication/" (publication.slug) "/" } {
                    @match query {
                        Some(query) => { (filters::highlight(&publication.title, query)) }
                        None => { (publication.title) }
                    }
                }
            }
            time datetime=(publication.published_at.to_rfc3339()) {
                (filters::format_date_spanish(publication.published_at.date_naive()))
            }
            p {
                @match query {
                    Some(query) => { (filters::highlight(&summary, query)) }
                    None => { (summary) }
                }
            }
        }
    }
}

pub async fn index(
    State(state): State<AppState>,
    chrome: Chrome,
    Query(query): Query<ListQuery>,
) -> PageResult {
    let publications = &state.core.publications;
    let filter = query.filter();
    let listing = publications.list(chrome.viewer(), &filter).await?;
    let categories = publications.categories_with_counts().await?;
    let needle = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let content = html! {
        h1 { "Publicaciones" }
        form.filter method="get" action="/publications/" {
            input type="search" name="q" value=[needle] placeholder="Buscar publicaciones";
            @if let Some(category) = &query.category {
                input type="hidden" name="category" value=(category);
            }
            button type="submit" { "Buscar" }
        }
        aside.categories {
            ul {
                li { a href="/publications/" { "Todas" } }
                @for entry in &categories {
                    li class=[(query.category.as_deref() == Some(entry.category.slug.as_str())).then_some("current")] {
                        a href={ "/publications/?category=" (entry.category.slug) } {
                            (entry.category.name) " (" (entry.total) ")"
                        }
                    }
                }
            }
        }
        section.listing {
            @if listing.items.is_empty() {
                p { "No se encontraron publicaciones." }
            }
            @for publication in &listing.items {
                (publication_card(publication, needle))
            }
        }
        (templates::pagination(&listing, |n| query.page_href(n)))
    };

    render(templates::layout(&chrome, "Publicaciones", None, content))
}

pub async fn publication(
    State(state): State<AppState>,
    chrome: Chrome,
    Path(slug): Path<String>,
) -> PageResult {
    let detail = state
        .core
        .publications
        .detail(&slug, chrome.viewer())
        .await?;
    let publication = &detail.publication;

    let content = html! {
        article.publication-detail {
            h1 { (publication.title) }
            @if let Some(subtitle) = &publication.subtitle { p.subtitle { (subtitle) } }
            p.meta {
                @if let Some(author) = &publication.author_name { (author) " · " }
                time datetime=(publication.published_at.to_rfc3339()) {
                    (filters::format_date_spanish(publication.published_at.date_naive()))
                }
                " · " (filters::time_ago(publication.published_at, Utc::now()))
                " · " (publication.visits) " lecturas"
            }
            @if !detail.categories.is_empty() {
                ul.categories {
                    @for category in &detail.categories {
                        li { a href={ "/publications/?category=" (category.slug) } { (category.name) } }
                    }
                }
            }
            div.body { (filters::md_to_html(&publication.body)) }
            @let tags = publication.tag_list();
            @if !tags.is_empty() {
                ul.tags { @for tag in tags { li { "#" (tag) } } }
            }
            @if !detail.related.is_empty() {
                section.related {
                    h2 { "Publicaciones relacionadas" }
                    @for related in &detail.related { (publication_card(related, None)) }
                }
            }
        }
    };

    render(templates::layout(&chrome, &publication.title, None, content))
}
