use axum::extract::{Query, State};
use lodge_core::service::search::{Hits, MIN_QUERY_CHARS};
use maud::{html, Markup};
use serde::Deserialize;

use super::{render, PageResult};
use crate::{extract::Chrome, filters, templates, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// One result kind: heading, total and the first hits as links.
fn hits_section<T>(
    heading: &str,
    hits: &Hits<T>,
    query: &str,
    link: impl Fn(&T) -> (String, String),
) -> Markup {
    html! {
        @if !hits.items.is_empty() {
            section.results {
                h2 { (heading) " (" (hits.total) ")" }
                ul {
                    @for item in &hits.items {
                        @let (href, title) = link(item);
                        li { a href=(href) { (filters::highlight(&title, query)) } }
                    }
                }
            }
        }
    }
}

pub async fn index(
    State(state): State<AppState>,
    chrome: Chrome,
    Query(query): Query<SearchQuery>,
) -> PageResult {
    let results = state.core.search.search(&query.q, chrome.viewer()).await?;
    let needle = results.query.as_str();

    let content = html! {
        h1 { "Búsqueda" }
        form method="get" action="/search/" {
            input type="search" name="q" value=(needle) minlength=(MIN_QUERY_CHARS);
            button type="submit" { "Buscar" }
        }
        @if !results.searched {
            p { "Escribe al menos " (MIN_QUERY_CHARS) " caracteres para buscar." }
        } @else if results.total() == 0 {
            p { "No se encontraron resultados para “" (needle) "”." }
        } @else {
            p { (results.total()) " resultados para “" (needle) "”" }
            (hits_section("Publicaciones", &results.publications, needle, |p| {
                (format!("/publication/{}/", p.slug), p.title.clone())
            }))
            (hits_section("Cursos", &results.courses, needle, |c| {
                (format!("/education/course/{}/", c.slug), c.title.clone())
            }))
            (hits_section("Eventos", &results.events, needle, |e| {
                (format!("/event/{}/", e.slug), e.title.clone())
            }))
            (hits_section("Páginas", &results.pages, needle, |p| {
                (format!("/page/{}/", p.slug), p.title.clone())
            }))
        }
    };

    render(templates::layout(&chrome, "Búsqueda", None, content))
}
