use axum::extract::State;
use lodge_core::{
    entity::prelude::{PrincipleModel, SisterLodgeModel},
    service::site::FREEMASONRY_PAGE_SLUG,
};
use maud::{html, Markup};

use super::{pages, render, PageResult};
use crate::{extract::Chrome, templates, AppState};

fn principle_column(heading: &str, principles: &[PrincipleModel]) -> Markup {
    html! {
        @if !principles.is_empty() {
            div.column {
                h3 { (heading) }
                @for principle in principles {
                    article.principle {
                        span.symbol { (principle.symbol) }
                        h4 { (principle.title) }
                        p { (principle.summary) }
                    }
                }
            }
        }
    }
}

fn lodge_list(lodges: &[SisterLodgeModel]) -> Markup {
    html! {
        ul.lodges {
            @for lodge in lodges {
                li.featured[lodge.featured] {
                    span.flag { (lodge.flag) }
                    strong { (lodge.name) }
                    " · " (lodge.location)
                    " · Fundada: " (lodge.founded_label())
                    @if !lodge.description.is_empty() { p { (lodge.description) } }
                }
            }
        }
    }
}

pub async fn index(State(state): State<AppState>, chrome: Chrome) -> PageResult {
    let intro = pages::intro_page(&state, &chrome, FREEMASONRY_PAGE_SLUG).await?;
    let principles = state.core.site.principles_by_pillar().await?;
    let lodges = state.core.site.sister_lodges().await?;

    let content = html! {
        h1 { "La Masonería" }
        (pages::intro(intro.as_ref()))
        section.principles {
            h2 { "Principios y valores" }
            div.columns {
                (principle_column("Columna del Norte", &principles.north))
                (principle_column("Central", &principles.central))
                (principle_column("Columna del Sur", &principles.south))
            }
        }
        @if !lodges.is_empty() {
            section.lodge-directory {
                h2 { "Logias hermanas" }
                @for (region, members) in lodges.regions() {
                    @if !members.is_empty() {
                        div.region {
                            h3 { (region.label()) }
                            (lodge_list(members))
                        }
                    }
                }
            }
        }
    };

    render(templates::layout(&chrome, "La Masonería", None, content))
}
