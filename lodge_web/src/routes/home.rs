use axum::extract::State;
use chrono::Utc;
use lodge_core::service::statistics::{DisplayStatistic, LodgeSummary};
use maud::{html, Markup};

use super::{render, PageResult};
use crate::{extract::Chrome, filters, templates, AppState};

fn statistics_band(statistics: &[DisplayStatistic]) -> Markup {
    html! {
        section.statistics {
            @for statistic in statistics {
                div.statistic {
                    @if let Some(icon) = &statistic.icon { span.icon { (icon) } }
                    strong.value { (statistic.value) }
                    span.title { (statistic.title) }
                    @if let Some(subtitle) = &statistic.subtitle { small { (subtitle) } }
                }
            }
        }
    }
}

fn lodge_card(lodge: &LodgeSummary) -> Markup {
    html! {
        section.lodge-summary {
            h2 { (lodge.full_name) }
            dl {
                dt { "Fundada" } dd { (lodge.founded) " (" (lodge.years) " años)" }
                dt { "Miembros" } dd { (lodge.members) }
                dt { "Grado promedio" } dd { (lodge.average_rank) }
                dt { "Talleres" } dd { (lodge.workshops) }
                dt { "Tenidas" } dd { (lodge.meeting_day) " a las " (lodge.meeting_time) " · " (lodge.meeting_audience) }
                dt { "Templo" } dd { (lodge.venue) ", " (lodge.address) }
            }
            @if !lodge.activities.is_empty() {
                ul.activities {
                    @for activity in &lodge.activities {
                        li { span.icon { (activity.icon) } " " strong { (activity.title) } " " (activity.description) }
                    }
                }
            }
        }
    }
}

pub async fn index(State(state): State<AppState>, chrome: Chrome) -> PageResult {
    let now = Utc::now();
    let showcase = state.core.site.home_showcase(chrome.viewer(), now).await?;
    let snapshot = state.core.statistics.compute_site_snapshot_at(now).await?;
    let phrase = state.core.site.phrase_of_day().await?;

    let content = html! {
        @if !showcase.carousel.is_empty() {
            section.carousel {
                @for slide in &showcase.carousel {
                    article.slide {
                        h2 { (slide.title) }
                        @if let Some(subtitle) = &slide.subtitle { p { (subtitle) } }
                        @if let Some(link) = &slide.link { a.button href=(link) { (slide.button_text) } }
                    }
                }
            }
        }

        blockquote.phrase-of-day {
            p { "“" (phrase.content) "”" }
            footer { "— " (phrase.author) }
        }

        (statistics_band(&snapshot.featured_statistics))

        @if !showcase.principles.is_empty() {
            section.principles {
                h2 { "Nuestros principios" }
                @for principle in &showcase.principles {
                    article {
                        span.symbol { (principle.symbol) }
                        h3 { (principle.title) }
                        p { (principle.summary) }
                    }
                }
            }
        }

        section.latest-publications {
            h2 { "Publicaciones recientes" }
            @for publication in &showcase.latest_publications {
                article {
                    h3 { a href={ "/publication/" (publication.slug) "/" } { (publication.title) } }
                    time datetime=(publication.published_at.to_rfc3339()) {
                        (filters::format_date_spanish(publication.published_at.date_naive()))
                    }
                    p { (filters::truncate_chars(&publication.summary, 160)) }
                }
            }
            a href="/publications/" { "Ver todas" }
        }

        section.upcoming-events {
            h2 { "Próximos eventos" }
            @for event in &showcase.upcoming_events {
                article {
                    h3 { a href={ "/event/" (event.slug) "/" } { (event.title) } }
                    p.kind { (event.kind.label()) }
                    time datetime=(event.starts_at.to_rfc3339()) {
                        (filters::format_date_spanish(event.starts_at.date_naive()))
                    }
                }
            }
            a href="/calendar/" { "Ver calendario" }
        }

        @if !showcase.milestones.is_empty() {
            section.milestones {
                h2 { "Nuestra historia" }
                ol {
                    @for milestone in &showcase.milestones {
                        li {
                            a href={ "/history/event/" (milestone.id) "/" } {
                                strong { (milestone.occurred_on.format("%Y")) } " " (milestone.title)
                            }
                        }
                    }
                }
            }
        }

        @if !showcase.featured_courses.is_empty() {
            section.featured-courses {
                h2 { "Formación" }
                @for course in &showcase.featured_courses {
                    article {
                        span.symbol { (course.audience.symbol()) }
                        h3 { a href={ "/education/course/" (course.slug) "/" } { (course.title) } }
                        p { (course.summary) }
                    }
                }
            }
        }

        @if !showcase.testimonials.is_empty() {
            section.testimonials {
                @for testimonial in &showcase.testimonials {
                    blockquote {
                        p { (testimonial.content) }
                        footer { (testimonial.author) ", " (testimonial.role) }
                    }
                }
            }
        }

        (lodge_card(&snapshot.lodge))
    };

    render(templates::layout(&chrome, "", None, content))
}
