use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use lodge_core::{entity::prelude::CourseModel, ids::CourseId};
use maud::{html, Markup};

use super::{render, PageResult};
use crate::{
    error::AppError,
    extract::{Chrome, CurrentViewer},
    filters,
    notice::{Notice, NoticeQuery},
    templates, AppState,
};

fn course_path(course: &CourseModel) -> String {
    format!("/education/course/{}/", course.slug)
}

fn course_card(course: &CourseModel) -> Markup {
    html! {
        article.course {
            h3 { a href=(course_path(course)) { (course.title) } }
            p { (course.summary) }
            small { (course.lessons) " lecciones · " (course.duration_hours) " horas" }
            @if course.members_only { " " span.badge { "Miembros" } }
        }
    }
}

pub async fn index(State(state): State<AppState>, chrome: Chrome) -> PageResult {
    let viewer = chrome.viewer();
    let education = &state.core.education;
    let groups = education.courses_by_audience(viewer).await?;
    let materials = education.recent_materials(viewer).await?;
    let library = education.library_sample(viewer).await?;
    let statistics = state.core.statistics.education_statistics().await?;
    let settings = &chrome.settings;

    let content = html! {
        h1 { "Educación" }
        a.button.lms href=(settings.lms_url) { (settings.lms_button_text) }

        @if !statistics.is_empty() {
            section.statistics {
                @for statistic in &statistics {
                    div.statistic { strong { (statistic.value) } " " span { (statistic.title) } }
                }
            }
        }

        @for group in &groups {
            @if !group.courses.is_empty() {
                section.audience {
                    h2 { span.symbol { (group.audience.symbol()) } " " (group.audience.label()) }
                    @for course in &group.courses { (course_card(course)) }
                }
            }
        }

        @if !materials.is_empty() {
            section.materials {
                h2 { "Material reciente" }
                ul {
                    @for material in &materials {
                        li {
                            @if let Some(url) = &material.external_url {
                                a href=(url) { (material.title) }
                            } @else {
                                (material.title)
                            }
                            " · " (material.kind)
                        }
                    }
                }
            }
        }

        @if !library.is_empty() {
            section.library {
                h2 { "Biblioteca" }
                ul {
                    @for item in &library {
                        li { em { (item.title) } " · " (item.author) }
                    }
                }
            }
        }
    };

    render(templates::layout(&chrome, "Educación", None, content))
}

pub async fn course(
    State(state): State<AppState>,
    chrome: Chrome,
    Path(slug): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> PageResult {
    let member = chrome.viewer.member_id();
    let detail = state
        .core
        .education
        .course_detail(&slug, chrome.viewer(), member)
        .await?;
    let course = &detail.course;

    let content = html! {
        article.course-detail {
            h1 { (course.title) }
            p.audience { (course.audience.symbol()) " " (course.audience.label()) }
            @if let (Some(starts), Some(ends)) = (course.starts_on, course.ends_on) {
                p.dates { "Del " (filters::format_date_spanish(starts)) " al " (filters::format_date_spanish(ends)) }
            }
            div.body { (filters::md_to_html(&course.description)) }
            p.enrollment {
                (detail.enrolled) " inscritos"
                @if let Some(left) = detail.seats_left() { " · " (left) " lugares disponibles" }
            }

            @if member.is_some() {
                @if detail.viewer_enrolled {
                    form method="post" action={ "/education/course/" (course.id) "/leave/" } {
                        button type="submit" { "Cancelar inscripción" }
                    }
                } @else {
                    form method="post" action={ "/education/course/" (course.id) "/enroll/" } {
                        button type="submit" { "Inscribirme" }
                    }
                }
            }
            @if let Some(lms) = &course.lms_url {
                a.lms href=(lms) { "Abrir en el campus virtual" }
            }

            @if !detail.materials.is_empty() {
                h2 { "Materiales" }
                ul {
                    @for material in &detail.materials {
                        li {
                            strong { (material.title) }
                            @if let Some(author) = &material.author { " · " (author) }
                            p { (material.description) }
                        }
                    }
                }
            }
            a href="/education/" { "« Volver a educación" }
        }
    };

    render(templates::layout(&chrome, &course.title, query.notice(), content))
}

async fn course_for_toggle(state: &AppState, key: &str) -> Result<CourseModel, AppError> {
    let id = CourseId::parse_str(key).map_err(|_| AppError::NotFound)?;
    Ok(state.core.education.active_course(id).await?)
}

pub async fn enroll(
    State(state): State<AppState>,
    viewer: CurrentViewer,
    Path(key): Path<String>,
) -> Result<Redirect, AppError> {
    let member = viewer.require_member()?;
    let course = course_for_toggle(&state, &key).await?;
    let outcome = state.core.education.enroll(member.id, course.id).await?;

    Ok(Redirect::to(&Notice::from(outcome).redirect_to(&course_path(&course))))
}

pub async fn leave(
    State(state): State<AppState>,
    viewer: CurrentViewer,
    Path(key): Path<String>,
) -> Result<Redirect, AppError> {
    let member = viewer.require_member()?;
    let course = course_for_toggle(&state, &key).await?;
    let outcome = state.core.education.leave(member.id, course.id).await?;

    Ok(Redirect::to(&Notice::from(outcome).redirect_to(&course_path(&course))))
}
