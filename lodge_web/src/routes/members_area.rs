use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use lodge_core::service::members::{MembersServiceError, ProfileUpdate};
use maud::{html, Markup};
use serde::Deserialize;

use super::{render, PageResult};
use crate::{
    error::AppError,
    extract::Chrome,
    filters,
    notice::{Notice, NoticeQuery},
    templates, AppState,
};

pub async fn index(State(state): State<AppState>, chrome: Chrome) -> PageResult {
    let member = chrome.viewer.require_member()?;
    let courses = state.core.education.member_courses(member.id).await?;
    let events = state
        .core
        .calendar
        .member_upcoming_events(member.id, Utc::now())
        .await?;
    let documents = state.core.history.private_documents().await?;

    let content = html! {
        h1 { "Área de miembros" }
        p { "Bienvenido, " (member.lodge_name.as_deref().unwrap_or(&member.full_name)) "." }
        a href="/my-profile/" { "Editar mi perfil" }

        section.my-courses {
            h2 { "Mis cursos" }
            @if courses.is_empty() {
                p { "Aún no te has inscrito a ningún curso. " a href="/education/" { "Ver cursos" } }
            }
            ul {
                @for course in &courses {
                    li { a href={ "/education/course/" (course.slug) "/" } { (course.title) } }
                }
            }
        }

        section.my-events {
            h2 { "Mis próximos eventos" }
            ul {
                @for event in &events {
                    li {
                        a href={ "/event/" (event.slug) "/" } { (event.title) }
                        " · " (filters::format_date_spanish(event.starts_at.date_naive()))
                    }
                }
            }
        }

        @if !documents.is_empty() {
            section.private-documents {
                h2 { "Documentos reservados" }
                ul {
                    @for document in &documents {
                        li { strong { (document.title) } " · " (document.kind) }
                    }
                }
            }
        }
    };

    render(templates::layout(&chrome, "Área de miembros", None, content))
}

/// Profile form as posted. Unchecked checkboxes are simply absent.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    lodge_name: String,
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    address: String,
    is_public: Option<String>,
}

impl From<ProfileForm> for ProfileUpdate {
    fn from(form: ProfileForm) -> Self {
        ProfileUpdate {
            lodge_name: Some(form.lodge_name),
            full_name: form.full_name,
            email: Some(form.email),
            phone: Some(form.phone),
            address: Some(form.address),
            is_public: form.is_public.is_some(),
        }
    }
}

fn profile_form(update: &ProfileUpdate, error: Option<&str>) -> Markup {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    html! {
        h1 { "Mi perfil" }
        @if let Some(error) = error {
            p.form-error role="alert" { (error) }
        }
        form.profile method="post" action="/my-profile/" {
            label { "Nombre simbólico" input type="text" name="lodge_name" value=(text(&update.lodge_name)); }
            label { "Nombre completo" input type="text" name="full_name" required value=(update.full_name); }
            label { "Correo electrónico" input type="email" name="email" value=(text(&update.email)); }
            label { "Teléfono" input type="tel" name="phone" value=(text(&update.phone)); }
            label { "Dirección" textarea name="address" { (text(&update.address)) } }
            label {
                input type="checkbox" name="is_public" checked[update.is_public];
                " Mostrar mi perfil en el directorio"
            }
            button type="submit" { "Guardar" }
        }
    }
}

pub async fn profile(chrome: Chrome, Query(query): Query<NoticeQuery>) -> PageResult {
    let member = chrome.viewer.require_member()?;
    let update = ProfileUpdate::from_member(member);

    render(templates::layout(
        &chrome,
        "Mi perfil",
        query.notice(),
        profile_form(&update, None),
    ))
}

pub async fn save_profile(
    State(state): State<AppState>,
    chrome: Chrome,
    Form(form): Form<ProfileForm>,
) -> Result<Response, AppError> {
    let member = chrome.viewer.require_member()?;
    let update = ProfileUpdate::from(form);

    match state.core.members.update_profile(member.id, update.clone()).await {
        Ok(_) => Ok(Redirect::to(&Notice::ProfileSaved.redirect_to("/my-profile/")).into_response()),
        Err(MembersServiceError::Validation(message)) => {
            let page = templates::layout(&chrome, "Mi perfil", None, profile_form(&update, Some(&message)));
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page.into_string())).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
