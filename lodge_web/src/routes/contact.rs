use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use lodge_core::{
    entity::prelude::{ContactSubject, MeetingModel},
    service::contact::{ContactDetails, ContactServiceError, ContactSubmission, ValidationErrors},
};
use maud::{html, Markup};

use super::{render, PageResult};
use crate::{
    error::AppError,
    extract::{Chrome, ClientIp},
    notice::{Notice, NoticeQuery},
    templates, AppState,
};

fn field_error(errors: &ValidationErrors, field: &str) -> Markup {
    html! {
        @if let Some(message) = errors.for_field(field) {
            span.field-error { (message) }
        }
    }
}

fn contact_info(details: &ContactDetails, meeting: Option<&MeetingModel>) -> Markup {
    html! {
        @if !details.channels.is_empty() {
            section.channels {
                h2 { "Canales de contacto" }
                ul {
                    @for channel in &details.channels {
                        li.primary[channel.is_primary] {
                            strong { (channel.title) ": " }
                            @if let Some(href) = channel.href() {
                                a href=(href) { (channel.value) }
                            } @else {
                                (channel.value)
                            }
                        }
                    }
                }
            }
        }
        @if !details.office_hours.is_empty() {
            section.office-hours {
                h2 { "Horario de atención" }
                ul {
                    @for hours in &details.office_hours { li { (hours.describe()) } }
                }
            }
        }
        @if let Some(meeting) = meeting {
            section.meeting {
                h2 { "Tenidas regulares" }
                p {
                    (meeting.weekday_name()) ", " (meeting.time.format("%H:%M"))
                    " · " (meeting.venue)
                }
                @if !meeting.address.is_empty() { p { (meeting.address) } }
            }
        }
    }
}

fn contact_form(form: &ContactSubmission, errors: &ValidationErrors) -> Markup {
    html! {
        form.contact method="post" action="/contact/" {
            label { "Nombre" input type="text" name="name" required value=(form.name); }
            (field_error(errors, "name"))
            label { "Correo electrónico" input type="email" name="email" required value=(form.email); }
            (field_error(errors, "email"))
            label {
                "Asunto"
                select name="subject" {
                    @for subject in ContactSubject::ALL {
                        option value=(subject.code()) selected[subject == form.subject] { (subject.label()) }
                    }
                }
            }
            label {
                "Especifica el asunto"
                input type="text" name="custom_subject" value=(form.custom_subject.clone().unwrap_or_default());
            }
            (field_error(errors, "custom_subject"))
            label { "Mensaje" textarea name="message" required { (form.message) } }
            (field_error(errors, "message"))
            button type="submit" { "Enviar" }
        }
    }
}

async fn contact_page(
    state: &AppState,
    form: &ContactSubmission,
    errors: &ValidationErrors,
) -> Result<Markup, AppError> {
    let details = state.core.contact.details().await?;
    let meeting = state.core.calendar.regular_meeting().await?;

    Ok(html! {
        h1 { "Contacto" }
        (contact_info(&details, meeting.as_ref()))
        (contact_form(form, errors))
    })
}

pub async fn form(
    State(state): State<AppState>,
    chrome: Chrome,
    Query(query): Query<NoticeQuery>,
) -> PageResult {
    let content = contact_page(&state, &ContactSubmission::default(), &ValidationErrors::default()).await?;
    render(templates::layout(&chrome, "Contacto", query.notice(), content))
}

pub async fn submit(
    State(state): State<AppState>,
    chrome: Chrome,
    ClientIp(ip): ClientIp,
    Form(submission): Form<ContactSubmission>,
) -> Result<Response, AppError> {
    match state.core.contact.submit(submission.clone(), ip).await {
        Ok(_) => Ok(Redirect::to(&Notice::Sent.redirect_to("/contact/")).into_response()),
        Err(ContactServiceError::Validation(errors)) => {
            let content = contact_page(&state, &submission, &errors).await?;
            let page = templates::layout(&chrome, "Contacto", None, content);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page.into_string())).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
