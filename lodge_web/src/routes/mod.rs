use std::any::Any;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::Markup;
use tracing::error;

use crate::{error::AppError, templates};

pub mod api;
pub mod calendar;
pub mod contact;
pub mod directory;
pub mod education;
pub mod freemasonry;
pub mod history;
pub mod home;
pub mod members_area;
pub mod pages;
pub mod publications;
pub mod search;
pub mod sitemap;

pub type PageResult = Result<Html<String>, AppError>;

pub fn render(markup: Markup) -> PageResult {
    Ok(Html(markup.into_string()))
}

/// `?page=` as typed by a visitor. Anything unparsable is the first page.
pub fn page_number(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|raw| raw.trim().parse().ok())
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_default();
    error!(panic = %detail, "handler panicked");

    let status = StatusCode::INTERNAL_SERVER_ERROR;
    (status, Html(templates::error_page(status).into_string())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number_is_lenient() {
        assert_eq!(page_number(Some("3")), Some(3));
        assert_eq!(page_number(Some("tres")), None);
        assert_eq!(page_number(None), None);
    }

    #[test]
    fn test_panic_response_is_500() {
        let response = panic_response(Box::new("boom"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
