use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use lodge_core::entity::prelude::DbErr;
use lodge_core::service::{
    calendar::CalendarServiceError, contact::ContactServiceError,
    education::EducationServiceError, history::HistoryServiceError,
    members::MembersServiceError, publications::PublicationsServiceError,
    search::SearchServiceError, site::SiteServiceError, statistics::StatisticsServiceError,
};
use tracing::error;

use crate::templates;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error("authentication required")]
    Unauthenticated,
    #[error("invalid input: {0}")]
    Unprocessable(String),
    #[error("database error {0}")]
    Database(#[from] DbErr),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Database(err) = &self {
            error!(error = %err, "request failed");
        }
        (status, Html(templates::error_page(status).into_string())).into_response()
    }
}

/// Maps a service error onto [`AppError`]: its not-found variants become
/// 404s and its database variant a 500.
macro_rules! from_service_error {
    ($error:ident { $($not_found:ident),* }) => {
        impl From<$error> for AppError {
            fn from(err: $error) -> Self {
                match err {
                    $error::DbError(db) => AppError::Database(db),
                    $($error::$not_found => AppError::NotFound,)*
                    #[allow(unreachable_patterns)]
                    other => AppError::Unprocessable(other.to_string()),
                }
            }
        }
    };
}

from_service_error!(SiteServiceError { PageNotFound });
from_service_error!(StatisticsServiceError {});
from_service_error!(MembersServiceError { NotFound });
from_service_error!(EducationServiceError { CourseNotFound, MemberNotFound });
from_service_error!(CalendarServiceError { EventNotFound, MemberNotFound });
from_service_error!(PublicationsServiceError { NotFound });
from_service_error!(HistoryServiceError { NotFound });
from_service_error!(SearchServiceError {});

impl From<ContactServiceError> for AppError {
    fn from(err: ContactServiceError) -> Self {
        match err {
            ContactServiceError::DbError(db) => AppError::Database(db),
            ContactServiceError::Validation(errors) => AppError::Unprocessable(errors.to_string()),
        }
    }
}
