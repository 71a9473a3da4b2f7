use axum::{
    routing::{get, post},
    Router,
};
use lodge_core::LodgeCore;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub mod error;
pub mod extract;
pub mod filters;
pub mod notice;
pub mod routes;
pub mod templates;

#[derive(Clone)]
pub struct AppState {
    pub core: LodgeCore,
}

impl AppState {
    pub fn new(core: LodgeCore) -> Self {
        Self { core }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home::index))
        .route("/page/{slug}/", get(routes::pages::page))
        .route("/history/", get(routes::history::index))
        .route("/history/event/{id}/", get(routes::history::event))
        .route("/freemasonry/", get(routes::freemasonry::index))
        .route("/education/", get(routes::education::index))
        .route("/education/course/{key}/", get(routes::education::course))
        .route("/education/course/{key}/enroll/", post(routes::education::enroll))
        .route("/education/course/{key}/leave/", post(routes::education::leave))
        .route("/directory/", get(routes::directory::index))
        .route("/member/{id}/", get(routes::directory::member))
        .route("/calendar/", get(routes::calendar::index))
        .route("/event/{key}/", get(routes::calendar::event))
        .route("/event/{key}/attend/", post(routes::calendar::attend))
        .route("/publications/", get(routes::publications::index))
        .route("/publication/{slug}/", get(routes::publications::publication))
        .route("/api/events/", get(routes::api::events))
        .route("/api/phrase-of-day/", get(routes::api::phrase_of_day))
        .route("/search/", get(routes::search::index))
        .route("/members-area/", get(routes::members_area::index))
        .route(
            "/my-profile/",
            get(routes::members_area::profile).post(routes::members_area::save_profile),
        )
        .route(
            "/contact/",
            get(routes::contact::form).post(routes::contact::submit),
        )
        .route("/sitemap.xml", get(routes::sitemap::sitemap))
        .route("/sitemap.xml/", get(routes::sitemap::sitemap))
        .fallback(routes::not_found)
        .layer(CatchPanicLayer::custom(routes::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
