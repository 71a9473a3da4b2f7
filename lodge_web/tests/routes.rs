use std::{path::Path, sync::Arc};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use lodge_core::{
    config::LodgeConfig,
    entity::prelude::*,
    service::contact::LogNotifier,
    test_utils, LodgeCore,
};
use lodge_web::{router, AppState};
use tower::ServiceExt;

struct TestApp {
    app: Router,
    db: DatabaseConnection,
}

async fn setup_app() -> TestApp {
    let db = test_utils::setup_test_db().await;
    let config = LodgeConfig::new(Path::new("/tmp/lodge-test"));
    let core = LodgeCore::with_db(
        config,
        db.clone(),
        Arc::new(LogNotifier::new("secretaria@example.org")),
    );

    TestApp {
        app: router(AppState::new(core)),
        db,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str) -> axum::response::Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn get_as(&self, uri: &str, member: &MemberModel) -> axum::response::Response {
        self.send(
            Request::get(uri)
                .header("x-lodge-member", member.id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn post_as(&self, uri: &str, member: Option<&MemberModel>) -> axum::response::Response {
        let mut request = Request::post(uri);
        if let Some(member) = member {
            request = request.header("x-lodge-member", member.id.to_string());
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_home_renders_on_empty_site() {
    let app = setup_app().await;

    let response = app.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("La luz disipa las sombras"));
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let app = setup_app().await;

    let response = app.get("/no/existe/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("Página no encontrada"));
}

#[tokio::test]
async fn test_pages_hidden_when_missing_inactive_or_members_only() {
    let app = setup_app().await;
    let member = test_utils::insert_member_with_rank(&app.db, "Juan", 1).await;

    let mut inactive = test_utils::page("borrador");
    inactive.is_active = Set(false);
    inactive.insert(&app.db).await.unwrap();
    let mut reserved = test_utils::page("reservada");
    reserved.members_only = Set(true);
    reserved.insert(&app.db).await.unwrap();
    test_utils::page("acerca").insert(&app.db).await.unwrap();

    assert_eq!(app.get("/page/no-existe/").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/page/borrador/").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/page/reservada/").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/page/acerca/").await.status(), StatusCode::OK);
    assert_eq!(
        app.get_as("/page/reservada/", &member).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        app.get_as("/page/borrador/", &member).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_unknown_member_header_is_anonymous() {
    let app = setup_app().await;

    let response = app
        .send(
            Request::get("/members-area/")
                .header("x-lodge-member", "no-es-un-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_events_feed_shape() {
    let app = setup_app().await;
    let starts = Utc::now() + Duration::days(3);
    test_utils::event("tenida", starts).insert(&app.db).await.unwrap();
    let mut reserved = test_utils::event("reservado", starts);
    reserved.members_only = Set(true);
    reserved.insert(&app.db).await.unwrap();
    test_utils::event("pasado", Utc::now() - Duration::days(3))
        .insert(&app.db)
        .await
        .unwrap();

    let response = app.get("/api/events/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let feed: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 1);
    let entry = feed[0].as_object().unwrap();
    for key in ["id", "title", "start", "end", "url", "type", "className"] {
        assert!(entry.contains_key(key), "missing {key}");
    }
    assert_eq!(entry["url"], "/event/tenida/");
    assert_eq!(entry["type"], "Tenida Regular");
    assert_eq!(entry["className"], "event-regular_meeting");
}

#[tokio::test]
async fn test_phrase_of_day_shape() {
    let app = setup_app().await;

    let response = app.get("/api/phrase-of-day/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let phrase: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(phrase["content"], "La luz disipa las sombras");
    assert_eq!(phrase["author"], "Masonería");
}

#[tokio::test]
async fn test_protected_routes_require_member() {
    let app = setup_app().await;
    let course = test_utils::course("intro").insert(&app.db).await.unwrap();

    assert_eq!(app.get("/members-area/").await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.get("/my-profile/").await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        app.post_as(&format!("/education/course/{}/enroll/", course.id), None)
            .await
            .status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_enroll_redirects_with_notice() {
    let app = setup_app().await;
    let member = test_utils::insert_member_with_rank(&app.db, "Juan", 1).await;
    let course = test_utils::course("intro").insert(&app.db).await.unwrap();
    let enroll = format!("/education/course/{}/enroll/", course.id);

    let first = app.post_as(&enroll, Some(&member)).await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&first), "/education/course/intro/?notice=enrolled");

    let second = app.post_as(&enroll, Some(&member)).await;
    assert_eq!(location(&second), "/education/course/intro/?notice=already-enrolled");

    let page = app
        .get_as("/education/course/intro/?notice=already-enrolled", &member)
        .await;
    let body = body_string(page).await;
    assert!(body.contains("Ya estás inscrito en este curso"));
    assert!(body.contains("Cancelar inscripción"));

    let left = app
        .post_as(&format!("/education/course/{}/leave/", course.id), Some(&member))
        .await;
    assert_eq!(location(&left), "/education/course/intro/?notice=left");
}

#[tokio::test]
async fn test_attend_toggles() {
    let app = setup_app().await;
    let member = test_utils::insert_member_with_rank(&app.db, "Juan", 1).await;
    let event = test_utils::event("tenida", Utc::now() + Duration::days(1))
        .insert(&app.db)
        .await
        .unwrap();
    let attend = format!("/event/{}/attend/", event.id);

    let first = app.post_as(&attend, Some(&member)).await;
    let second = app.post_as(&attend, Some(&member)).await;

    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&first), "/event/tenida/?notice=confirmed");
    assert_eq!(location(&second), "/event/tenida/?notice=cancelled");
    assert_eq!(EventAttendance::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_toggle_with_malformed_id_is_404() {
    let app = setup_app().await;
    let member = test_utils::insert_member_with_rank(&app.db, "Juan", 1).await;

    let response = app.post_as("/event/tenida/attend/", Some(&member)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contact_form_validation_and_submit() {
    let app = setup_app().await;
    let form = |body: &str| {
        Request::post("/contact/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("x-forwarded-for", "203.0.113.9")
            .body(Body::from(body.to_owned()))
            .unwrap()
    };

    let invalid = app
        .send(form("name=Ana&email=ana%40example.org&subject=other&custom_subject=&message=Hola"))
        .await;
    assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(invalid)
        .await
        .contains("Especifica el asunto de tu mensaje"));

    let sent = app
        .send(form("name=Ana&email=ana%40example.org&subject=visit&message=Hola"))
        .await;
    assert_eq!(sent.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&sent), "/contact/?notice=sent");

    let stored = ContactMessage::find().one(&app.db).await.unwrap().unwrap();
    assert_eq!(stored.source_ip.as_deref(), Some("203.0.113.9"));
    assert_eq!(stored.subject, ContactSubject::Visit);
}

#[tokio::test]
async fn test_profile_update() {
    let app = setup_app().await;
    let member = test_utils::insert_member_with_rank(&app.db, "Juan", 1).await;

    let response = app
        .send(
            Request::post("/my-profile/")
                .header("x-lodge-member", member.id.to_string())
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("full_name=Juan+P%C3%A9rez&lodge_name=Hiram&email="))
                .unwrap(),
        )
        .await;

    assert_eq!(location(&response), "/my-profile/?notice=profile-saved");
    let member = Member::find_by_id(member.id).one(&app.db).await.unwrap().unwrap();
    assert_eq!(member.full_name, "Juan Pérez");
    assert_eq!(member.lodge_name.as_deref(), Some("Hiram"));
    assert!(!member.is_public);
}

#[tokio::test]
async fn test_sitemap_is_xml_with_public_content() {
    let app = setup_app().await;
    test_utils::page("acerca").insert(&app.db).await.unwrap();
    let mut reserved = test_utils::page("reservada");
    reserved.members_only = Set(true);
    reserved.insert(&app.db).await.unwrap();

    for uri in ["/sitemap.xml", "/sitemap.xml/"] {
        let response = app.get(uri).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("application/xml"));
        let body = body_string(response).await;
        assert!(body.contains("/page/acerca/</loc>"));
        assert!(!body.contains("reservada"));
    }
}

#[tokio::test]
async fn test_search_and_publications_listing() {
    let app = setup_app().await;
    let mut publication = test_utils::publication("luz", Utc::now());
    publication.title = Set("La luz del templo".to_owned());
    publication.insert(&app.db).await.unwrap();

    let search = body_string(app.get("/search/?q=luz").await).await;
    assert!(search.contains("<mark"));
    assert!(search.contains("/publication/luz/"));

    let short = body_string(app.get("/search/?q=lu").await).await;
    assert!(short.contains("Escribe al menos 3 caracteres"));

    let listing = app.get("/publications/?page=abc").await;
    assert_eq!(listing.status(), StatusCode::OK);
    assert!(body_string(listing).await.contains("La luz del templo"));
}

#[tokio::test]
async fn test_freemasonry_page_lists_principles_and_lodges() {
    let app = setup_app().await;
    test_utils::principle("libertad", Pillar::North, 1)
        .insert(&app.db)
        .await
        .unwrap();
    test_utils::principle("fraternidad", Pillar::South, 1)
        .insert(&app.db)
        .await
        .unwrap();
    test_utils::sister_lodge("Logia Zamná", LodgeRegion::Yucatan, 1)
        .insert(&app.db)
        .await
        .unwrap();

    let response = app.get("/freemasonry/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Columna del Norte"));
    assert!(body.contains("LIBERTAD"));
    assert!(body.contains("FRATERNIDAD"));
    assert!(body.contains("Logias de Yucatán"));
    assert!(body.contains("Logia Zamná"));
    assert!(!body.contains("Logias del Mundo"));
}

#[tokio::test]
async fn test_contact_page_shows_channels_hours_and_meeting() {
    let app = setup_app().await;
    test_utils::contact_channel("Correo", ChannelKind::Email, "secretaria@kukulkan41.org")
        .insert(&app.db)
        .await
        .unwrap();
    test_utils::office_hours(1).insert(&app.db).await.unwrap();
    test_utils::meeting(1).insert(&app.db).await.unwrap();

    let body = body_string(app.get("/contact/").await).await;

    assert!(body.contains(r#"href="mailto:secretaria@kukulkan41.org""#));
    assert!(body.contains("09:00 - 14:00"));
    assert!(body.contains("Templo Principal"));
    assert!(body.contains(r#"name="message""#));
}

#[tokio::test]
async fn test_history_page_shows_featured_gallery() {
    let app = setup_app().await;
    test_utils::historical_image("fundacion", None)
        .insert(&app.db)
        .await
        .unwrap();

    let response = app.get("/history/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(r#"src="/media/historia/galeria/fundacion.jpg""#));
}
