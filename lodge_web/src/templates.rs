//! Page chrome shared by every view: document shell, header navigation,
//! footer, notices and pagination links.

use axum::http::StatusCode;
use lodge_core::{
    pagination::Paged,
    service::site::{NavItem, SiteSettings},
};
use maud::{html, Markup, DOCTYPE};

use crate::{extract::Chrome, filters, notice::Notice};

fn document(settings: &SiteSettings, title: &str, description: &str, body: Markup) -> Markup {
    let full_title = if title.is_empty() {
        settings.site_name.clone()
    } else {
        format!("{title} | {}", settings.site_name)
    };
    let full_title = filters::strip_masonic(&full_title);

    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                (filters::meta_tags(&full_title, description, None))
                meta name="keywords" content=(settings.meta_keywords);
                style {
                    ":root { --primary: " (settings.primary_color) "; --secondary: " (settings.secondary_color) "; }"
                }
            }
            body {
                (body)
            }
        }
    }
}

fn render_nav_item(item: &NavItem, current_path: &str) -> Markup {
    let is_current = item.href == current_path;

    html! {
        li class=[is_current.then_some("current")] {
            a href=(item.href) {
                @if let Some(icon) = &item.icon { span.icon { (icon) } " " }
                (item.title)
            }
            @if !item.children.is_empty() {
                ul.submenu {
                    @for child in &item.children {
                        (render_nav_item(child, current_path))
                    }
                }
            }
        }
    }
}

fn site_header(chrome: &Chrome) -> Markup {
    let settings = &chrome.settings;

    html! {
        header.site-header {
            a.logo href="/" {
                span.logo-symbol { (settings.logo_symbol) }
                span.logo-text { (settings.logo_text) }
            }
            nav.site-nav {
                ul {
                    @for item in &chrome.nav {
                        (render_nav_item(item, &chrome.path))
                    }
                }
            }
            form.search action="/search/" method="get" {
                input type="search" name="q" placeholder="Buscar..." aria-label="Buscar";
            }
            div.session {
                @if let Some(member) = chrome.member() {
                    a href="/members-area/" { (member.full_name) }
                } @else {
                    a.lms href=(settings.lms_login_url) { (settings.lms_button_text) }
                }
            }
        }
    }
}

fn site_footer(settings: &SiteSettings) -> Markup {
    let social = [
        ("Facebook", &settings.facebook_url),
        ("Twitter", &settings.twitter_url),
        ("Instagram", &settings.instagram_url),
        ("YouTube", &settings.youtube_url),
    ];

    html! {
        footer.site-footer {
            p.motto { (settings.motto) }
            ul.social {
                @for (name, url) in social {
                    @if let Some(url) = url {
                        li { a href=(url) rel="noopener" target="_blank" { (name) } }
                    }
                }
            }
            nav.footer-links {
                a href="/contact/" { "Contacto" }
                " · "
                a href="/sitemap.xml" { "Mapa del sitio" }
                " · "
                a href=(settings.lms_url) { "Campus virtual" }
            }
            p.copyright { (settings.copyright_text) }
        }
    }
}

/// Full page: header, breadcrumb, optional notice, `content` and footer.
pub fn layout(chrome: &Chrome, title: &str, notice: Option<Notice>, content: Markup) -> Markup {
    let settings = &chrome.settings;
    let body = html! {
        (site_header(chrome))
        main.container {
            @if chrome.path != "/" {
                (filters::breadcrumb(&chrome.path))
            }
            @if let Some(notice) = notice {
                (notice_banner(notice))
            }
            (content)
        }
        (site_footer(settings))
    };

    document(settings, title, &settings.meta_description, body)
}

pub fn notice_banner(notice: Notice) -> Markup {
    let class = if notice.is_warning() {
        "notice notice-warning"
    } else {
        "notice notice-success"
    };

    html! {
        div class=(class) role="status" { (notice.message()) }
    }
}

/// Previous/next links for a listing. `href` builds the link of a page number.
pub fn pagination<T>(paged: &Paged<T>, href: impl Fn(u64) -> String) -> Markup {
    html! {
        @if paged.num_pages > 1 {
            nav.pagination aria-label="Paginación" {
                @if paged.has_previous() {
                    a rel="prev" href=(href(paged.number - 1)) { "« Anterior" }
                }
                span.current { "Página " (paged.number) " de " (paged.num_pages) }
                @if paged.has_next() {
                    a rel="next" href=(href(paged.number + 1)) { "Siguiente »" }
                }
            }
        }
    }
}

/// Standalone page for error responses, rendered without database access.
pub fn error_page(status: StatusCode) -> Markup {
    let (title, message) = match status {
        StatusCode::NOT_FOUND => (
            "Página no encontrada",
            "La página que buscas no existe o no está disponible.",
        ),
        StatusCode::UNAUTHORIZED => (
            "Acceso restringido",
            "Esta sección está reservada a los miembros de la logia.",
        ),
        StatusCode::UNPROCESSABLE_ENTITY => (
            "Datos inválidos",
            "La solicitud contiene datos que no pudimos procesar.",
        ),
        _ => (
            "Error del servidor",
            "Ocurrió un error inesperado. Inténtalo de nuevo más tarde.",
        ),
    };

    let settings = SiteSettings::default();
    let body = html! {
        main.container.error {
            h1 { (status.as_u16()) " · " (title) }
            p { (message) }
            a href="/" { "Volver al inicio" }
        }
    };

    document(&settings, title, message, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::CurrentViewer;

    fn chrome(path: &str) -> Chrome {
        Chrome {
            settings: SiteSettings::default(),
            nav: vec![NavItem {
                title: "Historia".to_owned(),
                href: "/history/".to_owned(),
                icon: None,
                children: vec![NavItem {
                    title: "Fundación".to_owned(),
                    href: "/page/fundacion/".to_owned(),
                    icon: None,
                    children: Vec::new(),
                }],
            }],
            viewer: CurrentViewer::default(),
            path: path.to_owned(),
        }
    }

    #[test]
    fn test_layout_includes_doctype_and_nav() {
        let page = layout(&chrome("/history/"), "Historia", None, html! { p { "cuerpo" } })
            .into_string();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"<li class="current"><a href="/history/">"#));
        assert!(page.contains(r#"href="/page/fundacion/""#));
        assert!(page.contains("<p>cuerpo</p>"));
        assert!(page.contains(">Inicio<"));
    }

    #[test]
    fn test_document_title_drops_symbols() {
        let page = layout(&chrome("/"), "R∴L∴ Kukulkan", None, html! { h1 { "R∴L∴ Kukulkan" } })
            .into_string();

        assert!(page.contains("<title>RL Kukulkan | Logia Kukulkan #41</title>"));
        assert!(page.contains("<h1>R∴L∴ Kukulkan</h1>"));
    }

    #[test]
    fn test_layout_shows_notice() {
        let page = layout(&chrome("/"), "", Some(Notice::EventFull), html! {}).into_string();

        assert!(page.contains("notice-warning"));
        assert!(page.contains("El evento ha alcanzado su cupo máximo"));
    }

    #[test]
    fn test_pagination_links() {
        let paged = Paged {
            items: vec![1, 2],
            number: 2,
            num_pages: 3,
            total: 26,
        };

        let links = pagination(&paged, |n| format!("?page={n}")).into_string();

        assert!(links.contains(r#"href="?page=1""#));
        assert!(links.contains(r#"href="?page=3""#));
        assert!(links.contains("Página 2 de 3"));
    }

    #[test]
    fn test_error_page_for_status() {
        let page = error_page(StatusCode::NOT_FOUND).into_string();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("Página no encontrada"));
    }
}
