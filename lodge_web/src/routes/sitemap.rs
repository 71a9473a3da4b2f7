use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use lodge_core::service::site::SitemapEntry;
use maud::html;

use crate::{error::AppError, AppState};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub fn sitemap_xml(base_url: &str, entries: &[SitemapEntry]) -> String {
    let base_url = base_url.trim_end_matches('/');
    let urlset = html! {
        urlset xmlns=(SITEMAP_NS) {
            @for entry in entries {
                url {
                    loc { (base_url) (entry.path) }
                    @if let Some(last_modified) = entry.last_modified {
                        lastmod { (last_modified) }
                    }
                }
            }
        }
    };

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}",
        urlset.into_string()
    )
}

pub async fn sitemap(State(state): State<AppState>) -> Result<Response, AppError> {
    let entries = state.core.site.sitemap_entries().await?;
    let xml = sitemap_xml(&state.core.config.site_url, &entries);

    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_sitemap_xml() {
        let entries = vec![
            SitemapEntry {
                path: "/".to_owned(),
                last_modified: None,
            },
            SitemapEntry {
                path: "/page/a&b/".to_owned(),
                last_modified: NaiveDate::from_ymd_opt(2024, 3, 21),
            },
        ];

        let xml = sitemap_xml("https://kukulkan41.org/", &entries);

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://kukulkan41.org/</loc>"));
        assert!(xml.contains("<loc>https://kukulkan41.org/page/a&amp;b/</loc>"));
        assert!(xml.contains("<lastmod>2024-03-21</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(!xml.contains("<lastmod></lastmod>"));
    }
}
