//! Formatting helpers used by the templates.
//!
//! Helpers that cannot make sense of their input hand it back unchanged.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use maud::{html, Markup, PreEscaped};
use pulldown_cmark::{html as md_html, Event, Options, Parser};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MARK_OPEN: &str =
    r#"<mark class="bg-gold/30 text-gray-900 dark:text-white px-1 rounded font-medium">"#;

fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Escapes `text` and wraps every case-insensitive occurrence of `query`
/// in a `<mark>`.
pub fn highlight(text: &str, query: &str) -> Markup {
    let needle: Vec<char> = query.chars().collect();
    if needle.is_empty() || text.is_empty() {
        return html! { (text) };
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i + needle.len() <= chars.len() {
        let hit = needle
            .iter()
            .enumerate()
            .all(|(k, q)| same_letter(chars[i + k].1, *q));
        if !hit {
            i += 1;
            continue;
        }

        let start = chars[i].0;
        let end = chars
            .get(i + needle.len())
            .map_or(text.len(), |(offset, _)| *offset);
        out.push_str(&escape(&text[copied..start]));
        out.push_str(MARK_OPEN);
        out.push_str(&escape(&text[start..end]));
        out.push_str("</mark>");
        copied = end;
        i += needle.len();
    }
    out.push_str(&escape(&text[copied..]));

    PreEscaped(out)
}

/// Cuts `text` to `length` characters at a word boundary and appends `...`.
pub fn truncate_chars(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_owned();
    }
    let cut: String = text.chars().take(length).collect();
    let kept = match cut.rsplit_once(' ') {
        Some((head, _)) => head,
        None => cut.as_str(),
    };
    format!("{kept}...")
}

/// `martes 21 de marzo de 2023`
pub fn format_date_spanish(date: NaiveDate) -> String {
    format!(
        "{} {} de {} de {}",
        WEEKDAYS[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

pub fn month_name(month: u32) -> &'static str {
    MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or_default()
}

/// Hides most of an address: `juan.perez@logia.mx` becomes `ju***z@l***.mx`.
pub fn mask_email(email: &str) -> String {
    let Some((user, domain)) = email.split_once('@') else {
        return email.to_owned();
    };
    let (Some(user_first), Some(domain_first)) = (user.chars().next(), domain.chars().next())
    else {
        return email.to_owned();
    };

    let user_chars: Vec<char> = user.chars().collect();
    let masked_user = if user_chars.len() > 3 {
        let head: String = user_chars[..2].iter().collect();
        format!("{head}***{}", user_chars[user_chars.len() - 1])
    } else {
        format!("{user_first}***")
    };

    let tld = domain.rsplit('.').next().unwrap_or(domain);
    format!("{masked_user}@{domain_first}***.{tld}")
}

/// Trail of links from `Inicio` down to the current path.
pub fn breadcrumb(path: &str) -> Markup {
    let mut href = String::new();
    let crumbs: Vec<(String, String)> = path
        .split('/')
        .filter(|part| !part.is_empty())
        .map(|part| {
            href.push('/');
            href.push_str(part);
            (title_case(&part.replace('-', " ")), format!("{href}/"))
        })
        .collect();

    html! {
        nav.flex.text-sm aria-label="Breadcrumb" {
            ol.flex.items-center.gap-2 {
                li { a.text-gray-500 href="/" { "Inicio" } }
                @for (index, (name, link)) in crumbs.iter().enumerate() {
                    li.flex.items-center {
                        span.mx-2.text-gray-400 { "/" }
                        @if index + 1 == crumbs.len() {
                            span { (name) }
                        } @else {
                            a.text-gray-500 href=(link) { (name) }
                        }
                    }
                }
            }
        }
    }
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Date in the masonic era, which counts 4000 years more.
pub fn masonic_date(date: NaiveDate) -> String {
    format!(
        "{}º día del {} de {} E∴M∴",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year() + 4000
    )
}

pub fn ordinal_spanish(number: i64) -> String {
    let word = match number {
        1 => "primer",
        2 => "segundo",
        3 => "tercer",
        4 => "cuarto",
        5 => "quinto",
        6 => "sexto",
        7 => "séptimo",
        8 => "octavo",
        9 => "noveno",
        10 => "décimo",
        other => return format!("{other}°"),
    };
    word.to_owned()
}

fn plural(count: i64, one: &str, many: &str) -> String {
    format!("hace {count} {}", if count == 1 { one } else { many })
}

pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - then;

    if diff.num_minutes() < 1 {
        "hace unos segundos".to_owned()
    } else if diff.num_hours() < 1 {
        plural(diff.num_minutes(), "minuto", "minutos")
    } else if diff.num_days() < 1 {
        plural(diff.num_hours(), "hora", "horas")
    } else if diff.num_days() < 30 {
        plural(diff.num_days(), "día", "días")
    } else if diff.num_days() < 365 {
        plural(diff.num_days() / 30, "mes", "meses")
    } else {
        plural(diff.num_days() / 365, "año", "años")
    }
}

pub fn meta_tags(title: &str, description: &str, image: Option<&str>) -> Markup {
    html! {
        meta name="title" content=(title);
        meta name="description" content=(description);
        meta property="og:title" content=(title);
        meta property="og:description" content=(description);
        meta property="og:type" content="website";
        @if let Some(image) = image {
            meta property="og:image" content=(image);
            meta name="twitter:card" content="summary_large_image";
        } @else {
            meta name="twitter:card" content="summary";
        }
    }
}

/// Drops the decorative symbols used in titles.
pub fn strip_masonic(text: &str) -> String {
    ["∴", "⌖", "◈", "⚜️", "⚜", "•", "·"]
        .iter()
        .fold(text.to_owned(), |acc, symbol| acc.replace(symbol, ""))
        .trim()
        .to_owned()
}

/// Renders markdown. Raw HTML in the source is shown as text.
pub fn md_to_html(text: &str) -> Markup {
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut body = String::new();
    md_html::push_html(&mut body, parser);
    PreEscaped(body)
}

/// `(999) 123-4567` for ten digits, `123-4567` for seven.
pub fn phone_format(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        7 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => phone.to_owned(),
    }
}

/// Embed url for a YouTube link, other urls unchanged.
pub fn youtube_embed(url: &str) -> String {
    let id = [
        ("youtube.com/watch?v=", '&'),
        ("youtu.be/", '?'),
        ("youtube.com/embed/", '?'),
    ]
    .iter()
    .find_map(|(marker, stop)| {
        let (_, rest) = url.split_once(marker)?;
        let id = rest.split(*stop).next().unwrap_or_default();
        (!id.is_empty()).then_some(id)
    });

    match id {
        Some(id) => format!("https://www.youtube.com/embed/{id}"),
        None => url.to_owned(),
    }
}
