//! Rendering of a single result record.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use super::tree::Node;
use crate::config::{DisplayMode, RenderConfig, StyleBundle};
use crate::types::TaggedRecord;

/// Title used when a record has neither `name` nor `title`.
pub const UNTITLED: &str = "Untitled";

/// Link target used when a record has no link field.
pub const NO_LINK: &str = "#";

/// Maximum characters of `matchedText` shown.
pub const MATCHED_TEXT_LIMIT: usize = 200;

const ELLIPSIS: &str = "...";
const CARD_SHADOW: &str = "0 2px 6px rgba(255, 0, 0, 0.4)";

/// Render one record as a grid card or a list block.
pub fn render_item(item: &TaggedRecord, config: &RenderConfig) -> Node {
    let style = &config.style;
    let title = item.record.title().unwrap_or_else(|| UNTITLED.to_owned());
    let link = item
        .record
        .link(item.tag)
        .unwrap_or_else(|| NO_LINK.to_owned());
    let body = render_body(item, config);

    match config.display_mode {
        DisplayMode::Grid => {
            let shadow = if style.box_shadow { CARD_SHADOW } else { "none" };
            let card = Node::element("div")
                .attr("class", "search-result-item")
                .attr(
                    "style",
                    format!(
                        "background: #fff; border: 1px solid #ddd; border-radius: {}; \
                         padding: 1rem; margin-bottom: 1rem; box-shadow: {shadow};",
                        style.border_radius
                    ),
                )
                .child(
                    Node::element("h4")
                        .attr(
                            "style",
                            format!("{} margin-bottom: 0.5rem;", title_style(style)),
                        )
                        .child(Node::text(title)),
                )
                .children(body);
            Node::element("a")
                .attr("href", link)
                .attr("target", "_blank")
                .attr("style", "text-decoration: none; color: inherit;")
                .child(card)
        }
        DisplayMode::List => Node::element("div")
            .attr("class", "search-result-item")
            .attr("style", "margin-bottom: 1rem; padding-left: 1rem;")
            .child(
                Node::element("a")
                    .attr("href", link)
                    .attr("target", "_blank")
                    .attr(
                        "style",
                        format!(
                            "{} font-weight: bold; text-decoration: underline;",
                            title_style(style)
                        ),
                    )
                    .child(Node::text(title)),
            )
            .children(body),
    }
}

fn title_style(style: &StyleBundle) -> String {
    format!(
        "font-size: {}; font-family: {}; color: {};",
        style.title_font_size, style.title_font_family, style.title_color
    )
}

fn field_paragraph(style: &StyleBundle) -> Node {
    Node::element("p").attr(
        "style",
        format!(
            "color: {}; font-size: {};",
            style.other_fields_color, style.other_fields_font_size
        ),
    )
}

/// The snippet if there is one, otherwise one paragraph per generic field.
fn render_body(item: &TaggedRecord, config: &RenderConfig) -> Vec<Node> {
    let style = &config.style;

    if let Some(matched) = item.record.matched_text() {
        let mut snippet: String = matched.chars().take(MATCHED_TEXT_LIMIT).collect();
        snippet.push_str(ELLIPSIS);
        return vec![field_paragraph(style).child(Node::text(snippet))];
    }

    item.record
        .generic_fields()
        .map(|(key, value)| {
            let content = match image_url(value) {
                Some(src) => {
                    let width = match config.display_mode {
                        DisplayMode::Grid => "max-width: 100%;",
                        DisplayMode::List => "max-width: 50%;",
                    };
                    Node::element("img")
                        .attr("src", src)
                        .attr("alt", key)
                        .attr("class", "item-image")
                        .attr("style", format!("{width} border-radius: 4px;"))
                }
                None => Node::text(format_value(value, &config.date_format)),
            };
            field_paragraph(style).child(content)
        })
        .collect()
}

/// Find an image URL in an object (`url`, `src`, `href`) or in the first
/// element of an array (`url`).
pub fn image_url(value: &Value) -> Option<&str> {
    fn non_empty(v: Option<&Value>) -> Option<&str> {
        v.and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    match value {
        Value::Array(items) => non_empty(items.first().and_then(|first| first.get("url"))),
        Value::Object(map) => non_empty(map.get("url"))
            .or_else(|| non_empty(map.get("src")))
            .or_else(|| non_empty(map.get("href"))),
        _ => None,
    }
}

/// Plain-text rendering of a generic field value.
pub fn format_value(value: &Value, date_format: &str) -> String {
    match value {
        Value::String(s) if looks_like_iso_date(s) => {
            format_date(s, date_format).unwrap_or_else(|| s.clone())
        }
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// `YYYY-MM-DDT` prefix.
fn looks_like_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 11
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit)
        && bytes[10] == b'T'
}

/// Reformat an ISO-8601 timestamp in UTC. Timestamps without an offset are
/// taken as UTC. Returns `None` if the value or the format is invalid.
fn format_date(s: &str, date_format: &str) -> Option<String> {
    let utc: DateTime<Utc> = match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => match DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%#z") {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(_) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
                .ok()?
                .and_utc(),
        },
    };

    let mut out = String::new();
    write!(out, "{}", utc.format(date_format)).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DATE_FORMAT;
    use crate::types::{ResultRecord, SourceTag};
    use serde_json::json;

    fn tagged(tag: SourceTag, value: Value) -> TaggedRecord {
        TaggedRecord::new(tag, ResultRecord::from_value(value).expect("object"))
    }

    fn list_config() -> RenderConfig {
        RenderConfig::default()
    }

    fn grid_config() -> RenderConfig {
        RenderConfig {
            display_mode: DisplayMode::Grid,
            grid_columns: 3,
            ..Default::default()
        }
    }

    #[test]
    fn untitled_when_name_and_title_missing() {
        let node = render_item(&tagged(SourceTag::Page, json!({"x": 1})), &list_config());
        assert!(node.to_html().contains(">Untitled</a>"));
    }

    #[test]
    fn page_link_uses_published_path_then_slug() {
        let node = render_item(
            &tagged(SourceTag::Page, json!({"name": "A", "slug": "/s"})),
            &list_config(),
        );
        assert!(node.to_html().contains(r#"href="/s""#));
    }

    #[test]
    fn cms_link_defaults_to_hash() {
        let node = render_item(
            &tagged(SourceTag::Cms, json!({"name": "A", "publishedPath": "/p"})),
            &list_config(),
        );
        assert!(node.to_html().contains(r##"href="#""##));
    }

    #[test]
    fn matched_text_suppresses_other_fields_and_truncates() {
        let long = "x".repeat(250);
        let node = render_item(
            &tagged(SourceTag::Page, json!({"name": "A", "author": "Bob", "matchedText": long})),
            &list_config(),
        );
        let html = node.to_html();
        assert!(!html.contains("Bob"));
        assert!(html.contains(&format!("{}...</p>", "x".repeat(200))));
        assert!(!html.contains(&"x".repeat(201)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(205);
        let node = render_item(
            &tagged(SourceTag::Page, json!({"matchedText": long})),
            &list_config(),
        );
        assert!(node.to_html().contains(&format!("{}...", "é".repeat(200))));
    }

    #[test]
    fn generic_fields_render_in_order() {
        let node = render_item(
            &tagged(SourceTag::Cms, json!({"name": "A", "b": "second", "a": "third", "detailUrl": "/d"})),
            &list_config(),
        );
        let html = node.to_html();
        let second = html.find("second").expect("b rendered");
        let third = html.find("third").expect("a rendered");
        assert!(second < third);
        assert!(!html.contains(">/d<"));
    }

    #[test]
    fn object_with_url_renders_image() {
        let node = render_item(
            &tagged(SourceTag::Cms, json!({"name": "A", "photo": {"url": "https://x/y.png"}})),
            &grid_config(),
        );
        let html = node.to_html();
        assert!(html.contains(r#"<img src="https://x/y.png" alt="photo" class="item-image" style="max-width: 100%; border-radius: 4px;">"#));
        assert!(!html.contains("{&quot;url&quot;"));
    }

    #[test]
    fn image_url_probes_known_keys() {
        assert_eq!(image_url(&json!({"src": "/a.png"})), Some("/a.png"));
        assert_eq!(image_url(&json!({"href": "/b.png"})), Some("/b.png"));
        assert_eq!(image_url(&json!([{"url": "/c.png"}, {"url": "/d.png"}])), Some("/c.png"));
        assert_eq!(image_url(&json!({"alt": "none"})), None);
        assert_eq!(image_url(&json!([])), None);
        assert_eq!(image_url(&json!("/e.png")), None);
    }

    #[test]
    fn objects_without_image_fall_back_to_json() {
        let value = json!({"city": "Oslo", "zip": 150});
        assert_eq!(format_value(&value, DEFAULT_DATE_FORMAT), r#"{"city":"Oslo","zip":150}"#);
    }

    #[test]
    fn iso_dates_are_reformatted() {
        let value = json!("2024-03-05T14:07:09.000Z");
        assert_eq!(format_value(&value, DEFAULT_DATE_FORMAT), "3/5/2024, 2:07:09 PM");
        let value = json!("2024-03-05T14:07:09+02:00");
        assert_eq!(format_value(&value, "%Y-%m-%d %H:%M"), "2024-03-05 12:07");
    }

    #[test]
    fn date_without_offset_is_utc() {
        let value = json!("2024-12-31T23:59:00");
        assert_eq!(format_value(&value, "%Y-%m-%d %H:%M"), "2024-12-31 23:59");
    }

    #[test]
    fn minute_precision_dates_with_zone_are_reformatted() {
        let value = json!("2024-03-05T14:07Z");
        assert_eq!(format_value(&value, DEFAULT_DATE_FORMAT), "3/5/2024, 2:07:00 PM");
        let value = json!("2024-03-05T14:07+01:00");
        assert_eq!(format_value(&value, "%Y-%m-%d %H:%M"), "2024-03-05 13:07");
    }

    #[test]
    fn unparsable_dates_and_formats_keep_raw_text() {
        assert_eq!(format_value(&json!("2024-13-45Tnope"), DEFAULT_DATE_FORMAT), "2024-13-45Tnope");
        assert_eq!(
            format_value(&json!("2024-03-05T14:07:09Z"), "%Q invalid"),
            "2024-03-05T14:07:09Z"
        );
    }

    #[test]
    fn scalars_render_as_text() {
        assert_eq!(format_value(&json!(3.5), DEFAULT_DATE_FORMAT), "3.5");
        assert_eq!(format_value(&json!(true), DEFAULT_DATE_FORMAT), "true");
        assert_eq!(format_value(&json!(null), DEFAULT_DATE_FORMAT), "");
        assert_eq!(format_value(&json!("plain"), DEFAULT_DATE_FORMAT), "plain");
    }

    #[test]
    fn grid_card_uses_style_bundle() {
        let mut config = grid_config();
        config.style.border_radius = "12px".into();
        config.style.box_shadow = false;
        let html = render_item(&tagged(SourceTag::Page, json!({"name": "A"})), &config).to_html();
        assert!(html.starts_with(r##"<a href="#" target="_blank""##));
        assert!(html.contains("border-radius: 12px;"));
        assert!(html.contains("box-shadow: none;"));
        assert!(html.contains("<h4 style=\"font-size: 16px; font-family: Arial; color: #000;"));
    }

    #[test]
    fn list_item_links_only_the_title() {
        let html = render_item(&tagged(SourceTag::Page, json!({"name": "A", "publishedPath": "/a"})), &list_config())
            .to_html();
        assert!(html.starts_with(r#"<div class="search-result-item""#));
        assert!(html.contains(r#"<a href="/a" target="_blank""#));
    }
}
