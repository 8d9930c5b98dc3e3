// query.rs
use crate::scrape::selectors::SelectorMap;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use url::Url;

/// Field name to extracted value; `None` when the selector found nothing.
pub type FieldValues = BTreeMap<String, Option<String>>;

/// Applies `fields` to the whole document.
pub fn extract_fields(html: &str, fields: &SelectorMap) -> FieldValues {
    let document = Html::parse_document(html);
    fields.apply(document.root_element())
}

/// Applies `fields` inside every node matching `container`, in document order.
pub fn extract_records(html: &str, container: &Selector, fields: &SelectorMap) -> Vec<FieldValues> {
    let document = Html::parse_document(html);
    document
        .select(container)
        .map(|scope| fields.apply(scope))
        .collect()
}

/// Concatenated, trimmed text of all nodes matching `selector`. Empty when
/// nothing matches.
pub fn extract_text(html: &str, selector: &Selector) -> String {
    let document = Html::parse_document(html);
    document
        .select(selector)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Absolute form of a scraped `href`, resolved against `base` when relative.
/// Only `http` and `https` links survive; anything else is `None`.
pub fn http_link(href: &str, base: Option<&Url>) -> Option<String> {
    let href = href.trim();
    let url = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}
