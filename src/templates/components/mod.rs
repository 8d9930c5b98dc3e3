use maud::{html, Markup};

pub mod search_form;

pub use search_form::{listing_search_form, web_search_form};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Optional scraped text, or a dash.
pub fn field(value: Option<&str>) -> Markup {
    html! {
        @match value.filter(|v| !v.is_empty()) {
            Some(v) => { (v) }
            None => { span class="muted" { "—" } }
        }
    }
}
