// templates/pages/home.rs

use crate::templates::{
    card,
    components::{listing_search_form, web_search_form},
    desktop_layout,
};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Listing Scout",
        html! {
            h1 { "Find homes for sale" }

            (card("Search listings by city", listing_search_form()))

            (card("Search the web", web_search_form()))
        },
    )
}
