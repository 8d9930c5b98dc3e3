use maud::{html, Markup};

pub fn listing_search_form() -> Markup {
    html! {
        form method="post" action="/search-trulia" class="search-form" {
            label for="city" { "City" }
            input type="text" id="city" name="city" placeholder="San_Francisco" required;

            label for="state" { "State" }
            input type="text" id="state" name="state" placeholder="CA" required;

            button type="submit" { "Search listings" }

            p class="muted" {
                "Listings are scraped live and enriched with their MLS source. This can take a minute."
            }
        }
    }
}

pub fn web_search_form() -> Markup {
    html! {
        form method="post" action="/search-google" class="search-form" {
            label for="question" { "Question" }
            input type="text" id="question" name="question" placeholder="best neighborhoods in Austin" required;

            button type="submit" { "Search the web" }
        }
    }
}
