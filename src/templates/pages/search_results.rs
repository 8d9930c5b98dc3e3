use crate::scrape::{SearchHit, WebQuery};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn search_results_page(query: &WebQuery, hits: &[SearchHit]) -> Markup {
    desktop_layout(
        "Search results",
        html! {
            h1 { "Results for “" (query.question) "”" }

            @if hits.is_empty() {
                p class="muted" { "No organic results found." }
            } @else {
                ol {
                    @for hit in hits {
                        li {
                            @match hit.url.as_deref() {
                                Some(url) => {
                                    a href=(url) target="_blank" rel="noopener" { (hit.title) }
                                }
                                None => { (hit.title) }
                            }
                        }
                    }
                }
            }

            p { a href="/" { "← New search" } }
        },
    )
}
