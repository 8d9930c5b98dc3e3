use crate::scrape::{Listing, ListingQuery};
use crate::templates::{components::field, desktop_layout};
use maud::{html, Markup};

pub fn listings_page(query: &ListingQuery, listings: &[Listing]) -> Markup {
    let title = format!("Listings in {}, {}", query.city, query.state);

    desktop_layout(
        &title,
        html! {
            h1 { (title) }
            p {
                "Found " strong { (listings.len()) } " listings."
            }

            @if listings.is_empty() {
                p class="muted" { "No listings were found for this city." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Price" }
                            th { "Beds" }
                            th { "Baths" }
                            th { "Sq Ft" }
                            th { "Address" }
                            th { "MLS Source" }
                        }
                    }
                    tbody {
                        @for listing in listings {
                            tr {
                                td { (field(listing.price.as_deref())) }
                                td { (field(listing.beds.as_deref())) }
                                td { (field(listing.baths.as_deref())) }
                                td { (field(listing.square_footage.as_deref())) }
                                td {
                                    @match listing.detail_url.as_deref() {
                                        Some(url) => {
                                            a href=(url) target="_blank" rel="noopener" {
                                                (field(listing.address.as_deref()))
                                            }
                                        }
                                        None => { (field(listing.address.as_deref())) }
                                    }
                                }
                                td { (field(listing.mls_source.as_deref())) }
                            }
                        }
                    }
                }
            }

            p { a href="/" { "← New search" } }
        },
    )
}
