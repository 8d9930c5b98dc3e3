pub mod error;
pub mod home;
pub mod listings;
pub mod search_results;

pub use error::error_page;
pub use home::home_page;
pub use listings::listings_page;
pub use search_results::search_results_page;
