mod health;
mod url;
mod web;

pub use health::health_handler;
pub use url::{create_url_handler, get_url_handler, list_urls_handler};
pub use web::{index_handler, list_page_handler, redirect_handler, shorten_form_handler};
