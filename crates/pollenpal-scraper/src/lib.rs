pub mod client;
pub mod error;
pub mod extract;
pub mod retry;

pub use client::{ClientSettings, PollenClient};
pub use error::ScraperError;
pub use extract::{extract, extract_from, HtmlNode, MarkupNode, Query};
