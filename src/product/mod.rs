//! Product Module
//!
//! Boundary types exchanged with the scraper collaborator: the product
//! record, platform detection, and link normalization.

mod link;
mod platform;
mod record;

// Re-export public types
pub use link::{clean_link, extract_links, NormalizedLink};
pub use platform::Platform;
pub use record::Product;
