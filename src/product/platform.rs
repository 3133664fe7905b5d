//! Platform Module
//!
//! Supported storefronts and their URL-based detection.

use std::fmt;

use serde::Serialize;
use url::Url;

// == Platform ==
/// E-commerce platforms the bot understands, selected by URL host matching.
///
/// Adding a platform means adding a variant and its domain list here; nothing
/// in the cache or limiter changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Amazon,
    Flipkart,
    Meesho,
    Myntra,
    Ajio,
    Snapdeal,
    Wishlink,
}

impl Platform {
    /// Domains claimed by each platform, including their short-link hosts.
    fn domains(&self) -> &'static [&'static str] {
        match self {
            Platform::Amazon => &["amazon.in", "amazon.com", "amzn.to"],
            Platform::Flipkart => &["flipkart.com", "fkrt.it"],
            Platform::Meesho => &["meesho.com"],
            Platform::Myntra => &["myntra.com"],
            Platform::Ajio => &["ajio.com"],
            Platform::Snapdeal => &["snapdeal.com"],
            Platform::Wishlink => &["wishlink.com"],
        }
    }

    /// All known platforms, in detection order.
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Amazon,
            Platform::Flipkart,
            Platform::Meesho,
            Platform::Myntra,
            Platform::Ajio,
            Platform::Snapdeal,
            Platform::Wishlink,
        ]
    }

    // == Detection ==
    /// Detects the platform a URL belongs to by matching its host against
    /// each platform's domain list (exact host or subdomain).
    pub fn from_url(url: &Url) -> Option<Platform> {
        let host = url.host_str()?.to_ascii_lowercase();

        Platform::all().iter().copied().find(|platform| {
            platform
                .domains()
                .iter()
                .any(|d| host == *d || host.ends_with(&format!(".{}", d)))
        })
    }

    /// Lowercase platform name, used in cache keys and responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Amazon => "amazon",
            Platform::Flipkart => "flipkart",
            Platform::Meesho => "meesho",
            Platform::Myntra => "myntra",
            Platform::Ajio => "ajio",
            Platform::Snapdeal => "snapdeal",
            Platform::Wishlink => "wishlink",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_detect_amazon() {
        assert_eq!(
            Platform::from_url(&parse("https://www.amazon.in/dp/B0ABCDEFGH")),
            Some(Platform::Amazon)
        );
        assert_eq!(
            Platform::from_url(&parse("https://amzn.to/3xYz")),
            Some(Platform::Amazon)
        );
    }

    #[test]
    fn test_detect_flipkart() {
        assert_eq!(
            Platform::from_url(&parse("https://www.flipkart.com/p/itm123")),
            Some(Platform::Flipkart)
        );
    }

    #[test]
    fn test_detect_subdomain() {
        assert_eq!(
            Platform::from_url(&parse("https://m.meesho.com/product/slug/123")),
            Some(Platform::Meesho)
        );
    }

    #[test]
    fn test_unknown_host() {
        assert_eq!(
            Platform::from_url(&parse("https://example.com/item/1")),
            None
        );
    }

    #[test]
    fn test_lookalike_host_not_matched() {
        // "notamazon.in" must not match "amazon.in"
        assert_eq!(
            Platform::from_url(&parse("https://notamazon.in/dp/B0ABCDEFGH")),
            None
        );
    }

    #[test]
    fn test_display_lowercase() {
        assert_eq!(Platform::Amazon.to_string(), "amazon");
        assert_eq!(Platform::Snapdeal.to_string(), "snapdeal");
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&Platform::Flipkart).unwrap();
        assert_eq!(json, "\"flipkart\"");
    }
}
