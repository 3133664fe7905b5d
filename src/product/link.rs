//! Link Normalization Module
//!
//! Cleans product URLs (affiliate/tracking parameter stripping), detects the
//! platform, and derives the cache key a product is stored under.

use url::Url;

use crate::error::{GateError, Result};
use crate::product::Platform;

// == Tracking Parameters ==
/// Query parameters stripped during normalization (affiliate tags, UTM and
/// click identifiers). Compared against lowercased parameter names.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "msclkid",
    "ref",
    "tag",
    "linkcode",
    "creative",
    "creativeasin",
    "ascsubtag",
    "mc",
    "sr",
    "icid",
    "clickid",
    "offer_id",
    "aff_id",
    "affid",
    "_branch_match_id",
];

// == Normalized Link ==
/// A product link after cleaning: canonical URL, detected platform, and the
/// key it is cached under.
#[derive(Debug, Clone)]
pub struct NormalizedLink {
    /// Platform the link belongs to
    pub platform: Platform,
    /// Cleaned URL with tracking parameters and fragment removed
    pub cleaned: String,
    /// Cache key: `platform:product_id` when an id is recognizable in the
    /// URL, otherwise the cleaned URL itself
    pub cache_key: String,
}

impl NormalizedLink {
    /// Normalizes a raw link from a message.
    ///
    /// Fails with `InvalidRequest` on malformed URLs and `UnsupportedLink`
    /// when no platform claims the host.
    pub fn from_raw(raw: &str) -> Result<Self> {
        let url = clean_url(raw)?;
        let platform = Platform::from_url(&url)
            .ok_or_else(|| GateError::UnsupportedLink(raw.to_string()))?;

        let cleaned = url.to_string();
        let cache_key = match product_id(&url, platform) {
            Some(id) => format!("{}:{}", platform, id),
            None => cleaned.clone(),
        };

        Ok(Self {
            platform,
            cleaned,
            cache_key,
        })
    }
}

// == Clean Link ==
/// Strips affiliate/tracking parameters and the fragment from a URL,
/// returning the cleaned string form.
pub fn clean_link(raw: &str) -> Result<String> {
    Ok(clean_url(raw)?.to_string())
}

/// Parses a raw link, defaulting the scheme to https, and removes tracking
/// parameters and the fragment.
fn clean_url(raw: &str) -> Result<Url> {
    let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let mut url = Url::parse(&with_scheme)
        .map_err(|e| GateError::InvalidRequest(format!("Invalid URL '{}': {}", raw, e)))?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !TRACKING_PARAMS.contains(&k.to_ascii_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    url.set_fragment(None);

    Ok(url)
}

// == Product Id Extraction ==
/// Reads the platform-specific product identifier out of a URL path, when
/// one is present. Short links and search pages yield None and fall back to
/// the cleaned URL as the cache key.
fn product_id(url: &Url, platform: Platform) -> Option<String> {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    match platform {
        Platform::Amazon => amazon_id(&segments, url),
        Platform::Flipkart => flipkart_id(&segments, url),
        Platform::Myntra => myntra_id(&segments),
        Platform::Meesho => meesho_id(&segments),
        Platform::Ajio => ajio_id(&segments),
        Platform::Snapdeal => segment_after(&segments, "product"),
        // Wishlink URLs are creator redirects without stable product ids
        Platform::Wishlink => None,
    }
}

/// ASIN: ten ASCII uppercase letters or digits.
fn is_asin(s: &str) -> bool {
    s.len() == 10
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// `/dp/<ASIN>`, `/gp/product/<ASIN>`, `/product/<ASIN>` or an `asin` query
/// parameter.
fn amazon_id(segments: &[&str], url: &Url) -> Option<String> {
    for (i, seg) in segments.iter().enumerate() {
        if (*seg == "dp" || *seg == "product") && i + 1 < segments.len() {
            let candidate = segments[i + 1];
            if is_asin(candidate) {
                return Some(candidate.to_string());
            }
        }
    }

    url.query_pairs()
        .find(|(k, _)| k == "asin")
        .map(|(_, v)| v.into_owned())
        .filter(|v| is_asin(v))
}

/// `/p/<slug>` or a `pid` query parameter.
fn flipkart_id(segments: &[&str], url: &Url) -> Option<String> {
    if let Some(id) = segment_after(segments, "p") {
        return Some(id);
    }

    url.query_pairs()
        .find(|(k, _)| k == "pid")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// `/<id>/buy` or `/product/<id>`, id numeric.
fn myntra_id(segments: &[&str]) -> Option<String> {
    for (i, seg) in segments.iter().enumerate() {
        if *seg == "buy" && i > 0 && is_numeric(segments[i - 1]) {
            return Some(segments[i - 1].to_string());
        }
    }

    segment_after(segments, "product").filter(|id| is_numeric(id))
}

/// `/product/<slug>` or `/s/p/<id>`.
fn meesho_id(segments: &[&str]) -> Option<String> {
    if let Some(id) = segment_after(segments, "product") {
        return Some(id);
    }

    segments
        .windows(3)
        .find(|w| w[0] == "s" && w[1] == "p")
        .map(|w| w[2].to_string())
}

/// `/p/<id>` or `/product/<id>`, id numeric.
fn ajio_id(segments: &[&str]) -> Option<String> {
    segment_after(segments, "p")
        .or_else(|| segment_after(segments, "product"))
        .filter(|id| is_numeric(id))
}

/// The segment immediately following `marker`, if non-empty.
fn segment_after(segments: &[&str], marker: &str) -> Option<String> {
    segments
        .iter()
        .position(|seg| *seg == marker)
        .and_then(|i| segments.get(i + 1))
        .filter(|seg| !seg.is_empty())
        .map(|seg| seg.to_string())
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

// == Link Extraction ==
/// Pulls http/https/www URLs out of free-form message text, deduplicated in
/// first-seen order. Bare `www.` links get an https scheme.
pub fn extract_links(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut links = Vec::new();

    for token in text.split_whitespace() {
        let token = token.trim_matches(|c: char| matches!(c, ',' | ';' | ')' | '(' | '.' | '"'));

        let link = if token.starts_with("http://") || token.starts_with("https://") {
            token.to_string()
        } else if token.starts_with("www.") {
            format!("https://{}", token)
        } else {
            continue;
        };

        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}
