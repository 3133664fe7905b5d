//! Request DTOs for the deal gate API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::MAX_KEY_LENGTH;
use crate::product::Product;

/// Request body for the lookup operation (POST /lookup)
///
/// # Fields
/// - `user_id`: the requesting chat user, for rate limiting
/// - `url`: the raw product link as it appeared in the message
#[derive(Debug, Clone, Deserialize)]
pub struct LookupRequest {
    /// Requesting user id
    pub user_id: i64,
    /// Raw product link
    pub url: String,
}

impl LookupRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.trim().is_empty() {
            return Some("URL cannot be empty".to_string());
        }
        if self.url.len() > 2048 {
            return Some("URL exceeds maximum length of 2048 characters".to_string());
        }
        None
    }
}

/// Request body for the store operation (PUT /store)
///
/// # Fields
/// - `key`: the cache key returned by a prior lookup miss
/// - `product`: the scraped product record
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    /// Cache key to store under
    pub key: String,
    /// Scraped product record
    pub product: Product,
}

impl StoreRequest {
    /// Validates the request data.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LENGTH
            ));
        }
        if self.product.title.trim().is_empty() {
            return Some("Product title cannot be empty".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_request_deserialize() {
        let json = r#"{"user_id": 42, "url": "https://www.amazon.in/dp/B0ABCDEFGH"}"#;
        let req: LookupRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.user_id, 42);
        assert!(req.url.contains("amazon.in"));
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_lookup_request_empty_url() {
        let req = LookupRequest {
            user_id: 1,
            url: "  ".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_store_request_deserialize() {
        let json = r#"{"key": "amazon:B0ABCDEFGH", "product": {"title": "Kettle", "price": 899}}"#;
        let req: StoreRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "amazon:B0ABCDEFGH");
        assert_eq!(req.product.price, Some(899));
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_store_request_empty_key() {
        let req = StoreRequest {
            key: String::new(),
            product: Product::new("Kettle"),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_store_request_blank_title() {
        let req = StoreRequest {
            key: "amazon:B0ABCDEFGH".to_string(),
            product: Product::new(" "),
        };
        assert!(req.validate().is_some());
    }
}
