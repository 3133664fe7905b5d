//! Product Record Module
//!
//! The record a scraper collaborator produces and the cache stores.

use serde::{Deserialize, Serialize};

// == Product ==
/// Scraped product data: the title/price/image triple a deal post is built
/// from. The scraper producing it lives outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product title as extracted from the storefront
    pub title: String,
    /// Price in whole rupees, if one could be extracted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    /// Primary product image URL, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Creates a product with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: None,
            image_url: None,
        }
    }

    /// Sets the price in whole rupees.
    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the primary image URL.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let product = Product::new("Nike Running Shoes")
            .with_price(2499)
            .with_image_url("https://img.example.com/shoe.jpg");

        assert_eq!(product.title, "Nike Running Shoes");
        assert_eq!(product.price, Some(2499));
        assert_eq!(
            product.image_url.as_deref(),
            Some("https://img.example.com/shoe.jpg")
        );
    }

    #[test]
    fn test_product_serialize_skips_missing_fields() {
        let product = Product::new("Plain");
        let json = serde_json::to_string(&product).unwrap();

        assert!(json.contains("Plain"));
        assert!(!json.contains("price"));
        assert!(!json.contains("image_url"));
    }

    #[test]
    fn test_product_deserialize_defaults() {
        let product: Product = serde_json::from_str(r#"{"title":"Kettle"}"#).unwrap();

        assert_eq!(product.title, "Kettle");
        assert!(product.price.is_none());
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_product_roundtrip() {
        let product = Product::new("Mixer").with_price(1799);
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();

        assert_eq!(back, product);
    }
}
