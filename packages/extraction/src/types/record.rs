//! The structured result of one extraction attempt.

use serde::{Deserialize, Serialize};

/// Metadata extracted from a single page.
///
/// Every field is optional: absence of data is a valid outcome, not an
/// error. Wire representation is camelCase to match the client contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Primary image for the page (usually `og:image`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// All candidate images, primary first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,

    /// Numeric string, commas stripped (e.g. "1499.00").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// ISO 4217 code (e.g. "INR", "USD").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,

    /// Free-form availability tag ("in stock", "out of stock").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub offers: Vec<String>,

    /// Content-type tag ("product", "article", "webpage").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl PageRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the site name.
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = Some(site_name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the content-type tag.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the price and currency together.
    pub fn with_price(mut self, price: impl Into<String>, currency: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self.currency = Some(currency.into());
        self
    }

    /// Number of populated fields.
    ///
    /// Drives the completeness bonus in confidence scoring and the
    /// `fieldsExtracted` response metadata.
    pub fn field_count(&self) -> usize {
        let options = [
            self.title.is_some(),
            self.image_url.is_some(),
            self.price.is_some(),
            self.currency.is_some(),
            self.original_price.is_some(),
            self.discount.is_some(),
            self.site_name.is_some(),
            self.description.is_some(),
            self.category.is_some(),
            self.brand.is_some(),
            self.rating.is_some(),
            self.review_count.is_some(),
            self.availability.is_some(),
            self.content_type.is_some(),
        ];
        let lists = [
            !self.image_urls.is_empty(),
            !self.features.is_empty(),
            !self.offers.is_empty(),
        ];
        options.iter().filter(|b| **b).count() + lists.iter().filter(|b| **b).count()
    }

    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count() {
        assert_eq!(PageRecord::new().field_count(), 0);

        let record = PageRecord::new()
            .with_title("Widget")
            .with_site_name("shop.io")
            .with_price("19.99", "USD");
        assert_eq!(record.field_count(), 4);
    }

    #[test]
    fn test_serde_camel_case() {
        let record = PageRecord::new()
            .with_title("Widget")
            .with_site_name("shop.io")
            .with_content_type("product");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["title"], "Widget");
        assert_eq!(json["siteName"], "shop.io");
        assert_eq!(json["contentType"], "product");
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn test_deserialize_ignores_missing_fields() {
        let record: PageRecord = serde_json::from_str(r#"{"title": "Widget"}"#).unwrap();
        assert_eq!(record.title.as_deref(), Some("Widget"));
        assert!(record.price.is_none());
        assert!(record.image_urls.is_empty());
    }
}
