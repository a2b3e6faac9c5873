//! Structural extraction strategy.
//!
//! Fetches the page body over plain HTTP and parses static markup: Open
//! Graph and standard meta tags, the title tag, and currency-symbol price
//! patterns. Cheapest and fastest path; weak on JavaScript-rendered pages.

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::strategies::STRUCTURAL_PRIORITY;
use crate::traits::Strategy;
use crate::types::{ExtractionInput, PageRecord, PipelineConfig, StrategyKind};

/// Priority-1 extractor over static markup.
pub struct StructuralStrategy {
    client: reqwest::Client,
    user_agent: String,
    /// Currency code and symbol pattern, matched in order; first hit wins.
    price_patterns: Vec<(&'static str, Regex)>,
}

impl StructuralStrategy {
    /// Build with the configured fetch timeout and redirect cap.
    pub fn new(config: &PipelineConfig) -> ExtractResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| ExtractError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            user_agent: "WishlanePreviewBot/1.0".to_string(),
            price_patterns: price_patterns(),
        })
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    async fn fetch(&self, url: &str) -> ExtractResult<String> {
        debug!(url = %url, "structural fetch starting");
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "structural fetch failed");
                ExtractError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Network(format!("HTTP {status} from {url}")));
        }

        response
            .text()
            .await
            .map_err(|e| ExtractError::Network(e.to_string()))
    }

    /// Parse markup into a record. Pure over the document text.
    fn parse_document(&self, html: &str, host: Option<&str>) -> PageRecord {
        let doc = Html::parse_document(html);
        let mut record = PageRecord::new();

        record.title = meta_property(&doc, "og:title")
            .or_else(|| meta_name(&doc, "twitter:title"))
            .or_else(|| title_tag(&doc));

        record.description = meta_property(&doc, "og:description")
            .or_else(|| meta_name(&doc, "description"))
            .or_else(|| meta_name(&doc, "twitter:description"));

        record.image_urls = meta_properties(&doc, "og:image");
        if record.image_urls.is_empty() {
            if let Some(img) = meta_name(&doc, "twitter:image") {
                record.image_urls.push(img);
            }
        }
        record.image_url = record.image_urls.first().cloned();

        record.site_name =
            meta_property(&doc, "og:site_name").or_else(|| host.map(str::to_string));
        record.content_type = meta_property(&doc, "og:type").or(Some("webpage".to_string()));
        record.brand = meta_property(&doc, "product:brand");
        record.availability = meta_property(&doc, "product:availability");

        // Structured price tags first, symbol patterns second.
        let tagged_price = meta_property(&doc, "product:price:amount")
            .or_else(|| meta_property(&doc, "og:price:amount"));
        if let Some(amount) = tagged_price {
            record.currency = meta_property(&doc, "product:price:currency")
                .or_else(|| meta_property(&doc, "og:price:currency"));
            record.price = Some(amount.replace(',', ""));
        } else {
            let haystack = format!(
                "{} {}",
                record.title.as_deref().unwrap_or(""),
                record.description.as_deref().unwrap_or("")
            );
            if let Some((currency, amount)) = self.match_price(&haystack) {
                record.price = Some(amount);
                record.currency = Some(currency.to_string());
            }
        }

        record
    }

    /// First currency-symbol match in the combined title+description text.
    fn match_price(&self, text: &str) -> Option<(&'static str, String)> {
        for (currency, pattern) in &self.price_patterns {
            if let Some(caps) = pattern.captures(text) {
                if let Some(amount) = caps.get(1) {
                    return Some((currency, amount.as_str().replace(',', "")));
                }
            }
        }
        None
    }
}

#[async_trait]
impl Strategy for StructuralStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Structural
    }

    fn priority(&self) -> u8 {
        STRUCTURAL_PRIORITY
    }

    fn can_extract(&self, _input: &ExtractionInput) -> bool {
        true
    }

    async fn extract(&self, input: &ExtractionInput) -> ExtractResult<PageRecord> {
        let html = match &input.raw_html {
            Some(html) => {
                debug!(url = %input.url, bytes = html.len(), "parsing caller-supplied markup");
                html.clone()
            }
            None => self.fetch(input.url.as_str()).await?,
        };

        let record = self.parse_document(&html, input.url.host().as_deref());
        debug!(
            url = %input.url,
            fields = record.field_count(),
            "structural extraction parsed"
        );
        Ok(record)
    }
}

/// Symbol patterns for the supported currencies.
///
/// Amounts keep thousands separators in the capture; callers strip commas.
fn price_patterns() -> Vec<(&'static str, Regex)> {
    vec![
        (
            "INR",
            Regex::new(r"(?:₹|Rs\.?\s?)\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)").unwrap(),
        ),
        (
            "USD",
            Regex::new(r"\$\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)").unwrap(),
        ),
        (
            "EUR",
            Regex::new(r"€\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)").unwrap(),
        ),
        (
            "GBP",
            Regex::new(r"£\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)").unwrap(),
        ),
    ]
}

fn meta_property(doc: &Html, property: &str) -> Option<String> {
    meta_properties(doc, property).into_iter().next()
}

fn meta_properties(doc: &Html, property: &str) -> Vec<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{property}"]"#)).unwrap();
    doc.select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

fn meta_name(doc: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[name="{name}"]"#)).unwrap();
    doc.select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .find(|c| !c.is_empty())
}

fn title_tag(doc: &Html) -> Option<String> {
    let selector = Selector::parse("title").unwrap();
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> StructuralStrategy {
        StructuralStrategy::new(&PipelineConfig::default()).unwrap()
    }

    const PRODUCT_PAGE: &str = r#"<html><head>
        <title>Fallback Title</title>
        <meta property="og:title" content="Aurora Wireless Headphones - Midnight Blue"/>
        <meta property="og:description" content="Noise cancelling, 30h battery."/>
        <meta property="og:image" content="https://cdn.shop.io/aurora-1.jpg"/>
        <meta property="og:image" content="https://cdn.shop.io/aurora-2.jpg"/>
        <meta property="og:site_name" content="Shop.io"/>
        <meta property="og:type" content="product"/>
        <meta property="product:price:amount" content="4,999.00"/>
        <meta property="product:price:currency" content="INR"/>
        <meta property="product:brand" content="Aurora"/>
        </head><body></body></html>"#;

    #[test]
    fn test_parses_open_graph_tags() {
        let record = strategy().parse_document(PRODUCT_PAGE, Some("shop.io"));

        assert_eq!(
            record.title.as_deref(),
            Some("Aurora Wireless Headphones - Midnight Blue")
        );
        assert_eq!(
            record.description.as_deref(),
            Some("Noise cancelling, 30h battery.")
        );
        assert_eq!(
            record.image_url.as_deref(),
            Some("https://cdn.shop.io/aurora-1.jpg")
        );
        assert_eq!(record.image_urls.len(), 2);
        assert_eq!(record.site_name.as_deref(), Some("Shop.io"));
        assert_eq!(record.content_type.as_deref(), Some("product"));
        assert_eq!(record.brand.as_deref(), Some("Aurora"));
    }

    #[test]
    fn test_price_tags_win_and_commas_stripped() {
        let record = strategy().parse_document(PRODUCT_PAGE, Some("shop.io"));
        assert_eq!(record.price.as_deref(), Some("4999.00"));
        assert_eq!(record.currency.as_deref(), Some("INR"));
    }

    #[test]
    fn test_title_tag_fallback_and_host_site_name() {
        let html = "<html><head><title>Plain Title</title></head></html>";
        let record = strategy().parse_document(html, Some("example.com"));
        assert_eq!(record.title.as_deref(), Some("Plain Title"));
        assert_eq!(record.site_name.as_deref(), Some("example.com"));
        assert_eq!(record.content_type.as_deref(), Some("webpage"));
    }

    #[test]
    fn test_price_from_symbol_in_title() {
        let html = r#"<html><head>
            <meta property="og:title" content="Mega Blender - now $1,299.99 only"/>
            </head></html>"#;
        let record = strategy().parse_document(html, None);
        assert_eq!(record.price.as_deref(), Some("1299.99"));
        assert_eq!(record.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_first_currency_match_wins() {
        let s = strategy();
        // INR patterns are checked before USD.
        let (currency, amount) = s.match_price("Was ₹2,499 now $30").unwrap();
        assert_eq!(currency, "INR");
        assert_eq!(amount, "2499");
    }

    #[test]
    fn test_rupee_text_prefix() {
        let s = strategy();
        let (currency, amount) = s.match_price("Special offer Rs. 1,499.50 today").unwrap();
        assert_eq!(currency, "INR");
        assert_eq!(amount, "1499.50");
    }

    #[test]
    fn test_euro_and_pound() {
        let s = strategy();
        assert_eq!(s.match_price("price €89.99"), Some(("EUR", "89.99".into())));
        assert_eq!(s.match_price("price £45"), Some(("GBP", "45".into())));
    }

    #[test]
    fn test_no_price_found() {
        let s = strategy();
        assert_eq!(s.match_price("no numbers here"), None);
    }

    #[test]
    fn test_empty_document() {
        let record = strategy().parse_document("<html></html>", Some("example.com"));
        assert!(record.title.is_none());
        // host and default content type still fill in
        assert_eq!(record.site_name.as_deref(), Some("example.com"));
        assert_eq!(record.field_count(), 2);
    }
}
