//! Catalog product model.
//!
//! Field names follow the Storefront API (camelCase on the wire), so the
//! same structs deserialize GraphQL payloads and serialize API responses.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::parse_amount;

/// A monetary value as the Storefront API ships it: a decimal string plus an
/// ISO 4217 currency code. Amounts stay strings end to end; [`Money::decimal`]
/// parses on demand for comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

impl Money {
    #[must_use]
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Euro helper for fixtures and the fallback catalog.
    #[must_use]
    pub fn eur(amount: impl Into<String>) -> Self {
        Self::new(amount, "EUR")
    }

    /// Parses the amount with the tolerant rules in [`crate::money`].
    /// Returns `None` when the string is not a usable number.
    #[must_use]
    pub fn decimal(&self) -> Option<Decimal> {
        parse_amount(&self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_variant_price: Money,
    #[serde(default)]
    pub max_variant_price: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub title: String,
    pub price: Money,
    #[serde(default)]
    pub compare_at_price: Option<Money>,
    #[serde(default = "default_available")]
    pub available_for_sale: bool,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

impl Variant {
    /// Parsed unit price, `None` when the amount string is unusable.
    #[must_use]
    pub fn unit_price(&self) -> Option<Decimal> {
        self.price.decimal()
    }

    /// True when a strikethrough price exists and is strictly above the
    /// selling price. Unparseable amounts never count as a discount.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        match (
            self.compare_at_price.as_ref().and_then(Money::decimal),
            self.unit_price(),
        ) {
            (Some(compare_at), Some(price)) => compare_at > price,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_available")]
    pub available_for_sale: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Cheapest parseable variant price, falling back to the price range
    /// minimum when no variant amount parses.
    #[must_use]
    pub fn min_price(&self) -> Option<Decimal> {
        self.variants
            .iter()
            .filter_map(Variant::unit_price)
            .min()
            .or_else(|| {
                self.price_range
                    .as_ref()
                    .and_then(|range| range.min_variant_price.decimal())
            })
    }

    /// A product counts as in stock when the product-level flag says so or
    /// any variant remains purchasable.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.available_for_sale || self.variants.iter().any(|v| v.available_for_sale)
    }

    /// True when any variant currently carries a markdown.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.variants.iter().any(Variant::is_discounted)
    }

    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images.first()
    }
}

fn default_available() -> bool {
    true
}
