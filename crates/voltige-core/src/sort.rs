//! Sort orders for the filtered catalog.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// How the boutique orders a filtered product list. `Featured` keeps the
/// catalog order untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    Newest,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Newest => "newest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "newest" => Ok(Self::Newest),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Compares two products under `order`. Products without a usable price or
/// creation date sort last in both directions, and `Featured` compares
/// everything equal so a stable sort leaves catalog order alone.
#[must_use]
pub fn compare(a: &Product, b: &Product, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Featured => Ordering::Equal,
        SortOrder::PriceAsc => compare_prices(a, b, true),
        SortOrder::PriceDesc => compare_prices(a, b, false),
        SortOrder::Newest => match (a.created_at, b.created_at) {
            (Some(left), Some(right)) => right.cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

fn compare_prices(a: &Product, b: &Product, ascending: bool) -> Ordering {
    match (a.min_price(), b.min_price()) {
        (Some(left), Some(right)) => {
            if ascending {
                left.cmp(&right)
            } else {
                right.cmp(&left)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable in-place sort of a filtered view.
pub fn sort_products(products: &mut [&Product], order: SortOrder) {
    if order != SortOrder::Featured {
        products.sort_by(|a, b| compare(a, b, order));
    }
}
