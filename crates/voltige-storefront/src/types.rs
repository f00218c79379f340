//! Wire types for the Storefront GraphQL products query.
//!
//! Only the connection plumbing (edges/node, pageInfo) lives here; leaf
//! values reuse the core model types, which already speak camelCase.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use voltige_core::{Money, PriceRange, ProductImage, Variant};

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<ProductsData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: ProductConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    #[serde(default)]
    pub edges: Vec<Edge<ProductNode>>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default)]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One product as the GraphQL API nests it. [`crate::convert`] flattens
/// this into a [`voltige_core::Product`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
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
    pub images: Option<Connection<ProductImage>>,
    #[serde(default)]
    pub variants: Option<Connection<VariantNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    pub id: String,
    pub title: String,
    pub price: Money,
    #[serde(default)]
    pub compare_at_price: Option<Money>,
    #[serde(default = "default_available")]
    pub available_for_sale: bool,
    #[serde(default)]
    pub selected_options: Vec<voltige_core::SelectedOption>,
}

impl From<VariantNode> for Variant {
    fn from(node: VariantNode) -> Self {
        Self {
            id: node.id,
            title: node.title,
            price: node.price,
            compare_at_price: node.compare_at_price,
            available_for_sale: node.available_for_sale,
            selected_options: node.selected_options,
        }
    }
}

fn default_available() -> bool {
    true
}
