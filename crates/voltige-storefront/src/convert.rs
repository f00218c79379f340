//! Flattens GraphQL connection nodes into the core product model.

use voltige_core::Product;

use crate::types::ProductNode;

/// Unwraps the edges/node nesting of one product node.
#[must_use]
pub fn flatten_product(node: ProductNode) -> Product {
    Product {
        id: node.id,
        title: node.title,
        handle: node.handle,
        description: node.description,
        product_type: node.product_type,
        vendor: node.vendor,
        tags: node.tags,
        available_for_sale: node.available_for_sale,
        created_at: node.created_at,
        price_range: node.price_range,
        images: node
            .images
            .map(|connection| connection.edges.into_iter().map(|edge| edge.node).collect())
            .unwrap_or_default(),
        variants: node
            .variants
            .map(|connection| {
                connection
                    .edges
                    .into_iter()
                    .map(|edge| edge.node.into())
                    .collect()
            })
            .unwrap_or_default(),
    }
}
