//! Free-text query normalization and product matching.
//!
//! Storefront titles are inconsistent about hyphenation ("Mi-Pro-2" vs
//! "Mi Pro 2"), so both the query and the title are expanded into spelling
//! variants before substring matching.

use crate::product::Product;

/// Lowercased spelling variants of a search query, in match order:
/// the query itself, hyphens as spaces, spaces as hyphens, spaces removed.
/// Duplicates are dropped. A blank query yields no variants.
#[must_use]
pub fn query_variants(query: &str) -> Vec<String> {
    let base = query.trim().to_lowercase();
    if base.is_empty() {
        return Vec::new();
    }

    let mut variants = vec![base.clone()];
    for candidate in [
        base.replace('-', " "),
        base.replace(' ', "-"),
        base.replace(' ', ""),
    ] {
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

/// Case-insensitive haystack fields for one product: the title and its own
/// spelling variants, description, vendor, product type, tags and variant
/// titles.
fn haystack(product: &Product) -> Vec<String> {
    let title = product.title.to_lowercase();
    let mut fields = vec![
        title.replace('-', " "),
        title.replace(' ', ""),
        title,
        product.description.to_lowercase(),
    ];
    if let Some(vendor) = &product.vendor {
        fields.push(vendor.to_lowercase());
    }
    if let Some(kind) = &product.product_type {
        fields.push(kind.to_lowercase());
    }
    fields.extend(product.tags.iter().map(|tag| tag.to_lowercase()));
    fields.extend(product.variants.iter().map(|v| v.title.to_lowercase()));
    fields
}

/// True when any query variant is a substring of any haystack field.
/// An empty variant list (blank query) matches everything.
#[must_use]
pub fn matches_query(product: &Product, variants: &[String]) -> bool {
    if variants.is_empty() {
        return true;
    }
    let fields = haystack(product);
    variants
        .iter()
        .any(|needle| fields.iter().any(|field| field.contains(needle)))
}
