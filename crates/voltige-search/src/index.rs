//! The suggestion index: static site pages, brands and categories plus the
//! loaded product list, matched by lowercase containment and grouped with
//! per-group caps.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use voltige_core::Product;

use crate::types::{Suggestion, SuggestionKind};

/// Per-group result caps, products first.
const MAX_PRODUCT_SUGGESTIONS: usize = 5;
const MAX_BRAND_SUGGESTIONS: usize = 3;
const MAX_CATEGORY_SUGGESTIONS: usize = 3;
const MAX_PAGE_SUGGESTIONS: usize = 3;

/// Site pages reachable from the navigation search.
const SITE_PAGES: &[(&str, &str, &str)] = &[
    ("Boutique", "/boutique", "Toutes nos trottinettes et accessoires"),
    ("Financement", "/financement", "Payez en 3 ou 4 fois sans frais"),
    ("Assurance casse et vol", "/assurance", "Roulez couvert au quotidien"),
    (
        "Entretien et réparation",
        "/entretien-reparation",
        "Atelier agréé toutes marques",
    ),
    ("Diagnostic atelier", "/diagnostic", "Bilan complet en 48 h"),
    ("Livraison et retours", "/livraison", "Expédition sous 24 h"),
    ("Contact", "/contact", "Une question ? Écrivez-nous"),
];

const BRANDS: &[&str] = &["Xiaomi", "Ninebot", "Dualtron", "E-Twow", "Kaabo", "Vsett"];

const CATEGORIES: &[(&str, &str)] = &[
    ("Trottinettes électriques", "trottinettes-electriques"),
    ("Accessoires", "accessoires"),
    ("Pièces détachées", "pieces-detachees"),
];

/// Terms shown under the search box before the user has typed enough.
const POPULAR_SEARCHES: &[&str] = &[
    "trottinette électrique",
    "xiaomi",
    "dualtron",
    "casque",
    "batterie",
];

#[must_use]
pub fn popular_searches() -> &'static [&'static str] {
    POPULAR_SEARCHES
}

/// The boutique URL that runs `term` as a full catalog search. Used by the
/// panel's empty and error states as the "view everything" escape hatch.
#[must_use]
pub fn browse_url(term: &str) -> String {
    format!(
        "/boutique?q={}",
        utf8_percent_encode(term.trim(), NON_ALPHANUMERIC)
    )
}

/// Suggestion source over one loaded catalog.
pub struct SuggestIndex<'a> {
    products: &'a [Product],
}

impl<'a> SuggestIndex<'a> {
    #[must_use]
    pub fn new(products: &'a [Product]) -> Self {
        Self { products }
    }

    /// Matches `query` against products, brands, categories and site pages.
    /// Results are grouped in that order, each group capped. A blank query
    /// yields nothing.
    #[must_use]
    pub fn suggest(&self, query: &str) -> Vec<Suggestion> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();

        results.extend(
            self.products
                .iter()
                .filter(|p| product_matches(p, &needle))
                .take(MAX_PRODUCT_SUGGESTIONS)
                .map(|p| Suggestion {
                    kind: SuggestionKind::Product,
                    title: p.title.clone(),
                    url: format!("/produits/{}", p.handle),
                    description: p.product_type.clone(),
                    image: p.primary_image().map(|image| image.url.clone()),
                }),
        );

        results.extend(
            BRANDS
                .iter()
                .filter(|brand| brand.to_lowercase().contains(&needle))
                .take(MAX_BRAND_SUGGESTIONS)
                .map(|brand| Suggestion {
                    kind: SuggestionKind::Brand,
                    title: (*brand).to_string(),
                    url: format!("/boutique?tag={}", utf8_percent_encode(brand, NON_ALPHANUMERIC)),
                    description: None,
                    image: None,
                }),
        );

        results.extend(
            CATEGORIES
                .iter()
                .filter(|(name, _)| name.to_lowercase().contains(&needle))
                .take(MAX_CATEGORY_SUGGESTIONS)
                .map(|(name, slug)| Suggestion {
                    kind: SuggestionKind::Category,
                    title: (*name).to_string(),
                    url: format!("/boutique?categorie={slug}"),
                    description: None,
                    image: None,
                }),
        );

        results.extend(
            SITE_PAGES
                .iter()
                .filter(|(title, _, description)| {
                    title.to_lowercase().contains(&needle)
                        || description.to_lowercase().contains(&needle)
                })
                .take(MAX_PAGE_SUGGESTIONS)
                .map(|(title, url, description)| Suggestion {
                    kind: SuggestionKind::Page,
                    title: (*title).to_string(),
                    url: (*url).to_string(),
                    description: Some((*description).to_string()),
                    image: None,
                }),
        );

        results
    }
}

fn product_matches(product: &Product, needle: &str) -> bool {
    product.title.to_lowercase().contains(needle)
        || product
            .vendor
            .as_deref()
            .is_some_and(|vendor| vendor.to_lowercase().contains(needle))
        || product
            .product_type
            .as_deref()
            .is_some_and(|kind| kind.to_lowercase().contains(needle))
        || product
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltige_core::{Money, PriceRange, ProductImage, Variant};

    fn make_product(title: &str, handle: &str, vendor: &str, product_type: &str) -> Product {
        Product {
            id: format!("gid://shopify/Product/{handle}"),
            title: title.to_string(),
            handle: handle.to_string(),
            description: String::new(),
            product_type: Some(product_type.to_string()),
            vendor: Some(vendor.to_string()),
            tags: Vec::new(),
            available_for_sale: true,
            created_at: None,
            price_range: Some(PriceRange {
                min_variant_price: Money::eur("499.00"),
                max_variant_price: None,
            }),
            images: vec![ProductImage {
                url: format!("https://cdn.voltige.fr/products/{handle}.jpg"),
                alt_text: None,
            }],
            variants: vec![Variant {
                id: format!("gid://shopify/ProductVariant/{handle}"),
                title: "Default Title".to_string(),
                price: Money::eur("499.00"),
                compare_at_price: None,
                available_for_sale: true,
                selected_options: Vec::new(),
            }],
        }
    }

    fn demo_products() -> Vec<Product> {
        vec![
            make_product(
                "Trottinette Xiaomi Mi Pro 2",
                "trottinette-xiaomi-mi-pro-2",
                "Xiaomi",
                "Trottinettes électriques",
            ),
            make_product(
                "Trottinette Dualtron Thunder 2",
                "trottinette-dualtron-thunder-2",
                "Dualtron",
                "Trottinettes électriques",
            ),
            make_product(
                "Chargeur rapide Xiaomi 42V",
                "chargeur-rapide-xiaomi-42v",
                "Xiaomi",
                "Accessoires",
            ),
        ]
    }

    #[test]
    fn groups_come_back_in_display_order() {
        let products = demo_products();
        let index = SuggestIndex::new(&products);
        let results = index.suggest("xiaomi");

        let kinds: Vec<SuggestionKind> = results.iter().map(|s| s.kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort();
        assert_eq!(kinds, sorted, "groups must come back product → page");

        assert!(results.iter().any(|s| s.kind == SuggestionKind::Product));
        assert!(results
            .iter()
            .any(|s| s.kind == SuggestionKind::Brand && s.title == "Xiaomi"));
    }

    #[test]
    fn product_group_is_capped_at_five() {
        let products: Vec<Product> = (0..8)
            .map(|i| {
                make_product(
                    &format!("Trottinette modèle {i}"),
                    &format!("trottinette-modele-{i}"),
                    "Voltige",
                    "Trottinettes électriques",
                )
            })
            .collect();
        let index = SuggestIndex::new(&products);
        let results = index.suggest("trottinette");
        let product_count = results
            .iter()
            .filter(|s| s.kind == SuggestionKind::Product)
            .count();
        assert_eq!(product_count, 5);
    }

    #[test]
    fn page_matches_on_title_and_description() {
        let index = SuggestIndex::new(&[]);
        let by_title = index.suggest("financement");
        assert!(by_title
            .iter()
            .any(|s| s.kind == SuggestionKind::Page && s.url == "/financement"));

        let by_description = index.suggest("atelier");
        assert!(by_description
            .iter()
            .any(|s| s.kind == SuggestionKind::Page));
    }

    #[test]
    fn product_suggestions_carry_handle_urls_and_images() {
        let products = demo_products();
        let index = SuggestIndex::new(&products);
        let results = index.suggest("mi pro");
        let product = results
            .iter()
            .find(|s| s.kind == SuggestionKind::Product)
            .expect("expected a product suggestion");
        assert_eq!(product.url, "/produits/trottinette-xiaomi-mi-pro-2");
        assert!(product.image.as_deref().unwrap_or_default().contains(".jpg"));
    }

    #[test]
    fn blank_query_suggests_nothing() {
        let products = demo_products();
        let index = SuggestIndex::new(&products);
        assert!(index.suggest("   ").is_empty());
    }

    #[test]
    fn browse_url_percent_encodes_the_term() {
        assert_eq!(
            browse_url("accélérateur xiaomi"),
            "/boutique?q=acc%C3%A9l%C3%A9rateur%20xiaomi"
        );
    }
}
