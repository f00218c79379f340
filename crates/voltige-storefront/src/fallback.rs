//! The bundled demo catalog.
//!
//! Served whenever the live storefront is unreachable, unconfigured or
//! empty, so the boutique and the search suggester stay demonstrable. The
//! set deliberately covers every filter branch: each major brand, a
//! discounted item, a sold-out item, a recent arrival and the accessory
//! behind the search exception rule.

use chrono::{DateTime, Duration, Utc};

use voltige_core::{Money, PriceRange, Product, ProductImage, SelectedOption, Variant};

fn variant(id: &str, title: &str, price: &str, available: bool) -> Variant {
    Variant {
        id: format!("gid://shopify/ProductVariant/fallback-{id}"),
        title: title.to_string(),
        price: Money::eur(price),
        compare_at_price: None,
        available_for_sale: available,
        selected_options: Vec::new(),
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    title: &str,
    handle: &str,
    description: &str,
    vendor: &str,
    product_type: &str,
    tags: &[&str],
    price: &str,
    created_days_ago: i64,
    now: DateTime<Utc>,
) -> Product {
    Product {
        id: format!("gid://shopify/Product/fallback-{id}"),
        title: title.to_string(),
        handle: handle.to_string(),
        description: description.to_string(),
        product_type: Some(product_type.to_string()),
        vendor: Some(vendor.to_string()),
        tags: tags.iter().map(ToString::to_string).collect(),
        available_for_sale: true,
        created_at: Some(now - Duration::days(created_days_ago)),
        price_range: Some(PriceRange {
            min_variant_price: Money::eur(price),
            max_variant_price: None,
        }),
        images: vec![ProductImage {
            url: format!("https://cdn.voltige.fr/products/{handle}.jpg"),
            alt_text: Some(title.to_string()),
        }],
        variants: vec![variant(&format!("{id}-1"), "Default Title", price, true)],
    }
}

/// Builds the demo catalog with creation dates anchored to `now`.
#[must_use]
pub fn fallback_catalog(now: DateTime<Utc>) -> Vec<Product> {
    let mut mi_pro = product(
        "1",
        "Trottinette Xiaomi Mi Pro 2",
        "trottinette-xiaomi-mi-pro-2",
        "45 km d'autonomie, moteur 300 W, la référence urbaine.",
        "Xiaomi",
        "Trottinettes électriques",
        &["Xiaomi", "Urbain"],
        "499.00",
        210,
        now,
    );
    mi_pro.variants = vec![
        variant("1-1", "Noir", "499.00", true),
        variant("1-2", "Gris", "499.00", true),
    ];

    let thunder = product(
        "2",
        "Trottinette Dualtron Thunder 2",
        "trottinette-dualtron-thunder-2",
        "Double moteur 5400 W pour les pilotes exigeants.",
        "Dualtron",
        "Trottinettes électriques",
        &["Dualtron", "Performance"],
        "4290.00",
        160,
        now,
    );

    let max_g2 = product(
        "3",
        "Trottinette Ninebot Max G2",
        "trottinette-ninebot-max-g2",
        "Suspension avant/arrière, 70 km d'autonomie.",
        "Ninebot",
        "Trottinettes électriques",
        &["Ninebot", "Urbain"],
        "799.00",
        12,
        now,
    );

    let booster = product(
        "4",
        "Trottinette E-Twow Booster GT SE",
        "trottinette-e-twow-booster-gt-se",
        "Ultralégère, pliage instantané, fabrication européenne.",
        "E-Twow",
        "Trottinettes électriques",
        &["E-Twow", "Urbain"],
        "899.00",
        95,
        now,
    );

    let mut throttle = product(
        "5",
        "Accélérateur Xiaomi",
        "accelerateur-xiaomi",
        "Gâchette d'accélérateur d'origine pour gamme Mi.",
        "Xiaomi",
        "Pièces détachées",
        &["Xiaomi"],
        "19.90",
        75,
        now,
    );
    throttle.variants = vec![
        Variant {
            selected_options: vec![SelectedOption {
                name: "Couleur".to_string(),
                value: "Noir".to_string(),
            }],
            ..variant("5-1", "Noir", "19.90", true)
        },
        Variant {
            selected_options: vec![SelectedOption {
                name: "Couleur".to_string(),
                value: "Rouge".to_string(),
            }],
            ..variant("5-2", "Rouge", "19.90", true)
        },
    ];

    let mut helmet = product(
        "6",
        "Casque urbain LED",
        "casque-urbain-led",
        "Éclairage arrière intégré, homologué CE.",
        "Voltige",
        "Accessoires",
        &["Sécurité"],
        "49.90",
        55,
        now,
    );
    helmet.variants = vec![
        Variant {
            compare_at_price: Some(Money::eur("69.90")),
            ..variant("6-1", "Taille M", "49.90", true)
        },
        Variant {
            compare_at_price: Some(Money::eur("69.90")),
            ..variant("6-2", "Taille L", "49.90", true)
        },
    ];

    let mut charger = product(
        "7",
        "Chargeur rapide Xiaomi 42V",
        "chargeur-rapide-xiaomi-42v",
        "Charge complète en 4 h, protection contre la surchauffe.",
        "Xiaomi",
        "Accessoires",
        &["Xiaomi"],
        "29.90",
        130,
        now,
    );
    charger.available_for_sale = false;
    charger.variants = vec![variant("7-1", "Default Title", "29.90", false)];

    let tyre = product(
        "8",
        "Pneu plein increvable 8,5 pouces",
        "pneu-plein-increvable-8-5-pouces",
        "Fini les crevaisons, montage sans chambre à air.",
        "Voltige",
        "Pièces détachées",
        &["Entretien"],
        "34.90",
        220,
        now,
    );

    let lock = product(
        "9",
        "Antivol pliable haute sécurité",
        "antivol-pliable-haute-securite",
        "Acier trempé, classé SRA, support de cadre inclus.",
        "Voltige",
        "Accessoires",
        &["Sécurité"],
        "39.90",
        40,
        now,
    );

    let battery = product(
        "10",
        "Batterie 36V 7.8Ah reconditionnée",
        "batterie-36v-7-8ah-reconditionnee",
        "Cellules testées, capacité garantie à 90 %.",
        "Voltige",
        "Pièces détachées",
        &["Entretien"],
        "199.00",
        310,
        now,
    );

    vec![
        mi_pro, thunder, max_g2, booster, throttle, helmet, charger, tyre, lock, battery,
    ]
}
