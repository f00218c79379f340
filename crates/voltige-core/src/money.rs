//! Tolerant parsing for price amount strings.
//!
//! Upstream amounts are usually clean decimal strings ("549.0"), but the
//! fallback catalog and operator input also show up as display prices
//! ("1 299,00 €"). One parser handles both so every price comparison in the
//! crate agrees on what a string is worth.

use rust_decimal::Decimal;

/// Parses a price string into a [`Decimal`].
///
/// Rules, in order: trim, drop currency symbols and spacing (including
/// no-break spaces), then resolve separators. When both `.` and `,` are
/// present the right-most one is the decimal separator and the other is a
/// thousands separator. A lone `,` is a decimal separator. Anything that
/// still fails to parse yields `None`; callers treat `None` as "cannot
/// compare", never as zero.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '€' | '$' | '£' | ' ' | '\u{00a0}' | '\u{202f}'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind('.'), cleaned.rfind(',')) {
        (Some(dot), Some(comma)) if dot > comma => cleaned.replace(',', ""),
        (Some(_), Some(_)) => cleaned.replace('.', "").replace(',', "."),
        (None, Some(_)) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    normalized.parse::<Decimal>().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_amount;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn parses_plain_api_amounts() {
        assert_eq!(parse_amount("549.0"), Some(dec("549.0")));
        assert_eq!(parse_amount("0"), Some(Decimal::ZERO));
        assert_eq!(parse_amount("  79.90 "), Some(dec("79.90")));
    }

    #[test]
    fn parses_french_display_prices() {
        assert_eq!(parse_amount("79,90"), Some(dec("79.90")));
        assert_eq!(parse_amount("1 299,00 €"), Some(dec("1299.00")));
        assert_eq!(parse_amount("1\u{202f}299,00\u{a0}€"), Some(dec("1299.00")));
    }

    #[test]
    fn resolves_mixed_separators_by_position() {
        assert_eq!(parse_amount("1.299,00"), Some(dec("1299.00")));
        assert_eq!(parse_amount("1,299.00"), Some(dec("1299.00")));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("sur devis"), None);
        assert_eq!(parse_amount("12.9.9"), None);
    }
}
