use serde::{Deserialize, Serialize};

/// What a suggestion points at. The order of the variants is the display
/// order of the groups in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Product,
    Brand,
    Category,
    Page,
}

/// One entry in the suggestion panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Wire shape of `GET /api/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub results: Vec<Suggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_as_the_wire_type_field() {
        let suggestion = Suggestion {
            kind: SuggestionKind::Brand,
            title: "Xiaomi".to_string(),
            url: "/boutique?tag=Xiaomi".to_string(),
            description: None,
            image: None,
        };
        let value = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(value["type"], "brand");
        assert_eq!(value.get("description"), None);
    }

    #[test]
    fn kind_order_matches_display_order() {
        assert!(SuggestionKind::Product < SuggestionKind::Brand);
        assert!(SuggestionKind::Brand < SuggestionKind::Category);
        assert!(SuggestionKind::Category < SuggestionKind::Page);
    }
}
