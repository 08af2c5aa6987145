use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============ Input Models ============

/// A scraped business lead as found in the input file.
///
/// Every field is optional. Scalar fields accept strings, numbers or booleans;
/// non-string scalars are stringified so `4.5` becomes `"4.5"`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Lead {
    #[serde(default, deserialize_with = "lenient_string")]
    pub business_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub website: Option<String>,
    /// Average review score.
    #[serde(default, deserialize_with = "lenient_string")]
    pub rating: Option<String>,
    /// Number of reviews.
    #[serde(default, deserialize_with = "lenient_string")]
    pub reviews: Option<String>,
    /// `None` when absent or null, which is distinct from an explicit empty list.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl Lead {
    /// Interprets one element of the input array as a lead.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Lead::deserialize(value)
    }

    /// Business name for console lines, empty when absent.
    pub fn display_name(&self) -> &str {
        self.business_name.as_deref().unwrap_or("")
    }
}

/// Best-effort business name of a raw record, used when it cannot be parsed as a [`Lead`].
pub fn raw_business_name(value: &Value) -> &str {
    value
        .get("business_name")
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(serde_json::Number),
        Flag(bool),
    }

    Ok(
        Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }),
    )
}

// ============ Output Models ============

/// One entry of a contact's `customFields` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomField {
    pub key: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lead_all_fields() {
        let lead = Lead::from_value(&json!({
            "business_name": "Acme Dental",
            "phone": "555-1234",
            "email": "hi@acme.test",
            "address": "1 Main St",
            "city": "Los Angeles",
            "state": "CA",
            "website": "https://acme.test",
            "rating": 4.5,
            "reviews": 120,
            "tags": ["Dentist"]
        }))
        .unwrap();

        assert_eq!(lead.business_name.as_deref(), Some("Acme Dental"));
        assert_eq!(lead.rating.as_deref(), Some("4.5"));
        assert_eq!(lead.reviews.as_deref(), Some("120"));
        assert_eq!(lead.tags, Some(vec!["Dentist".to_string()]));
    }

    #[test]
    fn test_lead_missing_and_null_fields() {
        let lead = Lead::from_value(&json!({"phone": null, "tags": null})).unwrap();
        assert_eq!(lead, Lead::default());
        assert_eq!(lead.display_name(), "");
    }

    #[test]
    fn test_lead_empty_tags_kept_distinct_from_absent() {
        let lead = Lead::from_value(&json!({"tags": []})).unwrap();
        assert_eq!(lead.tags, Some(vec![]));
    }

    #[test]
    fn test_numeric_phone_is_stringified() {
        let lead = Lead::from_value(&json!({"phone": 5551234})).unwrap();
        assert_eq!(lead.phone.as_deref(), Some("5551234"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let lead = Lead::from_value(&json!({"business_name": "X", "place_id": "abc"})).unwrap();
        assert_eq!(lead.display_name(), "X");
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(Lead::from_value(&json!("just a string")).is_err());
        assert!(Lead::from_value(&json!({"phone": {"nested": true}})).is_err());
    }

    #[test]
    fn test_raw_business_name() {
        assert_eq!(raw_business_name(&json!({"business_name": "Acme"})), "Acme");
        assert_eq!(raw_business_name(&json!(42)), "");
    }
}
