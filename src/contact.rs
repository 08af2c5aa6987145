//! Mapping of scraped leads onto CRM contact payloads.
use crate::config::{Config, CONTACT_SOURCE, DEFAULT_TAGS};
use crate::models::{CustomField, Lead};
use serde_json::{json, Map, Value};

pub const DEFAULT_FIRST_NAME: &str = "Business";
pub const DEFAULT_LAST_NAME: &str = "Contact";

/// Splits a business name on its first space into a contact first and last name.
///
/// `"Dr. Smith Dental"` gives `("Dr.", "Smith Dental")`. A missing first token
/// falls back to `"Business"` and a missing remainder to `"Contact"`.
pub fn derive_names(business_name: Option<&str>) -> (String, String) {
    let name = business_name.unwrap_or("");
    let (first, rest) = match name.split_once(' ') {
        Some((first, rest)) => (first, rest),
        None => (name, ""),
    };

    let first = if first.is_empty() { DEFAULT_FIRST_NAME } else { first };
    let last = if rest.is_empty() { DEFAULT_LAST_NAME } else { rest };

    (first.to_string(), last.to_string())
}

/// Custom fields for rating and reviews, in that order, skipping absent or empty values.
pub fn custom_fields(lead: &Lead) -> Vec<CustomField> {
    [("rating", &lead.rating), ("reviews", &lead.reviews)]
        .into_iter()
        .filter_map(|(key, value)| {
            value.as_ref().filter(|v| !v.is_empty()).map(|v| CustomField {
                key: key.to_string(),
                value: v.clone(),
            })
        })
        .collect()
}

/// Builds the contact creation body for one lead, already pruned of empty values.
pub fn build_contact_payload(lead: &Lead, config: &Config) -> Map<String, Value> {
    let (first_name, last_name) = derive_names(lead.business_name.as_deref());

    let tags = lead
        .tags
        .clone()
        .unwrap_or_else(|| DEFAULT_TAGS.iter().map(|t| t.to_string()).collect());

    let mut payload = Map::new();
    payload.insert("firstName".to_string(), json!(first_name));
    payload.insert("lastName".to_string(), json!(last_name));
    payload.insert("name".to_string(), json!(lead.business_name));
    payload.insert("phone".to_string(), json!(lead.phone));
    payload.insert("email".to_string(), json!(lead.email));
    payload.insert("address1".to_string(), json!(lead.address));
    payload.insert("city".to_string(), json!(lead.city));
    payload.insert("state".to_string(), json!(lead.state));
    payload.insert("website".to_string(), json!(lead.website));
    payload.insert("locationId".to_string(), json!(config.location_id));
    payload.insert("source".to_string(), json!(CONTACT_SOURCE));
    payload.insert("tags".to_string(), json!(tags));
    payload.insert("customFields".to_string(), json!(custom_fields(lead)));

    prune_empty_fields(payload)
}

/// True for null, `""`, `[]` and `{}`.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Drops every top-level key holding an empty value. Idempotent.
pub fn prune_empty_fields(mut payload: Map<String, Value>) -> Map<String, Value> {
    payload.retain(|_, value| !is_empty_value(value));
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(business_name: Option<&str>) -> Lead {
        Lead {
            business_name: business_name.map(str::to_string),
            ..Lead::default()
        }
    }

    #[test]
    fn test_derive_names_multi_word() {
        assert_eq!(
            derive_names(Some("Dr. Smith Dental")),
            ("Dr.".to_string(), "Smith Dental".to_string())
        );
    }

    #[test]
    fn test_derive_names_single_token() {
        assert_eq!(
            derive_names(Some("Clinic")),
            ("Clinic".to_string(), "Contact".to_string())
        );
    }

    #[test]
    fn test_derive_names_absent_or_empty() {
        let expected = ("Business".to_string(), "Contact".to_string());
        assert_eq!(derive_names(None), expected);
        assert_eq!(derive_names(Some("")), expected);
    }

    #[test]
    fn test_derive_names_edge_spaces() {
        assert_eq!(
            derive_names(Some(" Leading")),
            ("Business".to_string(), "Leading".to_string())
        );
        assert_eq!(
            derive_names(Some("Trailing ")),
            ("Trailing".to_string(), "Contact".to_string())
        );
    }

    #[test]
    fn test_payload_defaults() {
        let config = Config::new("key", "LOC");
        let payload = build_contact_payload(&lead(None), &config);

        assert_eq!(payload["firstName"], "Business");
        assert_eq!(payload["lastName"], "Contact");
        assert_eq!(payload["locationId"], "LOC");
        assert_eq!(payload["source"], CONTACT_SOURCE);
        assert_eq!(
            payload["tags"],
            json!(["Dentist", "Los Angeles", "Auto-Scraped"])
        );
        for key in ["name", "phone", "email", "address1", "city", "state", "website", "customFields"] {
            assert!(!payload.contains_key(key), "{} should be pruned", key);
        }
    }

    #[test]
    fn test_payload_explicit_empty_tags_pruned() {
        let config = Config::new("key", "LOC");
        let mut l = lead(Some("Acme"));
        l.tags = Some(vec![]);
        let payload = build_contact_payload(&l, &config);
        assert!(!payload.contains_key("tags"));
    }

    #[test]
    fn test_payload_maps_fields() {
        let config = Config::new("key", "LOC");
        let l = Lead {
            business_name: Some("Acme Dental Group".to_string()),
            address: Some("1 Main St".to_string()),
            email: Some(String::new()),
            reviews: Some("87".to_string()),
            tags: Some(vec!["VIP".to_string()]),
            ..Lead::default()
        };
        let payload = build_contact_payload(&l, &config);

        assert_eq!(payload["name"], "Acme Dental Group");
        assert_eq!(payload["lastName"], "Dental Group");
        assert_eq!(payload["address1"], "1 Main St");
        assert_eq!(payload["tags"], json!(["VIP"]));
        assert_eq!(payload["customFields"], json!([{"key": "reviews", "value": "87"}]));
        assert!(!payload.contains_key("email"));
        assert!(!payload.contains_key("address"));
    }

    #[test]
    fn test_custom_fields_order() {
        let l = Lead {
            rating: Some("4.9".to_string()),
            reviews: Some("12".to_string()),
            ..Lead::default()
        };
        let fields = custom_fields(&l);
        assert_eq!(fields[0].key, "rating");
        assert_eq!(fields[1].key, "reviews");
    }

    #[test]
    fn test_prune_keeps_numbers_and_bools() {
        let mut map = Map::new();
        map.insert("zero".to_string(), json!(0));
        map.insert("flag".to_string(), json!(false));
        map.insert("empty".to_string(), json!({}));
        let pruned = prune_empty_fields(map);
        assert!(pruned.contains_key("zero"));
        assert!(pruned.contains_key("flag"));
        assert!(!pruned.contains_key("empty"));
    }
}
