//! Tolerant normalization of valuation payloads.
//!
//! Backend deployments disagree on envelope layout and field names. Every shape
//! we know about is listed in [`PayloadShape`]; anything else degrades to an
//! empty result instead of an error.

use std::collections::HashMap;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::entities::{ItemId, NormalizedItem, NormalizedPayload, UNKNOWN_ITEM_NAME};

const LIST_KEYS: [&str; 3] = ["items", "groups", "data"];
const TOTAL_KEYS: [&str; 2] = ["total_value", "total"];

const NAME_KEYS: [&str; 2] = ["market_hash_name", "name"];
const QUANTITY_KEYS: [&str; 3] = ["total_amount", "amount", "count"];
const UNIT_PRICE_KEYS: [&str; 2] = ["unit_price", "price"];
const LINE_TOTAL_KEYS: [&str; 2] = ["group_price", "total"];
const IMAGE_KEYS: [&str; 3] = ["sample_icon_url", "image", "icon_url"];

const DEFAULT_QUANTITY: f64 = 1.0;
const ID_HEX_LEN: usize = 16;
const FIELD_SEPARATOR: &[u8] = b"\x1f";

/// Closed set of payload layouts the normalizer understands.
#[derive(Debug, PartialEq)]
pub enum PayloadShape<'a> {
    /// The payload is the item list itself.
    BareList(&'a [Value]),
    /// An object wrapping the list under `items`, `groups` or `data`.
    Envelope {
        list_key: &'static str,
        items: &'a [Value],
        total: Option<f64>,
    },
    Unrecognized,
}

impl<'a> PayloadShape<'a> {
    pub fn classify(payload: &'a Value) -> Self {
        match payload {
            Value::Array(entries) => Self::BareList(entries),
            Value::Object(map) => LIST_KEYS
                .iter()
                .find_map(|key| {
                    map.get(*key)
                        .and_then(Value::as_array)
                        .map(|items| Self::Envelope {
                            list_key: *key,
                            items,
                            total: first_price(map, &TOTAL_KEYS),
                        })
                })
                .unwrap_or(Self::Unrecognized),
            _ => Self::Unrecognized,
        }
    }

    fn entries(&self) -> &'a [Value] {
        match self {
            Self::BareList(items) | Self::Envelope { items, .. } => *items,
            Self::Unrecognized => &[],
        }
    }

    fn backend_total(&self) -> Option<f64> {
        match self {
            Self::Envelope { total, .. } => *total,
            _ => None,
        }
    }
}

/// Normalizes an arbitrary JSON payload. Never fails.
pub fn normalize(payload: &Value) -> NormalizedPayload {
    let shape = PayloadShape::classify(payload);
    match &shape {
        PayloadShape::BareList(items) => debug!(entries = items.len(), "bare item list"),
        PayloadShape::Envelope {
            list_key, items, ..
        } => debug!(list_key, entries = items.len(), "enveloped item list"),
        PayloadShape::Unrecognized if payload.is_null() => debug!("empty payload"),
        PayloadShape::Unrecognized => warn!(
            kind = json_kind(payload),
            "unrecognized valuation payload; treating as empty"
        ),
    }

    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let items = shape
        .entries()
        .iter()
        .map(|entry| {
            let fields = extract_fields(entry);
            let digest = content_digest(&fields);
            let seen = occurrences.entry(digest.clone()).or_insert(0);
            *seen += 1;
            let id = if *seen == 1 {
                ItemId::new(digest)
            } else {
                ItemId::new(format!("{digest}-{seen}"))
            };
            fields.into_item(id)
        })
        .collect();

    NormalizedPayload {
        items,
        backend_total: shape.backend_total(),
    }
}

struct ItemFields {
    display_name: String,
    quantity: f64,
    unit_price: Option<f64>,
    line_total: Option<f64>,
    image_url: Option<String>,
}

impl ItemFields {
    fn into_item(self, id: ItemId) -> NormalizedItem {
        NormalizedItem {
            id,
            display_name: self.display_name,
            quantity: self.quantity,
            unit_price: self.unit_price,
            line_total: self.line_total,
            image_url: self.image_url,
        }
    }
}

fn extract_fields(entry: &Value) -> ItemFields {
    let empty = Map::new();
    let map = entry.as_object().unwrap_or(&empty);

    ItemFields {
        display_name: first_text(map, &NAME_KEYS).unwrap_or_else(|| UNKNOWN_ITEM_NAME.to_string()),
        quantity: first_quantity(map).unwrap_or(DEFAULT_QUANTITY),
        unit_price: first_price(map, &UNIT_PRICE_KEYS),
        line_total: first_price(map, &LINE_TOTAL_KEYS),
        image_url: first_text(map, &IMAGE_KEYS),
    }
}

fn content_digest(fields: &ItemFields) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fields.display_name.as_bytes());
    hasher.update(FIELD_SEPARATOR);
    hasher.update(fields.quantity.to_bits().to_le_bytes());
    for value in [fields.unit_price, fields.line_total] {
        hasher.update(FIELD_SEPARATOR);
        match value {
            Some(number) => hasher.update(number.to_bits().to_le_bytes()),
            None => hasher.update(b"-"),
        }
    }
    hasher.update(FIELD_SEPARATOR);
    hasher.update(fields.image_url.as_deref().unwrap_or("-").as_bytes());

    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(ID_HEX_LEN);
    digest
}

/// Coerces a JSON number or numeric string. Anything else is absent.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

// The first coercible candidate decides; a 0 there reads as missing.
fn first_price(map: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(coerce_number))
        .filter(|value| *value != 0.0)
}

fn first_quantity(map: &Map<String, Value>) -> Option<f64> {
    QUANTITY_KEYS
        .iter()
        .filter_map(|key| map.get(*key).and_then(coerce_number))
        .find(|value| *value >= 0.0)
}

fn first_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| map.get(*key).and_then(coerce_text))
}

/// Coerces a non-blank string, a number or a boolean to display text.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn every_known_shape_normalizes_without_panicking() {
        let payloads = [
            json!([{ "name": "A" }]),
            json!({ "items": [{ "name": "A" }], "total": 3 }),
            json!({ "groups": [{ "name": "A" }], "total_value": 3 }),
            json!({ "data": [{ "name": "A" }] }),
            json!({ "something": "else" }),
            Value::Null,
            json!(42),
            json!("text"),
        ];

        for payload in &payloads {
            let normalized = normalize(payload);
            assert!(normalized.items.len() <= 1);
            assert!(normalized.items.iter().all(|item| item.quantity >= 0.0));
        }
    }

    #[test]
    fn bare_list_has_no_backend_total() {
        let normalized = normalize(&json!([
            { "market_hash_name": "AK-47", "total_amount": 3, "unit_price": 2.5 }
        ]));
        assert_eq!(normalized.backend_total, None);
        let item = &normalized.items[0];
        assert_eq!(item.display_name, "AK-47");
        assert_eq!(item.quantity, 3.0);
        assert_eq!(item.unit_price, Some(2.5));
        assert_eq!(item.line_total, None);
    }

    #[test]
    fn list_keys_are_checked_in_order() {
        let payload = json!({
            "data": [{ "name": "from data" }],
            "groups": [{ "name": "from groups" }],
            "total_value": "12.5",
        });
        let normalized = normalize(&payload);
        assert_eq!(normalized.items.len(), 1);
        assert_eq!(normalized.items[0].display_name, "from groups");
        assert_eq!(normalized.backend_total, Some(12.5));
    }

    #[test]
    fn non_array_list_key_is_skipped() {
        let payload = json!({ "items": "nope", "data": [{ "name": "X" }] });
        let shape = PayloadShape::classify(&payload);
        assert!(matches!(shape, PayloadShape::Envelope { list_key: "data", .. }));
    }

    #[test]
    fn total_falls_back_when_first_candidate_is_not_numeric() {
        let payload = json!({ "items": [], "total_value": "n/a", "total": 9 });
        assert_eq!(normalize(&payload).backend_total, Some(9.0));

        let payload = json!({ "items": [], "total_value": null });
        assert_eq!(normalize(&payload).backend_total, None);
    }

    #[test]
    fn unrecognized_object_is_empty() {
        let normalized = normalize(&json!({}));
        assert!(normalized.items.is_empty());
        assert_eq!(normalized.backend_total, None);
    }

    #[test]
    fn field_fallback_chains() {
        let normalized = normalize(&json!([
            { "name": "Knife", "amount": 2, "price": "4", "total": 10, "image": "img.png" },
            { "count": 5, "icon_url": "icon.png" },
            {}
        ]));
        let [knife, unnamed, empty] = normalized.items.as_slice() else {
            panic!("expected three items");
        };
        assert_eq!(knife.display_name, "Knife");
        assert_eq!(knife.quantity, 2.0);
        assert_eq!(knife.unit_price, Some(4.0));
        assert_eq!(knife.line_total, Some(10.0));
        assert_eq!(knife.image_url.as_deref(), Some("img.png"));

        assert_eq!(unnamed.display_name, UNKNOWN_ITEM_NAME);
        assert_eq!(unnamed.quantity, 5.0);
        assert_eq!(unnamed.image_url.as_deref(), Some("icon.png"));

        assert_eq!(empty.quantity, 1.0);
        assert_eq!(empty.unit_price, None);
        assert_eq!(empty.image_url, None);
    }

    #[test]
    fn zero_price_is_absent_but_zero_quantity_is_kept() {
        let normalized = normalize(&json!([
            { "name": "Case", "count": 0, "unit_price": 0, "price": 0, "group_price": 0 }
        ]));
        let item = &normalized.items[0];
        assert_eq!(item.quantity, 0.0);
        assert_eq!(item.unit_price, None);
        assert_eq!(item.line_total, None);
    }

    #[test]
    fn zero_in_first_candidate_does_not_consult_later_keys() {
        let normalized = normalize(&json!([{ "unit_price": 0, "price": 3 }]));
        assert_eq!(normalized.items[0].unit_price, None);

        let payload = json!({
            "groups": [{
                "total_amount": 2,
                "unit_price": 0,
                "price": 3,
                "group_price": 0,
                "total": 10,
            }],
            "total_value": 0,
            "total": 99,
        });
        let normalized = normalize(&payload);
        assert_eq!(normalized.backend_total, None);
        let item = &normalized.items[0];
        assert_eq!(item.unit_price, None);
        assert_eq!(item.line_total, None);
    }

    #[test]
    fn scalar_names_and_images_render_as_text() {
        let normalized = normalize(&json!([
            { "market_hash_name": 17, "image": 5 },
            { "market_hash_name": null, "name": true },
        ]));
        assert_eq!(normalized.items[0].display_name, "17");
        assert_eq!(normalized.items[0].image_url.as_deref(), Some("5"));
        assert_eq!(normalized.items[1].display_name, "true");
    }

    #[test]
    fn garbage_values_are_ignored() {
        let normalized = normalize(&json!([{
            "market_hash_name": ["AK-47"],
            "name": "   ",
            "total_amount": "many",
            "amount": -4,
            "unit_price": true,
            "price": { "value": 1 },
            "sample_icon_url": null,
        }]));
        let item = &normalized.items[0];
        assert_eq!(item.display_name, UNKNOWN_ITEM_NAME);
        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.unit_price, None);
        assert_eq!(item.image_url, None);
    }

    #[test]
    fn non_object_entries_become_default_items() {
        let normalized = normalize(&json!([1, null, "x"]));
        assert_eq!(normalized.items.len(), 3);
        assert!(normalized
            .items
            .iter()
            .all(|item| item.display_name == UNKNOWN_ITEM_NAME));
    }

    #[test]
    fn identifiers_are_stable_and_unique() {
        let payload = json!([
            { "name": "Sticker", "amount": 1 },
            { "name": "Sticker", "amount": 1 },
            { "name": "Sticker", "amount": 2 },
        ]);
        let first = normalize(&payload);
        let second = normalize(&payload);
        assert_eq!(first, second);

        let ids: Vec<_> = first.items.iter().map(|item| item.id.clone()).collect();
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[0], ids[2]);
        assert_ne!(ids[1], ids[2]);
        assert!(ids[1].as_str().ends_with("-2"));
    }
}
