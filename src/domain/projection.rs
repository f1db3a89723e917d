use super::entities::{NormalizedItem, ResolvedValues, Row, ValuationResult};
use super::valuation::resolve;

/// Size suffix the image CDN understands for large renders.
pub const LARGE_IMAGE_SUFFIX: &str = "/360fx360f";
const ECONOMY_IMAGE_PATH: &str = "/economy/image/";

pub fn project(item: &NormalizedItem, resolved: ResolvedValues) -> Row {
    Row {
        key: item.id.clone(),
        name: item.display_name.clone(),
        quantity: item.quantity,
        unit_price: resolved.unit_price,
        line_total: resolved.line_total,
        image_url: item.image_url.as_deref().map(large_image_url),
    }
}

/// Projects every item of a valuation snapshot, preserving backend order.
pub fn project_all(result: &ValuationResult) -> Vec<Row> {
    result
        .items
        .iter()
        .map(|item| project(item, resolve(item)))
        .collect()
}

/// Requests the large render for CDN image paths; other URLs pass through.
pub fn large_image_url(url: &str) -> String {
    if url.contains(LARGE_IMAGE_SUFFIX) || !url.contains(ECONOMY_IMAGE_PATH) {
        url.to_string()
    } else {
        format!("{url}{LARGE_IMAGE_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{normalizer::normalize, valuation::evaluate};

    const CDN: &str = "https://community.cdn.example.net/economy/image/abc123";

    #[test]
    fn economy_images_get_large_suffix() {
        assert_eq!(large_image_url(CDN), format!("{CDN}/360fx360f"));
    }

    #[test]
    fn already_sized_and_foreign_images_pass_through() {
        let sized = format!("{CDN}/360fx360f");
        assert_eq!(large_image_url(&sized), sized);
        assert_eq!(
            large_image_url("https://img.example.com/a.png"),
            "https://img.example.com/a.png"
        );
    }

    #[test]
    fn projects_bare_list_item_with_large_image() {
        let result = evaluate(normalize(&json!([
            { "market_hash_name": "AK-47", "total_amount": 3, "unit_price": 2.5,
              "sample_icon_url": CDN }
        ])));
        let rows = project_all(&result);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.key, result.items[0].id);
        assert_eq!(row.name, "AK-47");
        assert_eq!(row.quantity, 3.0);
        assert_eq!(row.unit_price, 2.5);
        assert_eq!(row.line_total, 7.5);
        assert_eq!(row.image_url.as_deref(), Some(format!("{CDN}/360fx360f").as_str()));
    }

    #[test]
    fn zero_quantity_row_is_kept() {
        let rows = project_all(&evaluate(normalize(&json!([{ "name": "Case", "count": 0 }]))));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 0.0);
        assert_eq!(rows[0].unit_price, 0.0);
        assert_eq!(rows[0].line_total, 0.0);
        assert_eq!(rows[0].image_url, None);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let payload = json!({
            "groups": [
                { "market_hash_name": "B", "total_amount": 2, "unit_price": 1 },
                { "market_hash_name": "A", "group_price": 5 },
                { "market_hash_name": "A", "group_price": 5 },
            ],
            "total_value": 0,
        });
        let first = project_all(&evaluate(normalize(&payload)));
        let second = project_all(&evaluate(normalize(&payload)));
        assert_eq!(first, second);
    }
}
