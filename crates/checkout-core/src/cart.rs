//! # Cart Validation
//!
//! Re-validates an untrusted cart payload against the trusted catalog.
//!
//! The pipeline is strict and ordered: the first failing check wins, and no
//! partial results are produced. Unknown fields are rejected outright rather
//! than ignored, so a payload cannot smuggle extra data past the schema.
//! `name` and `price` are accepted as optional echo fields (the client may
//! legitimately send back what it displayed) but are verified against the
//! catalog, never trusted.

use crate::catalog::{Catalog, Product};
use crate::error::{CheckoutError, CheckoutResult};
use serde_json::Value;

/// Maximum number of line items per cart
pub const MAX_LINE_ITEMS: usize = 20;

/// Maximum quantity per line item
pub const MAX_QUANTITY_PER_ITEM: i64 = 10;

/// Keys a cart entry may carry. Anything else fails validation.
const ALLOWED_ITEM_KEYS: &[&str] = &["id", "quantity", "selectedColor", "name", "price", "image"];

/// A cart entry proven consistent with the catalog at validation time
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLineItem {
    /// The canonical catalog record, not the client's echo
    pub product: Product,

    /// Quantity, 1..=10
    pub quantity: u32,

    /// Chosen color, a member of `product.colors` when present
    pub selected_color: Option<String>,
}

/// Validate a raw request body into an ordered list of line items.
///
/// Output order equals input order: positions map 1:1 to provider
/// line-item positions.
pub fn validate_cart(body: &Value, catalog: &Catalog) -> CheckoutResult<Vec<ValidatedLineItem>> {
    let obj = body
        .as_object()
        .ok_or_else(|| CheckoutError::InvalidPayload("Request body must be a JSON object.".into()))?;

    assert_allowed_keys(obj, &["items"], "Body")?;

    let items = obj
        .get("items")
        .and_then(Value::as_array)
        .filter(|items| (1..=MAX_LINE_ITEMS).contains(&items.len()))
        .ok_or_else(|| {
            CheckoutError::InvalidItems(format!(
                "items must be an array with 1 to {MAX_LINE_ITEMS} entries."
            ))
        })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_cart_item(item, index, catalog))
        .collect()
}

fn validate_cart_item(
    item: &Value,
    index: usize,
    catalog: &Catalog,
) -> CheckoutResult<ValidatedLineItem> {
    let obj = item
        .as_object()
        .ok_or_else(|| CheckoutError::InvalidItem(format!("items[{index}] must be an object.")))?;

    assert_allowed_keys(obj, ALLOWED_ITEM_KEYS, &format!("items[{index}]"))?;

    let product = obj
        .get("id")
        .and_then(Value::as_str)
        .and_then(|id| catalog.get(id))
        .ok_or_else(|| {
            CheckoutError::InvalidProduct(format!("items[{index}].id is not a recognized product."))
        })?;

    let quantity = obj
        .get("quantity")
        .and_then(Value::as_i64)
        .filter(|q| (1..=MAX_QUANTITY_PER_ITEM).contains(q))
        .ok_or_else(|| {
            CheckoutError::InvalidQuantity(format!(
                "items[{index}].quantity must be an integer between 1 and {MAX_QUANTITY_PER_ITEM}."
            ))
        })?;

    let selected_color = match obj.get("selectedColor") {
        None => None,
        Some(value) => {
            let color = value
                .as_str()
                .filter(|c| product.allows_color(c))
                .ok_or_else(|| {
                    CheckoutError::InvalidOption(format!(
                        "items[{index}].selectedColor is not allowed for this product."
                    ))
                })?;
            Some(color.to_string())
        }
    };

    if let Some(name) = obj.get("name") {
        if name.as_str() != Some(product.name.as_str()) {
            return Err(CheckoutError::TamperedPayload(format!(
                "items[{index}].name does not match the product catalog."
            )));
        }
    }

    if let Some(price) = obj.get("price") {
        // Client prices are decimal major units; normalize to integer minor
        // units before comparing so 89.00 and 89 both match 8900.
        let normalized = price
            .as_f64()
            .filter(|p| p.is_finite())
            .map(|p| (p * 100.0).round() as i64);
        if normalized != Some(product.unit_amount) {
            return Err(CheckoutError::TamperedPayload(format!(
                "items[{index}].price does not match the product catalog."
            )));
        }
    }

    Ok(ValidatedLineItem {
        product: product.clone(),
        quantity: quantity as u32,
        selected_color,
    })
}

fn assert_allowed_keys(
    obj: &serde_json::Map<String, Value>,
    allowed: &[&str],
    field_name: &str,
) -> CheckoutResult<()> {
    let unexpected: Vec<&str> = obj
        .keys()
        .map(String::as_str)
        .filter(|key| !allowed.contains(key))
        .collect();

    if unexpected.is_empty() {
        Ok(())
    } else {
        Err(CheckoutError::InvalidPayload(format!(
            "{field_name} contains unsupported fields: {}",
            unexpected.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    #[test]
    fn test_valid_cart_preserves_order() {
        let body = json!({
            "items": [
                { "id": "rise-cushion-slate", "quantity": 1 },
                { "id": "rise-cushion-sand", "quantity": 2, "selectedColor": "Sage" },
            ]
        });

        let items = validate_cart(&body, &catalog()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product.id, "rise-cushion-slate");
        assert_eq!(items[0].selected_color, None);
        assert_eq!(items[1].product.id, "rise-cushion-sand");
        assert_eq!(items[1].quantity, 2);
        assert_eq!(items[1].selected_color.as_deref(), Some("Sage"));
    }

    #[test]
    fn test_body_must_be_object() {
        for body in [json!([]), json!("cart"), json!(42), json!(null)] {
            let err = validate_cart(&body, &catalog()).unwrap_err();
            assert_eq!(err.code(), "invalid_payload");
        }
    }

    #[test]
    fn test_body_rejects_extra_keys() {
        let body = json!({ "items": [], "coupon": "FREE" });
        let err = validate_cart(&body, &catalog()).unwrap_err();
        assert_eq!(err.code(), "invalid_payload");
        assert!(err.to_string().contains("coupon"));
    }

    #[test]
    fn test_items_length_bounds() {
        let entry = json!({ "id": "rise-cushion-sand", "quantity": 1 });

        let empty = json!({ "items": [] });
        assert_eq!(
            validate_cart(&empty, &catalog()).unwrap_err().code(),
            "invalid_items"
        );

        let too_many = json!({ "items": vec![entry.clone(); 21] });
        assert_eq!(
            validate_cart(&too_many, &catalog()).unwrap_err().code(),
            "invalid_items"
        );

        let at_limit = json!({ "items": vec![entry; 20] });
        assert_eq!(validate_cart(&at_limit, &catalog()).unwrap().len(), 20);

        let not_array = json!({ "items": "rise-cushion-sand" });
        assert_eq!(
            validate_cart(&not_array, &catalog()).unwrap_err().code(),
            "invalid_items"
        );
    }

    #[test]
    fn test_item_must_be_object() {
        let body = json!({ "items": ["rise-cushion-sand"] });
        let err = validate_cart(&body, &catalog()).unwrap_err();
        assert_eq!(err.code(), "invalid_item");
        assert!(err.to_string().contains("items[0]"));
    }

    #[test]
    fn test_item_rejects_unknown_fields() {
        let body = json!({
            "items": [{ "id": "rise-cushion-sand", "quantity": 1, "discount": 99 }]
        });
        let err = validate_cart(&body, &catalog()).unwrap_err();
        assert_eq!(err.code(), "invalid_payload");
        assert!(err.to_string().contains("discount"));
    }

    #[test]
    fn test_unknown_product() {
        let body = json!({ "items": [{ "id": "rise-cushion-neon", "quantity": 1 }] });
        assert_eq!(
            validate_cart(&body, &catalog()).unwrap_err().code(),
            "invalid_product"
        );

        let missing_id = json!({ "items": [{ "quantity": 1 }] });
        assert_eq!(
            validate_cart(&missing_id, &catalog()).unwrap_err().code(),
            "invalid_product"
        );
    }

    #[test]
    fn test_quantity_bounds() {
        for quantity in [json!(0), json!(11), json!(-1), json!(2.5), json!("3")] {
            let body = json!({ "items": [{ "id": "rise-cushion-sand", "quantity": quantity }] });
            let err = validate_cart(&body, &catalog()).unwrap_err();
            assert_eq!(err.code(), "invalid_quantity");
        }

        for quantity in [1, 10] {
            let body = json!({ "items": [{ "id": "rise-cushion-sand", "quantity": quantity }] });
            assert!(validate_cart(&body, &catalog()).is_ok());
        }
    }

    #[test]
    fn test_selected_color_must_be_offered() {
        let body = json!({
            "items": [{ "id": "rise-cushion-sage", "quantity": 1, "selectedColor": "Sand" }]
        });
        assert_eq!(
            validate_cart(&body, &catalog()).unwrap_err().code(),
            "invalid_option"
        );

        let null_color = json!({
            "items": [{ "id": "rise-cushion-sage", "quantity": 1, "selectedColor": null }]
        });
        assert_eq!(
            validate_cart(&null_color, &catalog()).unwrap_err().code(),
            "invalid_option"
        );
    }

    #[test]
    fn test_all_listed_colors_pass() {
        let catalog = catalog();
        for product in &catalog.products {
            for color in &product.colors {
                let body = json!({
                    "items": [{ "id": product.id, "quantity": 1, "selectedColor": color }]
                });
                let items = validate_cart(&body, &catalog).unwrap();
                assert_eq!(items[0].selected_color.as_deref(), Some(color.as_str()));
            }
        }
    }

    #[test]
    fn test_name_echo_verified() {
        let honest = json!({
            "items": [{ "id": "rise-cushion-sand", "quantity": 1, "name": "Rise Seat Lift Cushion" }]
        });
        assert!(validate_cart(&honest, &catalog()).is_ok());

        let forged = json!({
            "items": [{ "id": "rise-cushion-sand", "quantity": 1, "name": "Free Cushion" }]
        });
        assert_eq!(
            validate_cart(&forged, &catalog()).unwrap_err().code(),
            "tampered_payload"
        );
    }

    #[test]
    fn test_price_echo_verified() {
        // 89.00 major units == 8900 minor units
        let honest = json!({
            "items": [{ "id": "rise-cushion-sand", "quantity": 1, "price": 89.00 }]
        });
        assert!(validate_cart(&honest, &catalog()).is_ok());

        for price in [json!(0.01), json!(88.99), json!(8900), json!("89.00"), json!(null)] {
            let body = json!({
                "items": [{ "id": "rise-cushion-sand", "quantity": 1, "price": price }]
            });
            let err = validate_cart(&body, &catalog()).unwrap_err();
            assert_eq!(err.code(), "tampered_payload");
        }
    }

    #[test]
    fn test_tamper_wins_even_with_valid_rest() {
        let body = json!({
            "items": [{
                "id": "rise-cushion-sand",
                "quantity": 2,
                "selectedColor": "Sand",
                "name": "Rise Seat Lift Cushion",
                "price": 0.99
            }]
        });
        assert_eq!(
            validate_cart(&body, &catalog()).unwrap_err().code(),
            "tampered_payload"
        );
    }
}
