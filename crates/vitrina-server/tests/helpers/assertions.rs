//! Custom assertions para tests.

use serde_json::Value;

/// Verifica que una respuesta de error tenga el envelope `{"error": "..."}`.
pub fn assert_error_envelope(json: &Value, expected_message: &str) {
    assert!(json.is_object(), "Error response should be a JSON object");

    let obj = json.as_object().unwrap();
    assert_eq!(
        obj.len(),
        1,
        "Error envelope should carry only the 'error' field, got {json}"
    );
    assert_eq!(
        obj.get("error").and_then(Value::as_str),
        Some(expected_message),
        "Unexpected error message in {json}"
    );
}

/// Verifica que un JSON tenga el schema publico de producto.
pub fn assert_product_schema(json: &Value) {
    assert!(json.is_object(), "Product should be a JSON object");

    let obj = json.as_object().unwrap();
    for field in [
        "id",
        "title",
        "title_en",
        "slug",
        "price",
        "image_url",
        "status",
        "created_at",
        "updated_at",
    ] {
        assert!(obj.contains_key(field), "Missing '{field}' field");
    }

    assert!(obj["slug"].is_string(), "'slug' should be a string");
    assert!(obj["price"].is_number(), "'price' should be a number");
    assert!(obj["status"].is_string(), "'status' should be a string");
}
