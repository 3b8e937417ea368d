use super::*;

// =============================================================
// ChatRequest
// =============================================================

#[test]
fn chat_request_serializes_message_field() {
    let body = serde_json::to_value(ChatRequest { message: "matera amarilla" }).unwrap();
    assert_eq!(body, serde_json::json!({ "message": "matera amarilla" }));
}

// =============================================================
// ChatResponse
// =============================================================

#[test]
fn response_with_text_and_products_decodes() {
    let raw = r#"{
        "ok": true,
        "text": "Tengo estas opciones",
        "products": [
            {"id": 7, "nombre": "Matera", "precio": 15000.0, "nota": "Barro cocido", "imagen": "/media/m.jpg"}
        ]
    }"#;
    let response: ChatResponse = serde_json::from_str(raw).unwrap();
    assert!(response.ok);
    assert_eq!(response.text.as_deref(), Some("Tengo estas opciones"));
    let products = response.products.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, ProductId::Number(7));
    assert_eq!(products[0].display_name, "Matera");
    assert!((products[0].price - 15000.0).abs() < f64::EPSILON);
    assert_eq!(products[0].note.as_deref(), Some("Barro cocido"));
    assert_eq!(products[0].image.as_deref(), Some("/media/m.jpg"));
}

#[test]
fn response_missing_ok_is_failure() {
    let response: ChatResponse = serde_json::from_str(r#"{"error": "Falta 'message'"}"#).unwrap();
    assert!(!response.ok);
    assert_eq!(response.error.as_deref(), Some("Falta 'message'"));
}

#[test]
fn product_price_accepts_numeric_string() {
    let product: ProductRef = serde_json::from_str(r#"{"id": "abc", "nombre": "Jarrón", "precio": " 42500.50 "}"#).unwrap();
    assert_eq!(product.id, ProductId::Text("abc".into()));
    assert!((product.price - 42500.5).abs() < f64::EPSILON);
    assert!(product.note.is_none());
    assert!(product.image.is_none());
}

#[test]
fn product_price_rejects_non_numeric() {
    let result: Result<ProductRef, _> = serde_json::from_str(r#"{"id": 1, "nombre": "Plato", "precio": "caro"}"#);
    assert!(result.is_err());
    let result: Result<ProductRef, _> = serde_json::from_str(r#"{"id": 1, "nombre": "Plato", "precio": null}"#);
    assert!(result.is_err());
}

#[test]
fn malformed_product_is_skipped_and_text_kept() {
    let raw = r#"{"ok": true, "text": "Mira estas", "products": [{"id": 7, "nombre": "Matera", "precio": null}]}"#;
    let response: ChatResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(response.text.as_deref(), Some("Mira estas"));
    assert_eq!(response.products, Some(Vec::new()));
}

#[test]
fn malformed_product_does_not_drop_its_neighbours() {
    let raw = r#"{"ok": true, "products": [
        {"id": 1, "nombre": "Plato"},
        {"id": 2, "nombre": "Jarrón", "precio": 42500}
    ]}"#;
    let response: ChatResponse = serde_json::from_str(raw).unwrap();
    let products = response.products.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].display_name, "Jarrón");
}

#[test]
fn null_products_decode_as_absent() {
    let response: ChatResponse = serde_json::from_str(r#"{"ok": true, "products": null}"#).unwrap();
    assert!(response.products.is_none());
}

#[test]
fn product_id_displays_plainly() {
    assert_eq!(ProductId::Number(7).to_string(), "7");
    assert_eq!(ProductId::Text("set-3".into()).to_string(), "set-3");
}

// =============================================================
// ChatReply
// =============================================================

#[test]
fn reply_from_ok_false_is_application_failure() {
    let response = ChatResponse { ok: false, error: Some("boom".into()), ..ChatResponse::default() };
    assert_eq!(ChatReply::from(response), ChatReply::ApplicationFailure { reason: Some("boom".into()) });
}

#[test]
fn reply_from_ok_false_ignores_text() {
    let response = ChatResponse { ok: false, text: Some("Hola".into()), ..ChatResponse::default() };
    assert!(matches!(ChatReply::from(response), ChatReply::ApplicationFailure { .. }));
}

#[test]
fn reply_from_ok_treats_empty_text_as_absent() {
    let response = ChatResponse { ok: true, text: Some(String::new()), ..ChatResponse::default() };
    assert_eq!(ChatReply::from(response), ChatReply::Success { text: None, products: Vec::new() });
}

#[test]
fn reply_from_error_is_transport_failure() {
    let reply = ChatReply::from_result(Err(ChatError::Timeout { ms: 10 }));
    assert_eq!(reply, ChatReply::TransportFailure(ChatError::Timeout { ms: 10 }));
    assert_eq!(reply.kind(), "transport_failure");
}

#[test]
fn reply_kind_labels_each_variant() {
    let success = ChatReply::Success { text: None, products: Vec::new() };
    let failure = ChatReply::ApplicationFailure { reason: None };
    assert_eq!(success.kind(), "success");
    assert_eq!(failure.kind(), "application_failure");
}
