//! wasm-bindgen-test integration tests for the ShapeWright WASM bindings.
//!
//! Run with:
//!   wasm-pack test packages/wasm --node
//!
//! These tests compile to WASM and execute in a Node.js process, verifying
//! the exported API surface works end-to-end in a JavaScript host.

use wasm_bindgen_test::*;

// Configure all tests in this file to run in Node.js (no browser required).
wasm_bindgen_test_configure!(run_in_node_experimental);

use shapewright_wasm::{apply, generate, new_document};

fn apply_ok(doc: &str, command: &str) -> serde_json::Value {
    let result = apply(doc, command).expect("command should apply");
    serde_json::from_str(&result).expect("apply returns JSON")
}

// ---------------------------------------------------------------------------
// new_document()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn new_document_is_parseable_and_empty() {
    let doc = new_document();
    let value: serde_json::Value = serde_json::from_str(&doc).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// apply()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn add_field_returns_updated_document_and_id() {
    let doc = new_document();
    let result = apply_ok(
        &doc,
        r#"{"op": "add_field", "field_type": "text", "slot": {"at": "top_level", "index": 0}}"#,
    );
    assert!(result["added"].is_string());
    assert_eq!(result["document"]["nodes"].as_array().unwrap().len(), 1);
    assert!(result["generated"].is_null());
}

#[wasm_bindgen_test]
fn generate_command_returns_turtle() {
    let doc = new_document();
    let result = apply_ok(&doc, r#"{"op": "generate_document"}"#);
    let text = result["generated"].as_str().unwrap();
    assert!(text.contains(":DatasetShape a sh:NodeShape ;"));
}

#[wasm_bindgen_test]
fn invalid_command_json_returns_err() {
    let doc = new_document();
    assert!(apply(&doc, "not json").is_err());
    assert!(apply(&doc, r#"{"op": "fly_to_the_moon"}"#).is_err());
}

#[wasm_bindgen_test]
fn rejected_command_returns_err() {
    let doc = new_document();
    let result = apply(
        &doc,
        r#"{"op": "set_title", "field": "missing", "title": "x"}"#,
    );
    assert!(result.is_err(), "unknown field id should be rejected");
}

// ---------------------------------------------------------------------------
// generate()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn generate_full_pipeline() {
    let doc = new_document();
    let result = apply_ok(
        &doc,
        r#"{"op": "add_field", "field_type": "number", "slot": {"at": "top_level", "index": 0}}"#,
    );
    let id = result["added"].as_str().unwrap().to_string();
    let doc = result["document"].to_string();

    let result = apply_ok(
        &doc,
        &format!(r#"{{"op": "set_title", "field": "{id}", "title": "Score"}}"#),
    );
    let doc = result["document"].to_string();

    let text = generate(&doc).unwrap();
    assert!(text.contains("sh:name \"Score\" ;"));
    assert!(text.contains("sh:datatype xsd:integer ;"));
}

#[wasm_bindgen_test]
fn generate_rejects_bad_json() {
    assert!(generate("{").is_err());
}
