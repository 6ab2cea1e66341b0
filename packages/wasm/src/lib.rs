//! WebAssembly bindings for the ShapeWright core library.
//!
//! Exposes the document/command/serialize pipeline to JavaScript via
//! `wasm-bindgen`. Compile with `wasm-pack build` to produce an npm-ready
//! package that works in browsers, Node.js, and any other WASM host.
//!
//! The host UI owns rendering, drag-and-drop, and widgets; it keeps the
//! document as an opaque JSON string and speaks commands:
//!
//! ```js
//! import init, { new_document, apply, generate } from './shapewright_wasm.js';
//! await init();
//!
//! let doc = new_document();
//! const result = JSON.parse(apply(doc, JSON.stringify({
//!   op: 'add_field',
//!   field_type: 'text',
//!   slot: { at: 'top_level', index: 0 },
//! })));
//! doc = result.document;
//! apply(doc, JSON.stringify({ op: 'set_title', field: result.added, title: 'Full Name' }));
//!
//! console.log(generate(doc));
//! ```

use wasm_bindgen::prelude::*;

use shapewright::{apply as apply_command, Command, Document, Outcome};

/// One-time initialisation called at the start of every exported function.
///
/// Installs the `console_error_panic_hook` when the feature is enabled so
/// that Rust panics are forwarded to the browser console as readable errors
/// rather than appearing as generic "unreachable" WASM traps.
fn setup() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Create a fresh, empty document (built-in namespace registry, no nodes)
/// and return it as a JSON string.
#[wasm_bindgen]
pub fn new_document() -> String {
    setup();
    // An empty document always serialises.
    serde_json::to_string(&Document::new()).unwrap_or_default()
}

/// Apply one command to a document.
///
/// `document_json` is a document as produced by [`new_document`] or a
/// previous `apply` call; `command_json` is one command object with an
/// `op` tag. Returns a JSON object string:
///
/// ```json
/// { "document": { … }, "added": "<field id>" | null, "generated": "<turtle>" | null }
/// ```
///
/// Throws a descriptive string on parse failure or when the command is
/// rejected (unknown field id, unknown group, nested groups); the caller's
/// document is unchanged in that case.
#[wasm_bindgen]
pub fn apply(document_json: &str, command_json: &str) -> Result<String, JsValue> {
    setup();

    let mut document: Document = serde_json::from_str(document_json)
        .map_err(|e| JsValue::from_str(&format!("document parse error: {e}")))?;
    let command: Command = serde_json::from_str(command_json)
        .map_err(|e| JsValue::from_str(&format!("command parse error: {e}")))?;

    let outcome = apply_command(&mut document, command)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let (added, generated) = match outcome {
        Outcome::Changed => (None, None),
        Outcome::Added { id } => (Some(id), None),
        Outcome::Generated(text) => (None, Some(text)),
    };
    let result = serde_json::json!({
        "document": document,
        "added": added,
        "generated": generated,
    });
    Ok(result.to_string())
}

/// Serialize a document into its SHACL shape document.
///
/// Serialization is total: any document that parses will generate.
/// Throws a string error only on JSON parse failure.
#[wasm_bindgen]
pub fn generate(document_json: &str) -> Result<String, JsValue> {
    setup();

    let document: Document = serde_json::from_str(document_json)
        .map_err(|e| JsValue::from_str(&format!("document parse error: {e}")))?;
    Ok(shapewright::serialize(&document))
}
