//! Core data types for the ShapeWright form model.
//!
//! This module defines the descriptors that make up a form document:
//! [`FieldDescriptor`], [`GroupDescriptor`], the [`Node`] sum of the two,
//! and the typed [`Settings`] map each field carries. All types serialise
//! to and from JSON, which is both the CLI input format and the boundary
//! format for the WASM bindings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The kind of value a field captures. Determines which settings the field
/// consumes and which SHACL/DASH constraints it produces.
///
/// Serialises as a lowercase string (e.g. `"datetime"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text; subtypes cover single-line, multiline, rich text (HTML),
    /// autocomplete, and blank-node entry.
    Text,
    /// Integer or float, mapped to `xsd:integer` / `xsd:decimal`.
    Number,
    /// Calendar date (`xsd:date`).
    Date,
    /// Date with time of day (`xsd:dateTime`).
    Datetime,
    /// True/false (`xsd:boolean`).
    Boolean,
    /// A URI-valued field (`xsd:anyURI`).
    Uri,
    /// A closed choice: either a literal option list or instances of a class.
    Select,
}

/// Formats the type as its lowercase wire-format string (e.g. `"text"`).
impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Number => write!(f, "number"),
            FieldType::Date => write!(f, "date"),
            FieldType::Datetime => write!(f, "datetime"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Uri => write!(f, "uri"),
            FieldType::Select => write!(f, "select"),
        }
    }
}

/// Parses a [`FieldType`] from its lowercase wire-format string.
///
/// Returns `Err` with a descriptive message if the string is not recognised.
impl std::str::FromStr for FieldType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(FieldType::Text),
            "number" => Ok(FieldType::Number),
            "date" => Ok(FieldType::Date),
            "datetime" => Ok(FieldType::Datetime),
            "boolean" => Ok(FieldType::Boolean),
            "uri" => Ok(FieldType::Uri),
            "select" => Ok(FieldType::Select),
            _ => Err(format!(
                "unknown field type {:?}; expected one of: \
                 text, number, date, datetime, boolean, uri, select",
                s
            )),
        }
    }
}

/// One setting value: a checkbox-style flag or a textual input.
///
/// Numeric settings (lengths, bounds, counts) are stored as their string
/// representation and parsed at serialization time, so an empty string means
/// "unset" rather than zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SettingValue {
    /// A checkbox-style setting (`optional`, `multifield`, `language-selector`).
    Flag(bool),
    /// Any other setting, kept verbatim as entered.
    Text(String),
}

/// The named settings of one field.
///
/// Missing entries read as the empty string (for text settings) or `false`
/// (for flags), so a descriptor with incomplete settings never aborts
/// serialization — absent constraints are simply omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, SettingValue>);

impl Settings {
    /// Create an empty settings map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The textual value of `name`, or `""` when unset or flag-valued.
    pub fn text(&self, name: &str) -> &str {
        match self.0.get(name) {
            Some(SettingValue::Text(s)) => s,
            _ => "",
        }
    }

    /// The flag value of `name`, or `false` when unset or text-valued.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(SettingValue::Flag(true)))
    }

    /// Set or replace a setting.
    pub fn set(&mut self, name: impl Into<String>, value: SettingValue) {
        self.0.insert(name.into(), value);
    }

    /// Iterate over all stored settings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingValue)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One leaf field of the form.
///
/// A field keeps its `id` and `settings` verbatim when it is moved —
/// between the top level and a group, or reordered — so moves are
/// loss-less. Only a field freshly placed from the palette gets a new id
/// and empty settings, via [`FieldDescriptor::new`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDescriptor {
    /// Opaque unique token (UUIDv7). Hand-written JSON may omit it; a
    /// fresh id is generated on deserialization.
    #[serde(default = "fresh_id")]
    pub id: String,

    /// The kind of value this field captures.
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// The human-readable label, emitted verbatim as `sh:name`.
    #[serde(default)]
    pub title: String,

    /// Whether the settings panel is open in the host UI. Carried so a
    /// document round-trips through JSON without losing view state.
    #[serde(default)]
    pub settings_expanded: bool,

    /// Named settings, see [`Settings`].
    #[serde(default)]
    pub settings: Settings,
}

fn fresh_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

impl FieldDescriptor {
    /// Create a fresh field with an auto-generated UUIDv7 id, empty title,
    /// and empty settings — the palette-drop case.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            id: fresh_id(),
            field_type,
            title: String::new(),
            settings_expanded: false,
            settings: Settings::new(),
        }
    }
}

/// A named, URI-addressed container of fields.
///
/// Exactly one nesting level: a group holds only fields, never other
/// groups. Removing a group removes all contained fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GroupDescriptor {
    /// Label emitted as `rdfs:label` on the property-group block.
    #[serde(default)]
    pub label: String,
    /// Group URI; referenced by each contained field's `sh:group`.
    #[serde(default)]
    pub uri: String,
    /// Contained fields in display order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// One top-level node of the document: a field or a group.
///
/// Serialises with a `kind` tag, e.g. `{"kind": "field", "type": "text", …}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Field(FieldDescriptor),
    Group(GroupDescriptor),
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_roundtrip_strings() {
        for s in ["text", "number", "date", "datetime", "boolean", "uri", "select"] {
            let t: FieldType = s.parse().unwrap();
            assert_eq!(t.to_string(), s);
        }
        assert!("textarea".parse::<FieldType>().is_err());
    }

    #[test]
    fn missing_settings_read_as_defaults() {
        let s = Settings::new();
        assert_eq!(s.text("uri-path"), "");
        assert!(!s.flag("optional"));
    }

    #[test]
    fn flag_and_text_do_not_cross_read() {
        let mut s = Settings::new();
        s.set("optional", SettingValue::Flag(true));
        s.set("pattern", SettingValue::Text("^a".into()));
        assert_eq!(s.text("optional"), "");
        assert!(!s.flag("pattern"));
        assert!(s.flag("optional"));
        assert_eq!(s.text("pattern"), "^a");
    }

    #[test]
    fn new_fields_get_distinct_ids() {
        let a = FieldDescriptor::new(FieldType::Text);
        let b = FieldDescriptor::new(FieldType::Text);
        assert_ne!(a.id, b.id);
        assert!(a.settings.is_empty());
    }

    #[test]
    fn node_json_is_kind_tagged() {
        let node = Node::Field(FieldDescriptor::new(FieldType::Date));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "field");
        assert_eq!(json["type"], "date");

        let group = serde_json::json!({
            "kind": "group",
            "label": "Provenance",
            "uri": "ex:provenance"
        });
        let node: Node = serde_json::from_value(group).unwrap();
        assert!(matches!(node, Node::Group(ref g) if g.fields.is_empty()));
    }

    #[test]
    fn settings_roundtrip_mixed_values() {
        let mut s = Settings::new();
        s.set("multifield", SettingValue::Flag(true));
        s.set("min-count", SettingValue::Text("2".into()));
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
