//! Constraint mapping: pure, per-field-type rules that turn a field's
//! settings into the ordered sequence of SHACL/DASH constraints of its
//! property shape.
//!
//! [`map_field`] produces a structured list of [`Constraint`]s; the
//! `render` module turns them into Turtle text in one formatting pass.
//! Keeping the two apart means the mapping logic is testable without any
//! text layout concerns.
//!
//! All numeric settings arrive as strings. An empty (or unparseable) value
//! means "unset" and the corresponding constraint is omitted — never
//! emitted as zero.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{FieldDescriptor, FieldType, Settings};

/// A constraint value, just structured enough to render deterministically.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A prefixed name or bracketed IRI, rendered verbatim.
    Iri(String),
    /// A plain string literal, rendered quoted.
    Literal(String),
    /// A literal with a datatype suffix, rendered `"value"^^datatype`.
    Typed(String, String),
    /// Anything rendered verbatim and unquoted: numbers, counts,
    /// `dash:` editor/viewer identifiers.
    Raw(String),
    /// An enumeration, rendered `( "a" "b" "c" )`.
    List(Vec<String>),
}

/// One `predicate value ;` line of a property shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub predicate: &'static str,
    pub value: Value,
}

impl Constraint {
    fn new(predicate: &'static str, value: Value) -> Self {
        Self { predicate, value }
    }
}

/// `prefix:local` shape, tested anywhere in the string. A value with no
/// such colon pattern gets wrapped in angle brackets.
static PREFIXED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^:\n\r]+:[^:\n\r]+").expect("invalid prefixed-name regex")
});

/// Render a user-entered identifier as a Turtle term: values that already
/// look like a prefixed name (`prefix:local`) pass through unwrapped,
/// everything else is wrapped in `<…>`. Users can therefore type either a
/// CURIE or a raw URI.
///
/// The test is a substring search, so a URI whose only colon sits in the
/// scheme also passes through unwrapped. Kept as-is for output
/// compatibility with existing documents.
pub fn uri_ref(value: &str) -> String {
    if PREFIXED_RE.is_match(value) {
        value.to_string()
    } else {
        format!("<{}>", value)
    }
}

/// Derive a property-path slug from a field title: trimmed, lowercased,
/// whitespace runs collapsed to single underscores.
pub fn slug(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// The `sh:datatype` of a field, given its type and settings.
fn datatype(field: &FieldDescriptor) -> &'static str {
    match field.field_type {
        FieldType::Text => {
            if field.settings.text("text-subtype") == "rich-text" {
                "rdf:HTML"
            } else {
                "xsd:string"
            }
        }
        FieldType::Number => {
            if field.settings.text("number-type") == "float" {
                "xsd:decimal"
            } else {
                "xsd:integer"
            }
        }
        FieldType::Date => "xsd:date",
        FieldType::Datetime => "xsd:dateTime",
        FieldType::Boolean => "xsd:boolean",
        FieldType::Uri => "xsd:anyURI",
        FieldType::Select => "xsd:string",
    }
}

/// A numeric setting: `Some` only when non-empty and parseable.
fn numeric(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    if raw.is_empty() || raw.parse::<f64>().is_err() {
        None
    } else {
        Some(raw)
    }
}

fn count(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Map one field to the ordered constraints of its property shape.
///
/// `group_uri` is the URI of the enclosing group, when the field sits in
/// one; `order` is the field's zero-based position in the fully flattened
/// document. Pure: equal inputs always give equal output, and no setting
/// combination can fail — missing or malformed settings degrade to
/// omitted constraints.
pub fn map_field(
    field: &FieldDescriptor,
    group_uri: Option<&str>,
    order: usize,
) -> Vec<Constraint> {
    let s = &field.settings;
    let dt = datatype(field);
    let mut out = Vec::new();

    // Path: explicit URI/CURIE, or a default-namespace slug of the title.
    let path = s.text("uri-path").trim();
    if path.is_empty() {
        out.push(Constraint::new(
            "sh:path",
            Value::Iri(format!(":{}", slug(&field.title))),
        ));
    } else {
        out.push(Constraint::new("sh:path", Value::Iri(uri_ref(path))));
    }

    out.push(Constraint::new(
        "sh:name",
        Value::Literal(field.title.clone()),
    ));

    let description = s.text("description");
    if !description.is_empty() {
        out.push(Constraint::new(
            "sh:description",
            Value::Literal(description.to_string()),
        ));
    }

    let default = s.text("default-value");
    if !default.is_empty() {
        let value = match field.field_type {
            // Numeric literals go out unquoted, without a datatype suffix.
            FieldType::Number => Value::Raw(default.to_string()),
            _ if dt == "xsd:string" => Value::Literal(default.to_string()),
            _ => Value::Typed(default.to_string(), dt.to_string()),
        };
        out.push(Constraint::new("sh:defaultValue", value));
    }

    out.push(Constraint::new("sh:datatype", Value::Raw(dt.to_string())));

    match field.field_type {
        FieldType::Text => map_text(s, &mut out),
        FieldType::Number => {
            if let Some(min) = numeric(s.text("min-value")) {
                out.push(Constraint::new("sh:minInclusive", Value::Raw(min.into())));
            }
            if let Some(max) = numeric(s.text("max-value")) {
                out.push(Constraint::new("sh:maxInclusive", Value::Raw(max.into())));
            }
            push_hints(&mut out, "TextFieldEditor", "LiteralViewer");
        }
        FieldType::Date | FieldType::Datetime => {
            let (min_key, max_key, editor) = match field.field_type {
                FieldType::Date => ("min-date", "max-date", "DatePickerEditor"),
                _ => ("min-datetime", "max-datetime", "DateTimePickerEditor"),
            };
            let min = s.text(min_key).trim();
            if !min.is_empty() {
                out.push(Constraint::new(
                    "sh:minInclusive",
                    Value::Typed(min.to_string(), dt.to_string()),
                ));
            }
            let max = s.text(max_key).trim();
            if !max.is_empty() {
                out.push(Constraint::new(
                    "sh:maxInclusive",
                    Value::Typed(max.to_string(), dt.to_string()),
                ));
            }
            push_hints(&mut out, editor, "LiteralViewer");
        }
        FieldType::Boolean => push_hints(&mut out, "BooleanSelectEditor", "LiteralViewer"),
        FieldType::Uri => {
            let pattern = s.text("uri-pattern");
            if !pattern.is_empty() {
                out.push(Constraint::new(
                    "sh:pattern",
                    Value::Literal(pattern.to_string()),
                ));
            }
            let subclass_of = s.text("subclass-of-uri").trim();
            if !subclass_of.is_empty() {
                out.push(Constraint::new(
                    "dash:rootClass",
                    Value::Iri(uri_ref(subclass_of)),
                ));
                push_hints(&mut out, "SubClassEditor", "URIViewer");
            } else {
                push_hints(&mut out, "URIEditor", "URIViewer");
            }
        }
        FieldType::Select => {
            if s.text("select-subtype") == "instance-of" {
                let class = s.text("instance-of-uri").trim();
                if !class.is_empty() {
                    out.push(Constraint::new("sh:class", Value::Iri(uri_ref(class))));
                }
                out.push(Constraint::new(
                    "dash:editor",
                    Value::Raw("dash:InstancesSelectEditor".into()),
                ));
            } else {
                let options: Vec<String> = s
                    .text("options")
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect();
                if !options.is_empty() {
                    out.push(Constraint::new("sh:in", Value::List(options)));
                }
                out.push(Constraint::new(
                    "dash:editor",
                    Value::Raw("dash:EnumSelectEditor".into()),
                ));
            }
            out.push(Constraint::new(
                "dash:viewer",
                Value::Raw("dash:LiteralViewer".into()),
            ));
        }
    }

    // Cardinality: 1/1 by default; optional lowers the floor; multifield
    // lets explicit counts override, with blank inputs falling back.
    let mut min_count: i64 = if s.flag("optional") { 0 } else { 1 };
    let mut max_count: i64 = 1;
    if s.flag("multifield") {
        if let Some(n) = count(s.text("min-count")) {
            min_count = n;
        }
        if let Some(n) = count(s.text("max-count")) {
            max_count = n;
        }
    }
    out.push(Constraint::new(
        "sh:minCount",
        Value::Raw(min_count.to_string()),
    ));
    out.push(Constraint::new(
        "sh:maxCount",
        Value::Raw(max_count.to_string()),
    ));

    if let Some(uri) = group_uri {
        out.push(Constraint::new("sh:group", Value::Iri(uri_ref(uri))));
    }

    out.push(Constraint::new("sh:order", Value::Raw(order.to_string())));

    out
}

/// Text-specific constraints: length/pattern bounds, then editor and
/// viewer hints selected by subtype × language-selector.
fn map_text(s: &Settings, out: &mut Vec<Constraint>) {
    if let Some(min) = numeric(s.text("min-length")) {
        out.push(Constraint::new("sh:minLength", Value::Raw(min.into())));
    }
    if let Some(max) = numeric(s.text("max-length")) {
        out.push(Constraint::new("sh:maxLength", Value::Raw(max.into())));
    }
    let pattern = s.text("pattern");
    if !pattern.is_empty() {
        out.push(Constraint::new(
            "sh:pattern",
            Value::Literal(pattern.to_string()),
        ));
    }

    let with_lang = s.flag("language-selector");
    match s.text("text-subtype") {
        "multiline" => {
            let editor = if with_lang {
                "TextAreaWithLangEditor"
            } else {
                "TextAreaEditor"
            };
            push_hints(out, editor, "LiteralViewer");
        }
        "rich-text" => push_hints(out, "RichTextEditor", "HTMLViewer"),
        "blank" => push_hints(out, "BlankNodeEditor", "BlankNodeViewer"),
        "autocomplete" => {
            let class = s.text("autocomplete-class").trim();
            if !class.is_empty() {
                out.push(Constraint::new("sh:class", Value::Iri(uri_ref(class))));
            }
            push_hints(out, "AutoCompleteEditor", "LiteralViewer");
        }
        // "standard" and anything unrecognised.
        _ => {
            let editor = if with_lang {
                "TextFieldWithLangEditor"
            } else {
                "TextFieldEditor"
            };
            push_hints(out, editor, "LiteralViewer");
        }
    }
}

fn push_hints(out: &mut Vec<Constraint>, editor: &str, viewer: &str) {
    out.push(Constraint::new(
        "dash:editor",
        Value::Raw(format!("dash:{editor}")),
    ));
    out.push(Constraint::new(
        "dash:viewer",
        Value::Raw(format!("dash:{viewer}")),
    ));
}

// --- tests -------------------------------------------------------------------
