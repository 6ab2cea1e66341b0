//! Turtle serialization of a [`Document`] into a SHACL shape document.
//!
//! One deterministic, synchronous pass over a document snapshot: the
//! selected prefix declarations, the fixed node-shape header, one property
//! shape per field in flattened display order, and one property-group
//! block per group. Serialization is total — it cannot fail for any
//! well-formed document; malformed or missing settings degrade to omitted
//! constraints inside `rules`.
//!
//! No escaping of special characters beyond literal quoting is performed.

use crate::document::Document;
use crate::rules::{self, Value};

/// Serialize a document snapshot into the textual shape document.
pub fn serialize(document: &Document) -> String {
    let mut out = String::new();

    // Prefix block: selected namespaces in display order.
    for entry in document.namespaces.selected_entries() {
        out.push_str(&format!("@prefix {}: <{}> .\n", entry.prefix, entry.uri));
    }
    if !out.is_empty() {
        out.push('\n');
    }

    out.push_str(":DatasetShape a sh:NodeShape ;\n");
    out.push_str("    sh:targetClass dcat:Dataset ;\n");

    for (order, (field, group)) in document.flattened_fields().into_iter().enumerate() {
        out.push_str("    sh:property [\n");
        for constraint in rules::map_field(field, group.map(|g| g.uri.as_str()), order) {
            out.push_str(&format!(
                "        {} {} ;\n",
                constraint.predicate,
                render_value(&constraint.value)
            ));
        }
        out.push_str("    ] ;\n");
    }

    // The last property block (or the header, when there are no fields)
    // terminates the shape statement with a period instead of a semicolon.
    let mut text = out.trim_end().to_string();
    if text.ends_with(';') {
        text.pop();
        text.push('.');
    }
    text.push('\n');

    for (index, group) in document.groups().enumerate() {
        text.push('\n');
        text.push_str(&format!("{}\n", rules::uri_ref(&group.uri)));
        text.push_str("    a sh:PropertyGroup ;\n");
        text.push_str(&format!("    sh:order {} ;\n", index));
        text.push_str(&format!("    rdfs:label \"{}\" .\n", group.label));
    }

    text
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Iri(s) | Value::Raw(s) => s.clone(),
        Value::Literal(s) => format!("\"{}\"", s),
        Value::Typed(s, datatype) => format!("\"{}\"^^{}", s, datatype),
        Value::List(items) => {
            let quoted: Vec<String> = items.iter().map(|i| format!("\"{}\"", i)).collect();
            format!("( {} )", quoted.join(" "))
        }
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::NamespaceRegistry;
    use crate::types::{FieldDescriptor, FieldType, GroupDescriptor, Node, SettingValue};

    fn field(field_type: FieldType, title: &str) -> FieldDescriptor {
        let mut f = FieldDescriptor::new(field_type);
        f.title = title.to_string();
        f
    }

    fn doc_with_prefix() -> Document {
        let mut doc = Document::new();
        doc.namespaces =
            NamespaceRegistry::initialize([("ex", "http://example.org/")], &["ex"]);
        doc
    }

    #[test]
    fn full_name_text_field_output() {
        let mut doc = doc_with_prefix();
        doc.insert_node(0, Node::Field(field(FieldType::Text, "Full Name")));

        let expected = "\
@prefix ex: <http://example.org/> .

:DatasetShape a sh:NodeShape ;
    sh:targetClass dcat:Dataset ;
    sh:property [
        sh:path :full_name ;
        sh:name \"Full Name\" ;
        sh:datatype xsd:string ;
        dash:editor dash:TextFieldEditor ;
        dash:viewer dash:LiteralViewer ;
        sh:minCount 1 ;
        sh:maxCount 1 ;
        sh:order 0 ;
    ] .
";
        assert_eq!(serialize(&doc), expected);
    }

    #[test]
    fn empty_document_yields_terminated_header() {
        let mut doc = doc_with_prefix();
        doc.namespaces = NamespaceRegistry::new();

        let expected = "\
:DatasetShape a sh:NodeShape ;
    sh:targetClass dcat:Dataset .
";
        assert_eq!(serialize(&doc), expected);
    }

    #[test]
    fn no_selected_namespaces_means_no_prefix_block() {
        let mut doc = Document::new();
        doc.namespaces = NamespaceRegistry::initialize([("ex", "http://example.org/")], &[]);
        let text = serialize(&doc);
        assert!(text.starts_with(":DatasetShape"));
        assert!(!text.contains("@prefix"));
    }

    #[test]
    fn prefix_block_follows_registry_order() {
        let mut doc = Document::new();
        doc.namespaces = NamespaceRegistry::initialize(
            [
                ("z", "http://z.example/"),
                ("a", "http://a.example/"),
                ("m", "http://m.example/"),
            ],
            &["z", "a"],
        );
        let text = serialize(&doc);
        let a = text.find("@prefix a:").unwrap();
        let z = text.find("@prefix z:").unwrap();
        assert!(a < z, "selected prefixes sort alphabetically");
        assert!(!text.contains("@prefix m:"), "unselected prefixes are not declared");
    }

    #[test]
    fn group_fields_carry_group_reference_and_block() {
        let mut doc = doc_with_prefix();
        doc.insert_node(0, Node::Field(field(FieldType::Text, "Title")));
        doc.insert_node(
            1,
            Node::Group(GroupDescriptor {
                label: "Provenance".into(),
                uri: "ex:provenance".into(),
                fields: vec![field(FieldType::Date, "Issued")],
            }),
        );

        let text = serialize(&doc);
        assert!(text.contains("        sh:group ex:provenance ;\n"));
        // Flattened order: the group field comes second.
        assert!(text.contains("        sh:order 1 ;\n"));
        assert!(text.contains(
            "\nex:provenance\n    a sh:PropertyGroup ;\n    sh:order 0 ;\n    rdfs:label \"Provenance\" .\n"
        ));
    }

    #[test]
    fn group_order_counts_groups_not_nodes() {
        let mut doc = doc_with_prefix();
        doc.insert_node(
            0,
            Node::Group(GroupDescriptor {
                label: "A".into(),
                uri: "ex:a".into(),
                fields: vec![],
            }),
        );
        doc.insert_node(1, Node::Field(field(FieldType::Text, "mid")));
        doc.insert_node(
            2,
            Node::Group(GroupDescriptor {
                label: "B".into(),
                uri: "ex:b".into(),
                fields: vec![],
            }),
        );

        let text = serialize(&doc);
        assert!(text.contains("ex:a\n    a sh:PropertyGroup ;\n    sh:order 0 ;"));
        assert!(text.contains("ex:b\n    a sh:PropertyGroup ;\n    sh:order 1 ;"));
    }

    #[test]
    fn select_enumeration_renders_in_order() {
        let mut doc = doc_with_prefix();
        let mut f = field(FieldType::Select, "Theme");
        f.settings
            .set("options", SettingValue::Text("A, B, C".into()));
        doc.insert_node(0, Node::Field(f));

        assert!(serialize(&doc).contains("        sh:in ( \"A\" \"B\" \"C\" ) ;\n"));
    }

    #[test]
    fn number_field_with_bounds() {
        let mut doc = doc_with_prefix();
        let mut f = field(FieldType::Number, "Score");
        f.settings.set("min-value", SettingValue::Text("0".into()));
        f.settings.set("max-value", SettingValue::Text("100".into()));
        doc.insert_node(0, Node::Field(f));

        let text = serialize(&doc);
        assert!(text.contains("        sh:minInclusive 0 ;\n"));
        assert!(text.contains("        sh:maxInclusive 100 ;\n"));
        assert!(text.contains("        sh:datatype xsd:integer ;\n"));
    }

    #[test]
    fn last_property_block_is_period_terminated() {
        let mut doc = doc_with_prefix();
        doc.insert_node(0, Node::Field(field(FieldType::Text, "a")));
        doc.insert_node(1, Node::Field(field(FieldType::Boolean, "b")));

        let text = serialize(&doc);
        assert!(text.ends_with("    ] .\n"));
        assert_eq!(text.matches("    ] ;\n").count(), 1);
    }

    #[test]
    fn serialization_is_deterministic() {
        let mut doc = doc_with_prefix();
        doc.insert_node(0, Node::Field(field(FieldType::Uri, "Homepage")));
        assert_eq!(serialize(&doc), serialize(&doc));
    }
}
