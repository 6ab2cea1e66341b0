//! The document model: the ordered top-level sequence of fields and groups
//! plus the namespace registry.
//!
//! This is what commands mutate and what the serializer reads. Node order
//! is exactly the visual top-to-bottom order and determines the emitted
//! `sh:order` and group indices.
//!
//! The document is not a rendering tree — hosts deliver placements, moves,
//! and removals here and keep their own widgets in sync. Moves are
//! loss-less: a field detached from one position and re-attached at
//! another keeps its `id` and every setting byte-for-byte.

use serde::{Deserialize, Serialize};

use crate::namespace::NamespaceRegistry;
use crate::types::{FieldDescriptor, GroupDescriptor, Node, SettingValue};

/// A position a field can occupy: an index in the top-level sequence, or an
/// index inside the group at a given top-level position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "at", rename_all = "snake_case")]
pub enum Slot {
    TopLevel { index: usize },
    InGroup { group: usize, index: usize },
}

/// The full form structure and its namespaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Top-level nodes in display order.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// The namespace registry; defaults to the built-in table when absent
    /// from the JSON input.
    #[serde(default = "NamespaceRegistry::with_defaults")]
    pub namespaces: NamespaceRegistry,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document with the built-in namespace registry.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            namespaces: NamespaceRegistry::with_defaults(),
        }
    }

    /// Insert a node at a top-level position (clamped to the sequence end).
    pub fn insert_node(&mut self, index: usize, node: Node) {
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, node);
    }

    /// Remove and return the top-level node at `index`.
    pub fn remove_node(&mut self, index: usize) -> Option<Node> {
        if index < self.nodes.len() {
            Some(self.nodes.remove(index))
        } else {
            None
        }
    }

    /// Insert a field at `slot`, clamping the index into range.
    ///
    /// Returns the field back unchanged when `slot` names a group that does
    /// not exist, so the caller can decide what to do with the detached
    /// descriptor.
    pub fn insert_field(&mut self, slot: Slot, field: FieldDescriptor) -> Result<(), FieldDescriptor> {
        match slot {
            Slot::TopLevel { index } => {
                self.insert_node(index, Node::Field(field));
                Ok(())
            }
            Slot::InGroup { group, index } => match self.group_mut(group) {
                Some(g) => {
                    let index = index.min(g.fields.len());
                    g.fields.insert(index, field);
                    Ok(())
                }
                None => Err(field),
            },
        }
    }

    /// Detach the field with `id` from wherever it lives, preserving it
    /// verbatim.
    pub fn detach_field(&mut self, id: &str) -> Option<FieldDescriptor> {
        if let Some(pos) = self
            .nodes
            .iter()
            .position(|n| matches!(n, Node::Field(f) if f.id == id))
        {
            if let Node::Field(field) = self.nodes.remove(pos) {
                return Some(field);
            }
        }
        for node in &mut self.nodes {
            if let Node::Group(g) = node {
                if let Some(pos) = g.fields.iter().position(|f| f.id == id) {
                    return Some(g.fields.remove(pos));
                }
            }
        }
        None
    }

    /// Move the field with `id` to `slot`, preserving its identity and
    /// settings. Re-parenting between the top level and groups is the same
    /// operation. Returns `false` when the id is unknown; the document is
    /// unchanged in that case.
    pub fn move_field(&mut self, id: &str, slot: Slot) -> bool {
        let Some(field) = self.detach_field(id) else {
            return false;
        };
        match self.insert_field(slot, field) {
            Ok(()) => true,
            Err(field) => {
                // Target group vanished between detach and insert (it can
                // only happen when the slot was stale); put the field back
                // at the end of the top level rather than losing it.
                self.nodes.push(Node::Field(field));
                false
            }
        }
    }

    /// Move the group at top-level `from` to top-level `to`. Groups cannot
    /// enter other groups. Returns `false` when `from` is not a group.
    pub fn move_group(&mut self, from: usize, to: usize) -> bool {
        match self.nodes.get(from) {
            Some(Node::Group(_)) => {
                let node = self.nodes.remove(from);
                let to = to.min(self.nodes.len());
                self.nodes.insert(to, node);
                true
            }
            _ => false,
        }
    }

    /// Shared lookup across the top level and all groups.
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields().find(|f| f.id == id)
    }

    /// Mutable lookup across the top level and all groups.
    pub fn field_mut(&mut self, id: &str) -> Option<&mut FieldDescriptor> {
        for node in &mut self.nodes {
            match node {
                Node::Field(f) if f.id == id => return Some(f),
                Node::Group(g) => {
                    if let Some(f) = g.fields.iter_mut().find(|f| f.id == id) {
                        return Some(f);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Update one setting of the field with `id`. Returns `false` when the
    /// id is unknown.
    pub fn update_field_setting(&mut self, id: &str, name: &str, value: SettingValue) -> bool {
        match self.field_mut(id) {
            Some(field) => {
                field.settings.set(name, value);
                true
            }
            None => false,
        }
    }

    /// Set the title of the field with `id`. Returns `false` when unknown.
    pub fn set_field_title(&mut self, id: &str, title: &str) -> bool {
        match self.field_mut(id) {
            Some(field) => {
                field.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// The group at top-level position `index`, if that node is a group.
    pub fn group(&self, index: usize) -> Option<&GroupDescriptor> {
        match self.nodes.get(index) {
            Some(Node::Group(g)) => Some(g),
            _ => None,
        }
    }

    /// Mutable access to the group at top-level position `index`.
    pub fn group_mut(&mut self, index: usize) -> Option<&mut GroupDescriptor> {
        match self.nodes.get_mut(index) {
            Some(Node::Group(g)) => Some(g),
            _ => None,
        }
    }

    /// All groups in top-level order. Their position in this iteration is
    /// the `sh:order` of the emitted property-group block.
    pub fn groups(&self) -> impl Iterator<Item = &GroupDescriptor> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Group(g) => Some(g),
            _ => None,
        })
    }

    /// All fields in fully flattened document order (groups expanded in
    /// place), each paired with its enclosing group, if any. The position
    /// in this iteration is the field's `sh:order`.
    pub fn flattened_fields(&self) -> Vec<(&FieldDescriptor, Option<&GroupDescriptor>)> {
        let mut out = Vec::new();
        for node in &self.nodes {
            match node {
                Node::Field(f) => out.push((f, None)),
                Node::Group(g) => {
                    for f in &g.fields {
                        out.push((f, Some(g)));
                    }
                }
            }
        }
        out
    }

    /// All fields in flattened order, without group attribution.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.nodes.iter().flat_map(|node| match node {
            Node::Field(f) => std::slice::from_ref(f).iter(),
            Node::Group(g) => g.fields.iter(),
        })
    }
}

// --- tests -------------------------------------------------------------------
