//! The command dispatcher: a closed set of mutations applied to a
//! [`Document`].
//!
//! Hosts (the drag-and-drop UI, the CLI, the WASM boundary) never touch
//! the model directly — they describe each discrete user action as a
//! [`Command`] and hand it to [`apply`]. Commands are applied atomically:
//! a command either mutates the document and returns an [`Outcome`], or
//! returns a [`CommandError`] and leaves the document unchanged.
//!
//! Commands serialise as JSON with an `op` tag, e.g.
//! `{"op": "add_field", "field_type": "text", "slot": {"at": "top_level", "index": 0}}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Document, Slot};
use crate::render;
use crate::types::{FieldDescriptor, FieldType, GroupDescriptor, Node, SettingValue};

/// Addresses one top-level or nested node: fields by their stable id,
/// groups by their top-level position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum NodeRef {
    Field { id: String },
    Group { index: usize },
}

/// One discrete user action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Place a fresh field (new id, empty settings) at `slot`.
    AddField { field_type: FieldType, slot: Slot },
    /// Place a fresh, empty group at a top-level position.
    AddGroup { index: usize },
    /// Rewrite a field's title.
    SetTitle { field: String, title: String },
    /// Rewrite a group's label and URI.
    SetGroupHeader { group: usize, label: String, uri: String },
    /// Set one named setting of a field.
    UpdateSetting {
        field: String,
        name: String,
        value: SettingValue,
    },
    /// Move a field or group to a new position. A moved field keeps its id
    /// and settings verbatim; groups can only move within the top level.
    MoveNode { node: NodeRef, to: Slot },
    /// Remove a field or group (a group takes its fields with it).
    RemoveNode { node: NodeRef },
    /// Add a namespace, or overwrite the URI of an existing prefix.
    /// Empty inputs are silently ignored, mirroring the add form.
    UpsertNamespace { prefix: String, uri: String },
    RemoveNamespace { prefix: String },
    ToggleNamespace { prefix: String },
    /// Serialize the current snapshot into the shape document.
    GenerateDocument,
}

/// What a successfully applied command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The document changed (or the command was an accepted no-op).
    Changed,
    /// A field was added; `id` addresses it in later commands.
    Added { id: String },
    /// The generated shape document.
    Generated(String),
}

/// Errors returned when a command cannot be applied. The document is
/// never left partially mutated.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("no field with id {0:?}")]
    UnknownField(String),

    #[error("no group at top-level position {0}")]
    UnknownGroup(usize),

    #[error("no namespace with prefix {0:?}")]
    UnknownPrefix(String),

    #[error("groups cannot be nested inside groups")]
    GroupNesting,
}

/// Apply one command to the document.
pub fn apply(document: &mut Document, command: Command) -> Result<Outcome, CommandError> {
    match command {
        Command::AddField { field_type, slot } => {
            if let Slot::InGroup { group, .. } = slot {
                if document.group(group).is_none() {
                    return Err(CommandError::UnknownGroup(group));
                }
            }
            let field = FieldDescriptor::new(field_type);
            let id = field.id.clone();
            // The group was checked above, so the insert cannot hand the
            // field back.
            let _ = document.insert_field(slot, field);
            Ok(Outcome::Added { id })
        }

        Command::AddGroup { index } => {
            document.insert_node(index, Node::Group(GroupDescriptor::default()));
            Ok(Outcome::Changed)
        }

        Command::SetTitle { field, title } => {
            if document.set_field_title(&field, &title) {
                Ok(Outcome::Changed)
            } else {
                Err(CommandError::UnknownField(field))
            }
        }

        Command::SetGroupHeader { group, label, uri } => {
            match document.group_mut(group) {
                Some(g) => {
                    g.label = label;
                    g.uri = uri;
                    Ok(Outcome::Changed)
                }
                None => Err(CommandError::UnknownGroup(group)),
            }
        }

        Command::UpdateSetting { field, name, value } => {
            if document.update_field_setting(&field, &name, value) {
                Ok(Outcome::Changed)
            } else {
                Err(CommandError::UnknownField(field))
            }
        }

        Command::MoveNode { node, to } => match node {
            NodeRef::Field { id } => {
                if document.field(&id).is_none() {
                    return Err(CommandError::UnknownField(id));
                }
                if let Slot::InGroup { group, .. } = to {
                    if document.group(group).is_none() {
                        return Err(CommandError::UnknownGroup(group));
                    }
                }
                document.move_field(&id, to);
                Ok(Outcome::Changed)
            }
            NodeRef::Group { index } => match to {
                Slot::InGroup { .. } => Err(CommandError::GroupNesting),
                Slot::TopLevel { index: to } => {
                    if document.move_group(index, to) {
                        Ok(Outcome::Changed)
                    } else {
                        Err(CommandError::UnknownGroup(index))
                    }
                }
            },
        },

        Command::RemoveNode { node } => match node {
            NodeRef::Field { id } => {
                if document.detach_field(&id).is_some() {
                    Ok(Outcome::Changed)
                } else {
                    Err(CommandError::UnknownField(id))
                }
            }
            NodeRef::Group { index } => {
                if document.group(index).is_some() {
                    document.remove_node(index);
                    Ok(Outcome::Changed)
                } else {
                    Err(CommandError::UnknownGroup(index))
                }
            }
        },

        Command::UpsertNamespace { prefix, uri } => {
            document.namespaces.upsert(&prefix, &uri, false);
            Ok(Outcome::Changed)
        }

        Command::RemoveNamespace { prefix } => {
            if document.namespaces.remove(&prefix) {
                Ok(Outcome::Changed)
            } else {
                Err(CommandError::UnknownPrefix(prefix))
            }
        }

        Command::ToggleNamespace { prefix } => {
            if document.namespaces.toggle_selected(&prefix) {
                Ok(Outcome::Changed)
            } else {
                Err(CommandError::UnknownPrefix(prefix))
            }
        }

        Command::GenerateDocument => Ok(Outcome::Generated(render::serialize(document))),
    }
}

// --- tests -------------------------------------------------------------------
