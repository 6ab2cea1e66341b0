//! Core library of ShapeWright: a form model that compiles into a SHACL
//! shape document.
//!
//! A host UI lets a user assemble typed fields (and grouped collections of
//! fields) describing the shape of a dataset; this crate owns the
//! in-memory document those actions build, and the deterministic
//! compilation of that document — together with the selected namespace
//! prefixes — into a Turtle-syntax shape graph. It is the Rust-native
//! foundation for the `swright` CLI and the `shapewright-wasm`
//! WebAssembly bindings; rendering, drag-and-drop, and widgets live in
//! the host.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Descriptors: [`FieldDescriptor`], [`GroupDescriptor`], [`Node`], [`Settings`] |
//! | [`namespace`] | Prefix → URI registry with selection state and edit sessions |
//! | [`document`] | The ordered document model the commands mutate |
//! | [`command`] | Closed command set applied via [`apply`] |
//! | [`rules`] | Per-field-type constraint mapping to structured [`Constraint`]s |
//! | [`render`] | One-pass Turtle serialization via [`serialize`] |
//! | [`lookup`] | Remote term-search contract and last-query-wins guard |
//!
//! # Quick start
//!
//! ```rust
//! use shapewright::{apply, serialize, Command, Document, FieldType, Slot};
//!
//! let mut doc = Document::new();
//! apply(&mut doc, Command::AddField {
//!     field_type: FieldType::Text,
//!     slot: Slot::TopLevel { index: 0 },
//! }).unwrap();
//!
//! let turtle = serialize(&doc);
//! assert!(turtle.contains("sh:NodeShape"));
//! ```
//!
//! The whole pipeline is pure and synchronous: commands mutate the model,
//! `serialize` reads a snapshot, and nothing in between performs I/O or
//! can fail for a well-formed document.

pub mod command;
pub mod document;
pub mod lookup;
pub mod namespace;
pub mod render;
pub mod rules;
pub mod types;

pub use command::{apply, Command, CommandError, NodeRef, Outcome};
pub use document::{Document, Slot};
pub use lookup::{
    apply_term_selection, check_query, LookupError, LookupSession, LookupTicket, TermLookup,
    TermMatch,
};
pub use namespace::{NamespaceEntry, NamespaceRegistry};
pub use render::serialize;
pub use rules::{map_field, Constraint, Value};
pub use types::{FieldDescriptor, FieldType, GroupDescriptor, Node, SettingValue, Settings};
