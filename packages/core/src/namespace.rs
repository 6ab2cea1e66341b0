//! The namespace registry: prefix → URI entries with a selection flag.
//!
//! Selected entries become `@prefix` declarations in the generated shape
//! document. Display and serialization share one deterministic order:
//! selected entries first, then unselected, each sorted case-insensitively
//! by prefix.

use serde::{Deserialize, Serialize};

/// Built-in prefix → URI table loaded by [`NamespaceRegistry::with_defaults`].
pub const BUILTIN_NAMESPACES: &[(&str, &str)] = &[
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("sh", "http://www.w3.org/ns/shacl#"),
    ("dash", "http://datashapes.org/dash#"),
    ("dcat", "http://www.w3.org/ns/dcat#"),
    ("dct", "http://purl.org/dc/terms/"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
    ("schema", "http://schema.org/"),
    ("prov", "http://www.w3.org/ns/prov#"),
    ("vcard", "http://www.w3.org/2006/vcard/ns#"),
    ("adms", "http://www.w3.org/ns/adms#"),
    ("pav", "http://purl.org/pav/"),
    ("bibo", "http://purl.org/ontology/bibo/"),
    ("oslc", "http://open-services.net/ns/core#"),
];

/// Prefixes selected out of the box.
pub const DEFAULT_SELECTED: &[&str] = &["rdf", "xsd", "sh", "dash", "dcat", "rdfs"];

/// One registry entry. The prefix is the unique key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamespaceEntry {
    pub prefix: String,
    pub uri: String,
    pub selected: bool,
}

/// Mapping of prefix → URI with selection state and an explicit edit
/// session.
///
/// Mutation is single-threaded (one command at a time); the serializer
/// reads entries synchronously via [`ordered_entries`](Self::ordered_entries).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NamespaceRegistry {
    entries: Vec<NamespaceEntry>,
    /// Prefix of the entry currently being edited, if any. Not persisted.
    #[serde(skip)]
    editing: Option<String>,
}

impl NamespaceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate a registry from a prefix → URI table, marking members of
    /// `preselected` as selected. Called once at startup.
    pub fn initialize<'a>(
        table: impl IntoIterator<Item = (&'a str, &'a str)>,
        preselected: &[&str],
    ) -> Self {
        let mut registry = Self::new();
        for (prefix, uri) in table {
            registry.entries.push(NamespaceEntry {
                prefix: prefix.to_string(),
                uri: uri.to_string(),
                selected: preselected.contains(&prefix),
            });
        }
        registry
    }

    /// The built-in table with the default selection.
    pub fn with_defaults() -> Self {
        Self::initialize(BUILTIN_NAMESPACES.iter().copied(), DEFAULT_SELECTED)
    }

    /// Insert or update an entry.
    ///
    /// An existing entry with the same prefix gets its URI overwritten and
    /// keeps its selection state. A new entry is inserted with `selected`.
    /// Silently a no-op when the prefix or URI is empty after trimming.
    pub fn upsert(&mut self, prefix: &str, uri: &str, selected: bool) {
        let prefix = prefix.trim();
        let uri = uri.trim();
        if prefix.is_empty() || uri.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|e| e.prefix == prefix) {
            Some(entry) => entry.uri = uri.to_string(),
            None => self.entries.push(NamespaceEntry {
                prefix: prefix.to_string(),
                uri: uri.to_string(),
                selected,
            }),
        }
    }

    /// Remove the entry with `prefix`. Returns whether an entry was removed.
    pub fn remove(&mut self, prefix: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.prefix != prefix);
        if self.editing.as_deref() == Some(prefix) {
            self.editing = None;
        }
        self.entries.len() != before
    }

    /// Flip the selection flag of `prefix`. Returns whether the entry exists.
    pub fn toggle_selected(&mut self, prefix: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.prefix == prefix) {
            Some(entry) => {
                entry.selected = !entry.selected;
                true
            }
            None => false,
        }
    }

    /// Mark `prefix` selected (used when a term-lookup result is applied).
    pub fn select(&mut self, prefix: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.prefix == prefix) {
            Some(entry) => {
                entry.selected = true;
                true
            }
            None => false,
        }
    }

    /// Look up an entry by prefix.
    pub fn get(&self, prefix: &str) -> Option<&NamespaceEntry> {
        self.entries.iter().find(|e| e.prefix == prefix)
    }

    /// Begin editing the entry with `prefix`. Returns the entry so the host
    /// can pre-fill its inputs, or `None` when the prefix is unknown.
    pub fn begin_edit(&mut self, prefix: &str) -> Option<&NamespaceEntry> {
        let entry = self.entries.iter().find(|e| e.prefix == prefix)?;
        self.editing = Some(entry.prefix.clone());
        self.entries.iter().find(|e| e.prefix == prefix)
    }

    /// Abandon the current edit session, if any.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Commit the current edit session with possibly rewritten prefix/URI.
    ///
    /// A prefix change is delete-old + insert-new; the new entry inherits
    /// the old selection flag. Outside an edit session this behaves like
    /// [`upsert`](Self::upsert) with `selected = false`. Empty inputs are
    /// silently ignored (the session stays open so the host can retry).
    pub fn commit_edit(&mut self, prefix: &str, uri: &str) {
        let prefix = prefix.trim();
        let uri = uri.trim();
        if prefix.is_empty() || uri.is_empty() {
            return;
        }
        let selected = match self.editing.take() {
            Some(old) if old != prefix => {
                let was_selected = self
                    .get(&old)
                    .map(|e| e.selected)
                    .unwrap_or(false);
                self.remove(&old);
                was_selected
            }
            Some(old) => self.get(&old).map(|e| e.selected).unwrap_or(false),
            None => false,
        };
        self.upsert(prefix, uri, selected);
    }

    /// All entries in display/serialization order: selected first, then
    /// unselected, each group sorted case-insensitively by prefix.
    pub fn ordered_entries(&self) -> Vec<&NamespaceEntry> {
        let mut ordered: Vec<&NamespaceEntry> = self.entries.iter().collect();
        ordered.sort_by(|a, b| {
            b.selected
                .cmp(&a.selected)
                .then_with(|| a.prefix.to_lowercase().cmp(&b.prefix.to_lowercase()))
        });
        ordered
    }

    /// The selected entries only, in display order.
    pub fn selected_entries(&self) -> Vec<&NamespaceEntry> {
        self.ordered_entries()
            .into_iter()
            .filter(|e| e.selected)
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// --- tests -------------------------------------------------------------------
