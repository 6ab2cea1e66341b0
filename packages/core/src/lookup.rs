//! The remote term-lookup contract.
//!
//! Looking up vocabulary terms is the one asynchronous operation in the
//! system: every keystroke issues a new query, and only the newest query's
//! result may be applied (last-query-wins). The model here is split three
//! ways:
//!
//! - [`TermLookup`] — the service trait. Implementations own the I/O
//!   (HTTP in the CLI, `fetch` in a browser host); this crate stays pure.
//! - [`LookupSession`] — a request-generation guard. The host calls
//!   [`issue`](LookupSession::issue) per query and checks
//!   [`accept`](LookupSession::accept) before using a result, which
//!   discards stale responses that arrive out of order.
//! - [`apply_term_selection`] — what choosing a result does to the model:
//!   the CURIE goes into the field's path setting, and the result's
//!   prefix is registered and selected.
//!
//! A lookup failure never touches the model; it is surfaced to the user
//! by the host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::Document;
use crate::types::SettingValue;

/// Queries shorter than this are rejected without hitting the service.
pub const MIN_QUERY_LEN: usize = 3;

/// One term returned by the lookup service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TermMatch {
    /// The term as a CURIE, e.g. `dct:title`.
    pub prefixed_name: String,
    /// The namespace URI backing the prefix.
    pub uri: String,
}

/// Errors surfaced by a lookup.
#[derive(Debug, Error, PartialEq)]
pub enum LookupError {
    #[error("query must be at least {MIN_QUERY_LEN} characters, got {0}")]
    QueryTooShort(usize),

    #[error("term lookup failed: {0}")]
    Service(String),
}

/// A term-search collaborator.
pub trait TermLookup {
    /// Search for terms matching `query`, in service-defined relevance
    /// order. Implementations should call [`check_query`] first.
    fn search(&self, query: &str) -> Result<Vec<TermMatch>, LookupError>;
}

/// Validate the minimum query length shared by all implementations.
pub fn check_query(query: &str) -> Result<(), LookupError> {
    let len = query.trim().chars().count();
    if len < MIN_QUERY_LEN {
        Err(LookupError::QueryTooShort(len))
    } else {
        Ok(())
    }
}

/// A ticket naming one issued query. Only the newest ticket is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket(u64);

/// Last-query-wins guard for in-flight lookups.
///
/// Results can arrive out of order; a result is only applied when its
/// ticket is still the newest one issued.
#[derive(Debug, Default)]
pub struct LookupSession {
    generation: u64,
}

impl LookupSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new query, superseding all earlier ones.
    pub fn issue(&mut self) -> LookupTicket {
        self.generation += 1;
        LookupTicket(self.generation)
    }

    /// Whether a result carrying `ticket` may still be applied.
    pub fn accept(&self, ticket: LookupTicket) -> bool {
        ticket.0 == self.generation
    }
}

/// Apply a chosen lookup result to the model: write the CURIE into the
/// field's `uri-path` setting and make sure its prefix is present and
/// selected in the registry.
///
/// Returns `false` (and leaves the document unchanged) when `field_id` is
/// unknown.
pub fn apply_term_selection(document: &mut Document, field_id: &str, term: &TermMatch) -> bool {
    if document.field(field_id).is_none() {
        return false;
    }
    document.update_field_setting(
        field_id,
        "uri-path",
        SettingValue::Text(term.prefixed_name.clone()),
    );
    if let Some((prefix, _)) = term.prefixed_name.split_once(':') {
        document.namespaces.upsert(prefix, &term.uri, true);
        document.namespaces.select(prefix);
    }
    true
}

// --- tests -------------------------------------------------------------------
