//! `swright` — ShapeWright command-line interface.
//!
//! Provides three subcommands for working with form documents on the
//! command line:
//!
//! - **`generate`** — compile a document into its SHACL shape document.
//! - **`namespaces`** — print a document's namespace registry in display
//!   order.
//! - **`search`** — query a remote vocabulary term-search service.
//!
//! `generate` and `namespaces` read document JSON from a file path or from
//! stdin (`-`).

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use shapewright::{check_query, serialize, Document, LookupError, TermLookup, TermMatch};

/// swright — ShapeWright CLI
///
/// Compile form documents into SHACL shape documents and look up
/// vocabulary terms.
#[derive(Parser)]
#[command(name = "swright", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a form document into its SHACL shape document.
    ///
    /// Reads a JSON document (fields, groups, namespaces) and prints the
    /// Turtle shape document to stdout. A document without a `namespaces`
    /// key uses the built-in registry.
    ///
    /// Pass `-` as FILE to read from stdin.
    Generate {
        /// Path to a JSON document, or `-` for stdin.
        file: PathBuf,
    },

    /// Print a document's namespaces in display order.
    ///
    /// Selected entries (the ones that become @prefix declarations) are
    /// marked with `*`. With no FILE, prints the built-in registry.
    Namespaces {
        /// Path to a JSON document, or `-` for stdin.
        file: Option<PathBuf>,
    },

    /// Search a vocabulary term-lookup service.
    ///
    /// Prints matching terms as `prefixedName  uri` rows. Queries must be
    /// at least 3 characters long.
    ///
    /// Examples:
    ///   swright search title
    ///   swright search temporal --limit 5
    Search {
        /// Free-text query (minimum 3 characters).
        query: String,

        /// Maximum number of results to print.
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Term-search endpoint.
        #[arg(
            long,
            env = "SWRIGHT_LOOKUP_ENDPOINT",
            default_value = "https://lov.linkeddata.es/dataset/lov/api/v2/term/search"
        )]
        endpoint: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { file } => {
            let document = parse_document(&read_input(&file));
            print!("{}", serialize(&document));
        }

        Command::Namespaces { file } => {
            let document = match file {
                Some(file) => parse_document(&read_input(&file)),
                None => Document::new(),
            };
            for entry in document.namespaces.ordered_entries() {
                let mark = if entry.selected { "*" } else { " " };
                println!("{} {:<8} {}", mark, entry.prefix, entry.uri);
            }
        }

        Command::Search {
            query,
            limit,
            endpoint,
        } => {
            let client = LovClient { endpoint, limit };
            match client.search(&query) {
                Ok(matches) if matches.is_empty() => {
                    println!("no terms matched {:?}", query);
                }
                Ok(matches) => {
                    for m in matches {
                        println!("{:<40} {}", m.prefixed_name, m.uri);
                    }
                }
                Err(e) => fatal(&e.to_string()),
            }
        }
    }
}

/// Term lookup backed by the Linked Open Vocabularies search API.
struct LovClient {
    endpoint: String,
    limit: usize,
}

/// The slice of the LOV response we consume. Every field of a result
/// arrives as an array; the first element is the display value.
#[derive(Deserialize)]
struct LovResponse {
    #[serde(default)]
    results: Vec<LovResult>,
}

#[derive(Deserialize)]
struct LovResult {
    #[serde(default, rename = "prefixedName")]
    prefixed_name: Vec<String>,
    #[serde(default)]
    uri: Vec<String>,
}

impl TermLookup for LovClient {
    fn search(&self, query: &str) -> Result<Vec<TermMatch>, LookupError> {
        check_query(query)?;

        let client = reqwest::blocking::Client::new();
        let page_size = self.limit.to_string();
        let response = client
            .get(&self.endpoint)
            .query(&[("q", query), ("page_size", page_size.as_str())])
            .send()
            .map_err(|e| LookupError::Service(e.to_string()))?
            .error_for_status()
            .map_err(|e| LookupError::Service(e.to_string()))?;

        let body: LovResponse = response
            .json()
            .map_err(|e| LookupError::Service(e.to_string()))?;

        Ok(body
            .results
            .into_iter()
            .filter_map(|r| {
                let prefixed_name = r.prefixed_name.into_iter().next()?;
                let uri = r.uri.into_iter().next()?;
                Some(TermMatch { prefixed_name, uri })
            })
            .collect())
    }
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &PathBuf) -> String {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            fatal(&format!("failed to read {}: {}", path.display(), e))
        })
    }
}

/// Parse a JSON string as a form document. Exits with an error message on
/// parse failure.
fn parse_document(json: &str) -> Document {
    match serde_json::from_str::<Document>(json) {
        Ok(document) => document,
        Err(e) => fatal(&format!("failed to parse input as a form document: {}", e)),
    }
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("swright: {}", msg);
    process::exit(2);
}
