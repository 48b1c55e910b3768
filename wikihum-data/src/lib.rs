//! Adapters connecting the maintenance workflows to a live Wikibase.
//!
//! Responsibilities:
//! - Implement [`wikihum_core::EntityStore`] over the MediaWiki action API.
//! - Implement [`wikihum_core::QueryService`] over the SPARQL endpoint.
//! - Read and write the CSV files the workflows consume and produce.
//! - Append run reports to UTF-8 log files.
//!
//! Boundaries:
//! - Do not encode maintenance rules (live in `wikihum-core`).
//! - Async HTTP stays inside the clients; callers see synchronous traits.
//!
//! Invariants:
//! - Qualifier and reference order survive a read-modify-write cycle.
//! - No global mutable state.

mod api;
mod config;
mod report_file;
mod sparql;
mod tabular;
mod transport;
pub mod wire;

pub use api::MediaWikiClient;
pub use config::{
    Credentials, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DEFAULT_WIKIBASE_URL, WikibaseConfig,
};
pub use report_file::FileReport;
pub use sparql::{SparqlClient, decode_results};
pub use tabular::{
    INCOMPLETE_HEADER, Table, TabularError, join_files, left_join, read_links,
    read_neighborhood_rows, read_table, read_transfer_rows, write_incomplete_entities,
    write_table,
};
pub use transport::{ClientBuildError, TransportError};
