//! Facade crate for the WikiHum maintenance toolkit.
//!
//! This crate re-exports the domain model, reconciler and workflows, and,
//! behind the `http` feature, the MediaWiki and SPARQL adapters.

#![forbid(unsafe_code)]

pub use wikihum_core::{
    DataValue, Entity, EntityId, EntityStore, Equivalence, Mismatch, PropertyId, QueryService,
    Reference, ReportSink, Snak, Statement, TaskContext, TaskSummary, WriteMode, are_equivalent,
    copy_reference, copy_statement, pad_identifier, tasks,
};

#[cfg(feature = "http")]
pub use wikihum_data::{
    Credentials, FileReport, MediaWikiClient, SparqlClient, WikibaseConfig,
};
