//! Core domain types and maintenance workflows for a Wikibase instance.
//!
//! Responsibilities:
//! - Model entities, statements, snaks and references with their ordering
//!   invariants.
//! - Reconcile statements: decide equivalence and build independent copies.
//! - Define the collaborator traits ([`EntityStore`], [`QueryService`],
//!   [`ReportSink`]) that adapters implement.
//! - Encode each maintenance job as a workflow over those traits.
//!
//! Boundaries:
//! - No network, filesystem or wire-format code lives here; see
//!   `wikihum-data` for the HTTP and CSV adapters.
//!
//! Invariants:
//! - Qualifier and reference snak order is preserved exactly.
//! - No global mutable state.
#![forbid(unsafe_code)]

pub mod identifier;
pub mod ids;
pub mod model;
pub mod query;
pub mod reconcile;
pub mod report;
pub mod store;
pub mod tasks;

#[doc(hidden)]
pub mod test_support;

pub use identifier::{SIMC_WIDTH, pad_identifier};
pub use ids::{EntityId, EntityKind, IdError, PropertyId, StatementId, trailing_segment};
pub use model::{
    Claims, DataValue, Datatype, Entity, EntityRef, GlobeCoordinate, SnakOrderError, Keyed,
    MonolingualText, PropertyGroups, Quantity, Qualifiers, Rank, Reference, Snak, SnakType,
    Statement, StatementKind, TimeValue,
};
pub use query::{Binding, BindingKind, QueryError, QueryResults, QueryRow, QueryService};
pub use reconcile::{Equivalence, Mismatch, are_equivalent, copy_reference, copy_statement};
pub use report::{MemoryReport, ReportSink, execution_time_line, format_elapsed};
pub use store::{EntityStore, RevisionId, StoreError, WriteError};
pub use tasks::{TaskContext, TaskError, TaskSummary, WriteMode};
