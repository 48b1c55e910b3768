//! Entity data model.
//!
//! Types mirror the Wikibase JSON structure closely enough that the wire
//! codec in `wikihum-data` can map them one to one, while keeping property
//! grouping and ordering explicit through [`PropertyGroups`].

mod entity;
mod groups;
mod snak;
mod statement;
mod value;

pub use entity::Entity;
pub use groups::{Claims, SnakOrderError, Keyed, PropertyGroups, Qualifiers};
pub use snak::{Snak, SnakType};
pub use statement::{Rank, Reference, Statement, StatementKind};
pub use value::{
    DataValue, Datatype, EntityRef, GlobeCoordinate, MonolingualText, Quantity, TimeValue,
};
