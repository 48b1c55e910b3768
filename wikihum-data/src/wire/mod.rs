//! Wikibase entity JSON codec.
//!
//! Decoding turns a `wbgetentities` entity object into an [`Entity`]; the
//! qualifier and reference order lists are checked against their snak maps.
//! Encoding produces the `data` parameter of `wbeditentity`, expressing
//! in-memory removals with Wikibase's `remove` and `add` flags.

mod edit;
mod ordered;
mod raw;

use thiserror::Error;
use wikihum_core::{Entity, EntityId, IdError, PropertyId, SnakOrderError};

pub use edit::encode_edit;
pub(crate) use raw::RawEntity;

/// Errors raised while decoding entity JSON.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The document is not valid entity JSON.
    #[error("malformed entity JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The entity id is not a valid identifier.
    #[error("invalid entity id {value:?}: {source}")]
    InvalidId {
        /// Text found in the document.
        value: String,
        /// Parser error.
        source: IdError,
    },
    /// The document marks the entity as missing.
    #[error("entity {id} is missing")]
    MissingEntity {
        /// Requested id.
        id: String,
    },
    /// An order list disagrees with its snak map.
    #[error("inconsistent snak order: {0}")]
    SnakOrder(#[from] SnakOrderError),
    /// A value snak carries no datavalue.
    #[error("value snak for {property} has no datavalue")]
    MissingValue {
        /// Property of the snak.
        property: PropertyId,
    },
}

/// Decode one entity object.
///
/// # Examples
/// ```
/// use wikihum_core::PropertyId;
/// use wikihum_data::wire::decode_entity;
///
/// let entity = decode_entity(r#"{
///     "id": "Q17375", "type": "item", "lastrevid": 42,
///     "labels": {"pl": {"language": "pl", "value": "Kraków"}},
///     "descriptions": [], "aliases": {},
///     "claims": {}
/// }"#)?;
/// assert_eq!(entity.label("pl"), Some("Kraków"));
/// assert_eq!(entity.last_revision, Some(42));
/// assert!(entity.statements(&PropertyId::from_static("P54")).is_empty());
/// # Ok::<(), wikihum_data::wire::DecodeError>(())
/// ```
///
/// # Errors
/// Returns [`DecodeError`] for malformed JSON, a missing entity, an invalid
/// id or inconsistent snak groups.
pub fn decode_entity(json: &str) -> Result<Entity, DecodeError> {
    let raw: RawEntity = serde_json::from_str(json)?;
    entity_from_raw(raw)
}

pub(crate) fn entity_from_raw(raw: RawEntity) -> Result<Entity, DecodeError> {
    if raw.missing.is_some() {
        return Err(DecodeError::MissingEntity { id: raw.id });
    }
    let id = EntityId::parse(&raw.id).map_err(|source| DecodeError::InvalidId {
        value: raw.id.clone(),
        source,
    })?;
    let mut entity = Entity::new(id);
    entity.last_revision = raw.lastrevid;
    entity.labels = raw
        .labels
        .0
        .into_iter()
        .map(|(language, term)| (language, term.value))
        .collect();
    entity.descriptions = raw
        .descriptions
        .0
        .into_iter()
        .map(|(language, term)| (language, term.value))
        .collect();
    entity.aliases = raw
        .aliases
        .0
        .into_iter()
        .filter(|(_, terms)| !terms.is_empty())
        .map(|(language, terms)| (language, terms.into_iter().map(|t| t.value).collect()))
        .collect();
    for (_, statements) in raw.claims.0 {
        for statement in statements {
            entity.add_statement(statement.into_statement()?);
        }
    }
    Ok(entity)
}
