//! Entity storage abstraction.
//!
//! The [`EntityStore`] trait is the seam between the workflows and the
//! MediaWiki API. Writes report conflicts separately from other failures so
//! callers can log them and move on to the next candidate.

use thiserror::Error;

use crate::{Entity, EntityId};

/// Revision number returned by a successful write.
pub type RevisionId = u64;

/// Errors raised while loading an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store has no entity with this id.
    #[error("entity {id} does not exist")]
    Missing {
        /// Requested id.
        id: EntityId,
    },
    /// The API rejected the request.
    #[error("API error {code}: {message}")]
    Api {
        /// API error code.
        code: String,
        /// API error text.
        message: String,
    },
    /// The request did not complete.
    #[error("transport failure: {message}")]
    Transport {
        /// Failure detail.
        message: String,
    },
    /// The response could not be decoded into an entity.
    #[error("failed to decode entity {id}: {message}")]
    Decode {
        /// Requested id.
        id: EntityId,
        /// Decoder message.
        message: String,
    },
}

/// Errors raised while writing or deleting an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// The entity changed since it was loaded.
    #[error("edit conflict on {id}: {message}")]
    Conflict {
        /// Entity being written.
        id: EntityId,
        /// API error text.
        message: String,
    },
    /// The API rejected the edit.
    #[error("API error {code}: {message}")]
    Api {
        /// API error code.
        code: String,
        /// API error text.
        message: String,
    },
    /// The request did not complete.
    #[error("transport failure: {message}")]
    Transport {
        /// Failure detail.
        message: String,
    },
}

/// Read and write access to entities.
///
/// # Examples
/// ```
/// use wikihum_core::{Entity, EntityId, EntityStore};
/// use wikihum_core::test_support::MemoryEntityStore;
///
/// let store = MemoryEntityStore::default();
/// store.insert(Entity::new(EntityId::from_static("Q1")));
/// let mut entity = store.get(&EntityId::from_static("Q1"))?;
/// entity.labels.insert("pl".into(), "Kraków".into());
/// let revision = store.write(&entity, "label")?;
/// assert!(revision > 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait EntityStore {
    /// Load the current revision of `id`.
    fn get(&self, id: &EntityId) -> Result<Entity, StoreError>;

    /// Persist `entity`, including statements and aliases it removed.
    fn write(&self, entity: &Entity, summary: &str) -> Result<RevisionId, WriteError>;

    /// Delete `id`.
    fn delete(&self, id: &EntityId, reason: &str) -> Result<(), WriteError>;
}
