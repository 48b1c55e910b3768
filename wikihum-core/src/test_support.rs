//! In-memory collaborators and builders shared by unit and behaviour tests.

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, HashSet},
};

use crate::{
    Binding, DataValue, Datatype, Entity, EntityId, EntityStore, PropertyId, QueryError,
    QueryResults, QueryRow, QueryService, Reference, RevisionId, Snak, Statement, StatementId,
    StoreError, TimeValue, WriteError,
};

/// Write captured by [`MemoryEntityStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRecord {
    /// Entity as submitted.
    pub entity: Entity,
    /// Edit summary.
    pub summary: String,
}

/// [`EntityStore`] backed by a map.
///
/// Writes assign ids to new statements, bump a shared revision counter and
/// reject stale revisions as conflicts, mirroring `baserevid` handling.
#[derive(Debug, Default)]
pub struct MemoryEntityStore {
    entities: RefCell<BTreeMap<EntityId, Entity>>,
    writes: RefCell<Vec<WriteRecord>>,
    deletes: RefCell<Vec<(EntityId, String)>>,
    conflicts: RefCell<HashSet<EntityId>>,
    revision: Cell<RevisionId>,
}

impl MemoryEntityStore {
    /// Store holding `entities`.
    #[must_use]
    pub fn with_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        let store = Self::default();
        for entity in entities {
            store.insert(entity);
        }
        store
    }

    /// Insert or replace an entity.
    pub fn insert(&self, entity: Entity) {
        self.entities.borrow_mut().insert(entity.id.clone(), entity);
    }

    /// Current stored state of `id`.
    #[must_use]
    pub fn entity(&self, id: &EntityId) -> Option<Entity> {
        self.entities.borrow().get(id).cloned()
    }

    /// Make every write to `id` fail with an edit conflict.
    pub fn fail_writes_with_conflict(&self, id: EntityId) {
        self.conflicts.borrow_mut().insert(id);
    }

    /// Writes accepted so far, in order.
    #[must_use]
    pub fn writes(&self) -> Vec<WriteRecord> {
        self.writes.borrow().clone()
    }

    /// Deletions accepted so far, in order.
    #[must_use]
    pub fn deletes(&self) -> Vec<(EntityId, String)> {
        self.deletes.borrow().clone()
    }
}

impl EntityStore for MemoryEntityStore {
    fn get(&self, id: &EntityId) -> Result<Entity, StoreError> {
        self.entity(id)
            .ok_or_else(|| StoreError::Missing { id: id.clone() })
    }

    fn write(&self, entity: &Entity, summary: &str) -> Result<RevisionId, WriteError> {
        if self.conflicts.borrow().contains(&entity.id) {
            return Err(WriteError::Conflict {
                id: entity.id.clone(),
                message: "Edit conflict.".to_owned(),
            });
        }
        if let Some(stored) = self.entities.borrow().get(&entity.id)
            && stored.last_revision != entity.last_revision
        {
            return Err(WriteError::Conflict {
                id: entity.id.clone(),
                message: "Entity changed since it was loaded.".to_owned(),
            });
        }
        let revision = self.revision.get() + 1;
        self.revision.set(revision);

        let mut saved = entity.clone();
        for (n, statement) in saved.statements.iter_mut().enumerate() {
            if statement.id.is_none() {
                statement.id = StatementId::parse(&format!("{}$mem-{revision}-{n}", entity.id)).ok();
            }
        }
        saved.mark_saved(revision);
        self.insert(saved);
        self.writes.borrow_mut().push(WriteRecord {
            entity: entity.clone(),
            summary: summary.to_owned(),
        });
        Ok(revision)
    }

    fn delete(&self, id: &EntityId, reason: &str) -> Result<(), WriteError> {
        if self.entities.borrow_mut().remove(id).is_none() {
            return Err(WriteError::Api {
                code: "missingtitle".to_owned(),
                message: format!("{id} does not exist"),
            });
        }
        self.deletes.borrow_mut().push((id.clone(), reason.to_owned()));
        Ok(())
    }
}

/// [`QueryService`] answering from canned results.
///
/// The first registered response whose needle occurs in the query wins;
/// unmatched queries return no rows.
#[derive(Debug, Default)]
pub struct StaticQueryService {
    responses: Vec<(String, QueryResults)>,
    failure: Option<QueryError>,
    queries: RefCell<Vec<String>>,
}

impl StaticQueryService {
    /// Add a response for queries containing `needle`.
    #[must_use]
    pub fn with_response(mut self, needle: &str, results: QueryResults) -> Self {
        self.responses.push((needle.to_owned(), results));
        self
    }

    /// Service failing every query with `error`.
    #[must_use]
    pub fn failing(error: QueryError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Queries received so far.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl QueryService for StaticQueryService {
    fn select(&self, query: &str) -> Result<QueryResults, QueryError> {
        self.queries.borrow_mut().push(query.to_owned());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        Ok(self
            .responses
            .iter()
            .find(|(needle, _)| query.contains(needle.as_str()))
            .map(|(_, results)| results.clone())
            .unwrap_or_default())
    }
}

/// Base used for entity links in fixtures.
pub const ENTITY_BASE: &str = "https://wikihum.example/entity/";

/// Link to `id` under [`ENTITY_BASE`].
#[must_use]
pub fn link(id: &str) -> String {
    format!("{ENTITY_BASE}{id}")
}

/// Results binding each `(variable, value)` pair row by row.
///
/// Values starting with `http` bind as IRIs, anything else as literals.
#[must_use]
pub fn results(rows: &[&[(&str, &str)]]) -> QueryResults {
    let mut variables: Vec<String> = Vec::new();
    let table = rows
        .iter()
        .map(|row| {
            QueryRow::new(row.iter().map(|(variable, value)| {
                if !variables.iter().any(|known| known == variable) {
                    variables.push((*variable).to_owned());
                }
                let binding = if value.starts_with("http") {
                    Binding::uri(*value)
                } else {
                    Binding::literal(*value)
                };
                ((*variable).to_owned(), binding)
            }))
        })
        .collect();
    QueryResults {
        variables,
        rows: table,
    }
}

/// Results with one `?item` IRI per id.
#[must_use]
pub fn item_results(ids: &[&str]) -> QueryResults {
    let links: Vec<String> = ids.iter().map(|id| link(id)).collect();
    let rows: Vec<[(&str, &str); 1]> = links.iter().map(|l| [("item", l.as_str())]).collect();
    let borrowed: Vec<&[(&str, &str)]> = rows.iter().map(<[_; 1]>::as_slice).collect();
    results(&borrowed)
}

/// Property id from a static string.
#[must_use]
pub const fn pid(value: &'static str) -> PropertyId {
    PropertyId::from_static(value)
}

/// String-valued snak.
#[must_use]
pub fn string_snak(property: &'static str, value: &str) -> Snak {
    Snak::value(pid(property), Datatype::String, DataValue::string(value))
}

/// URL snak.
#[must_use]
pub fn url_snak(property: &'static str, url: &str) -> Snak {
    Snak::value(pid(property), Datatype::Url, DataValue::string(url))
}

/// Gregorian time snak.
#[must_use]
pub fn time_snak(property: &'static str, time: &str, precision: u8) -> Snak {
    Snak::value(
        pid(property),
        Datatype::Time,
        DataValue::Time(TimeValue::gregorian(time, precision)),
    )
}

/// Item-valued snak.
#[must_use]
pub fn item_snak(property: &'static str, item: &'static str) -> Snak {
    Snak::value(
        pid(property),
        Datatype::WikibaseItem,
        DataValue::entity(&EntityId::from_static(item)),
    )
}

/// Monolingual text statement without qualifiers or references.
#[must_use]
pub fn monolingual_statement(property: &'static str, text: &str, language: &str) -> Statement {
    Statement::new(Snak::value(
        pid(property),
        Datatype::MonolingualText,
        DataValue::monolingual(text, language),
    ))
}

/// `[P2 url, P48 date]` reference used across fixtures.
#[must_use]
pub fn url_date_reference(url: &str, date: &str) -> Reference {
    Reference::from_snaks([
        url_snak("P2", url),
        time_snak("P48", date, TimeValue::PRECISION_DAY),
    ])
}

/// Give `statement` the saved id `{entity}${suffix}`.
#[must_use]
pub fn saved(mut statement: Statement, entity: &str, suffix: &str) -> Statement {
    statement.id = StatementId::parse(&format!("{entity}${suffix}")).ok();
    statement
}

/// Entity `id` holding `statements`.
#[must_use]
pub fn entity_with(id: &'static str, statements: impl IntoIterator<Item = Statement>) -> Entity {
    let mut entity = Entity::new(EntityId::from_static(id));
    for statement in statements {
        entity.add_statement(statement);
    }
    entity
}
