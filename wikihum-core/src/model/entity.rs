//! Entities and their in-memory edit tracking.

use std::collections::BTreeMap;

use super::{Claims, Statement};
use crate::{EntityId, PropertyId, StatementId};

/// Item or property loaded from the store.
///
/// Edits made in memory are tracked so a write can express removals: the ids
/// of removed statements and the aliases added or removed per language.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Identifier.
    pub id: EntityId,
    /// Revision the entity was loaded at, used to detect edit conflicts.
    pub last_revision: Option<u64>,
    /// Language code to label.
    pub labels: BTreeMap<String, String>,
    /// Language code to description.
    pub descriptions: BTreeMap<String, String>,
    /// Language code to aliases, in order.
    pub aliases: BTreeMap<String, Vec<String>>,
    /// Statements grouped by property.
    pub statements: Claims,
    removed_statements: Vec<StatementId>,
    added_aliases: Vec<(String, String)>,
    removed_aliases: Vec<(String, String)>,
}

impl Entity {
    /// Empty entity with no revision.
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            last_revision: None,
            labels: BTreeMap::new(),
            descriptions: BTreeMap::new(),
            aliases: BTreeMap::new(),
            statements: Claims::new(),
            removed_statements: Vec::new(),
            added_aliases: Vec::new(),
            removed_aliases: Vec::new(),
        }
    }

    /// Label in `language`.
    #[must_use]
    pub fn label(&self, language: &str) -> Option<&str> {
        self.labels.get(language).map(String::as_str)
    }

    /// Description in `language`.
    #[must_use]
    pub fn description(&self, language: &str) -> Option<&str> {
        self.descriptions.get(language).map(String::as_str)
    }

    /// Aliases in `language`, empty when none.
    #[must_use]
    pub fn aliases(&self, language: &str) -> &[String] {
        self.aliases.get(language).map_or(&[], Vec::as_slice)
    }

    /// Statements for `property`.
    #[must_use]
    pub fn statements(&self, property: &PropertyId) -> &[Statement] {
        self.statements.get(property)
    }

    /// Add an alias unless it is already present. Returns whether it was added.
    pub fn add_alias(&mut self, language: &str, value: &str) -> bool {
        let entry = self.aliases.entry(language.to_owned()).or_default();
        if entry.iter().any(|alias| alias == value) {
            return false;
        }
        entry.push(value.to_owned());
        let change = (language.to_owned(), value.to_owned());
        if let Some(pos) = self.removed_aliases.iter().position(|c| c == &change) {
            self.removed_aliases.remove(pos);
        } else {
            self.added_aliases.push(change);
        }
        true
    }

    /// Remove every occurrence of an alias. Returns whether one was present.
    pub fn remove_alias(&mut self, language: &str, value: &str) -> bool {
        let Some(entry) = self.aliases.get_mut(language) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|alias| alias != value);
        if entry.len() == before {
            return false;
        }
        if entry.is_empty() {
            self.aliases.remove(language);
        }
        let change = (language.to_owned(), value.to_owned());
        if let Some(pos) = self.added_aliases.iter().position(|c| c == &change) {
            self.added_aliases.remove(pos);
        } else {
            self.removed_aliases.push(change);
        }
        true
    }

    /// Append a statement to its property group.
    pub fn add_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Remove the statement at `position` within `property`'s group.
    ///
    /// Saved statements are remembered so the next write deletes them.
    pub fn remove_statement_at(&mut self, property: &PropertyId, position: usize) -> Option<Statement> {
        let group = self.statements.get_mut(property)?;
        if position >= group.len() {
            return None;
        }
        let removed = group.remove(position);
        self.statements.prune();
        if let Some(id) = &removed.id {
            self.removed_statements.push(id.clone());
        }
        Some(removed)
    }

    /// Remove the statement with the given id.
    pub fn remove_statement_by_id(&mut self, id: &StatementId) -> Option<Statement> {
        let (property, position) = self.statements.groups().find_map(|(property, values)| {
            values
                .iter()
                .position(|statement| statement.id.as_ref() == Some(id))
                .map(|position| (property.clone(), position))
        })?;
        self.remove_statement_at(&property, position)
    }

    /// Ids of saved statements removed since loading.
    #[must_use]
    pub fn removed_statements(&self) -> &[StatementId] {
        &self.removed_statements
    }

    /// `(language, alias)` pairs added since loading.
    #[must_use]
    pub fn added_aliases(&self) -> &[(String, String)] {
        &self.added_aliases
    }

    /// `(language, alias)` pairs removed since loading.
    #[must_use]
    pub fn removed_aliases(&self) -> &[(String, String)] {
        &self.removed_aliases
    }

    /// Record a successful write at `revision` and forget pending changes.
    pub fn mark_saved(&mut self, revision: u64) {
        self.last_revision = Some(revision);
        self.removed_statements.clear();
        self.added_aliases.clear();
        self.removed_aliases.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataValue, Datatype, Snak};
    use rstest::{fixture, rstest};

    #[fixture]
    fn entity() -> Entity {
        let mut entity = Entity::new(EntityId::from_static("Q1"));
        let p54 = PropertyId::from_static("P54");
        for (n, text) in ["Foo", "Bar"].into_iter().enumerate() {
            let mut statement = Statement::new(Snak::value(
                p54.clone(),
                Datatype::MonolingualText,
                DataValue::monolingual(text, "pl"),
            ));
            statement.id = Some(StatementId::parse(&format!("Q1${n}")).expect("statement id"));
            entity.add_statement(statement);
        }
        entity.aliases.insert("pl".into(), vec!["Foo".into()]);
        entity
    }

    #[rstest]
    fn removing_saved_statement_is_tracked(mut entity: Entity) {
        let id = StatementId::parse("Q1$1").expect("statement id");
        let removed = entity.remove_statement_by_id(&id).expect("statement present");
        assert_eq!(removed.id, Some(id.clone()));
        assert_eq!(entity.removed_statements(), &[id]);
        assert_eq!(entity.statements(&PropertyId::from_static("P54")).len(), 1);
    }

    #[rstest]
    fn removing_last_statement_drops_group(mut entity: Entity) {
        let p54 = PropertyId::from_static("P54");
        entity.remove_statement_at(&p54, 0);
        entity.remove_statement_at(&p54, 0);
        assert!(!entity.statements.contains(&p54));
        assert_eq!(entity.removed_statements().len(), 2);
    }

    #[rstest]
    fn out_of_range_removal_is_ignored(mut entity: Entity) {
        assert!(entity.remove_statement_at(&PropertyId::from_static("P54"), 5).is_none());
        assert!(entity.removed_statements().is_empty());
    }

    #[rstest]
    fn alias_changes_cancel_out(mut entity: Entity) {
        assert!(entity.add_alias("pl", "Baz"));
        assert!(!entity.add_alias("pl", "Baz"));
        assert!(entity.remove_alias("pl", "Baz"));
        assert!(entity.added_aliases().is_empty());
        assert!(entity.removed_aliases().is_empty());
    }

    #[rstest]
    fn removing_only_alias_drops_language(mut entity: Entity) {
        assert!(entity.remove_alias("pl", "Foo"));
        assert!(entity.aliases("pl").is_empty());
        assert_eq!(entity.removed_aliases(), &[("pl".to_owned(), "Foo".to_owned())]);
    }

    #[rstest]
    fn mark_saved_clears_pending_changes(mut entity: Entity) {
        entity.remove_alias("pl", "Foo");
        entity.remove_statement_at(&PropertyId::from_static("P54"), 0);
        entity.mark_saved(42);
        assert_eq!(entity.last_revision, Some(42));
        assert!(entity.removed_statements().is_empty());
        assert!(entity.removed_aliases().is_empty());
    }
}
