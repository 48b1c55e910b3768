//! Find items lacking a Polish or English label or description.

use super::{TaskContext, TaskError};
use crate::{Entity, EntityId, StoreError};

/// Item with at least one missing term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteEntity {
    /// Link to the item page.
    pub link: String,
    /// Item id.
    pub id: EntityId,
    /// Polish label.
    pub label_pl: Option<String>,
    /// English label.
    pub label_en: Option<String>,
    /// Polish description.
    pub description_pl: Option<String>,
    /// English description.
    pub description_en: Option<String>,
}

impl IncompleteEntity {
    /// Terms of `entity` when any is missing.
    #[must_use]
    pub fn check(entity: &Entity, link: String) -> Option<Self> {
        let term = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_owned);
        let found = Self {
            link,
            id: entity.id.clone(),
            label_pl: term(entity.label("pl")),
            label_en: term(entity.label("en")),
            description_pl: term(entity.description("pl")),
            description_en: term(entity.description("en")),
        };
        let complete = found.label_pl.is_some()
            && found.label_en.is_some()
            && found.description_pl.is_some()
            && found.description_en.is_some();
        (!complete).then_some(found)
    }
}

/// Scan items `Q1` to `Q{last}` and return those with missing terms.
///
/// `link_base` is prefixed to each id to form the item link. Missing items
/// are logged, reported and skipped. Complete items produce no report line.
pub fn run(
    ctx: &mut TaskContext<'_>,
    last: u64,
    link_base: &str,
) -> Result<Vec<IncompleteEntity>, TaskError> {
    let mut found = Vec::new();
    for number in 1..=last {
        let id = EntityId::item(number);
        let link = format!("{link_base}{id}");
        match ctx.store.get(&id) {
            Ok(entity) => match IncompleteEntity::check(&entity, link) {
                Some(incomplete) => {
                    ctx.flagged(&format!(
                        "{} - missing label or description",
                        incomplete.link
                    ))?;
                    found.push(incomplete);
                }
                None => log::debug!("{id} has all terms"),
            },
            Err(StoreError::Missing { .. }) => {
                ctx.skipped(&format!("{link} - entity does not exist"))?;
            }
            Err(err) => {
                ctx.failed(&format!("{link} - error reading from Wikibase {err}"))?;
            }
        }
    }
    Ok(found)
}
