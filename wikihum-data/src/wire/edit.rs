//! `wbeditentity` payloads.

use std::collections::BTreeMap;

use serde::Serialize;
use wikihum_core::{Entity, StatementId};

use super::raw::{RawStatement, RawTerm};

#[derive(Debug, Serialize)]
struct EditPayload {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    labels: BTreeMap<String, RawTerm>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    descriptions: BTreeMap<String, RawTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<RawTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    claims: Vec<ClaimEdit>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ClaimEdit {
    Statement(RawStatement),
    Removal { id: StatementId, remove: &'static str },
}

fn terms(values: &BTreeMap<String, String>) -> BTreeMap<String, RawTerm> {
    values
        .iter()
        .map(|(language, value)| (language.clone(), RawTerm::new(language, value)))
        .collect()
}

/// Encode `entity` as the `data` parameter of `wbeditentity`.
///
/// Labels and descriptions are sent whole. Aliases are sent as the changes
/// made since loading, flagged `add` or `remove`. Every current statement is
/// sent (new ones without an id), followed by removals for saved statements
/// dropped in memory.
///
/// # Examples
/// ```
/// use wikihum_core::{Entity, EntityId};
/// use wikihum_data::wire::encode_edit;
///
/// let mut entity = Entity::new(EntityId::from_static("Q1"));
/// entity.aliases.insert("pl".into(), vec!["Kraków".into()]);
/// entity.remove_alias("pl", "Kraków");
/// let data: serde_json::Value = serde_json::from_str(&encode_edit(&entity)?)?;
/// assert_eq!(data["aliases"][0]["remove"], "");
/// # Ok::<(), serde_json::Error>(())
/// ```
///
/// # Errors
/// Propagates serialisation failures from `serde_json`.
pub fn encode_edit(entity: &Entity) -> Result<String, serde_json::Error> {
    let aliases = entity
        .added_aliases()
        .iter()
        .map(|(language, value)| RawTerm {
            add: Some(String::new()),
            ..RawTerm::new(language, value)
        })
        .chain(entity.removed_aliases().iter().map(|(language, value)| RawTerm {
            remove: Some(String::new()),
            ..RawTerm::new(language, value)
        }))
        .collect();
    let claims = entity
        .statements
        .iter()
        .map(|statement| ClaimEdit::Statement(RawStatement::from_statement(statement)))
        .chain(
            entity
                .removed_statements()
                .iter()
                .map(|id| ClaimEdit::Removal {
                    id: id.clone(),
                    remove: "",
                }),
        )
        .collect();
    serde_json::to_string(&EditPayload {
        labels: terms(&entity.labels),
        descriptions: terms(&entity.descriptions),
        aliases,
        claims,
    })
}
