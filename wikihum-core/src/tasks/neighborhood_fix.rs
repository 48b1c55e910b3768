//! Repoint "neighbourhood with" (P84) values away from deleted items.

use super::{TaskContext, TaskError, TaskSummary};
use crate::{DataValue, Entity, EntityId, PropertyId};

/// "neighbourhood with".
pub const NEIGHBORHOOD: PropertyId = PropertyId::from_static("P84");

/// One input row: `item` points at the deleted `value`, whose data now lives
/// on `new_value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborhoodRow {
    /// Link to the item to fix.
    pub item: String,
    /// Link to the deleted item.
    pub value: String,
    /// Link to the item that replaced it.
    pub new_value: String,
}

fn points_at(entity: &Entity, target: &EntityId) -> bool {
    entity.statements(&NEIGHBORHOOD).iter().any(|statement| {
        statement
            .main_snak
            .datavalue
            .as_ref()
            .and_then(DataValue::as_entity_id)
            .is_some_and(|id| id == target.as_str())
    })
}

/// Run the workflow over `rows`.
pub fn run(
    ctx: &mut TaskContext<'_>,
    rows: &[NeighborhoodRow],
) -> Result<TaskSummary, TaskError> {
    for row in rows {
        process(ctx, row)?;
    }
    Ok(ctx.summary())
}

fn process(ctx: &mut TaskContext<'_>, row: &NeighborhoodRow) -> Result<(), TaskError> {
    let link = row.item.as_str();
    let (Ok(id), Ok(old), Ok(new)) = (
        EntityId::parse(link),
        EntityId::parse(&row.value),
        EntityId::parse(&row.new_value),
    ) else {
        return ctx.skipped(&format!("{link} - row holds a value that is not an entity link"));
    };
    let Some(mut entity) = ctx.load(link, &id)? else {
        return Ok(());
    };
    if !points_at(&entity, &old) {
        return ctx.skipped(&format!("{link} - no neighbourhood value pointing at {old}"));
    }
    let Some(replacement) = ctx.load(&row.new_value, &new)? else {
        return Ok(());
    };
    if !points_at(&replacement, &id) {
        return ctx.skipped(&format!(
            "{link} item does not exist in neighborhood of item {}",
            row.new_value
        ));
    }
    if let Some(group) = entity.statements.get_mut(&NEIGHBORHOOD) {
        for statement in group.iter_mut() {
            let stale = statement
                .main_snak
                .datavalue
                .as_ref()
                .and_then(DataValue::as_entity_id)
                .is_some_and(|value| value == old.as_str());
            if stale {
                statement.main_snak.datavalue = Some(DataValue::entity(&new));
            }
        }
    }
    ctx.save_and_record(
        &mut entity,
        "Replaced deleted neighbourhood item",
        link,
        &format!(" deleted item {old} was replaced {new}"),
        &format!(" deleted item {old} prepared to be replaced {new}"),
    )
}
