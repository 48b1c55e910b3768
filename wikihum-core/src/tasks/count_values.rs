//! Check that a property holds exactly one value.

use super::{TaskContext, TaskError, TaskSummary};
use crate::{EntityId, PropertyId};

/// Property checked when none is given: the AHP identifier.
pub const DEFAULT_PROPERTY: PropertyId = PropertyId::from_static("P81");

/// Report every entity in `links` whose `property` has zero or several
/// values. Conforming entities get an informational line.
pub fn run(
    ctx: &mut TaskContext<'_>,
    links: &[String],
    property: &PropertyId,
) -> Result<TaskSummary, TaskError> {
    for link in links {
        let Ok(id) = EntityId::parse(link) else {
            ctx.skipped(&format!("{link} - not an entity link"))?;
            continue;
        };
        let Some(entity) = ctx.load(link, &id)? else {
            continue;
        };
        let values = entity.statements(property);
        match values.len() {
            0 => ctx.flagged(&format!(
                "{link} - there is no value for property {property}"
            ))?,
            1 => ctx.noted(&format!("{link} - property {property} has one value"))?,
            count => {
                let listed: Vec<String> = values
                    .iter()
                    .filter_map(|statement| statement.main_snak.datavalue.as_ref())
                    .map(ToString::to_string)
                    .collect();
                ctx.flagged(&format!(
                    "{link} - property {property} has more than one value ({count}): {}",
                    listed.join(" | ")
                ))?;
            }
        }
    }
    Ok(ctx.summary())
}
