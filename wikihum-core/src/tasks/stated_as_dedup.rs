//! Remove duplicated "stated as" (P54) values.
//!
//! An item may carry the same P54 text twice. When both statements are
//! equivalent (same value, qualifiers and reference) the second one is
//! removed; otherwise the difference is reported and the item is left alone.

use super::{TaskContext, TaskError, TaskSummary};
use crate::{DataValue, EntityId, PropertyId, are_equivalent};

/// "stated as".
pub const STATED_AS: PropertyId = PropertyId::from_static("P54");

/// Items holding two P54 statements with the same value.
pub const QUERY: &str = r"SELECT DISTINCT ?item ?value WHERE {
  ?item p:P54 ?statement1 .
  ?item p:P54 ?statement2 .
  ?statement1 (ps:P54) ?value .
  ?statement2 (ps:P54) ?value .
  FILTER (?statement1 != ?statement2)
}
ORDER BY ?item";

/// Run the workflow over every candidate returned by [`QUERY`].
pub fn run(ctx: &mut TaskContext<'_>) -> Result<TaskSummary, TaskError> {
    let results = ctx.select(QUERY)?;
    for row in &results.rows {
        let (Some(link), Some(id), Some(value)) =
            (row.value("item"), row.entity_id("item"), row.value("value"))
        else {
            continue;
        };
        process(ctx, link, &id, value)?;
    }
    Ok(ctx.summary())
}

fn process(
    ctx: &mut TaskContext<'_>,
    link: &str,
    id: &EntityId,
    value: &str,
) -> Result<(), TaskError> {
    let Some(mut entity) = ctx.load(link, id)? else {
        return Ok(());
    };
    let matching: Vec<usize> = entity
        .statements(&STATED_AS)
        .iter()
        .enumerate()
        .filter(|(_, statement)| {
            statement
                .main_snak
                .datavalue
                .as_ref()
                .and_then(DataValue::as_monolingual)
                .is_some_and(|text| text.text == value)
        })
        .map(|(position, _)| position)
        .collect();

    let [first, second] = matching.as_slice() else {
        if matching.len() > 2 {
            return ctx.skipped(&format!(
                "{link} - too many claims in the property 'stated as' {}",
                matching.len()
            ));
        }
        return ctx.skipped(&format!(
            "{link} - fewer than two claims in the property 'stated as' with value {value}"
        ));
    };
    let statements = entity.statements(&STATED_AS);
    let (Some(a), Some(b)) = (statements.get(*first), statements.get(*second)) else {
        return Ok(());
    };
    let outcome = are_equivalent(a, b);
    if !outcome.is_equivalent() {
        return ctx.skipped(&format!("{link} - {}", outcome.reason()));
    }
    entity.remove_statement_at(&STATED_AS, *second);
    ctx.save_and_record(
        &mut entity,
        "Removed duplicated 'stated as' value",
        &format!("{link} {value}"),
        " claim removed",
        " claim prepared to be removed",
    )
}
