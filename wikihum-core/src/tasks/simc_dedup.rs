//! Merge duplicated SIMC identifiers (P75).
//!
//! Items with exactly two SIMC values that agree once zero-padded keep the
//! first value, padded, and gain the second value's reference.

use super::{TaskContext, TaskError, TaskSummary, candidates};
use crate::{DataValue, EntityId, PropertyId, SIMC_WIDTH, copy_reference, pad_identifier};

/// SIMC identifier.
pub const SIMC: PropertyId = PropertyId::from_static("P75");

/// Items with exactly two SIMC values.
pub const QUERY: &str = r"SELECT DISTINCT ?item WHERE {
  ?item p:P75 ?statement0 .
  ?statement0 (ps:P75) ?value .
  {
    SELECT ?item (COUNT(?value) AS ?count) WHERE {
      ?item p:P75 ?statement0 .
      ?statement0 (ps:P75) ?value .
    }
    GROUP BY ?item
    HAVING (?count = 2)
  }
}";

/// Run the workflow over every candidate returned by [`QUERY`].
pub fn run(ctx: &mut TaskContext<'_>) -> Result<TaskSummary, TaskError> {
    let results = ctx.select(QUERY)?;
    for (link, id) in candidates(&results, "item") {
        process(ctx, &link, &id)?;
    }
    Ok(ctx.summary())
}

fn process(ctx: &mut TaskContext<'_>, link: &str, id: &EntityId) -> Result<(), TaskError> {
    let Some(mut entity) = ctx.load(link, id)? else {
        return Ok(());
    };
    let statements = entity.statements(&SIMC);
    let [first, second] = statements else {
        return ctx.skipped(&format!(
            "{link} - expected two SIMC ID values, found {}",
            statements.len()
        ));
    };
    let value_of = |statement: &crate::Statement| {
        statement
            .main_snak
            .datavalue
            .as_ref()
            .and_then(DataValue::as_string)
            .map(str::to_owned)
    };
    let (Some(raw_first), Some(raw_second)) = (value_of(first), value_of(second)) else {
        return ctx.skipped(&format!("{link} - SIMC ID value is not a string"));
    };
    let padded_first = pad_identifier(&raw_first, SIMC_WIDTH);
    let padded_second = pad_identifier(&raw_second, SIMC_WIDTH);
    if padded_first != padded_second {
        return ctx.skipped(&format!(
            "{link} incompatible SIMC ID {padded_first} / {padded_second}"
        ));
    }
    if !second.qualifiers.is_empty() {
        return ctx.skipped(&format!(
            "{link} There are qualifiers in the second value of the SIMC ID"
        ));
    }
    let [reference] = second.references.as_slice() else {
        return ctx.skipped(&format!(
            "{link} The second value of the SIMC ID does not have exactly one reference"
        ));
    };
    let moved = copy_reference(reference);

    let prefix = if padded_first == raw_first {
        link.to_owned()
    } else {
        format!("{link} SIMC ID value was changed {raw_first} to {padded_first};")
    };
    if let Some(target) = entity
        .statements
        .get_mut(&SIMC)
        .and_then(|group| group.first_mut())
    {
        target.main_snak.datavalue = Some(DataValue::string(padded_first));
        target.references.push(moved);
    }
    entity.remove_statement_at(&SIMC, 1);
    ctx.save_and_record(
        &mut entity,
        "Merged duplicated SIMC ID",
        &prefix,
        " References from the second value were moved, second value was deleted",
        " References from the second value prepared to be moved, second value prepared to be deleted",
    )
}
