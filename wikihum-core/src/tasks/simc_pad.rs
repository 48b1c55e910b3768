//! Restore leading zeros of short SIMC identifiers.

use super::{TaskContext, TaskError, TaskSummary, candidates};
use crate::{DataValue, EntityId, SIMC_WIDTH, pad_identifier};

pub use super::simc_dedup::SIMC;

/// Items with a single SIMC value shorter than seven characters.
pub const QUERY: &str = r"SELECT ?item WHERE {
  ?item p:P75 ?statement0 .
  ?statement0 (ps:P75) ?value .
  {
    SELECT ?item (COUNT(?value) AS ?count) WHERE {
      ?item p:P75 ?statement0 .
      ?statement0 (ps:P75) ?value .
    }
    GROUP BY ?item
    HAVING (?count = 1)
  }
  FILTER (STRLEN(STR(?value)) < 7)
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
    let Some(current) = entity
        .statements(&SIMC)
        .first()
        .and_then(|statement| statement.main_snak.datavalue.as_ref())
        .and_then(DataValue::as_string)
        .map(str::to_owned)
    else {
        return ctx.skipped(&format!("{link} - no SIMC ID string value"));
    };
    let padded = pad_identifier(&current, SIMC_WIDTH);
    if padded == current || padded.chars().count() != SIMC_WIDTH {
        return ctx.skipped(&format!("{link} - SIMC ID {current} left unchanged"));
    }
    if let Some(statement) = entity
        .statements
        .get_mut(&SIMC)
        .and_then(|group| group.first_mut())
    {
        statement.main_snak.datavalue = Some(DataValue::string(padded.clone()));
    }
    ctx.save_and_record(
        &mut entity,
        "Added missing leading zeros to SIMC ID",
        link,
        &format!(" missing zeroes in SIMC ID were added {padded}"),
        &format!(" missing zeroes in SIMC ID prepared to be added {padded}"),
    )
}
