//! Delete entities listed by link.

use super::{TaskContext, TaskError, TaskSummary};
use crate::EntityId;

/// Deletion reason recorded in the page log.
pub const REASON: &str = "Empty element removed after data transfer";

/// Delete every entity in `links`.
///
/// Each entity is loaded first so a dry run reports links that no longer
/// resolve.
pub fn run(ctx: &mut TaskContext<'_>, links: &[String]) -> Result<TaskSummary, TaskError> {
    for link in links {
        process(ctx, link)?;
    }
    Ok(ctx.summary())
}

fn process(ctx: &mut TaskContext<'_>, link: &str) -> Result<(), TaskError> {
    let Ok(id) = EntityId::parse(link) else {
        return ctx.skipped(&format!("{link} - not an entity link"));
    };
    if ctx.load(link, &id)?.is_none() {
        return Ok(());
    }
    if !ctx.mode.is_write() {
        return ctx.changed(&format!("{link} prepared to be deleted."));
    }
    match ctx.store.delete(&id, REASON) {
        Ok(()) => ctx.changed(&format!("{link} deleted.")),
        Err(err) => ctx.failed(&format!("{link} - error deleting from Wikibase {err}")),
    }
}
