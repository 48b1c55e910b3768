//! Remove aliases that repeat the label in the same language.

use super::{TaskContext, TaskError, TaskSummary, candidates};
use crate::{Entity, EntityId};

/// Languages checked for label/alias collisions.
pub const LANGUAGES: [&str; 2] = ["pl", "en"];

/// Entities with an alias equal to a label.
pub const QUERY: &str = r"SELECT DISTINCT ?item ?itemLabel ?itemAlias WHERE {
  ?item rdfs:label ?itemLabel .
  ?item skos:altLabel ?itemAlias .
  FILTER (STR(?itemLabel) = STR(?itemAlias))
}
ORDER BY ?item";

/// Run the workflow over every candidate returned by [`QUERY`].
pub fn run(ctx: &mut TaskContext<'_>) -> Result<TaskSummary, TaskError> {
    let results = ctx.select(QUERY)?;
    for (link, id) in candidates(&results, "item") {
        process(ctx, &link, &id)?;
    }
    Ok(ctx.summary())
}

/// Remove aliases equal to the label in each of [`LANGUAGES`].
///
/// Returns the removed `language alias` pairs, formatted for the report.
pub fn remove_label_aliases(entity: &mut Entity) -> Vec<String> {
    let mut removed = Vec::new();
    for language in LANGUAGES {
        let Some(label) = entity.label(language).map(str::to_owned) else {
            continue;
        };
        if entity.remove_alias(language, &label) {
            removed.push(format!("{language} {label}"));
        }
    }
    removed
}

fn process(ctx: &mut TaskContext<'_>, link: &str, id: &EntityId) -> Result<(), TaskError> {
    let Some(mut entity) = ctx.load(link, id)? else {
        return Ok(());
    };
    let removed = remove_label_aliases(&mut entity);
    if removed.is_empty() {
        return ctx.skipped(&format!("{link} - no alias same as label in pl or en"));
    }
    let listed = removed.join(", ");
    ctx.save_and_record(
        &mut entity,
        "Removed aliases identical to labels",
        link,
        &format!(" - alias same as label removed: {listed}"),
        &format!(" - alias same as label: {listed}"),
    )
}
