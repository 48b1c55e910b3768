//! Drop "stated in" from AHP identifier references.
//!
//! The first reference of the first P81 statement is rebuilt from its
//! reference URL, file name and retrieved date, in that order. Any further
//! references on the statement are left as they are.

use super::{TaskContext, TaskError, TaskSummary, candidates};
use crate::{EntityId, PropertyId, Reference, Snak};

/// AHP identifier.
pub const AHP: PropertyId = PropertyId::from_static("P81");
/// Snaks kept in the trimmed reference, in order.
pub const KEPT: [PropertyId; 3] = [
    PropertyId::from_static("P2"),
    PropertyId::from_static("P122"),
    PropertyId::from_static("P48"),
];

/// Items whose AHP identifier reference carries "stated in".
pub const QUERY: &str = r"SELECT ?item ?statedIn WHERE {
  ?item p:P81 ?statement .
  ?statement prov:wasDerivedFrom ?reference .
  ?reference pr:P55 ?statedIn
}
ORDER BY ?item";

/// Rebuild `reference` from the first snak of each [`KEPT`] property.
///
/// Returns the first missing property when one is absent.
pub fn trimmed(reference: &Reference) -> Result<Reference, PropertyId> {
    let snaks = KEPT
        .iter()
        .map(|property| {
            reference
                .first(property)
                .map(Snak::detached)
                .ok_or_else(|| property.clone())
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Reference::from_snaks(snaks))
}

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
    let Some(reference) = entity
        .statements(&AHP)
        .first()
        .and_then(|statement| statement.references.first())
    else {
        return ctx.skipped(&format!("{link} - AHP ID has no reference"));
    };
    let replacement = match trimmed(reference) {
        Ok(replacement) => replacement,
        Err(missing) => {
            return ctx.skipped(&format!("{link} - AHP ID reference lacks {missing}"));
        }
    };
    if replacement.snaks == reference.snaks {
        return ctx.skipped(&format!("{link} - AHP ID reference already trimmed"));
    }
    if let Some(first) = entity
        .statements
        .get_mut(&AHP)
        .and_then(|group| group.first_mut())
        .and_then(|statement| statement.references.first_mut())
    {
        *first = replacement;
    }
    ctx.save_and_record(
        &mut entity,
        "Removed stated in from AHP ID reference",
        link,
        " - stated in removed from reference",
        " - stated in prepared to be removed from reference",
    )
}
