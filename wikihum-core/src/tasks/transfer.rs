//! Transfer historical atlas (AHP) records onto PRNG geographic-name items.
//!
//! Each input row pairs an AHP item with a PRNG identifier. The PRNG
//! identifier is looked up in the store:
//! - no item holds it: the identifier is added to the AHP item;
//! - one item holds it: the AHP item's names become aliases of that item and
//!   its statements move there, except the ones describing the AHP record
//!   itself;
//! - several items hold it: nothing is changed.

use super::{TaskContext, TaskError, TaskSummary, candidates, sparql_string};
use crate::{
    DataValue, Datatype, Entity, EntityId, PropertyId, Reference, Snak, Statement, TimeValue,
    are_equivalent, copy_statement,
};

/// PRNG identifier.
pub const PRNG: PropertyId = PropertyId::from_static("P76");
/// "stated as"; its values become aliases on the target.
pub const STATED_AS: PropertyId = PropertyId::from_static("P54");
/// Point in time qualifier.
pub const POINT_IN_TIME: PropertyId = PropertyId::from_static("P40");
/// Reference URL.
pub const REFERENCE_URL: PropertyId = PropertyId::from_static("P2");
/// Retrieved date.
pub const RETRIEVED: PropertyId = PropertyId::from_static("P48");
/// Properties that stay on the source item.
pub const KEPT_ON_SOURCE: [PropertyId; 2] = [
    PropertyId::from_static("P27"),
    PropertyId::from_static("P108"),
];
/// Source of PRNG identifiers.
pub const PRNG_SOURCE_URL: &str =
    "https://mapy.geoportal.gov.pl/wss/service/PZGiK/PRNG/WFS/GeographicalNames";

/// One input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRow {
    /// Link to the AHP item.
    pub link: String,
    /// Label of the AHP item, informational only.
    pub label: String,
    /// PRNG identifier to look up.
    pub prng: String,
}

/// Query for items already holding `prng`.
#[must_use]
pub fn prng_query(prng: &str) -> String {
    format!(
        "SELECT DISTINCT ?item WHERE {{\n  ?item p:P76 ?statement0 .\n  ?statement0 (ps:P76) {} .\n}}",
        sparql_string(prng)
    )
}

/// P76 statement for `prng`, qualified with the 2022 survey year and
/// referenced to the PRNG web service.
#[must_use]
pub fn prng_statement(prng: &str) -> Statement {
    Statement::new(Snak::value(
        PRNG,
        Datatype::ExternalId,
        DataValue::string(prng),
    ))
    .with_qualifier(Snak::value(
        POINT_IN_TIME,
        Datatype::Time,
        DataValue::Time(TimeValue::gregorian(
            "+2022-00-00T00:00:00Z",
            TimeValue::PRECISION_YEAR,
        )),
    ))
    .with_reference(Reference::from_snaks([
        Snak::value(REFERENCE_URL, Datatype::Url, DataValue::string(PRNG_SOURCE_URL)),
        Snak::value(
            RETRIEVED,
            Datatype::Time,
            DataValue::Time(TimeValue::gregorian(
                "+2022-09-23T00:00:00Z",
                TimeValue::PRECISION_DAY,
            )),
        ),
    ]))
}

/// Run the workflow over `rows`.
///
/// A failed lookup is recorded against its row and the run moves on.
pub fn run(ctx: &mut TaskContext<'_>, rows: &[TransferRow]) -> Result<TaskSummary, TaskError> {
    for row in rows {
        process(ctx, row)?;
    }
    Ok(ctx.summary())
}

fn process(ctx: &mut TaskContext<'_>, row: &TransferRow) -> Result<(), TaskError> {
    let link = row.link.as_str();
    let Ok(id) = EntityId::parse(link) else {
        return ctx.skipped(&format!("{link} - not an entity link"));
    };
    let results = match ctx.select(&prng_query(&row.prng)) {
        Ok(results) => results,
        Err(err) => return ctx.failed(&format!("{link} - error querying Wikibase {err}")),
    };
    let holders = candidates(&results, "item");
    match holders.as_slice() {
        [] => add_identifier(ctx, link, &id, &row.prng),
        [(target_link, target_id)] => {
            if target_id == &id {
                return ctx.skipped(&format!("{link} - element already holds PRNG {}", row.prng));
            }
            move_data(ctx, link, &id, target_link, target_id)
        }
        _ => ctx.skipped(&format!(
            "{link} PRNG {} exists in more than one element.",
            row.prng
        )),
    }
}

fn add_identifier(
    ctx: &mut TaskContext<'_>,
    link: &str,
    id: &EntityId,
    prng: &str,
) -> Result<(), TaskError> {
    let Some(mut entity) = ctx.load(link, id)? else {
        return Ok(());
    };
    entity.add_statement(prng_statement(prng));
    ctx.save_and_record(
        &mut entity,
        "Added PRNG identifier",
        link,
        " PRNG added to the element.",
        " PRNG prepared to be added to the element.",
    )
}

fn move_data(
    ctx: &mut TaskContext<'_>,
    link: &str,
    id: &EntityId,
    target_link: &str,
    target_id: &EntityId,
) -> Result<(), TaskError> {
    let Some(mut source) = ctx.load(link, id)? else {
        return Ok(());
    };
    let Some(mut target) = ctx.load(target_link, target_id)? else {
        return Ok(());
    };
    transfer_statements(&mut source, &mut target);

    // Target first: a failure then leaves the source intact.
    let summary = format!("Data moved from {id}");
    let outcome = ctx
        .save(&mut target, &summary)
        .and_then(|written| {
            ctx.save(&mut source, &format!("Data moved to {target_id}"))
                .map(|_| written)
        });
    match outcome {
        Ok(true) => ctx.changed(&format!("{link} data moved to the element {target_link}.")),
        Ok(false) => ctx.changed(&format!(
            "{link} data prepared to be moved to the element {target_link}."
        )),
        Err(err) => ctx.failed(&format!("{link} - error writing to Wikibase {err}")),
    }
}

/// Move statements from `source` onto `target`.
///
/// Monolingual "stated as" values become aliases on the target. Every
/// statement outside [`KEPT_ON_SOURCE`] is copied onto the target, unless an
/// equivalent statement is already there, and removed from the source.
pub fn transfer_statements(source: &mut Entity, target: &mut Entity) {
    for statement in source.statements(&STATED_AS) {
        if let Some(text) = statement
            .main_snak
            .datavalue
            .as_ref()
            .and_then(DataValue::as_monolingual)
        {
            target.add_alias(&text.language, &text.text);
        }
    }
    let moving: Vec<PropertyId> = source
        .statements
        .order()
        .filter(|property| !KEPT_ON_SOURCE.contains(property))
        .cloned()
        .collect();
    for property in moving {
        while let Some(statement) = source.remove_statement_at(&property, 0) {
            let duplicate = target
                .statements(&property)
                .iter()
                .any(|existing| are_equivalent(existing, &statement).is_equivalent());
            if !duplicate {
                target.add_statement(copy_statement(&statement, None));
            }
        }
    }
}
