//! Replace "stated in: Data Atlas Fontium" references with a direct
//! reference to the published dataset.

use super::{TaskContext, TaskError, TaskSummary};
use crate::{
    DataValue, Datatype, EntityId, PropertyId, Reference, Snak, StatementId, TimeValue,
};

/// "stated in".
pub const STATED_IN: PropertyId = PropertyId::from_static("P55");
/// Reference URL.
pub const REFERENCE_URL: PropertyId = PropertyId::from_static("P2");
/// File name.
pub const FILENAME: PropertyId = PropertyId::from_static("P122");
/// Retrieved date.
pub const RETRIEVED: PropertyId = PropertyId::from_static("P48");
/// Data Atlas Fontium item.
pub const DATA_ATLAS_FONTIUM: EntityId = EntityId::from_static("Q179149");

/// Statements referenced as stated in Data Atlas Fontium.
pub const QUERY: &str = r"SELECT ?item ?statement WHERE {
  ?item ?property ?statement .
  ?statement prov:wasDerivedFrom ?reference .
  ?reference pr:P55 wd:Q179149 .
}
ORDER BY ?item";

/// Reference pointing at the Data Atlas Fontium dataset file.
#[must_use]
pub fn dataset_reference() -> Reference {
    Reference::from_snaks([
        Snak::value(
            REFERENCE_URL,
            Datatype::Url,
            DataValue::string("https://data.atlasfontium.pl/documents/202"),
        ),
        Snak::value(
            FILENAME,
            Datatype::String,
            DataValue::string("tabela-zbiorcza-miejscowosci-atlas-historyczny-polski-xvi-w"),
        ),
        Snak::value(
            RETRIEVED,
            Datatype::Time,
            DataValue::Time(TimeValue::gregorian(
                "+2023-12-07T00:00:00Z",
                TimeValue::PRECISION_DAY,
            )),
        ),
    ])
}

fn cites_atlas(reference: &Reference) -> bool {
    reference
        .first(&STATED_IN)
        .and_then(|snak| snak.datavalue.as_ref())
        .and_then(DataValue::as_entity_id)
        .is_some_and(|id| id == DATA_ATLAS_FONTIUM.as_str())
}

/// Run the workflow over every statement returned by [`QUERY`].
pub fn run(ctx: &mut TaskContext<'_>) -> Result<TaskSummary, TaskError> {
    let results = ctx.select(QUERY)?;
    for row in &results.rows {
        let (Some(link), Some(id)) = (row.value("item"), row.entity_id("item")) else {
            continue;
        };
        let Some(statement) = row.statement_id("statement") else {
            ctx.skipped(&format!("{link} - statement link is not a statement id"))?;
            continue;
        };
        process(ctx, link, &id, &statement)?;
    }
    Ok(ctx.summary())
}

fn process(
    ctx: &mut TaskContext<'_>,
    link: &str,
    id: &EntityId,
    statement_id: &StatementId,
) -> Result<(), TaskError> {
    let Some(mut entity) = ctx.load(link, id)? else {
        return Ok(());
    };
    let Some(statement) = entity
        .statements
        .iter_mut()
        .find(|statement| statement.id.as_ref() == Some(statement_id))
    else {
        return ctx.skipped(&format!("{link} - statement {statement_id} not found"));
    };
    let mut replaced = 0_usize;
    for reference in &mut statement.references {
        if cites_atlas(reference) {
            *reference = dataset_reference();
            replaced += 1;
        }
    }
    if replaced == 0 {
        return ctx.skipped(&format!(
            "{link} - statement {statement_id} has no Data Atlas Fontium reference"
        ));
    }
    ctx.save_and_record(
        &mut entity,
        "Replaced Data Atlas Fontium reference",
        link,
        " - stated in Data Atlas Fontium removed from reference",
        " - stated in Data Atlas Fontium prepared to be removed from reference",
    )
}
