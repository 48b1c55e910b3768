//! Subcommands and their dispatch onto the maintenance workflows.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Subcommand};
use log::info;
use wikihum_core::{
    EntityId, EntityStore, PropertyId, QueryService, ReportSink, TaskContext, TaskSummary,
    WriteMode,
    tasks::{
        ahp_reference_trim, alias_label_dedup, count_values, delete_entities, missing_terms,
        neighborhood_fix, reference_rewrite, simc_dedup, simc_pad, stated_as_dedup, transfer,
    },
};
use wikihum_data::{
    read_links, read_neighborhood_rows, read_transfer_rows, write_incomplete_entities,
};

use crate::CliError;

pub(crate) const ARG_INPUT: &str = "input";
pub(crate) const ARG_LEFT: &str = "left";
pub(crate) const ARG_RIGHT: &str = "right";
pub(crate) const ARG_PROPERTY: &str = "property";
pub(crate) const ARG_ID: &str = "id";

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Command {
    /// Remove duplicated "stated as" (P54) statements.
    StatedAsDedup,
    /// Merge items holding two copies of the same SIMC identifier.
    SimcDedup,
    /// Restore leading zeros of short SIMC identifiers.
    SimcPad,
    /// Move AHP item data onto the matching PRNG item.
    Transfer(InputArgs),
    /// Delete the entities listed in a CSV file.
    DeleteEntities(InputArgs),
    /// Remove aliases that repeat the label in the same language.
    AliasLabelDedup,
    /// Report entities without exactly one value for a property.
    CountValues(CountValuesArgs),
    /// List items lacking a Polish or English label or description.
    MissingTerms(MissingTermsArgs),
    /// Replace Data Atlas Fontium references with the dataset reference.
    ReferenceRewrite,
    /// Trim AHP references to their URL, file name and retrieval date.
    AhpReferenceTrim,
    /// Point neighborhood statements at the items that replaced deleted ones.
    NeighborhoodFix(InputArgs),
    /// Left-join two CSV files on a shared column.
    NeighborhoodJoin(JoinArgs),
    /// Print the statements of one entity.
    Show(ShowArgs),
}

/// A CSV input file.
#[derive(Debug, Clone, Args)]
pub(crate) struct InputArgs {
    /// CSV input file.
    #[arg(value_name = "csv")]
    pub(crate) input: Utf8PathBuf,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct CountValuesArgs {
    /// CSV file whose first column lists entity links.
    #[arg(value_name = "csv")]
    pub(crate) input: Utf8PathBuf,
    /// Property whose values are counted.
    #[arg(long = ARG_PROPERTY, value_name = "pid", default_value = "P81")]
    pub(crate) property: String,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct MissingTermsArgs {
    /// Highest item number to scan.
    #[arg(long, value_name = "n")]
    pub(crate) last: u64,
    /// CSV file receiving the incomplete items.
    #[arg(long, value_name = "csv", default_value = "missing_terms.csv")]
    pub(crate) output: Utf8PathBuf,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct JoinArgs {
    /// Left-hand CSV; every row is kept.
    #[arg(long = ARG_LEFT, value_name = "csv")]
    pub(crate) left: Utf8PathBuf,
    /// Right-hand CSV.
    #[arg(long = ARG_RIGHT, value_name = "csv")]
    pub(crate) right: Utf8PathBuf,
    /// Joined CSV to write.
    #[arg(long, value_name = "csv")]
    pub(crate) output: Utf8PathBuf,
    /// Column both files share.
    #[arg(long, value_name = "column", default_value = "value")]
    pub(crate) key: String,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct ShowArgs {
    /// Entity id or link.
    #[arg(value_name = "id")]
    pub(crate) id: String,
}

impl Command {
    /// Kebab-case name, used for the default report file.
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Self::StatedAsDedup => "stated-as-dedup",
            Self::SimcDedup => "simc-dedup",
            Self::SimcPad => "simc-pad",
            Self::Transfer(_) => "transfer",
            Self::DeleteEntities(_) => "delete-entities",
            Self::AliasLabelDedup => "alias-label-dedup",
            Self::CountValues(_) => "count-values",
            Self::MissingTerms(_) => "missing-terms",
            Self::ReferenceRewrite => "reference-rewrite",
            Self::AhpReferenceTrim => "ahp-reference-trim",
            Self::NeighborhoodFix(_) => "neighborhood-fix",
            Self::NeighborhoodJoin(_) => "neighborhood-join",
            Self::Show(_) => "show",
        }
    }

    /// Input files the command reads, with the flag naming each.
    pub(crate) fn inputs(&self) -> Vec<(&'static str, &Utf8Path)> {
        match self {
            Self::Transfer(args) | Self::DeleteEntities(args) | Self::NeighborhoodFix(args) => {
                vec![(ARG_INPUT, args.input.as_path())]
            }
            Self::CountValues(args) => vec![(ARG_INPUT, args.input.as_path())],
            Self::NeighborhoodJoin(args) => vec![
                (ARG_LEFT, args.left.as_path()),
                (ARG_RIGHT, args.right.as_path()),
            ],
            _ => Vec::new(),
        }
    }
}

/// Fail unless every input of `command` is an existing file.
pub(crate) fn validate_inputs(command: &Command) -> Result<(), CliError> {
    for (field, path) in command.inputs() {
        require_existing(path, field)?;
    }
    Ok(())
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match wikihum_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn parse_entity_id(value: &str) -> Result<EntityId, CliError> {
    EntityId::parse(value).map_err(|source| CliError::InvalidId {
        field: ARG_ID,
        value: value.to_owned(),
        source,
    })
}

fn parse_property(value: &str) -> Result<PropertyId, CliError> {
    PropertyId::parse(value).map_err(|source| CliError::InvalidId {
        field: ARG_PROPERTY,
        value: value.to_owned(),
        source,
    })
}

/// Collaborators a workflow runs against.
pub(crate) struct Services<'a> {
    pub(crate) store: &'a dyn EntityStore,
    pub(crate) query: &'a dyn QueryService,
    /// Prefix turning an item id into a wiki page link.
    pub(crate) item_page_base: &'a str,
}

/// Run a workflow command and return its outcome counts.
///
/// `neighborhood-join` and `show` do not produce a run report and are handled
/// by the caller.
pub(crate) fn execute(
    command: &Command,
    services: &Services<'_>,
    report: &mut dyn ReportSink,
    mode: WriteMode,
) -> Result<TaskSummary, CliError> {
    let mut ctx = TaskContext::new(services.store, services.query, report, mode);
    let summary = match command {
        Command::StatedAsDedup => stated_as_dedup::run(&mut ctx)?,
        Command::SimcDedup => simc_dedup::run(&mut ctx)?,
        Command::SimcPad => simc_pad::run(&mut ctx)?,
        Command::Transfer(args) => transfer::run(&mut ctx, &read_transfer_rows(&args.input)?)?,
        Command::DeleteEntities(args) => delete_entities::run(&mut ctx, &read_links(&args.input)?)?,
        Command::AliasLabelDedup => alias_label_dedup::run(&mut ctx)?,
        Command::CountValues(args) => {
            let property = parse_property(&args.property)?;
            count_values::run(&mut ctx, &read_links(&args.input)?, &property)?
        }
        Command::MissingTerms(args) => {
            let incomplete = missing_terms::run(&mut ctx, args.last, services.item_page_base)?;
            write_incomplete_entities(&args.output, &incomplete)?;
            info!("wrote {} incomplete items to {}", incomplete.len(), args.output);
            ctx.summary()
        }
        Command::ReferenceRewrite => reference_rewrite::run(&mut ctx)?,
        Command::AhpReferenceTrim => ahp_reference_trim::run(&mut ctx)?,
        Command::NeighborhoodFix(args) => {
            neighborhood_fix::run(&mut ctx, &read_neighborhood_rows(&args.input)?)?
        }
        Command::NeighborhoodJoin(_) | Command::Show(_) => ctx.summary(),
    };
    Ok(summary)
}
