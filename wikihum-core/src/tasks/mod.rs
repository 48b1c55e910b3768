//! Maintenance workflows.
//!
//! Every workflow follows the same loop: find candidates (a SPARQL query or a
//! list of rows), load each entity, apply a fixed rule, write the entity back
//! when the [`WriteMode`] allows it, and record exactly one report line per
//! candidate starting with the entity link.
//!
//! Only setup failures escape a workflow as [`TaskError`]: the initial query
//! and report writes. Store failures for a single candidate are recorded in
//! the report and counted in [`TaskSummary::failed`].

use std::{collections::HashSet, io};

use log::{info, warn};
use thiserror::Error;

use crate::{Entity, EntityStore, QueryError, QueryResults, QueryService, ReportSink, WriteError};

pub mod ahp_reference_trim;
pub mod alias_label_dedup;
pub mod count_values;
pub mod delete_entities;
pub mod missing_terms;
pub mod neighborhood_fix;
pub mod reference_rewrite;
pub mod show;
pub mod simc_dedup;
pub mod simc_pad;
pub mod stated_as_dedup;
pub mod transfer;

/// Whether workflows persist their changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Compute and report changes without writing.
    #[default]
    DryRun,
    /// Write changes to the store.
    Write,
}

impl WriteMode {
    /// Mode for a `--write` flag value.
    #[must_use]
    pub const fn from_flag(write: bool) -> Self {
        if write { Self::Write } else { Self::DryRun }
    }

    /// Whether writes are enabled.
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

/// Errors that abort a workflow run.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The candidate query failed.
    #[error("candidate query failed: {0}")]
    Query(#[from] QueryError),
    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),
}

/// Counts of candidate outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSummary {
    /// Candidates examined.
    pub processed: usize,
    /// Candidates changed (or that would change in a dry run).
    pub changed: usize,
    /// Candidates left untouched because a rule did not apply.
    pub skipped: usize,
    /// Candidates reported by a check-only workflow.
    pub flagged: usize,
    /// Candidates whose load or write failed.
    pub failed: usize,
}

/// Collaborators shared by every workflow.
pub struct TaskContext<'a> {
    /// Entity storage.
    pub store: &'a dyn EntityStore,
    /// Candidate queries.
    pub query: &'a dyn QueryService,
    /// Run report.
    pub report: &'a mut dyn ReportSink,
    /// Dry-run or write.
    pub mode: WriteMode,
    summary: TaskSummary,
}

impl<'a> TaskContext<'a> {
    /// Context over the given collaborators.
    #[must_use]
    pub const fn new(
        store: &'a dyn EntityStore,
        query: &'a dyn QueryService,
        report: &'a mut dyn ReportSink,
        mode: WriteMode,
    ) -> Self {
        Self {
            store,
            query,
            report,
            mode,
            summary: TaskSummary {
                processed: 0,
                changed: 0,
                skipped: 0,
                flagged: 0,
                failed: 0,
            },
        }
    }

    /// Counts recorded so far.
    #[must_use]
    pub const fn summary(&self) -> TaskSummary {
        self.summary
    }

    pub(crate) fn select(&self, query: &str) -> Result<QueryResults, TaskError> {
        Ok(self.query.select(query)?)
    }

    pub(crate) fn changed(&mut self, line: &str) -> Result<(), TaskError> {
        info!("{line}");
        self.summary.processed += 1;
        self.summary.changed += 1;
        self.report.record(line)?;
        Ok(())
    }

    pub(crate) fn skipped(&mut self, line: &str) -> Result<(), TaskError> {
        warn!("{line}");
        self.summary.processed += 1;
        self.summary.skipped += 1;
        self.report.record(line)?;
        Ok(())
    }

    pub(crate) fn flagged(&mut self, line: &str) -> Result<(), TaskError> {
        warn!("{line}");
        self.summary.processed += 1;
        self.summary.flagged += 1;
        self.report.record(line)?;
        Ok(())
    }

    pub(crate) fn noted(&mut self, line: &str) -> Result<(), TaskError> {
        info!("{line}");
        self.summary.processed += 1;
        self.report.record(line)?;
        Ok(())
    }

    pub(crate) fn failed(&mut self, line: &str) -> Result<(), TaskError> {
        warn!("{line}");
        self.summary.processed += 1;
        self.summary.failed += 1;
        self.report.record(line)?;
        Ok(())
    }

    /// Load an entity, recording a failure line when it cannot be read.
    pub(crate) fn load(
        &mut self,
        link: &str,
        id: &crate::EntityId,
    ) -> Result<Option<Entity>, TaskError> {
        match self.store.get(id) {
            Ok(entity) => Ok(Some(entity)),
            Err(err) => {
                self.failed(&format!("{link} - error reading from Wikibase {err}"))?;
                Ok(None)
            }
        }
    }

    /// Write `entity` when writes are enabled.
    ///
    /// Returns `Ok(true)` when the entity was written, `Ok(false)` in a dry
    /// run.
    pub(crate) fn save(&self, entity: &mut Entity, summary: &str) -> Result<bool, WriteError> {
        if !self.mode.is_write() {
            return Ok(false);
        }
        let revision = self.store.write(entity, summary)?;
        entity.mark_saved(revision);
        Ok(true)
    }

    /// Write `entity` and record the outcome as one report line.
    ///
    /// `done` and `planned` are appended to `prefix` for a successful write
    /// and a dry run respectively.
    pub(crate) fn save_and_record(
        &mut self,
        entity: &mut Entity,
        summary: &str,
        prefix: &str,
        done: &str,
        planned: &str,
    ) -> Result<(), TaskError> {
        match self.save(entity, summary) {
            Ok(true) => self.changed(&format!("{prefix}{done}")),
            Ok(false) => self.changed(&format!("{prefix}{planned}")),
            Err(err) => self.failed(&format!("{prefix} - error writing to Wikibase {err}")),
        }
    }
}

/// Distinct entity links and ids bound to `variable`, in first-seen order.
///
/// Rows whose `variable` is unbound or not an entity IRI are skipped.
pub(crate) fn candidates(
    results: &QueryResults,
    variable: &str,
) -> Vec<(String, crate::EntityId)> {
    let mut seen = HashSet::new();
    results
        .rows
        .iter()
        .filter_map(|row| {
            let link = row.value(variable)?;
            let id = row.entity_id(variable)?;
            Some((link.to_owned(), id))
        })
        .filter(|(_, id)| seen.insert(id.clone()))
        .collect()
}

/// Quote `value` as a SPARQL string literal.
pub(crate) fn sparql_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests;
