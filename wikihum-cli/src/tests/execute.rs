//! Command dispatch against in-memory collaborators.

use super::*;
use crate::commands::{CountValuesArgs, InputArgs, MissingTermsArgs};
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;
use wikihum_core::{
    EntityId, MemoryReport, Statement,
    test_support::{
        MemoryEntityStore, StaticQueryService, entity_with, item_results, link, pid, string_snak,
    },
};

const PAGE_BASE: &str = "https://wikihum.example/wiki/Item:";

#[fixture]
fn dir() -> TempDir {
    TempDir::new().expect("tempdir")
}

fn utf8(dir: &TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf8 temp path")
}

fn run(
    command: &Command,
    store: &MemoryEntityStore,
    query: &StaticQueryService,
    mode: WriteMode,
) -> (TaskSummary, Vec<String>) {
    let mut report = MemoryReport::default();
    let services = Services {
        store,
        query,
        item_page_base: PAGE_BASE,
    };
    let summary = execute(command, &services, &mut report, mode).expect("command runs");
    (summary, report.lines)
}

fn short_simc_store() -> MemoryEntityStore {
    MemoryEntityStore::with_entities([entity_with(
        "Q1",
        [Statement::new(string_snak("P75", "123"))],
    )])
}

#[rstest]
fn dry_runs_report_without_writing() {
    let store = short_simc_store();
    let query = StaticQueryService::default().with_response("P75", item_results(&["Q1"]));

    let (summary, lines) = run(&Command::SimcPad, &store, &query, WriteMode::DryRun);

    assert_eq!(summary.changed, 1);
    assert!(store.writes().is_empty());
    let [line] = lines.as_slice() else {
        panic!("expected one report line, got {lines:?}");
    };
    assert!(line.starts_with(&link("Q1")));
    assert!(line.contains("prepared to be added 0000123"), "{line}");
}

#[rstest]
fn write_mode_persists_changes() {
    let store = short_simc_store();
    let query = StaticQueryService::default().with_response("P75", item_results(&["Q1"]));

    let (summary, _) = run(&Command::SimcPad, &store, &query, WriteMode::Write);

    assert_eq!(summary.changed, 1);
    assert_eq!(store.writes().len(), 1);
    let saved = store
        .entity(&EntityId::from_static("Q1"))
        .expect("entity kept");
    assert_eq!(
        saved.statements(&pid("P75")).first().map(|s| s.main_snak.clone()),
        Some(string_snak("P75", "0000123"))
    );
}

#[rstest]
fn count_values_reads_links_from_csv(dir: TempDir) {
    let input = utf8(&dir, "ahp.csv");
    fs::write(&input, format!("link\n{}\n{}\n", link("Q1"), link("Q2"))).expect("write input");
    let store = MemoryEntityStore::with_entities([
        entity_with("Q1", [Statement::new(string_snak("P81", "A1"))]),
        entity_with(
            "Q2",
            [
                Statement::new(string_snak("P81", "A2")),
                Statement::new(string_snak("P81", "A3")),
            ],
        ),
    ]);
    let command = Command::CountValues(CountValuesArgs {
        input,
        property: "P81".to_owned(),
    });

    let (summary, lines) = run(
        &command,
        &store,
        &StaticQueryService::default(),
        WriteMode::DryRun,
    );

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.flagged, 1);
    assert!(
        lines
            .last()
            .is_some_and(|line| line.contains("has more than one value (2)")),
        "{lines:?}"
    );
}

#[rstest]
fn count_values_rejects_non_property_ids(dir: TempDir) {
    let input = utf8(&dir, "ahp.csv");
    fs::write(&input, "link\n").expect("write input");
    let command = Command::CountValues(CountValuesArgs {
        input,
        property: "Q81".to_owned(),
    });
    let mut report = MemoryReport::default();
    let store = MemoryEntityStore::default();
    let query = StaticQueryService::default();
    let services = Services {
        store: &store,
        query: &query,
        item_page_base: PAGE_BASE,
    };
    let err = execute(&command, &services, &mut report, WriteMode::DryRun)
        .expect_err("Q81 is not a property");
    assert!(matches!(err, CliError::InvalidId { field: "property", .. }));
}

#[rstest]
fn missing_terms_writes_the_csv(dir: TempDir) {
    let output = utf8(&dir, "missing.csv");
    let mut complete = entity_with("Q1", []);
    for language in ["pl", "en"] {
        complete.labels.insert(language.to_owned(), "Kraków".to_owned());
        complete
            .descriptions
            .insert(language.to_owned(), "miasto".to_owned());
    }
    let mut partial = entity_with("Q2", []);
    partial.labels.insert("pl".to_owned(), "Gniezno".to_owned());
    let store = MemoryEntityStore::with_entities([complete, partial]);
    let command = Command::MissingTerms(MissingTermsArgs {
        last: 3,
        output: output.clone(),
    });

    let (summary, lines) = run(
        &command,
        &store,
        &StaticQueryService::default(),
        WriteMode::DryRun,
    );

    assert_eq!(summary.flagged, 1);
    assert_eq!(summary.skipped, 1, "Q3 does not exist: {lines:?}");
    assert_eq!(
        fs::read_to_string(&output).expect("output written"),
        format!(
            "link,id,label_pl,label_en,description_pl,description_en\n{PAGE_BASE}Q2,Q2,Gniezno,,,\n"
        )
    );
}

#[rstest]
fn delete_entities_honours_dry_run(dir: TempDir) {
    let input = utf8(&dir, "deleted.csv");
    fs::write(&input, format!("link\n{}\n", link("Q1"))).expect("write input");
    let store = MemoryEntityStore::with_entities([entity_with("Q1", [])]);

    let command = Command::DeleteEntities(InputArgs { input });
    run(
        &command,
        &store,
        &StaticQueryService::default(),
        WriteMode::DryRun,
    );
    assert!(store.deletes().is_empty());

    run(
        &command,
        &store,
        &StaticQueryService::default(),
        WriteMode::Write,
    );
    assert_eq!(store.deletes().len(), 1);
}
