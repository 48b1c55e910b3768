//! Workflow tests over the in-memory store and query service.

use super::*;
use crate::test_support::{
    MemoryEntityStore, StaticQueryService, entity_with, item_results, item_snak, link,
    monolingual_statement, pid, results, saved, string_snak, time_snak, url_date_reference,
    url_snak,
};
use crate::{DataValue, EntityId, MemoryReport, Statement, TimeValue};
use rstest::{fixture, rstest};

fn run_with<T>(
    store: &MemoryEntityStore,
    query: &StaticQueryService,
    mode: WriteMode,
    body: impl FnOnce(&mut TaskContext<'_>) -> Result<T, TaskError>,
) -> (T, TaskSummary, Vec<String>) {
    let mut report = MemoryReport::default();
    let (value, summary) = {
        let mut ctx = TaskContext::new(store, query, &mut report, mode);
        let value = body(&mut ctx).expect("workflow should complete");
        (value, ctx.summary())
    };
    (value, summary, report.lines)
}

fn stated_as(text: &str) -> Statement {
    monolingual_statement("P54", text, "pl")
        .with_qualifier(time_snak("P40", "+2022-00-00T00:00:00Z", TimeValue::PRECISION_YEAR))
        .with_reference(url_date_reference(
            "https://example.org/source",
            "+2022-09-23T00:00:00Z",
        ))
}

fn simc(value: &str) -> Statement {
    Statement::new(crate::Snak::value(
        pid("P75"),
        crate::Datatype::ExternalId,
        DataValue::string(value),
    ))
}

#[fixture]
fn stated_as_query() -> StaticQueryService {
    StaticQueryService::default().with_response(
        "p:P54",
        results(&[&[("item", link("Q1").as_str()), ("value", "Foo")]]),
    )
}

#[rstest]
fn stated_as_dedup_removes_second_equivalent_claim(stated_as_query: StaticQueryService) {
    let store = MemoryEntityStore::with_entities([entity_with(
        "Q1",
        [
            saved(stated_as("Foo"), "Q1", "a"),
            saved(stated_as("Foo"), "Q1", "b"),
        ],
    )]);
    let (summary, _, lines) = run_with(&store, &stated_as_query, WriteMode::Write, |ctx| {
        stated_as_dedup::run(ctx)
    });
    assert_eq!(summary.changed, 1);
    assert_eq!(lines, vec![format!("{} Foo claim removed", link("Q1"))]);
    let stored = store.entity(&EntityId::from_static("Q1")).expect("entity kept");
    let remaining = stored.statements(&pid("P54"));
    assert_eq!(remaining.len(), 1);
    assert_eq!(
        remaining.first().and_then(|s| s.id.as_ref()).map(ToString::to_string),
        Some("Q1$a".to_owned())
    );
    let writes = store.writes();
    let [write] = writes.as_slice() else {
        panic!("expected one write, got {}", writes.len());
    };
    assert_eq!(write.entity.removed_statements().len(), 1);
}

#[rstest]
fn stated_as_dedup_dry_run_leaves_store_untouched(stated_as_query: StaticQueryService) {
    let store = MemoryEntityStore::with_entities([entity_with(
        "Q1",
        [stated_as("Foo"), stated_as("Foo")],
    )]);
    let (summary, _, lines) = run_with(&store, &stated_as_query, WriteMode::DryRun, |ctx| {
        stated_as_dedup::run(ctx)
    });
    assert_eq!(summary.changed, 1);
    assert_eq!(
        lines,
        vec![format!("{} Foo claim prepared to be removed", link("Q1"))]
    );
    assert!(store.writes().is_empty());
}

#[rstest]
fn stated_as_dedup_reports_difference(stated_as_query: StaticQueryService) {
    let mut different = stated_as("Foo");
    different.references.clear();
    let store =
        MemoryEntityStore::with_entities([entity_with("Q1", [stated_as("Foo"), different])]);
    let (summary, _, lines) = run_with(&store, &stated_as_query, WriteMode::Write, |ctx| {
        stated_as_dedup::run(ctx)
    });
    assert_eq!(summary.skipped, 1);
    assert_eq!(
        lines,
        vec![format!("{} - number of references not equal", link("Q1"))]
    );
    assert!(store.writes().is_empty());
}

#[rstest]
fn stated_as_dedup_skips_three_copies(stated_as_query: StaticQueryService) {
    let store = MemoryEntityStore::with_entities([entity_with(
        "Q1",
        [stated_as("Foo"), stated_as("Foo"), stated_as("Foo")],
    )]);
    let (_, _, lines) = run_with(&store, &stated_as_query, WriteMode::Write, |ctx| {
        stated_as_dedup::run(ctx)
    });
    assert_eq!(
        lines,
        vec![format!(
            "{} - too many claims in the property 'stated as' 3",
            link("Q1")
        )]
    );
}

#[rstest]
fn write_conflict_is_reported_and_run_continues() {
    let store = MemoryEntityStore::with_entities([
        entity_with("Q1", [stated_as("Foo"), stated_as("Foo")]),
        entity_with("Q2", [stated_as("Foo"), stated_as("Foo")]),
    ]);
    store.fail_writes_with_conflict(EntityId::from_static("Q1"));
    let query = StaticQueryService::default().with_response(
        "p:P54",
        results(&[
            &[("item", link("Q1").as_str()), ("value", "Foo")],
            &[("item", link("Q2").as_str()), ("value", "Foo")],
        ]),
    );
    let (summary, _, lines) =
        run_with(&store, &query, WriteMode::Write, |ctx| stated_as_dedup::run(ctx));
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.changed, 1);
    assert!(
        lines
            .first()
            .is_some_and(|line| line.contains("error writing to Wikibase"))
    );
    assert_eq!(store.writes().len(), 1);
}

#[rstest]
fn query_failure_aborts_run() {
    let store = MemoryEntityStore::default();
    let query = StaticQueryService::failing(crate::QueryError::Transport {
        message: "timed out".into(),
    });
    let mut report = MemoryReport::default();
    let mut ctx = TaskContext::new(&store, &query, &mut report, WriteMode::DryRun);
    let err = stated_as_dedup::run(&mut ctx).expect_err("query failure should abort");
    assert!(matches!(err, TaskError::Query(_)));
}

#[rstest]
fn simc_dedup_moves_reference_and_pads_first_value() {
    let second = simc("0012345").with_reference(url_date_reference(
        "https://eteryt.stat.gov.pl",
        "+2023-01-01T00:00:00Z",
    ));
    let store = MemoryEntityStore::with_entities([entity_with(
        "Q7",
        [saved(simc("12345"), "Q7", "a"), saved(second, "Q7", "b")],
    )]);
    let query =
        StaticQueryService::default().with_response("HAVING (?count = 2)", item_results(&["Q7"]));
    let (summary, _, lines) =
        run_with(&store, &query, WriteMode::Write, |ctx| simc_dedup::run(ctx));
    assert_eq!(summary.changed, 1);
    assert!(
        lines
            .first()
            .is_some_and(|line| line.contains("SIMC ID value was changed 12345 to 0012345"))
    );
    let stored = store.entity(&EntityId::from_static("Q7")).expect("entity");
    let [kept] = stored.statements(&pid("P75")) else {
        panic!("expected a single SIMC statement");
    };
    assert_eq!(kept.main_snak.datavalue, Some(DataValue::string("0012345")));
    assert_eq!(kept.references.len(), 1);
    assert_eq!(
        kept.references
            .first()
            .map(|r| r.snaks.order().map(|p| p.as_str().to_owned()).collect::<Vec<_>>()),
        Some(vec!["P2".to_owned(), "P48".to_owned()])
    );
}

#[rstest]
#[case::incompatible(simc("7654321"), "incompatible SIMC ID 0012345 / 7654321")]
#[case::qualified(
    simc("0012345").with_qualifier(string_snak("P40", "x")),
    "There are qualifiers in the second value of the SIMC ID"
)]
#[case::unreferenced(simc("0012345"), "does not have exactly one reference")]
fn simc_dedup_skips_unsafe_merges(#[case] second: Statement, #[case] expected: &str) {
    let store = MemoryEntityStore::with_entities([entity_with("Q7", [simc("12345"), second])]);
    let query =
        StaticQueryService::default().with_response("HAVING (?count = 2)", item_results(&["Q7"]));
    let (summary, _, lines) =
        run_with(&store, &query, WriteMode::Write, |ctx| simc_dedup::run(ctx));
    assert_eq!(summary.skipped, 1);
    assert!(lines.first().is_some_and(|line| line.contains(expected)));
    assert!(store.writes().is_empty());
}

#[rstest]
fn simc_pad_adds_leading_zeros() {
    let store = MemoryEntityStore::with_entities([entity_with("Q3", [simc("123")])]);
    let query =
        StaticQueryService::default().with_response("HAVING (?count = 1)", item_results(&["Q3"]));
    let (_, _, lines) = run_with(&store, &query, WriteMode::Write, |ctx| simc_pad::run(ctx));
    assert_eq!(
        lines,
        vec![format!(
            "{} missing zeroes in SIMC ID were added 0000123",
            link("Q3")
        )]
    );
    let stored = store.entity(&EntityId::from_static("Q3")).expect("entity");
    assert_eq!(
        stored
            .statements(&pid("P75"))
            .first()
            .and_then(|s| s.main_snak.datavalue.clone()),
        Some(DataValue::string("0000123"))
    );
}

#[rstest]
fn transfer_adds_prng_when_unknown() {
    let store = MemoryEntityStore::with_entities([entity_with("Q10", [])]);
    let query = StaticQueryService::default();
    let rows = [transfer::TransferRow {
        link: link("Q10"),
        label: "Kraków".into(),
        prng: "12345".into(),
    }];
    let (_, _, lines) = run_with(&store, &query, WriteMode::Write, |ctx| {
        transfer::run(ctx, &rows)
    });
    assert_eq!(
        lines,
        vec![format!("{} PRNG added to the element.", link("Q10"))]
    );
    assert!(query.queries().iter().any(|q| q.contains("\"12345\"")));
    let stored = store.entity(&EntityId::from_static("Q10")).expect("entity");
    let [prng] = stored.statements(&pid("P76")) else {
        panic!("expected one PRNG statement");
    };
    assert_eq!(prng.main_snak.datatype, Some(crate::Datatype::ExternalId));
    assert_eq!(prng.qualifiers.order().count(), 1);
    let reference = prng.references.first().expect("reference");
    assert_eq!(
        reference.first(&pid("P2")).and_then(|s| s.datavalue.clone()),
        Some(DataValue::string(transfer::PRNG_SOURCE_URL))
    );
}

#[rstest]
fn transfer_moves_statements_to_single_holder() {
    let source = entity_with(
        "Q10",
        [
            saved(monolingual_statement("P54", "Cracovia", "la"), "Q10", "a"),
            saved(item_snak_statement("P27", "Q1"), "Q10", "b"),
            saved(item_snak_statement("P84", "Q99"), "Q10", "c"),
        ],
    );
    let target = entity_with("Q20", [saved(item_snak_statement("P84", "Q99"), "Q20", "x")]);
    let store = MemoryEntityStore::with_entities([source, target]);
    let query = StaticQueryService::default().with_response("p:P76", item_results(&["Q20"]));
    let rows = [transfer::TransferRow {
        link: link("Q10"),
        label: "Kraków".into(),
        prng: "555".into(),
    }];
    let (_, _, lines) = run_with(&store, &query, WriteMode::Write, |ctx| {
        transfer::run(ctx, &rows)
    });
    assert_eq!(
        lines,
        vec![format!(
            "{} data moved to the element {}.",
            link("Q10"),
            link("Q20")
        )]
    );
    let moved_to = store.entity(&EntityId::from_static("Q20")).expect("target");
    assert_eq!(moved_to.aliases("la"), ["Cracovia".to_owned()]);
    assert_eq!(moved_to.statements(&pid("P54")).len(), 1);
    assert_eq!(moved_to.statements(&pid("P84")).len(), 1);
    assert!(moved_to.statements(&pid("P27")).is_empty());

    let left = store.entity(&EntityId::from_static("Q10")).expect("source");
    assert_eq!(left.statements(&pid("P27")).len(), 1);
    assert!(left.statements(&pid("P54")).is_empty());
    assert!(left.statements(&pid("P84")).is_empty());

    let order: Vec<String> = store.writes().iter().map(|w| w.entity.id.to_string()).collect();
    assert_eq!(order, vec!["Q20", "Q10"]);
}

#[rstest]
fn transfer_with_several_holders_changes_nothing() {
    let store = MemoryEntityStore::with_entities([
        entity_with("Q10", [monolingual_statement("P54", "A", "pl")]),
        entity_with("Q20", []),
        entity_with("Q21", []),
    ]);
    let query =
        StaticQueryService::default().with_response("p:P76", item_results(&["Q20", "Q21"]));
    let rows = [transfer::TransferRow {
        link: link("Q10"),
        label: "A".into(),
        prng: "9".into(),
    }];
    let (summary, _, lines) = run_with(&store, &query, WriteMode::Write, |ctx| {
        transfer::run(ctx, &rows)
    });
    assert_eq!(summary.skipped, 1);
    assert_eq!(
        lines,
        vec![format!("{} PRNG 9 exists in more than one element.", link("Q10"))]
    );
    assert!(store.writes().is_empty());
}

#[rstest]
fn transfer_lookup_failure_is_reported_per_row() {
    let store = MemoryEntityStore::with_entities([entity_with("Q10", []), entity_with("Q11", [])]);
    let query = StaticQueryService::failing(crate::QueryError::Transport {
        message: "timed out".into(),
    });
    let rows = [
        transfer::TransferRow {
            link: link("Q10"),
            label: "A".into(),
            prng: "1".into(),
        },
        transfer::TransferRow {
            link: link("Q11"),
            label: "B".into(),
            prng: "2".into(),
        },
    ];
    let (summary, _, lines) = run_with(&store, &query, WriteMode::Write, |ctx| {
        transfer::run(ctx, &rows)
    });
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 2);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(&format!("{} - error querying Wikibase", link("Q10"))));
    assert!(lines[1].starts_with(&format!("{} - error querying Wikibase", link("Q11"))));
    assert!(store.writes().is_empty());
}

#[rstest]
#[case::same_references("+2022-09-23T00:00:00Z", 1)]
#[case::other_references("+2021-01-01T00:00:00Z", 2)]
fn transfer_duplicates_must_match_references(#[case] target_date: &str, #[case] expected: usize) {
    let moving = item_snak_statement("P84", "Q99")
        .with_reference(url_date_reference("https://example.org", "+2022-09-23T00:00:00Z"));
    let held = item_snak_statement("P84", "Q99")
        .with_reference(url_date_reference("https://example.org", target_date));
    let mut source = entity_with("Q10", [moving]);
    let mut target = entity_with("Q20", [held]);

    transfer::transfer_statements(&mut source, &mut target);

    assert!(source.statements(&pid("P84")).is_empty());
    assert_eq!(target.statements(&pid("P84")).len(), expected);
}

fn item_snak_statement(property: &'static str, item: &'static str) -> Statement {
    Statement::new(item_snak(property, item))
}

#[rstest]
fn delete_entities_deletes_listed_links() {
    let store = MemoryEntityStore::with_entities([entity_with("Q4", [])]);
    let query = StaticQueryService::default();
    let links = vec![link("Q4"), link("Q5")];
    let (summary, _, lines) = run_with(&store, &query, WriteMode::Write, |ctx| {
        delete_entities::run(ctx, &links)
    });
    assert_eq!(summary.changed, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(lines.first(), Some(&format!("{} deleted.", link("Q4"))));
    assert_eq!(store.deletes().len(), 1);
}

#[rstest]
fn alias_label_dedup_removes_matching_aliases() {
    let mut entity = entity_with("P12", []);
    entity.labels.insert("pl".into(), "miasto".into());
    entity.labels.insert("en".into(), "town".into());
    entity.aliases.insert("pl".into(), vec!["miasto".into(), "gród".into()]);
    entity.aliases.insert("en".into(), vec!["city".into()]);
    let store = MemoryEntityStore::with_entities([entity]);
    let query = StaticQueryService::default()
        .with_response("skos:altLabel", item_results(&["P12", "P12"]));
    let (summary, _, lines) = run_with(&store, &query, WriteMode::Write, |ctx| {
        alias_label_dedup::run(ctx)
    });
    assert_eq!(summary.processed, 1);
    assert_eq!(
        lines,
        vec![format!(
            "{} - alias same as label removed: pl miasto",
            link("P12")
        )]
    );
    let stored = store.entity(&EntityId::from_static("P12")).expect("entity");
    assert_eq!(stored.aliases("pl"), ["gród".to_owned()]);
}

#[rstest]
fn count_values_flags_missing_and_repeated() {
    let store = MemoryEntityStore::with_entities([
        entity_with("Q1", []),
        entity_with("Q2", [Statement::new(string_snak("P81", "a"))]),
        entity_with(
            "Q3",
            [
                Statement::new(string_snak("P81", "a")),
                Statement::new(string_snak("P81", "b")),
            ],
        ),
    ]);
    let query = StaticQueryService::default();
    let links = vec![link("Q1"), link("Q2"), link("Q3")];
    let (summary, _, lines) = run_with(&store, &query, WriteMode::DryRun, |ctx| {
        count_values::run(ctx, &links, &count_values::DEFAULT_PROPERTY)
    });
    assert_eq!(summary.flagged, 2);
    assert_eq!(summary.processed, 3);
    assert!(lines.first().is_some_and(|l| l.contains("no value for property P81")));
    assert!(lines.get(2).is_some_and(|l| l.contains("a | b")));
}

#[rstest]
fn missing_terms_lists_incomplete_items() {
    let mut complete = entity_with("Q1", []);
    for (lang, label) in [("pl", "a"), ("en", "b")] {
        complete.labels.insert(lang.into(), label.into());
        complete.descriptions.insert(lang.into(), label.into());
    }
    let mut partial = entity_with("Q2", []);
    partial.labels.insert("pl".into(), "tylko".into());
    let store = MemoryEntityStore::with_entities([complete, partial]);
    let query = StaticQueryService::default();
    let (found, summary, _) = run_with(&store, &query, WriteMode::DryRun, |ctx| {
        missing_terms::run(ctx, 3, "https://wikihum.example/wiki/Item:")
    });
    let [incomplete] = found.as_slice() else {
        panic!("expected one incomplete item");
    };
    assert_eq!(incomplete.link, "https://wikihum.example/wiki/Item:Q2");
    assert_eq!(incomplete.label_pl.as_deref(), Some("tylko"));
    assert!(incomplete.label_en.is_none());
    assert_eq!(summary.skipped, 1);
}

#[rstest]
fn reference_rewrite_replaces_atlas_reference() {
    let statement = saved(
        Statement::new(string_snak("P81", "AHP-1")).with_reference(crate::Reference::from_snaks([
            item_snak("P55", "Q179149"),
        ])),
        "Q8",
        "s1",
    );
    let store = MemoryEntityStore::with_entities([entity_with("Q8", [statement])]);
    let query = StaticQueryService::default().with_response(
        "wd:Q179149",
        results(&[&[
            ("item", link("Q8").as_str()),
            (
                "statement",
                "https://wikihum.example/entity/statement/Q8-s1",
            ),
        ]]),
    );
    let (summary, _, _) = run_with(&store, &query, WriteMode::Write, |ctx| {
        reference_rewrite::run(ctx)
    });
    assert_eq!(summary.changed, 1);
    let stored = store.entity(&EntityId::from_static("Q8")).expect("entity");
    let reference = stored
        .statements(&pid("P81"))
        .first()
        .and_then(|s| s.references.first())
        .cloned()
        .expect("reference");
    assert_eq!(reference, reference_rewrite::dataset_reference());
}

#[rstest]
fn ahp_reference_trim_keeps_three_snaks_in_order() {
    let reference = crate::Reference::from_snaks([
        time_snak("P48", "+2023-12-07T00:00:00Z", TimeValue::PRECISION_DAY),
        item_snak("P55", "Q5"),
        string_snak("P122", "file"),
        url_snak("P2", "https://example.org"),
    ]);
    let store = MemoryEntityStore::with_entities([entity_with(
        "Q9",
        [Statement::new(string_snak("P81", "x")).with_reference(reference)],
    )]);
    let query = StaticQueryService::default().with_response("p:P81", item_results(&["Q9"]));
    let (summary, _, _) = run_with(&store, &query, WriteMode::Write, |ctx| {
        ahp_reference_trim::run(ctx)
    });
    assert_eq!(summary.changed, 1);
    let stored = store.entity(&EntityId::from_static("Q9")).expect("entity");
    let order: Vec<String> = stored
        .statements(&pid("P81"))
        .first()
        .and_then(|s| s.references.first())
        .map(|r| r.snaks.order().map(ToString::to_string).collect())
        .unwrap_or_default();
    assert_eq!(order, vec!["P2", "P122", "P48"]);
}

#[rstest]
fn ahp_reference_trim_keeps_later_references() {
    let ahp = crate::Reference::from_snaks([
        url_snak("P2", "https://example.org"),
        item_snak("P55", "Q5"),
        string_snak("P122", "file"),
        time_snak("P48", "+2023-12-07T00:00:00Z", TimeValue::PRECISION_DAY),
    ]);
    let other = url_date_reference("https://other.example", "+2020-01-01T00:00:00Z");
    let store = MemoryEntityStore::with_entities([entity_with(
        "Q9",
        [Statement::new(string_snak("P81", "x"))
            .with_reference(ahp)
            .with_reference(other.clone())],
    )]);
    let query = StaticQueryService::default().with_response("p:P81", item_results(&["Q9"]));
    let (summary, _, _) = run_with(&store, &query, WriteMode::Write, |ctx| {
        ahp_reference_trim::run(ctx)
    });
    assert_eq!(summary.changed, 1);
    let stored = store.entity(&EntityId::from_static("Q9")).expect("entity");
    let [statement] = stored.statements(&pid("P81")) else {
        panic!("expected one AHP statement");
    };
    let [first, second] = statement.references.as_slice() else {
        panic!("expected two references, got {:?}", statement.references);
    };
    let order: Vec<String> = first.snaks.order().map(ToString::to_string).collect();
    assert_eq!(order, vec!["P2", "P122", "P48"]);
    assert_eq!(second.snaks, other.snaks);
}

#[rstest]
fn ahp_reference_trim_skips_incomplete_reference() {
    let store = MemoryEntityStore::with_entities([entity_with(
        "Q9",
        [Statement::new(string_snak("P81", "x"))
            .with_reference(crate::Reference::from_snaks([item_snak("P55", "Q5")]))],
    )]);
    let query = StaticQueryService::default().with_response("p:P81", item_results(&["Q9"]));
    let (_, _, lines) = run_with(&store, &query, WriteMode::Write, |ctx| {
        ahp_reference_trim::run(ctx)
    });
    assert_eq!(
        lines,
        vec![format!("{} - AHP ID reference lacks P2", link("Q9"))]
    );
}

#[rstest]
#[case::reciprocal(true, 1, 0)]
#[case::one_sided(false, 0, 1)]
fn neighborhood_fix_requires_reciprocal_link(
    #[case] reciprocal: bool,
    #[case] changed: usize,
    #[case] skipped: usize,
) {
    let item = entity_with("Q1", [Statement::new(item_snak("P84", "Q2"))]);
    let replacement = if reciprocal {
        entity_with("Q3", [Statement::new(item_snak("P84", "Q1"))])
    } else {
        entity_with("Q3", [])
    };
    let store = MemoryEntityStore::with_entities([item, replacement]);
    let query = StaticQueryService::default();
    let rows = [neighborhood_fix::NeighborhoodRow {
        item: link("Q1"),
        value: link("Q2"),
        new_value: link("Q3"),
    }];
    let (summary, _, _) = run_with(&store, &query, WriteMode::Write, |ctx| {
        neighborhood_fix::run(ctx, &rows)
    });
    assert_eq!(summary.changed, changed);
    assert_eq!(summary.skipped, skipped);
    let stored = store.entity(&EntityId::from_static("Q1")).expect("entity");
    let target = stored
        .statements(&pid("P84"))
        .first()
        .and_then(|s| s.main_snak.datavalue.as_ref())
        .and_then(DataValue::as_entity_id)
        .map(str::to_owned);
    let expected = if reciprocal { "Q3" } else { "Q2" };
    assert_eq!(target.as_deref(), Some(expected));
}

#[rstest]
fn show_describes_statements() {
    let store = MemoryEntityStore::with_entities([entity_with(
        "Q1",
        [monolingual_statement("P54", "Foo", "pl")
            .with_reference(url_date_reference("https://e.org", "+2020-01-01T00:00:00Z"))],
    )]);
    let lines = show::run(&store, &EntityId::from_static("Q1")).expect("entity exists");
    assert_eq!(lines.first().map(String::as_str), Some("Q1"));
    assert_eq!(lines.get(1).map(String::as_str), Some("P54 Foo (pl)"));
    assert!(lines.get(2).is_some_and(|l| l.starts_with("  reference: P2 https://e.org")));
}

#[rstest]
fn sparql_strings_are_escaped() {
    assert_eq!(sparql_string(r#"a"b\c"#), r#""a\"b\\c""#);
}
