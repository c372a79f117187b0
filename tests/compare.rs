mod common;

use std::collections::BTreeSet;

use crosscheck::{
    compare::{
        DuplicateReport, count_occurrences, drop_missing, find_duplicates, inner_join, search,
        shared_columns,
    },
    error::CompareError,
    normalize::normalize,
    table::Cell,
};

use common::{column, text_table};

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn duplicates_count_rows_not_distinct_values() {
    let left = normalize(&text_table(&["id"], &[&["1"], &["2"], &["2"], &[" 3 "]]));
    let right = normalize(&text_table(&["id"], &[&["2"], &["3"], &["4"]]));

    let report = find_duplicates(&left, "id", &right, "id").expect("compare");

    let summary = report.summary().expect("matches found");
    assert_eq!(summary.matches, set(&["2", "3"]));
    assert_eq!(summary.left_rows, 3);
    assert_eq!(summary.right_rows, 2);
}

#[test]
fn search_for_absent_value_counts_zero_on_both_sides() {
    let left = normalize(&text_table(&["phone"], &[&["111"], &["222"]]));
    let right = normalize(&text_table(&["tel"], &[&["333"]]));

    let outcome = search(&left, "phone", &right, "tel", "9202793806").expect("search");

    assert_eq!(outcome.left.count, 0);
    assert_eq!(outcome.right.count, 0);
    assert!(outcome.left.rows.is_empty());
    assert!(!outcome.found_anywhere());
}

#[test]
fn same_key_with_different_details_reports_divergence() {
    let left = normalize(&text_table(&["id", "name"], &[&["1", "Ann"]]));
    let right = normalize(&text_table(&["id", "name"], &[&["1", "Bob"]]));

    let report = find_duplicates(&left, "id", &right, "id").expect("compare");

    match report {
        DuplicateReport::RowsDiverge { summary } => {
            assert_eq!(summary.matches, set(&["1"]));
            assert_eq!((summary.left_rows, summary.right_rows), (1, 1));
        }
        other => panic!("expected diverging rows, got {other:?}"),
    }
}

#[test]
fn identical_rows_are_reported_once() {
    let left = normalize(&text_table(&["id", "name"], &[&["1", "Ann"]]));
    let right = normalize(&text_table(&["id", "name"], &[&["1", "Ann"]]));

    let report = find_duplicates(&left, "id", &right, "id").expect("compare");

    match report {
        DuplicateReport::IdenticalRows { rows, .. } => {
            assert_eq!(rows, text_table(&["id", "name"], &[&["1", "Ann"]]));
        }
        other => panic!("expected identical rows, got {other:?}"),
    }
}

#[test]
fn no_shared_values_is_distinct_from_divergence() {
    let left = normalize(&text_table(&["id"], &[&["1"], &[""]]));
    let right = normalize(&text_table(&["id"], &[&["2"], &["nan"]]));

    let report = find_duplicates(&left, "id", &right, "id").expect("compare");

    assert_eq!(report, DuplicateReport::NoDuplicates);
    assert!(report.summary().is_none());
}

#[test]
fn missing_comparison_values_never_match() {
    let left = normalize(&text_table(&["id", "x"], &[&["", "a"], &["None", "b"]]));
    let right = normalize(&text_table(&["id", "x"], &[&[" ", "a"]]));

    let report = find_duplicates(&left, "id", &right, "id").expect("compare");

    assert_eq!(report, DuplicateReport::NoDuplicates);
}

#[test]
fn comparison_columns_are_unified_under_the_left_name() {
    let left = normalize(&text_table(&["cpf", "city"], &[&["10", "Recife"], &["20", "Natal"]]));
    let right = normalize(&text_table(
        &["document", "city", "status"],
        &[&["20", "Natal", "active"], &["10", "Olinda", "closed"]],
    ));

    let report = find_duplicates(&left, "cpf", &right, "document").expect("compare");

    let DuplicateReport::IdenticalRows { summary, rows } = report else {
        panic!("expected identical rows");
    };
    assert_eq!(summary.matches, set(&["10", "20"]));
    assert_eq!(rows.headers(), ["cpf", "city", "status"]);
    assert_eq!(column(&rows, "cpf"), vec![Some("20".to_string())]);
    assert_eq!(column(&rows, "status"), vec![Some("active".to_string())]);
}

#[test]
fn right_column_named_like_left_key_is_kept_aside() {
    let left = normalize(&text_table(&["id", "name"], &[&["7", "Ann"]]));
    let right = normalize(&text_table(&["code", "id", "name"], &[&["7", "x-1", "Ann"]]));

    let report = find_duplicates(&left, "id", &right, "code").expect("compare");

    let DuplicateReport::IdenticalRows { rows, .. } = report else {
        panic!("expected identical rows");
    };
    assert_eq!(rows.headers(), ["id", "name", "id.right"]);
    assert_eq!(column(&rows, "id.right"), vec![Some("x-1".to_string())]);
}

#[test]
fn join_multiplies_repeated_keys_in_left_order() {
    let left = text_table(&["id", "tag"], &[&["1", "a"], &["2", "b"], &["1", "c"]]);
    let right = text_table(&["id", "score"], &[&["1", "x"], &["1", "y"], &["3", "z"]]);
    let shared = shared_columns(&left, &right);

    let joined = inner_join(&left, &right, &shared).expect("join");

    assert_eq!(shared, vec!["id".to_string()]);
    assert_eq!(
        joined,
        text_table(
            &["id", "tag", "score"],
            &[&["1", "a", "x"], &["1", "a", "y"], &["1", "c", "x"], &["1", "c", "y"]],
        )
    );
}

#[test]
fn join_treats_missing_shared_cells_as_equal() {
    let left = normalize(&text_table(&["id", "note"], &[&["1", ""], &["2", "x"]]));
    let right = normalize(&text_table(&["id", "note"], &[&["1", "nan"], &["2", ""]]));

    let joined = inner_join(&left, &right, &shared_columns(&left, &right)).expect("join");

    assert_eq!(joined.len(), 1);
    assert_eq!(joined.rows()[0], vec![Cell::text("1"), Cell::Missing]);
}

#[test]
fn join_rows_agree_on_every_shared_column() {
    let left = text_table(
        &["id", "a", "b", "only_left"],
        &[&["1", "x", "y", "L1"], &["1", "x", "n", "L2"], &["2", "q", "r", "L3"]],
    );
    let right = text_table(
        &["b", "id", "a", "only_right"],
        &[&["y", "1", "x", "R1"], &["r", "2", "Q", "R2"]],
    );
    let shared = shared_columns(&left, &right);

    let joined = inner_join(&left, &right, &shared).expect("join");

    assert_eq!(shared, vec!["id", "a", "b"]);
    assert_eq!(joined.headers(), ["id", "a", "b", "only_left", "only_right"]);
    assert_eq!(
        joined.rows(),
        &[vec![
            Cell::text("1"),
            Cell::text("x"),
            Cell::text("y"),
            Cell::text("L1"),
            Cell::text("R1"),
        ]]
    );
}

#[test]
fn occurrence_search_is_exact_and_case_sensitive() {
    let table = normalize(&text_table(
        &["name", "n"],
        &[&["Ann", "1"], &["ann", "2"], &[" Ann ", "3"], &["Anne", "4"], &["", "5"]],
    ));

    let found = count_occurrences(&table, "name", "Ann").expect("count");

    assert_eq!(found.count, 2);
    assert_eq!(column(&found.rows, "n"), vec![Some("1".to_string()), Some("3".to_string())]);
}

#[test]
fn drop_missing_keeps_row_order() {
    let table = normalize(&text_table(&["id"], &[&["b"], &[""], &["a"], &["NaN"]]));

    let kept = drop_missing(&table, "id").expect("drop");

    assert_eq!(column(&kept, "id"), vec![Some("b".to_string()), Some("a".to_string())]);
}

#[test]
fn unknown_column_is_rejected() {
    let left = text_table(&["id"], &[&["1"]]);
    let right = text_table(&["id"], &[&["1"]]);

    let err = find_duplicates(&left, "id", &right, "code").unwrap_err();

    assert_eq!(
        err,
        CompareError::MissingColumn {
            column: "code".into(),
            available: "id".into(),
        }
    );
    assert!(count_occurrences(&left, "nope", "1").is_err());
}

#[test]
fn match_count_is_bounded_by_each_side() {
    let left = normalize(&text_table(&["v"], &[&["a"], &["b"], &["b"], &["c"]]));
    let right = normalize(&text_table(&["v"], &[&["b"], &["c"], &["d"], &["e"], &["f"]]));

    let report = find_duplicates(&left, "v", &right, "v").expect("compare");

    let summary = report.summary().expect("matches found");
    assert!(summary.matches.len() <= 3);
    assert_eq!(summary.matches, set(&["b", "c"]));
}
