use lumbung::{
    storage::table::Table,
    types::{ROWS_PER_PAGE, TABLE_MAX_ROWS, error::StoreError, row::Row},
    utils::mock::sample_row,
};

fn collect_rows(table: &mut Table) -> Vec<Row> {
    table.scan().map(|row| row.unwrap()).collect()
}

#[test]
fn test_insert_then_scan_returns_rows_in_order() {
    let mut table = Table::in_memory();
    let rows: Vec<Row> = (0..10).map(sample_row).collect();
    for row in &rows {
        table.insert(row).unwrap();
    }
    assert_eq!(table.num_rows(), 10);
    assert_eq!(collect_rows(&mut table), rows);
}

#[test]
fn test_scan_empty_table_yields_nothing() {
    let mut table = Table::in_memory();
    assert_eq!(table.scan().count(), 0);
}

#[test]
fn test_scan_is_restartable_and_idempotent() {
    let mut table = Table::in_memory();
    for i in 0..25 {
        table.insert(&sample_row(i)).unwrap();
    }
    let first = collect_rows(&mut table);
    let second = collect_rows(&mut table);
    assert_eq!(first, second);
    assert_eq!(first.len(), 25);
}

#[test]
fn test_rows_span_page_boundaries() {
    let mut table = Table::in_memory();
    let count = ROWS_PER_PAGE * 2 + 3;
    for i in 0..count {
        table.insert(&sample_row(i)).unwrap();
    }
    assert_eq!(table.pager().page_count(), 3);

    let rows = collect_rows(&mut table);
    assert_eq!(rows.len(), count);
    // First row of the second page kept its values across the boundary
    assert_eq!(rows[ROWS_PER_PAGE], sample_row(ROWS_PER_PAGE));
}

#[test]
fn test_duplicate_ids_are_permitted() {
    let mut table = Table::in_memory();
    let row = Row::new(1, "dup", "dup@example.com").unwrap();
    table.insert(&row).unwrap();
    table.insert(&row).unwrap();
    assert_eq!(collect_rows(&mut table), vec![row.clone(), row]);
}

#[test]
fn test_insert_fails_exactly_at_capacity() {
    let mut table = Table::in_memory();
    for i in 0..TABLE_MAX_ROWS {
        table.insert(&sample_row(i)).unwrap();
    }
    assert_eq!(table.num_rows(), TABLE_MAX_ROWS);

    let result = table.insert(&sample_row(TABLE_MAX_ROWS));
    assert!(matches!(result, Err(StoreError::TableFull { .. })));
    // The failed insert did not mutate the table
    assert_eq!(table.num_rows(), TABLE_MAX_ROWS);
    assert_eq!(table.scan().count(), TABLE_MAX_ROWS);
}

#[test]
fn test_full_table_scan_returns_all_rows_in_order() {
    let mut table = Table::in_memory();
    for i in 0..TABLE_MAX_ROWS {
        table.insert(&sample_row(i)).unwrap();
    }
    let rows = collect_rows(&mut table);
    assert_eq!(rows.len(), TABLE_MAX_ROWS);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.id, i as u32);
    }
}
