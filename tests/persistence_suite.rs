use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use zenbudget::{
    core::services::{BudgetService, GoalService},
    domain::{BudgetBook, EntryKind, Transaction, TransactionDraft},
    storage::{JsonStore, StateStore},
};

mod common;

fn record(book: &mut BudgetBook, day: u32, amount: f64, category: &str) {
    book.add_transaction(Transaction::new(TransactionDraft {
        date: NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
        description: format!("{category} purchase"),
        amount,
        category: category.into(),
        kind: EntryKind::Expense,
    }));
}

fn populated_book() -> BudgetBook {
    let mut book = BudgetBook::new();
    record(&mut book, 3, 84.20, "Groceries");
    record(&mut book, 9, 15.99, "Subscriptions");
    book.register_categories(&["Pet Care".into()]);
    BudgetService::ensure_month(
        &mut book,
        "2025-04".parse().unwrap(),
        &Default::default(),
    );
    GoalService::add(&mut book, "Emergency fund", 3000.0, None).unwrap();
    book
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn full_book_roundtrips_through_storage() {
    let store = JsonStore::new(Some(common::scratch_dir()), Some(3)).unwrap();
    store.save(&populated_book()).expect("save book");

    let restored = store.load().expect("load book");
    assert_eq!(restored.transactions.len(), 2);
    assert_eq!(restored.custom_categories, vec!["Pet Care".to_string()]);
    assert_eq!(restored.goals.len(), 1);
    assert_eq!(restored.goals[0].name, "Emergency fund");

    let budget = restored
        .monthly_budget("2025-04".parse().unwrap())
        .expect("seeded month persisted");
    assert!(budget.line("Pet Care").is_some());
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let store = JsonStore::new(Some(common::scratch_dir()), Some(2)).unwrap();
    let mut book = populated_book();
    store.save(&book).expect("initial save");
    let original = fs::read_to_string(store.state_path()).expect("read original file");

    // A directory squatting on the temp file name makes File::create fail.
    let tmp_path = tmp_path_for(store.state_path());
    fs::create_dir_all(&tmp_path).unwrap();

    record(&mut book, 20, 7.5, "Dining Out");
    let result = store.save(&book);
    assert!(
        result.is_err(),
        "expected save to fail when the temp path is a directory"
    );

    let current = fs::read_to_string(store.state_path()).expect("read after failure");
    assert_eq!(
        current, original,
        "a failed save must not corrupt the original file"
    );

    let backups = store.list_backups().unwrap();
    assert!(
        !backups.is_empty(),
        "backup should be created before attempting the write"
    );
    assert!(
        backups
            .iter()
            .all(|name| name.starts_with("budget_") && name.ends_with(".json")),
        "backup names should carry the budget prefix and json extension"
    );

    let _ = fs::remove_dir_all(&tmp_path);
}

#[test]
fn backups_capture_earlier_snapshots() {
    let store = JsonStore::new(Some(common::scratch_dir()), Some(5)).unwrap();
    let mut book = BudgetBook::new();
    record(&mut book, 3, 50.0, "Groceries");
    store.save(&book).expect("first save");

    record(&mut book, 4, 75.0, "Groceries");
    store.save(&book).expect("second save");

    let backups = store.list_backups().unwrap();
    assert!(!backups.is_empty(), "second save should leave a backup");

    let oldest = backups.last().unwrap();
    let raw = fs::read_to_string(store.base_dir().join("backups").join(oldest)).unwrap();
    let snapshot: BudgetBook = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        snapshot.transactions.len(),
        1,
        "oldest backup should hold the first save's contents"
    );
}

#[test]
fn corrupt_file_degrades_to_an_empty_book() {
    let store = JsonStore::new(Some(common::scratch_dir()), Some(2)).unwrap();
    fs::write(store.state_path(), "{ definitely not json").unwrap();

    let book = store.load().expect("corrupt file must not be fatal");
    assert!(book.transactions.is_empty());
    assert!(book.goals.is_empty());
}

#[test]
fn reset_clears_state_but_leaves_a_backup_behind() {
    let store = JsonStore::new(Some(common::scratch_dir()), Some(3)).unwrap();
    store.save(&populated_book()).expect("save book");

    store.reset().expect("reset");
    assert!(!store.state_path().exists());
    assert!(
        !store.list_backups().unwrap().is_empty(),
        "reset should snapshot the file it removes"
    );

    let fresh = store.load().expect("load after reset");
    assert!(fresh.transactions.is_empty());
}
