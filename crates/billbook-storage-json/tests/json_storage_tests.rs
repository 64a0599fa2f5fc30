use std::fs;

use billbook_core::{CoreError, KeyValueStore, LedgerService, DEFAULT_STORAGE_KEY};
use billbook_domain::{BillDate, ImageRef, Ledger};
use billbook_storage_json::{export_ledger, import_ledger, JsonFileStore, DEFAULT_EXPORT_FILE};
use tempfile::tempdir;

fn date(text: &str) -> BillDate {
    BillDate::parse(text).expect("valid date")
}

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    LedgerService::add_person(&mut ledger, "Dana").unwrap();
    LedgerService::add_person(&mut ledger, "Bob").unwrap();
    LedgerService::add_bill(&mut ledger, 1, date("01/06/2024"), 1000.0).unwrap();
    LedgerService::add_bill(&mut ledger, 1, date("20/12/2023"), 250.0).unwrap();
    LedgerService::add_installment(&mut ledger, 1, 0, date("15/06/2024"), 400.0).unwrap();
    LedgerService::set_bill_image(&mut ledger, 1, 0, Some(ImageRef::new("/photos/bill.jpg")))
        .unwrap();
    ledger
}

#[test]
fn store_returns_none_before_first_save() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("store")).expect("create store");
    assert!(store.load(DEFAULT_STORAGE_KEY).expect("load").is_none());
}

#[test]
fn store_saves_loads_and_clears() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("store")).expect("create store");

    store.save(DEFAULT_STORAGE_KEY, "[]").expect("save");
    assert_eq!(
        store.load(DEFAULT_STORAGE_KEY).expect("load").as_deref(),
        Some("[]")
    );
    let path = store.key_path(DEFAULT_STORAGE_KEY);
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    store.clear().expect("clear");
    assert!(store.load(DEFAULT_STORAGE_KEY).expect("load").is_none());
}

#[test]
fn export_then_import_reproduces_the_tree() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(DEFAULT_EXPORT_FILE);
    let ledger = sample_ledger();

    export_ledger(&ledger, &path).expect("export");
    let text = fs::read_to_string(&path).expect("read export");
    assert!(text.starts_with('['));
    assert!(text.contains("\n  {"), "export should be pretty-printed");
    assert!(text.contains("\"billDates\""));

    let imported = import_ledger(&path).expect("import");
    assert_eq!(imported, ledger);
}

#[test]
fn import_rejects_top_level_objects() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("object.json");
    fs::write(
        &path,
        serde_json::to_string(&serde_json::json!({ "people": [] })).unwrap(),
    )
    .expect("write file");

    let err = import_ledger(&path).expect_err("object must be rejected");
    assert!(matches!(err, CoreError::Format(_)), "unexpected error: {err:?}");
}

#[test]
fn import_reports_missing_files_as_io_errors() {
    let dir = tempdir().expect("tempdir");
    let err = import_ledger(&dir.path().join("missing.json")).expect_err("missing file");
    assert!(matches!(err, CoreError::Io(_)));
}

#[test]
fn import_accepts_string_amounts_from_older_exports() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("legacy.json");
    fs::write(
        &path,
        r#"[{"name":"Dana","billDates":[{"date":"01/06/2024","amt":"1000","paid":400,
            "installments":[{"date":"15/06/2024","amount":"400"}],"image":null}]}]"#,
    )
    .expect("write legacy file");

    let ledger = import_ledger(&path).expect("import legacy");
    let bill = &ledger.people[0].bills[0];
    assert_eq!(bill.amount, 1000.0);
    assert_eq!(bill.remaining(), 600.0);
}

#[test]
fn deleted_people_do_not_appear_in_exports() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("after_delete.json");
    let mut ledger = sample_ledger();
    LedgerService::delete_person(&mut ledger, 0).unwrap();

    export_ledger(&ledger, &path).expect("export");
    let text = fs::read_to_string(&path).expect("read export");
    assert!(!text.contains("Bob"));
    assert!(!text.contains("15/06/2024"));
    assert!(text.contains("Dana"));
}
