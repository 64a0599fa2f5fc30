//! The ledger session owns the in-memory tree for one run of the app and
//! writes it through the persistence gateway after every successful change.

use std::path::Path;

use billbook_core::{
    codec::{decode_ledger, encode_ledger},
    search_people, BalanceDrift, BalanceTotals, CoreResult, KeyValueStore, LedgerService,
    SearchOutcome, SummaryService,
};
use billbook_domain::{Bill, BillDate, ImageRef, Installment, Ledger, Person};
use billbook_storage_json::{export_ledger, import_ledger};
use tracing::{debug, error, info, warn};

/// Outcome of a successful import.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub people: usize,
    /// Bills whose recorded `paid` disagrees with their installments.
    pub drift: Vec<BalanceDrift>,
}

pub struct LedgerSession {
    ledger: Ledger,
    store: Box<dyn KeyValueStore>,
    key: String,
    save_error: Option<String>,
    unsaved: bool,
}

impl LedgerSession {
    /// Loads the ledger stored under `key`. Unreadable or missing data
    /// degrades to an empty ledger; unreadable data is first copied to
    /// [`unreadable_key`] so the next autosave cannot destroy it.
    pub fn open(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let ledger = match store.load(&key) {
            Ok(Some(text)) => match decode_ledger(&text) {
                Ok(ledger) => ledger,
                Err(err) => {
                    warn!(%key, error = %err, "stored ledger is unreadable, starting empty");
                    preserve_unreadable(store.as_ref(), &key, &text);
                    Ledger::new()
                }
            },
            Ok(None) => {
                info!(%key, "no stored ledger, starting empty");
                Ledger::new()
            }
            Err(err) => {
                warn!(%key, error = %err, "failed to load ledger, starting empty");
                Ledger::new()
            }
        };
        report_drift(&SummaryService::audit(&ledger));
        info!(%key, people = ledger.len(), "ledger loaded");
        Self {
            ledger,
            store,
            key,
            save_error: None,
            unsaved: false,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn add_person(&mut self, name: &str) -> CoreResult<usize> {
        self.mutate(|ledger| LedgerService::add_person(ledger, name))
    }

    pub fn delete_person(&mut self, index: usize) -> CoreResult<Person> {
        self.mutate(|ledger| LedgerService::delete_person(ledger, index))
    }

    pub fn add_bill(&mut self, person: usize, date: BillDate, amount: f64) -> CoreResult<usize> {
        self.mutate(|ledger| LedgerService::add_bill(ledger, person, date, amount))
    }

    pub fn delete_bill(&mut self, person: usize, bill: usize) -> CoreResult<Bill> {
        self.mutate(|ledger| LedgerService::delete_bill(ledger, person, bill))
    }

    pub fn set_bill_image(
        &mut self,
        person: usize,
        bill: usize,
        image: Option<ImageRef>,
    ) -> CoreResult<Option<ImageRef>> {
        self.mutate(|ledger| LedgerService::set_bill_image(ledger, person, bill, image))
    }

    pub fn add_installment(
        &mut self,
        person: usize,
        bill: usize,
        date: BillDate,
        amount: f64,
    ) -> CoreResult<usize> {
        self.mutate(|ledger| LedgerService::add_installment(ledger, person, bill, date, amount))
    }

    pub fn delete_installment(
        &mut self,
        person: usize,
        bill: usize,
        installment: usize,
    ) -> CoreResult<Installment> {
        self.mutate(|ledger| LedgerService::delete_installment(ledger, person, bill, installment))
    }

    pub fn search(&self, query: &str) -> SearchOutcome {
        search_people(&self.ledger, query)
    }

    pub fn totals(&self) -> BalanceTotals {
        SummaryService::ledger_totals(&self.ledger)
    }

    pub fn audit(&self) -> Vec<BalanceDrift> {
        SummaryService::audit(&self.ledger)
    }

    pub fn export_to(&self, path: &Path) -> CoreResult<()> {
        export_ledger(&self.ledger, path)
    }

    /// Replaces the whole ledger with the file's contents. On any error the
    /// current ledger is left untouched.
    pub fn import_from(&mut self, path: &Path) -> CoreResult<ImportReport> {
        let incoming = import_ledger(path)?;
        let drift = SummaryService::audit(&incoming);
        report_drift(&drift);
        self.mutate(|ledger| {
            LedgerService::replace(ledger, incoming);
            Ok(())
        })?;
        Ok(ImportReport {
            people: self.ledger.len(),
            drift,
        })
    }

    /// Wipes the store, then resets the in-memory ledger.
    pub fn clear_all(&mut self) -> CoreResult<()> {
        self.store.clear()?;
        LedgerService::clear(&mut self.ledger);
        self.save_error = None;
        self.unsaved = false;
        info!("ledger cleared");
        Ok(())
    }

    /// Writes the current ledger to the store.
    pub fn save(&self) -> CoreResult<()> {
        let json = encode_ledger(&self.ledger)?;
        self.store.save(&self.key, &json)
    }

    /// Returns the message of the last failed autosave, if any, and resets it.
    pub fn take_save_error(&mut self) -> Option<String> {
        self.save_error.take()
    }

    /// True while the in-memory ledger differs from what the store holds,
    /// i.e. since the last autosave failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    fn mutate<T>(&mut self, op: impl FnOnce(&mut Ledger) -> CoreResult<T>) -> CoreResult<T> {
        let outcome = op(&mut self.ledger)?;
        self.autosave();
        Ok(outcome)
    }

    fn autosave(&mut self) {
        match self.save() {
            Ok(()) => {
                self.save_error = None;
                self.unsaved = false;
                debug!(key = %self.key, "ledger saved");
            }
            Err(err) => {
                error!(key = %self.key, error = %err, "failed to save ledger");
                self.save_error = Some(err.to_string());
                self.unsaved = true;
            }
        }
    }
}

/// Side key holding a copy of a stored ledger that could not be decoded.
pub fn unreadable_key(key: &str) -> String {
    format!("{key}-unreadable")
}

fn preserve_unreadable(store: &dyn KeyValueStore, key: &str, text: &str) {
    let backup = unreadable_key(key);
    match store.save(&backup, text) {
        Ok(()) => warn!(%key, %backup, "copied unreadable ledger aside"),
        Err(err) => error!(%key, %backup, error = %err, "failed to copy unreadable ledger aside"),
    }
}

fn report_drift(drift: &[BalanceDrift]) {
    for entry in drift {
        warn!(
            person = %entry.person_name,
            bill = entry.bill_index,
            recorded_paid = entry.recorded_paid,
            installment_total = entry.installment_total,
            "bill paid total does not match its installments"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use billbook_core::{CoreError, MemoryStore, DEFAULT_STORAGE_KEY};

    use super::*;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn load(&self, _key: &str) -> CoreResult<Option<String>> {
            Err(CoreError::Storage("disk unavailable".into()))
        }

        fn save(&self, _key: &str, _value: &str) -> CoreResult<()> {
            Err(CoreError::Storage("disk full".into()))
        }

        fn clear(&self) -> CoreResult<()> {
            Err(CoreError::Storage("disk unavailable".into()))
        }
    }

    fn date(text: &str) -> BillDate {
        BillDate::parse(text).unwrap()
    }

    #[test]
    fn mutations_are_saved_under_the_key() {
        let store = Rc::new(MemoryStore::new());
        let mut session = LedgerSession::open(Box::new(store.clone()), DEFAULT_STORAGE_KEY);
        session.add_person("Dana").unwrap();

        let saved = store.load(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(saved, r#"[{"name":"Dana","billDates":[]}]"#);
    }

    #[test]
    fn rejected_mutations_do_not_touch_the_store() {
        let store = Rc::new(MemoryStore::new());
        let mut session = LedgerSession::open(Box::new(store.clone()), DEFAULT_STORAGE_KEY);
        assert!(session.add_person(" ").is_err());
        assert!(store.load(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn load_failures_degrade_to_an_empty_ledger() {
        let session = LedgerSession::open(Box::new(FailingStore), DEFAULT_STORAGE_KEY);
        assert!(session.ledger().is_empty());

        let corrupt = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, "{\"oops\":1}");
        let session = LedgerSession::open(Box::new(corrupt), DEFAULT_STORAGE_KEY);
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn failed_autosave_keeps_the_change_and_reports_once() {
        let mut session = LedgerSession::open(Box::new(FailingStore), DEFAULT_STORAGE_KEY);
        session.add_person("Dana").unwrap();
        session.add_bill(0, date("01/06/2024"), 10.0).unwrap();

        assert_eq!(session.ledger().people[0].bills.len(), 1);
        let message = session.take_save_error().expect("save error recorded");
        assert!(message.contains("disk full"));
        assert!(session.take_save_error().is_none());
        assert!(session.has_unsaved_changes());
    }

    #[test]
    fn unreadable_ledger_is_kept_aside_before_autosave() {
        let corrupt = r#"[{"name":"Dana","billDates":[{"date":"99/99/2024","amt":5}]}]"#;
        let store = Rc::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, corrupt));
        let mut session = LedgerSession::open(Box::new(store.clone()), DEFAULT_STORAGE_KEY);
        assert!(session.ledger().is_empty());

        session.add_person("Priya").unwrap();
        assert!(!session.has_unsaved_changes());

        let backup = store.load(&unreadable_key(DEFAULT_STORAGE_KEY)).unwrap();
        assert_eq!(backup.as_deref(), Some(corrupt));
        let current = store.load(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(current.contains("Priya"));
    }

    #[test]
    fn clear_all_wipes_store_and_memory() {
        let store = Rc::new(MemoryStore::new());
        let mut session = LedgerSession::open(Box::new(store.clone()), DEFAULT_STORAGE_KEY);
        session.add_person("Dana").unwrap();

        session.clear_all().unwrap();
        assert!(session.ledger().is_empty());
        assert!(store.load(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn clear_failure_keeps_the_ledger() {
        let mut session = LedgerSession::open(Box::new(FailingStore), DEFAULT_STORAGE_KEY);
        session.add_person("Dana").unwrap();
        assert!(session.clear_all().is_err());
        assert_eq!(session.ledger().len(), 1);
    }
}
