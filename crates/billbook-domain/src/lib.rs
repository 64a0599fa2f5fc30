//! billbook-domain
//!
//! Pure data model for the ledger tree (people, bills, installments) and the
//! `DD/MM/YYYY` calendar date type. No I/O, no CLI, no storage.

pub mod bill;
pub mod date;
pub mod ledger;
pub mod person;

mod amount;

pub use bill::{Bill, ImageRef, Installment};
pub use date::{BillDate, DateParseError, DATE_FORMAT};
pub use ledger::Ledger;
pub use person::Person;
