//! Validated mutations over the ledger tree.
//!
//! Every operation checks all of its inputs before touching the tree, so a
//! rejected call leaves the ledger exactly as it was. Ordering invariants
//! (people by name, bills and installments most recent first) are restored
//! before each operation returns.

use billbook_domain::{Bill, BillDate, ImageRef, Installment, Ledger, Person};
use tracing::debug;

use crate::{CoreError, CoreResult, IndexTarget};

/// Provides the mutation commands the presentation layer issues.
pub struct LedgerService;

impl LedgerService {
    /// Adds a person and returns their index after re-sorting.
    pub fn add_person(ledger: &mut Ledger, name: &str) -> CoreResult<usize> {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("name cannot be empty".into()));
        }
        ledger.people.push(Person::new(name));
        ledger.sort_people();
        let index = ledger
            .people
            .partition_point(|person| person.name.as_str() <= name)
            .saturating_sub(1);
        debug!(name, index, "person added");
        Ok(index)
    }

    /// Removes a person together with all of their bills.
    pub fn delete_person(ledger: &mut Ledger, index: usize) -> CoreResult<Person> {
        check_index(IndexTarget::Person, index, ledger.len())?;
        let removed = ledger.people.remove(index);
        ledger.sort_people();
        debug!(name = %removed.name, bills = removed.bills.len(), "person deleted");
        Ok(removed)
    }

    /// Adds an unpaid bill and returns its index after re-sorting.
    pub fn add_bill(
        ledger: &mut Ledger,
        person_index: usize,
        date: BillDate,
        amount: f64,
    ) -> CoreResult<usize> {
        validate_amount(amount)?;
        let person = person_mut(ledger, person_index)?;
        person.bills.push(Bill::new(date, amount));
        person.sort_bills();
        let index = person
            .bills
            .partition_point(|bill| bill.date >= date)
            .saturating_sub(1);
        debug!(person = %person.name, %date, amount, "bill added");
        Ok(index)
    }

    /// Removes a bill, its installments, and its image reference.
    pub fn delete_bill(
        ledger: &mut Ledger,
        person_index: usize,
        bill_index: usize,
    ) -> CoreResult<Bill> {
        let person = person_mut(ledger, person_index)?;
        check_index(IndexTarget::Bill, bill_index, person.bills.len())?;
        let removed = person.bills.remove(bill_index);
        debug!(person = %person.name, date = %removed.date, "bill deleted");
        Ok(removed)
    }

    /// Replaces the bill's image reference and returns the previous one.
    pub fn set_bill_image(
        ledger: &mut Ledger,
        person_index: usize,
        bill_index: usize,
        image: Option<ImageRef>,
    ) -> CoreResult<Option<ImageRef>> {
        let bill = bill_mut(ledger, person_index, bill_index)?;
        let previous = std::mem::replace(&mut bill.image, image);
        debug!(attached = bill.image.is_some(), "bill image updated");
        Ok(previous)
    }

    /// Records a payment against a bill and returns its index after re-sorting.
    pub fn add_installment(
        ledger: &mut Ledger,
        person_index: usize,
        bill_index: usize,
        date: BillDate,
        amount: f64,
    ) -> CoreResult<usize> {
        validate_amount(amount)?;
        let bill = bill_mut(ledger, person_index, bill_index)?;
        bill.installments.push(Installment::new(date, amount));
        bill.sort_installments();
        bill.paid += amount;
        let index = bill
            .installments
            .partition_point(|entry| entry.date >= date)
            .saturating_sub(1);
        debug!(%date, amount, paid = bill.paid, "installment added");
        Ok(index)
    }

    /// Removes a payment and takes its amount back off the bill's `paid`.
    pub fn delete_installment(
        ledger: &mut Ledger,
        person_index: usize,
        bill_index: usize,
        installment_index: usize,
    ) -> CoreResult<Installment> {
        let bill = bill_mut(ledger, person_index, bill_index)?;
        check_index(
            IndexTarget::Installment,
            installment_index,
            bill.installments.len(),
        )?;
        bill.paid -= bill.installments[installment_index].amount;
        let removed = bill.installments.remove(installment_index);
        debug!(amount = removed.amount, paid = bill.paid, "installment deleted");
        Ok(removed)
    }

    /// Swaps in a whole new tree (import), restoring ordering invariants.
    pub fn replace(ledger: &mut Ledger, mut incoming: Ledger) {
        incoming.normalize();
        *ledger = incoming;
        debug!(people = ledger.len(), "ledger replaced");
    }

    pub fn clear(ledger: &mut Ledger) {
        ledger.people.clear();
    }
}

fn check_index(target: IndexTarget, index: usize, len: usize) -> CoreResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(CoreError::IndexOutOfRange { target, index, len })
    }
}

fn validate_amount(amount: f64) -> CoreResult<()> {
    if !amount.is_finite() {
        return Err(CoreError::Validation("amount must be a number".into()));
    }
    if amount < 0.0 {
        return Err(CoreError::Validation("amount cannot be negative".into()));
    }
    Ok(())
}

fn person_mut(ledger: &mut Ledger, index: usize) -> CoreResult<&mut Person> {
    let len = ledger.len();
    ledger
        .person_mut(index)
        .ok_or(CoreError::IndexOutOfRange {
            target: IndexTarget::Person,
            index,
            len,
        })
}

fn bill_mut(ledger: &mut Ledger, person_index: usize, bill_index: usize) -> CoreResult<&mut Bill> {
    let person = person_mut(ledger, person_index)?;
    let len = person.bills.len();
    person.bill_mut(bill_index).ok_or(CoreError::IndexOutOfRange {
        target: IndexTarget::Bill,
        index: bill_index,
        len,
    })
}
