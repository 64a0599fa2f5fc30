//! Read-only balance reporting: settled/outstanding classification, totals,
//! and detection of bills whose stored `paid` drifted from their installments.

use billbook_domain::{Bill, Ledger, Person};

const DRIFT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    Settled,
    Outstanding,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BalanceTotals {
    pub owed: f64,
    pub paid: f64,
    pub remaining: f64,
    pub bills: usize,
    pub outstanding_bills: usize,
}

impl BalanceTotals {
    fn absorb(&mut self, other: &BalanceTotals) {
        self.owed += other.owed;
        self.paid += other.paid;
        self.remaining += other.remaining;
        self.bills += other.bills;
        self.outstanding_bills += other.outstanding_bills;
    }
}

/// A bill whose stored `paid` disagrees with the sum of its installments.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceDrift {
    pub person_index: usize,
    pub person_name: String,
    pub bill_index: usize,
    pub recorded_paid: f64,
    pub installment_total: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn bill_status(bill: &Bill) -> BillStatus {
        if bill.remaining() > 0.0 {
            BillStatus::Outstanding
        } else {
            BillStatus::Settled
        }
    }

    pub fn person_totals(person: &Person) -> BalanceTotals {
        let mut totals = BalanceTotals::default();
        for bill in &person.bills {
            totals.owed += bill.amount;
            totals.paid += bill.paid;
            totals.remaining += bill.remaining();
            totals.bills += 1;
            if Self::bill_status(bill) == BillStatus::Outstanding {
                totals.outstanding_bills += 1;
            }
        }
        totals
    }

    pub fn ledger_totals(ledger: &Ledger) -> BalanceTotals {
        let mut totals = BalanceTotals::default();
        for person in ledger.iter() {
            totals.absorb(&Self::person_totals(person));
        }
        totals
    }

    /// Lists bills where `paid` no longer matches the installments.
    /// Nothing is corrected; callers decide how to surface it.
    pub fn audit(ledger: &Ledger) -> Vec<BalanceDrift> {
        let mut drift = Vec::new();
        for (person_index, person) in ledger.iter().enumerate() {
            for (bill_index, bill) in person.bills.iter().enumerate() {
                let installment_total = bill.installment_total();
                if (bill.paid - installment_total).abs() > DRIFT_EPSILON {
                    drift.push(BalanceDrift {
                        person_index,
                        person_name: person.name.clone(),
                        bill_index,
                        recorded_paid: bill.paid,
                        installment_total,
                    });
                }
            }
        }
        drift
    }
}
