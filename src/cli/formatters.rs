//! Text rendering of people, bills, and installments.

use billbook_core::{BalanceTotals, BillStatus, SummaryService};
use billbook_domain::{Bill, Person};
use colored::Colorize;

const INDENT: &str = "    ";

/// Whole amounts print without decimals, fractional ones with two.
pub fn format_amount(symbol: &str, value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{symbol}{value:.0}")
    } else {
        format!("{symbol}{value:.2}")
    }
}

fn status_label(bill: &Bill) -> String {
    match SummaryService::bill_status(bill) {
        BillStatus::Settled => "settled".green().to_string(),
        BillStatus::Outstanding => "outstanding".red().to_string(),
    }
}

pub fn person_header(index: usize, person: &Person, symbol: &str) -> String {
    let totals = SummaryService::person_totals(person);
    format!(
        "[{index}] {}  owes {} ({} of {} bills outstanding)",
        person.name.bold(),
        format_amount(symbol, totals.remaining),
        totals.outstanding_bills,
        totals.bills
    )
}

pub fn bill_line(index: usize, bill: &Bill, symbol: &str) -> String {
    format!(
        "[{index}] {}  amount {}  remaining {}  {}",
        bill.date,
        format_amount(symbol, bill.amount),
        format_amount(symbol, bill.remaining()),
        status_label(bill)
    )
}

/// All lines for one person, bills and installments indented beneath.
pub fn person_lines(index: usize, person: &Person, symbol: &str) -> Vec<String> {
    let mut lines = vec![person_header(index, person, symbol)];
    for (bill_index, bill) in person.bills.iter().enumerate() {
        lines.push(format!("{INDENT}{}", bill_line(bill_index, bill, symbol)));
        if let Some(image) = &bill.image {
            lines.push(format!("{INDENT}{INDENT}image: {image}"));
        }
        for (installment_index, installment) in bill.installments.iter().enumerate() {
            lines.push(format!(
                "{INDENT}{INDENT}[{installment_index}] {}  {}",
                installment.date,
                format_amount(symbol, installment.amount)
            ));
        }
    }
    lines
}

pub fn totals_lines(totals: &BalanceTotals, symbol: &str) -> Vec<String> {
    vec![
        format!("Total owed:  {}", format_amount(symbol, totals.owed)),
        format!("Total paid:  {}", format_amount(symbol, totals.paid)),
        format!("Remaining:   {}", format_amount(symbol, totals.remaining)),
        format!(
            "Bills:       {} ({} outstanding)",
            totals.bills, totals.outstanding_bills
        ),
    ]
}
