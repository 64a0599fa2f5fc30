use serde::{Deserialize, Serialize};

use crate::{bill::Bill, date::BillDate};

/// Someone who owes bills. Names are unique by convention only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(rename = "billDates", default)]
    pub bills: Vec<Bill>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bills: Vec::new(),
        }
    }

    pub fn bill(&self, index: usize) -> Option<&Bill> {
        self.bills.get(index)
    }

    pub fn bill_mut(&mut self, index: usize) -> Option<&mut Bill> {
        self.bills.get_mut(index)
    }

    pub fn sort_bills(&mut self) {
        self.bills
            .sort_by(|a, b| BillDate::most_recent_first(&a.date, &b.date));
    }
}
