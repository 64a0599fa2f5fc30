use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{amount, date::BillDate};

/// Opaque reference to a locally stored bill photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A partial payment applied against a bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub date: BillDate,
    #[serde(deserialize_with = "amount::lenient")]
    pub amount: f64,
}

impl Installment {
    pub fn new(date: BillDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// A debt owed by a person.
///
/// `paid` is a running total kept in step with `installments`; it is stored
/// rather than recomputed so imported data keeps whatever it recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub date: BillDate,
    #[serde(rename = "amt", deserialize_with = "amount::lenient")]
    pub amount: f64,
    #[serde(default, deserialize_with = "amount::lenient")]
    pub paid: f64,
    #[serde(default)]
    pub installments: Vec<Installment>,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

impl Bill {
    pub fn new(date: BillDate, amount: f64) -> Self {
        Self {
            date,
            amount,
            paid: 0.0,
            installments: Vec::new(),
            image: None,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.amount - self.paid
    }

    /// Sum of the installment amounts, independent of the stored `paid`.
    pub fn installment_total(&self) -> f64 {
        self.installments.iter().map(|entry| entry.amount).sum()
    }

    pub fn installment(&self, index: usize) -> Option<&Installment> {
        self.installments.get(index)
    }

    pub fn sort_installments(&mut self) {
        self.installments
            .sort_by(|a, b| BillDate::most_recent_first(&a.date, &b.date));
    }
}
