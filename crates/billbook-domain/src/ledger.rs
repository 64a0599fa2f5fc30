//! The full person tree, the unit of persistence.

use serde::{Deserialize, Serialize};

use crate::person::Person;

/// Ordered list of people; serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    pub people: Vec<Person>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_people(people: Vec<Person>) -> Self {
        Self { people }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn person(&self, index: usize) -> Option<&Person> {
        self.people.get(index)
    }

    pub fn person_mut(&mut self, index: usize) -> Option<&mut Person> {
        self.people.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    /// Ascending, case-sensitive ordinal order. Stable for duplicate names.
    pub fn sort_people(&mut self) {
        self.people.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Re-establishes every ordering invariant of the tree.
    pub fn normalize(&mut self) {
        self.sort_people();
        for person in &mut self.people {
            person.sort_bills();
            for bill in &mut person.bills {
                bill.sort_installments();
            }
        }
    }

    pub fn is_sorted_by_name(&self) -> bool {
        self.people.windows(2).all(|pair| pair[0].name <= pair[1].name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bill, BillDate};

    #[test]
    fn serializes_as_top_level_array() {
        let mut ledger = Ledger::new();
        ledger.people.push(Person::new("Dana"));
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"[{"name":"Dana","billDates":[]}]"#);
    }

    #[test]
    fn normalize_orders_people_and_bills() {
        let mut carl = Person::new("Carl");
        carl.bills.push(Bill::new(BillDate::parse("20/12/2023").unwrap(), 5.0));
        carl.bills.push(Bill::new(BillDate::parse("05/01/2024").unwrap(), 5.0));
        let mut ledger = Ledger::from_people(vec![carl, Person::new("Alice")]);

        ledger.normalize();

        assert!(ledger.is_sorted_by_name());
        assert_eq!(ledger.people[0].name, "Alice");
        assert_eq!(ledger.people[1].bills[0].date.to_string(), "05/01/2024");
    }

    #[test]
    fn name_order_is_case_sensitive() {
        let mut ledger = Ledger::from_people(vec![Person::new("adam"), Person::new("Zed")]);
        ledger.sort_people();
        assert_eq!(ledger.people[0].name, "Zed");
    }
}
