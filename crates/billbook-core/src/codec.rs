//! JSON encoding of the ledger tree.
//!
//! The document is exactly the in-memory shape: a top-level array of people.

use billbook_domain::Ledger;
use serde::Deserialize;
use serde_json::Value;

use crate::{CoreError, CoreResult};

pub fn encode_ledger(ledger: &Ledger) -> CoreResult<String> {
    serde_json::to_string(ledger).map_err(|err| CoreError::Serde(err.to_string()))
}

pub fn encode_ledger_pretty(ledger: &Ledger) -> CoreResult<String> {
    serde_json::to_string_pretty(ledger).map_err(|err| CoreError::Serde(err.to_string()))
}

/// Decodes a ledger document, rejecting anything but a top-level array.
/// The returned tree is normalized (people, bills, installments sorted).
pub fn decode_ledger(text: &str) -> CoreResult<Ledger> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| CoreError::Format(format!("not valid JSON: {err}")))?;
    if !value.is_array() {
        return Err(CoreError::Format(
            "expected a top-level array of people".into(),
        ));
    }
    let mut ledger = Ledger::deserialize(value)
        .map_err(|err| CoreError::Format(format!("unexpected ledger shape: {err}")))?;
    ledger.normalize();
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_objects_and_garbage() {
        assert!(matches!(
            decode_ledger(r#"{"name":"Dana"}"#),
            Err(CoreError::Format(_))
        ));
        assert!(matches!(decode_ledger("not json"), Err(CoreError::Format(_))));
        assert!(matches!(
            decode_ledger(r#"[{"billDates":[]}]"#),
            Err(CoreError::Format(_))
        ));
    }

    #[test]
    fn decodes_and_sorts_documents_from_older_exports() {
        let text = r#"[
            {"name":"Zoe","billDates":[]},
            {"name":"Dana","billDates":[
                {"date":"20/12/2023","amt":"300","paid":0,"installments":[],"image":null},
                {"date":"05/01/2024","amt":1000,"paid":400,
                 "installments":[{"date":"15/06/2024","amount":"400"}],"image":"file:///receipt.jpg"}
            ]}
        ]"#;
        let ledger = decode_ledger(text).unwrap();
        assert_eq!(ledger.people[0].name, "Dana");
        let bills = &ledger.people[0].bills;
        assert_eq!(bills[0].date.to_string(), "05/01/2024");
        assert_eq!(bills[0].installments[0].amount, 400.0);
        assert_eq!(bills[1].amount, 300.0);
        assert_eq!(
            bills[0].image.as_ref().map(|image| image.as_str()),
            Some("file:///receipt.jpg")
        );
    }

    #[test]
    fn null_and_blank_amounts_read_as_zero() {
        let text = r#"[{"name":"Dana","billDates":[{"date":"01/06/2024","amt":"1000",
            "paid":null,"installments":[{"date":"15/06/2024","amount":""},
            {"date":"16/06/2024","amount":null}],"image":null}]}]"#;
        let ledger = decode_ledger(text).unwrap();
        let bill = &ledger.people[0].bills[0];
        assert_eq!(bill.amount, 1000.0);
        assert_eq!(bill.paid, 0.0);
        assert_eq!(bill.installments.len(), 2);
        assert!(bill.installments.iter().all(|entry| entry.amount == 0.0));
        assert_eq!(bill.remaining(), 1000.0);
    }

    #[test]
    fn empty_array_is_an_empty_ledger() {
        assert!(decode_ledger("[]").unwrap().is_empty());
    }
}
