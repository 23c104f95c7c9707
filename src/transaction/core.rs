//! Defines the core data models for transactions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::TransactionId};

/// A transfer of money from a sender to a recipient.
///
/// Transactions are created by a [TransactionStore](crate::stores::TransactionStore),
/// which assigns the ID. Use [NewTransaction] to describe a transaction that
/// has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Who paid.
    pub sender: String,
    /// Who was paid.
    pub recipient: String,
    /// The amount of money that changed hands.
    pub transaction_value: Decimal,
}

/// The client supplied data for creating a transaction.
///
/// There is deliberately no ID field, any `id` in a request body is ignored
/// since the store is the only source of IDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// Who paid.
    pub sender: String,
    /// Who was paid.
    pub recipient: String,
    /// The amount of money that changed hands.
    ///
    /// JSON numbers are read from their literal digits, never through a float.
    #[serde(deserialize_with = "rust_decimal::serde::arbitrary_precision::deserialize")]
    pub transaction_value: Decimal,
}

impl NewTransaction {
    /// Describe a transaction of `transaction_value` from `sender` to `recipient`.
    pub fn new(sender: &str, recipient: &str, transaction_value: Decimal) -> Self {
        Self {
            sender: sender.to_owned(),
            recipient: recipient.to_owned(),
            transaction_value,
        }
    }

    /// Check that both parties are named.
    ///
    /// # Errors
    /// Returns [Error::EmptyParty] if the sender or recipient is empty or only whitespace.
    pub fn validate(&self) -> Result<(), Error> {
        if self.sender.trim().is_empty() {
            return Err(Error::EmptyParty("sender"));
        }

        if self.recipient.trim().is_empty() {
            return Err(Error::EmptyParty("recipient"));
        }

        Ok(())
    }

    /// Attach the store assigned `id`.
    pub(crate) fn finalise(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            sender: self.sender,
            recipient: self.recipient,
            transaction_value: self.transaction_value,
        }
    }
}

/// A transaction exactly as it is stored, including whether it has been soft-deleted.
///
/// Only administrative code sees this type, it is never sent to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTransaction {
    /// The transaction.
    pub transaction: Transaction,
    /// Whether the transaction has been soft-deleted.
    pub soft_delete: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Error, test_utils::decimal};

    use super::{NewTransaction, Transaction};

    #[test]
    fn validate_accepts_named_parties() {
        let transaction = NewTransaction::new("Alice", "Bob", decimal("1.00"));

        assert_eq!(transaction.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_empty_sender() {
        let transaction = NewTransaction::new("", "Bob", decimal("1.00"));

        assert_eq!(transaction.validate(), Err(Error::EmptyParty("sender")));
    }

    #[test]
    fn validate_rejects_blank_recipient() {
        let transaction = NewTransaction::new("Alice", "   ", decimal("1.00"));

        assert_eq!(transaction.validate(), Err(Error::EmptyParty("recipient")));
    }

    #[test]
    fn serializes_value_as_exact_decimal_string() {
        let transaction = NewTransaction::new("A", "B", decimal("10.50")).finalise(1);

        let got = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            got,
            json!({
                "id": 1,
                "sender": "A",
                "recipient": "B",
                "transactionValue": "10.50",
            })
        );
    }

    #[test]
    fn new_transaction_accepts_number_and_ignores_id() {
        let got: NewTransaction = serde_json::from_value(json!({
            "id": 99,
            "sender": "A",
            "recipient": "B",
            "transactionValue": 10.5,
            "softDelete": true,
        }))
        .unwrap();

        assert_eq!(got, NewTransaction::new("A", "B", decimal("10.5")));
    }

    #[test]
    fn new_transaction_keeps_scale_of_json_number() {
        let got: NewTransaction = serde_json::from_str(
            r#"{"sender":"A","recipient":"B","transactionValue":10.50}"#,
        )
        .unwrap();

        assert_eq!(got.transaction_value.to_string(), "10.50");
    }

    #[test]
    fn new_transaction_keeps_every_digit_of_json_number() {
        let got: NewTransaction = serde_json::from_str(
            r#"{"sender":"A","recipient":"B","transactionValue":12345678901234567.89}"#,
        )
        .unwrap();

        assert_eq!(got.transaction_value, decimal("12345678901234567.89"));
        assert_eq!(got.transaction_value.to_string(), "12345678901234567.89");
    }

    #[test]
    fn new_transaction_still_accepts_string_value() {
        let got: NewTransaction = serde_json::from_str(
            r#"{"sender":"A","recipient":"B","transactionValue":"0.10"}"#,
        )
        .unwrap();

        assert_eq!(got.transaction_value.to_string(), "0.10");
    }

    #[test]
    fn deserializes_transaction_from_string_value() {
        let got: Transaction = serde_json::from_value(json!({
            "id": 3,
            "sender": "A",
            "recipient": "B",
            "transactionValue": "0.10",
        }))
        .unwrap();

        assert_eq!(got.transaction_value, decimal("0.10"));
        assert_eq!(got.transaction_value.to_string(), "0.10");
    }
}
