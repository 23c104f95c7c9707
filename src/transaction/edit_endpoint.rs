//! Defines the endpoint for updating the value of a transaction.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, TransactionId, stores::TransactionStore};

/// The request body for updating a transaction.
///
/// Only the value can be changed. Any other fields sent by the client, such as
/// the sender or recipient, are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTransactionBody {
    /// Must match the ID in the request path.
    pub id: Option<TransactionId>,
    /// The new value for the transaction.
    ///
    /// JSON numbers are read from their literal digits, never through a float.
    #[serde(deserialize_with = "rust_decimal::serde::arbitrary_precision::deserialize")]
    pub transaction_value: Decimal,
}

/// A route handler for replacing the value of a transaction.
///
/// Responds with 204 No Content on success, 400 Bad Request if the ID in the
/// body does not match the ID in the path, and 404 Not Found if the
/// transaction does not exist or has been deleted.
pub async fn edit_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    Path(transaction_id): Path<TransactionId>,
    Json(body): Json<EditTransactionBody>,
) -> Result<StatusCode, Error>
where
    T: TransactionStore,
{
    if body.id != Some(transaction_id) {
        tracing::debug!(
            "Rejected update for transaction {transaction_id}, body had the ID {:?}",
            body.id
        );
        return Err(Error::IdMismatch {
            path_id: transaction_id,
            body_id: body.id,
        });
    }

    state
        .transaction_store
        .update_value(transaction_id, body.transaction_value)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    };

    use crate::{
        Error, NewTransaction,
        stores::TransactionStore,
        test_utils::{decimal, must_create_test_state},
        transaction::{EditTransactionBody, edit_transaction_endpoint},
    };

    #[test]
    fn body_keeps_every_digit_of_json_number() {
        let got: EditTransactionBody = serde_json::from_str(
            r#"{"id":1,"transactionValue":0.1000000000000000000001}"#,
        )
        .unwrap();

        assert_eq!(got.id, Some(1));
        assert_eq!(
            got.transaction_value.to_string(),
            "0.1000000000000000000001"
        );
    }

    #[tokio::test]
    async fn can_update_transaction() {
        let state = must_create_test_state();
        let original = state
            .transaction_store
            .create(NewTransaction::new("Alice", "Bob", decimal("1.00")))
            .unwrap();
        let body = EditTransactionBody {
            id: Some(original.id),
            transaction_value: decimal("42.00"),
        };

        let got = edit_transaction_endpoint(State(state.clone()), Path(original.id), Json(body))
            .await;

        assert_eq!(got, Ok(StatusCode::NO_CONTENT));
        let updated = state.transaction_store.get(original.id).unwrap();
        assert_eq!(updated.transaction_value, decimal("42.00"));
        assert_eq!(updated.sender, original.sender);
        assert_eq!(updated.recipient, original.recipient);
    }

    #[tokio::test]
    async fn id_mismatch_leaves_store_unchanged() {
        let state = must_create_test_state();
        let original = state
            .transaction_store
            .create(NewTransaction::new("Alice", "Bob", decimal("1.00")))
            .unwrap();
        let body = EditTransactionBody {
            id: Some(original.id + 1),
            transaction_value: decimal("42.00"),
        };

        let got = edit_transaction_endpoint(State(state.clone()), Path(original.id), Json(body))
            .await;

        assert_eq!(
            got,
            Err(Error::IdMismatch {
                path_id: original.id,
                body_id: Some(original.id + 1),
            })
        );
        assert_eq!(state.transaction_store.get(original.id), Ok(original));
    }

    #[tokio::test]
    async fn missing_body_id_is_a_mismatch() {
        let state = must_create_test_state();
        let body = EditTransactionBody {
            id: None,
            transaction_value: decimal("42.00"),
        };

        let got = edit_transaction_endpoint(State(state), Path(1), Json(body)).await;

        assert_eq!(
            got,
            Err(Error::IdMismatch {
                path_id: 1,
                body_id: None,
            })
        );
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = must_create_test_state();
        let body = EditTransactionBody {
            id: Some(7),
            transaction_value: decimal("42.00"),
        };

        let got = edit_transaction_endpoint(State(state), Path(7), Json(body)).await;

        assert_eq!(got, Err(Error::NotFound));
    }
}
