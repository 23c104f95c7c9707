//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{AppState, Error, TransactionId, stores::TransactionStore};

/// A route handler for soft-deleting a transaction, responds with 204 No Content.
///
/// Deleting a transaction that does not exist, or that has already been
/// deleted, responds with 404 Not Found.
pub async fn delete_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    Path(transaction_id): Path<TransactionId>,
) -> Response
where
    T: TransactionStore,
{
    match state.transaction_store.soft_delete(transaction_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(Error::NotFound) => {
            tracing::debug!("Tried to delete missing transaction {transaction_id}");
            Error::NotFound.into_response()
        }
        Err(error) => error.into_response(),
    }
}
