//! Defines the endpoints for reading transactions.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{AppState, Error, Transaction, TransactionId, stores::TransactionStore};

/// A route handler for getting an active transaction by its ID.
///
/// Responds with 404 Not Found if the transaction does not exist or has been deleted.
pub async fn get_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore,
{
    state
        .transaction_store
        .get(transaction_id)
        .map(Json)
        .inspect_err(|error| tracing::debug!("Could not get transaction {transaction_id}: {error}"))
}

/// A route handler for listing all active transactions.
///
/// Responds with 404 Not Found rather than an empty list when there are no
/// active transactions.
pub async fn get_transactions_endpoint<T>(
    State(state): State<AppState<T>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore,
{
    state.transaction_store.get_all().map(Json)
}
