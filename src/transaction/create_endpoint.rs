//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    stores::TransactionStore,
    transaction::NewTransaction,
};

/// A route handler for creating a new transaction.
///
/// Responds with 201 Created, the stored transaction as JSON and a `Location`
/// header pointing at the new transaction.
pub async fn create_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    Json(new_transaction): Json<NewTransaction>,
) -> Response
where
    T: TransactionStore,
{
    match state.transaction_store.create(new_transaction) {
        Ok(transaction) => {
            let location = format_endpoint(endpoints::TRANSACTION, transaction.id);

            (StatusCode::CREATED, [(LOCATION, location)], Json(transaction)).into_response()
        }
        Err(error @ Error::EmptyParty(_)) => {
            tracing::debug!("Rejected transaction: {error}");
            error.into_response()
        }
        Err(error) => error.into_response(),
    }
}
