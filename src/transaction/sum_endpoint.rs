//! Defines the endpoint for the sum of all active transactions.

use axum::{Json, extract::State};
use rust_decimal::Decimal;

use crate::{AppState, Error, stores::TransactionStore};

/// A route handler for the total value of all active transactions.
///
/// Unlike listing transactions, an empty ledger is not an error: the sum is zero.
pub async fn get_sum_endpoint<T>(State(state): State<AppState<T>>) -> Result<Json<Decimal>, Error>
where
    T: TransactionStore,
{
    state.transaction_store.sum_active().map(Json)
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use rust_decimal::Decimal;

    use crate::{
        NewTransaction,
        stores::TransactionStore,
        test_utils::{decimal, must_create_test_state},
        transaction::get_sum_endpoint,
    };

    #[tokio::test]
    async fn sum_of_empty_ledger_is_zero() {
        let state = must_create_test_state();

        let got = get_sum_endpoint(State(state)).await.unwrap();

        assert_eq!(got.0, Decimal::ZERO);
    }

    #[tokio::test]
    async fn sums_active_transactions() {
        let state = must_create_test_state();
        let store = &state.transaction_store;
        for value in ["10.50", "0.25", "-3"] {
            store
                .create(NewTransaction::new("Alice", "Bob", decimal(value)))
                .unwrap();
        }
        let deleted = store
            .create(NewTransaction::new("Alice", "Bob", decimal("1000")))
            .unwrap();
        store.soft_delete(deleted.id).unwrap();

        let got = get_sum_endpoint(State(state.clone())).await.unwrap();

        assert_eq!(got.0, decimal("7.75"));
    }
}
