//! Implements a struct that holds the state of the REST server.

use crate::stores::TransactionStore;

/// The state of the REST server.
///
/// Built once at start-up and shared with every route handler.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore,
{
    /// The store for creating, retrieving, updating and deleting transactions.
    pub transaction_store: T,
}

impl<T> AppState<T>
where
    T: TransactionStore,
{
    /// Create a new [AppState] around `transaction_store`.
    pub fn new(transaction_store: T) -> Self {
        Self { transaction_store }
    }
}
