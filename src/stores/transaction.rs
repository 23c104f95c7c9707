//! Defines the transaction store trait.

use rust_decimal::Decimal;

use crate::{Error, NewTransaction, StoredTransaction, Transaction, TransactionId};

/// Handles the creation, retrieval, update and soft-deletion of transactions.
///
/// Soft-deleted transactions are invisible to every method except
/// [TransactionStore::get_including_deleted].
pub trait TransactionStore {
    /// Create a new transaction in the store and assign it a fresh ID.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve an active transaction from the store.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve every active transaction in the order they were created.
    ///
    /// An empty store is reported as [Error::NotFound] rather than an empty list.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// The sum of the values of all active transactions, zero if there are none.
    fn sum_active(&self) -> Result<Decimal, Error>;

    /// Replace the value of an active transaction, leaving every other field untouched.
    fn update_value(&self, id: TransactionId, transaction_value: Decimal) -> Result<(), Error>;

    /// Mark an active transaction as deleted without removing its row.
    fn soft_delete(&self, id: TransactionId) -> Result<(), Error>;

    /// Retrieve a transaction whether or not it has been soft-deleted.
    fn get_including_deleted(&self, id: TransactionId) -> Result<StoredTransaction, Error>;
}
