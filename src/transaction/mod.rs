//! Transactions: the data model and the route handlers that expose the
//! [TransactionStore](crate::stores::TransactionStore) over HTTP.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;
mod sum_endpoint;

pub use core::{NewTransaction, StoredTransaction, Transaction};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::{EditTransactionBody, edit_transaction_endpoint};
pub use get_endpoint::{get_transaction_endpoint, get_transactions_endpoint};
pub use sum_endpoint::get_sum_endpoint;
