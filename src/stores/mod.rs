//! Contains the trait and implementations for objects that store [Transaction](crate::Transaction)s.

mod transaction;

pub mod sqlite;

pub use transaction::TransactionStore;
