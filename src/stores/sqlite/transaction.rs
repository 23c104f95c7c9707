//! Implements a SQLite backed transaction store.
//!
//! Every query that reads transactions, and every query that changes one,
//! carries the `soft_delete = 0` predicate so that soft-deleted rows are
//! never seen or modified through the public interface.

use std::{
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row, params, types::Type};
use rust_decimal::Decimal;

use crate::{
    Error, NewTransaction, StoredTransaction, Transaction, TransactionId,
    db::{CreateTable, MapRow},
    stores::TransactionStore,
};

/// Stores transactions in a SQLite database.
///
/// Values are stored as decimal strings so that they never pass through a
/// floating point representation.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyParty] if the sender or recipient is empty,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        transaction.validate()?;

        let id = self.lock_connection()?.query_row(
            "INSERT INTO \"transaction\" (sender, recipient, transaction_value)
             VALUES (?1, ?2, ?3)
             RETURNING id",
            params![
                transaction.sender,
                transaction.recipient,
                transaction.transaction_value.to_string(),
            ],
            |row| row.get(0),
        )?;

        tracing::debug!("created transaction {id}");

        Ok(transaction.finalise(id))
    }

    /// Retrieve an active transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to an active transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock_connection()?
            .prepare(
                "SELECT id, sender, recipient, transaction_value FROM \"transaction\"
                 WHERE id = :id AND soft_delete = 0",
            )?
            .query_one(&[(":id", &id)], Self::map_row)?;

        Ok(transaction)
    }

    /// Retrieve all active transactions ordered by ID.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if there are no active transactions,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        let transactions = self
            .lock_connection()?
            .prepare(
                "SELECT id, sender, recipient, transaction_value FROM \"transaction\"
                 WHERE soft_delete = 0
                 ORDER BY id ASC",
            )?
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        if transactions.is_empty() {
            return Err(Error::NotFound);
        }

        Ok(transactions)
    }

    /// Add up the values of all active transactions using exact decimal arithmetic.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::SumOverflow] if the total does not fit in a decimal,
    /// - or [Error::SqlError] there is some SQL error.
    fn sum_active(&self) -> Result<Decimal, Error> {
        let connection = self.lock_connection()?;
        let mut statement = connection
            .prepare("SELECT transaction_value FROM \"transaction\" WHERE soft_delete = 0")?;

        let sum = statement.query_map([], |row| decimal_from_row(row, 0))?.try_fold(
            Decimal::ZERO,
            |sum, value| -> Result<Decimal, Error> {
                sum.checked_add(value?).ok_or(Error::SumOverflow)
            },
        )?;

        Ok(sum)
    }

    /// Replace the value of the active transaction `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to an active transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn update_value(&self, id: TransactionId, transaction_value: Decimal) -> Result<(), Error> {
        let rows_affected = self.lock_connection()?.execute(
            "UPDATE \"transaction\" SET transaction_value = ?1
             WHERE id = ?2 AND soft_delete = 0",
            params![transaction_value.to_string(), id],
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        tracing::debug!("updated the value of transaction {id} to {transaction_value}");

        Ok(())
    }

    /// Set the soft-delete flag on the active transaction `id`.
    ///
    /// The row is kept so that [TransactionStore::get_including_deleted] can still read it.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to an active transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn soft_delete(&self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self.lock_connection()?.execute(
            "UPDATE \"transaction\" SET soft_delete = 1
             WHERE id = ?1 AND soft_delete = 0",
            params![id],
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        tracing::debug!("soft-deleted transaction {id}");

        Ok(())
    }

    /// Retrieve transaction `id` along with its soft-delete flag.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` was never created,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get_including_deleted(&self, id: TransactionId) -> Result<StoredTransaction, Error> {
        let stored = self
            .lock_connection()?
            .prepare(
                "SELECT id, sender, recipient, transaction_value, soft_delete
                 FROM \"transaction\" WHERE id = :id",
            )?
            .query_one(&[(":id", &id)], |row| {
                Ok(StoredTransaction {
                    transaction: Self::map_row(row)?,
                    soft_delete: row.get(4)?,
                })
            })?;

        Ok(stored)
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sender TEXT NOT NULL CHECK (sender <> ''),
                recipient TEXT NOT NULL CHECK (recipient <> ''),
                transaction_value TEXT NOT NULL,
                soft_delete INTEGER NOT NULL DEFAULT 0
                )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_transaction_soft_delete ON \"transaction\"(soft_delete);",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let sender = row.get(offset + 1)?;
        let recipient = row.get(offset + 2)?;
        let transaction_value = decimal_from_row(row, offset + 3)?;

        Ok(Transaction {
            id,
            sender,
            recipient,
            transaction_value,
        })
    }
}

fn decimal_from_row(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    Decimal::from_str(&text).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}
