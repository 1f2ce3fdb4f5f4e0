use std::path::{Path, PathBuf};

use log::{debug, info};
use rusqlite::{params, Connection};
use thiserror::Error;

use crate::normalizing::CanonicalTransaction;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("unable to open database {}", .path.display())]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    #[error("error creating table: {0}")]
    CreateTable(#[source] rusqlite::Error),
    #[error("error loading transactions: {0}")]
    Insert(#[source] rusqlite::Error),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// SQLite-backed sink for normalized transactions. The connection is
/// closed when the store is dropped.
pub struct TransactionStore {
    conn: Connection,
}

impl TransactionStore {
    pub fn open(path: impl AsRef<Path>) -> Result<TransactionStore, PersistenceError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| PersistenceError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("opened database {}", path.display());

        Ok(TransactionStore { conn })
    }

    pub fn open_in_memory() -> Result<TransactionStore, PersistenceError> {
        Ok(TransactionStore {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn create_table(&self) -> Result<(), PersistenceError> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS transactions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    transaction_date TEXT NOT NULL,
                    description TEXT NOT NULL,
                    amount TEXT NOT NULL,
                    category TEXT,
                    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )
            .map_err(PersistenceError::CreateTable)?;

        Ok(())
    }

    /// Inserts the whole slice in one database transaction. If any insert
    /// fails nothing is committed.
    pub fn insert_all(&mut self, transactions: &[CanonicalTransaction]) -> Result<usize, PersistenceError> {
        let tx = self.conn.transaction()?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO transactions (transaction_date, description, amount, category)
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .map_err(PersistenceError::Insert)?;

            for transaction in transactions {
                stmt.execute(params![
                    transaction.date.to_string(),
                    transaction.description,
                    transaction.amount.to_string(),
                    transaction.category,
                ])
                .map_err(PersistenceError::Insert)?;
            }
        }

        tx.commit()?;

        info!("inserted {} transactions", transactions.len());

        Ok(transactions.len())
    }

    pub fn count(&self) -> Result<i64, PersistenceError> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;

        Ok(count)
    }
}
