//! Connection to the analytical database.
//!
//! A connection is opened with [`open_warehouse`] and closed when the returned
//! handle is dropped, so every exit path of a pipeline releases it. Each
//! statement is applied on its own, with no enclosing transaction.

mod redshift;
mod sqlite;

pub use redshift::RedshiftWarehouse;
pub use sqlite::{read_ndjson_array, SqliteWarehouse};

use crate::config::{AppConfig, WarehouseSettings};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("connection to {target} failed: {reason}")]
    Connection { target: String, reason: String },

    #[error("statement rejected: {reason}\n{statement}")]
    Query { statement: String, reason: String },
}

impl WarehouseError {
    pub fn query(statement: &str, reason: impl ToString) -> Self {
        WarehouseError::Query {
            statement: statement.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn connection(target: impl ToString, reason: impl ToString) -> Self {
        WarehouseError::Connection {
            target: target.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// One result row, every value in its text form. `None` is SQL NULL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row(pub Vec<Option<String>>);

impl Row {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(|value| value.as_deref())
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            match value {
                Some(value) => write!(f, "{}", value)?,
                None => write!(f, "NULL")?,
            }
        }
        write!(f, ")")
    }
}

#[async_trait]
pub trait Warehouse: Send {
    /// Log the statement, then run it.
    async fn execute(&mut self, statement: &str) -> Result<(), WarehouseError>;

    /// Run the statement and return every row it produced.
    async fn execute_and_fetch_all(&mut self, statement: &str)
        -> Result<Vec<Row>, WarehouseError>;
}

/// Open a connection to the configured warehouse.
pub async fn open_warehouse(config: &AppConfig) -> Result<Box<dyn Warehouse>, WarehouseError> {
    match &config.warehouse {
        WarehouseSettings::Redshift { cluster, .. } => {
            Ok(Box::new(RedshiftWarehouse::connect(cluster).await?))
        }
        WarehouseSettings::Sqlite { db_path, .. } => Ok(Box::new(SqliteWarehouse::open(db_path)?)),
    }
}
