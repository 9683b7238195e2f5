use super::{Row, Warehouse, WarehouseError};
use crate::queries::staging::READ_NDJSON_FUNCTION;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{functions::FunctionFlags, types::ValueRef, Connection};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Local single-file warehouse, used for development and tests.
pub struct SqliteWarehouse {
    conn: Connection,
    path: PathBuf,
}

impl SqliteWarehouse {
    pub fn open(path: &Path) -> Result<Self, WarehouseError> {
        info!("Opening SQLite warehouse at {:?}...", path);
        let target = path.display().to_string();
        let conn =
            Connection::open(path).map_err(|e| WarehouseError::connection(&target, e))?;
        conn.create_scalar_function(
            READ_NDJSON_FUNCTION,
            1,
            FunctionFlags::SQLITE_UTF8,
            |ctx| {
                let source: String = ctx.get(0)?;
                read_ndjson_array(Path::new(&source))
                    .map_err(|e| rusqlite::Error::UserFunctionError(e.into()))
            },
        )
        .map_err(|e| WarehouseError::connection(&target, e))?;

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }
}

/// Read newline-delimited JSON records from `path` and return them as one
/// JSON array. A directory is walked recursively and every `*.json` file in
/// it is read, in file name order.
pub fn read_ndjson_array(path: &Path) -> Result<String> {
    let files = if path.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", path))?;
            if entry.file_type().is_file()
                && entry.path().extension().and_then(|e| e.to_str()) == Some("json")
            {
                files.push(entry.into_path());
            }
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut records = Vec::new();
    for file in files {
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {:?}", file))?;
        for (line_index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record: serde_json::Value = serde_json::from_str(line)
                .with_context(|| format!("Invalid JSON at {:?} line {}", file, line_index + 1))?;
            records.push(record);
        }
    }
    Ok(serde_json::Value::Array(records).to_string())
}

fn value_to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    }
}

#[async_trait]
impl Warehouse for SqliteWarehouse {
    async fn execute(&mut self, statement: &str) -> Result<(), WarehouseError> {
        info!("{}", statement);
        self.conn
            .execute_batch(statement)
            .map_err(|e| WarehouseError::query(statement, e))
    }

    async fn execute_and_fetch_all(
        &mut self,
        statement: &str,
    ) -> Result<Vec<Row>, WarehouseError> {
        info!("{}", statement);
        let mut stmt = self
            .conn
            .prepare(statement)
            .map_err(|e| WarehouseError::query(statement, e))?;
        let column_count = stmt.column_count();
        let rows = stmt
            .query_map([], |row| {
                (0..column_count)
                    .map(|index| row.get_ref(index).map(value_to_text))
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map(Row)
            })
            .map_err(|e| WarehouseError::query(statement, e))?
            .collect::<rusqlite::Result<Vec<Row>>>()
            .map_err(|e| WarehouseError::query(statement, e))?;
        Ok(rows)
    }
}

impl Drop for SqliteWarehouse {
    fn drop(&mut self) {
        info!("Closing SQLite warehouse at {:?}", self.path);
    }
}
