//! The three pipelines. Each one runs a statement list front to back on a
//! single connection and stops at the first failure, leaving whatever the
//! earlier statements already committed.

use crate::queries::QueryCatalog;
use crate::schema::ALL_TABLES;
use crate::warehouse::{Row, Warehouse, WarehouseError};
use tracing::info;

async fn execute_all(
    warehouse: &mut dyn Warehouse,
    statements: &[String],
) -> Result<(), WarehouseError> {
    for statement in statements {
        warehouse.execute(statement).await?;
    }
    Ok(())
}

pub async fn drop_tables(
    warehouse: &mut dyn Warehouse,
    catalog: &QueryCatalog,
) -> Result<(), WarehouseError> {
    execute_all(warehouse, &catalog.drop_table_queries).await
}

pub async fn create_tables(
    warehouse: &mut dyn Warehouse,
    catalog: &QueryCatalog,
) -> Result<(), WarehouseError> {
    execute_all(warehouse, &catalog.create_table_queries).await
}

/// Drop every table that exists, then create all of them.
pub async fn reset_schema(
    warehouse: &mut dyn Warehouse,
    catalog: &QueryCatalog,
) -> Result<(), WarehouseError> {
    drop_tables(warehouse, catalog).await?;
    create_tables(warehouse, catalog).await?;
    info!("Schema reset, {} tables created", catalog.create_table_queries.len());
    Ok(())
}

/// Bulk load the raw JSON into the staging tables.
pub async fn load_staging_tables(
    warehouse: &mut dyn Warehouse,
    catalog: &QueryCatalog,
) -> Result<(), WarehouseError> {
    execute_all(warehouse, &catalog.copy_table_queries).await
}

/// Populate the fact and dimension tables from the staging tables.
pub async fn insert_tables(
    warehouse: &mut dyn Warehouse,
    catalog: &QueryCatalog,
) -> Result<(), WarehouseError> {
    execute_all(warehouse, &catalog.insert_table_queries).await
}

pub async fn run_etl(
    warehouse: &mut dyn Warehouse,
    catalog: &QueryCatalog,
) -> Result<(), WarehouseError> {
    load_staging_tables(warehouse, catalog).await?;
    insert_tables(warehouse, catalog).await
}

/// Run every analysis query, handing each returned row to `on_row` in order.
/// Returns the total number of rows.
pub async fn run_analysis<F>(
    warehouse: &mut dyn Warehouse,
    catalog: &QueryCatalog,
    mut on_row: F,
) -> Result<usize, WarehouseError>
where
    F: FnMut(&Row) + Send,
{
    let mut total = 0;
    for query in &catalog.analysis_queries {
        let rows = warehouse.execute_and_fetch_all(query).await?;
        total += rows.len();
        for row in &rows {
            on_row(row);
        }
    }
    Ok(total)
}

/// Number of rows in every warehouse table.
pub async fn table_row_counts(
    warehouse: &mut dyn Warehouse,
) -> Result<Vec<(&'static str, u64)>, WarehouseError> {
    let mut counts = Vec::with_capacity(ALL_TABLES.len());
    for table in ALL_TABLES {
        let statement = format!("SELECT COUNT(*) FROM {}", table.name);
        let rows = warehouse.execute_and_fetch_all(&statement).await?;
        let count = rows
            .first()
            .and_then(|row| row.get(0))
            .and_then(|value| value.parse::<u64>().ok())
            .ok_or_else(|| WarehouseError::query(&statement, "expected a single count"))?;
        counts.push((table.name, count));
    }
    Ok(counts)
}
