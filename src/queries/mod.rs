//! The fixed, ordered SQL statement lists the pipelines run.

pub mod analysis;
pub mod staging;
pub mod transform;

use crate::config::{AppConfig, WarehouseSettings};
use crate::schema::ALL_TABLES;

#[derive(Debug, Clone)]
pub struct QueryCatalog {
    pub drop_table_queries: Vec<String>,
    pub create_table_queries: Vec<String>,
    pub copy_table_queries: Vec<String>,
    pub insert_table_queries: Vec<String>,
    pub analysis_queries: Vec<String>,
}

impl QueryCatalog {
    /// Render every statement for the configured warehouse, interpolating
    /// source locations and credentials.
    pub fn build(config: &AppConfig) -> Self {
        let dialect = config.dialect();
        let copy_table_queries = match &config.warehouse {
            WarehouseSettings::Redshift { staging, .. } => staging::s3_copy_queries(staging),
            WarehouseSettings::Sqlite { staging, .. } => staging::local_copy_queries(staging),
        };

        Self {
            drop_table_queries: ALL_TABLES.iter().map(|table| table.drop_sql()).collect(),
            create_table_queries: ALL_TABLES
                .iter()
                .map(|table| table.create_sql(dialect))
                .collect(),
            copy_table_queries,
            insert_table_queries: transform::insert_table_queries(dialect),
            analysis_queries: analysis::analysis_queries(),
        }
    }
}
