//! Common test infrastructure
//!
//! Every test gets its own SQLite warehouse file and raw JSON sources in a
//! temporary directory, resolved through the same config path the binaries use.

mod fixtures;

pub use fixtures::*;

use serde_json::Value;
use sparkify_warehouse::config::{CliConfig, FileConfig, WarehouseEngine};
use sparkify_warehouse::{open_warehouse, pipeline, AppConfig, QueryCatalog, Row, Warehouse};
use std::fs;
use tempfile::TempDir;

pub struct TestWarehouse {
    pub warehouse: Box<dyn Warehouse>,
    pub catalog: QueryCatalog,
    _dir: TempDir,
}

impl TestWarehouse {
    /// Writes the events as one newline-delimited file under
    /// `log_data/2018/11/` and every song as its own file under `song_data/`.
    pub async fn with_sources(events: &[Value], songs: &[Value]) -> Self {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("log_data/2018/11");
        fs::create_dir_all(&log_dir).unwrap();
        let lines: Vec<String> = events.iter().map(|event| event.to_string()).collect();
        fs::write(log_dir.join("2018-11-01-events.json"), lines.join("\n")).unwrap();

        let song_dir = dir.path().join("song_data/A/B");
        fs::create_dir_all(&song_dir).unwrap();
        for (index, song) in songs.iter().enumerate() {
            fs::write(song_dir.join(format!("song-{:03}.json", index)), song.to_string())
                .unwrap();
        }

        let file_config = FileConfig::parse(&format!(
            "[LOCAL]\nLOG_DATA = {:?}\nSONG_DATA = {:?}\n",
            dir.path().join("log_data").display().to_string(),
            dir.path().join("song_data").display().to_string(),
        ))
        .unwrap();
        let cli = CliConfig {
            engine: Some(WarehouseEngine::Sqlite),
            sqlite_path: Some(dir.path().join("warehouse.db")),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, file_config).unwrap();

        let catalog = QueryCatalog::build(&config);
        let warehouse = open_warehouse(&config).await.unwrap();
        TestWarehouse {
            warehouse,
            catalog,
            _dir: dir,
        }
    }

    /// Fresh schema loaded with the shared scenario.
    pub async fn loaded_scenario() -> Self {
        let mut test = Self::with_sources(&scenario_events(), &scenario_songs()).await;
        test.reset().await;
        test.load().await;
        test
    }

    pub async fn reset(&mut self) {
        pipeline::reset_schema(self.warehouse.as_mut(), &self.catalog)
            .await
            .unwrap();
    }

    pub async fn load(&mut self) {
        pipeline::run_etl(self.warehouse.as_mut(), &self.catalog)
            .await
            .unwrap();
    }

    pub async fn query(&mut self, sql: &str) -> Vec<Row> {
        self.warehouse.execute_and_fetch_all(sql).await.unwrap()
    }

    pub async fn count(&mut self, sql: &str) -> u64 {
        let rows = self.query(sql).await;
        rows[0].get(0).unwrap().parse().unwrap()
    }
}
