use super::{Row, Warehouse, WarehouseError};
use crate::config::ClusterSettings;
use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};
use tracing::{debug, error, info};

/// Redshift cluster reached over the PostgreSQL wire protocol.
///
/// Statements go through the simple query protocol, so each one commits on
/// its own. Dropping the handle drops the client, which terminates the
/// session and lets the connection task finish.
pub struct RedshiftWarehouse {
    client: Client,
    target: String,
}

impl RedshiftWarehouse {
    pub async fn connect(cluster: &ClusterSettings) -> Result<Self, WarehouseError> {
        let target = cluster.to_string();
        info!("Connecting to Redshift at {}...", target);

        let (client, connection) = tokio_postgres::Config::new()
            .host(&cluster.host)
            .dbname(&cluster.db_name)
            .user(&cluster.db_user)
            .password(&cluster.db_password)
            .port(cluster.db_port)
            .connect(NoTls)
            .await
            .map_err(|e| WarehouseError::connection(&target, e))?;

        let task_target = target.clone();
        tokio::spawn(async move {
            match connection.await {
                Ok(()) => debug!("Connection to {} finished", task_target),
                Err(e) => error!("Connection to {} errored: {}", task_target, e),
            }
        });

        Ok(Self { client, target })
    }

    fn map_error(&self, statement: &str, err: tokio_postgres::Error) -> WarehouseError {
        // Only errors reported by the server are about the statement itself.
        if err.as_db_error().is_some() {
            WarehouseError::query(statement, err)
        } else {
            WarehouseError::connection(&self.target, err)
        }
    }
}

#[async_trait]
impl Warehouse for RedshiftWarehouse {
    async fn execute(&mut self, statement: &str) -> Result<(), WarehouseError> {
        info!("{}", statement);
        self.client
            .batch_execute(statement)
            .await
            .map_err(|e| self.map_error(statement, e))
    }

    async fn execute_and_fetch_all(
        &mut self,
        statement: &str,
    ) -> Result<Vec<Row>, WarehouseError> {
        info!("{}", statement);
        let messages = self
            .client
            .simple_query(statement)
            .await
            .map_err(|e| self.map_error(statement, e))?;

        Ok(messages
            .into_iter()
            .filter_map(|message| match message {
                SimpleQueryMessage::Row(row) => Some(Row(
                    (0..row.len())
                        .map(|index| row.get(index).map(str::to_string))
                        .collect(),
                )),
                _ => None,
            })
            .collect())
    }
}

impl Drop for RedshiftWarehouse {
    fn drop(&mut self) {
        info!("Closing connection to {}", self.target);
    }
}
