mod file_config;

pub use file_config::{
    ClusterConfig, FileConfig, IamRoleConfig, LocalConfig, S3Config, WarehouseConfig,
};

use crate::schema::Dialect;
use clap::ValueEnum;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "dwh.toml";
pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_SQLITE_PATH: &str = "warehouse.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("missing [{0}] section in config")]
    MissingSection(&'static str),

    #[error("missing key {key} in [{section}] section")]
    MissingKey {
        section: &'static str,
        key: &'static str,
    },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WarehouseEngine {
    Redshift,
    Sqlite,
}

/// CLI arguments that take part in config resolution.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub config_path: PathBuf,
    pub engine: Option<WarehouseEngine>,
    pub sqlite_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            engine: None,
            sqlite_path: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub warehouse: WarehouseSettings,
}

/// Where the warehouse lives, together with where its staging data comes from.
#[derive(Debug, Clone)]
pub enum WarehouseSettings {
    Redshift {
        cluster: ClusterSettings,
        staging: S3Staging,
    },
    Sqlite {
        db_path: PathBuf,
        staging: LocalStaging,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct ClusterSettings {
    pub host: String,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    pub db_port: u16,
}

impl std::fmt::Debug for ClusterSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterSettings")
            .field("host", &self.host)
            .field("db_name", &self.db_name)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_port", &self.db_port)
            .finish()
    }
}

impl std::fmt::Display for ClusterSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}:{}/{}",
            self.db_user, self.host, self.db_port, self.db_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Staging {
    pub log_data: String,
    pub log_jsonpath: String,
    pub song_data: String,
    pub iam_role_arn: String,
    pub region: String,
}

/// Local source locations, kept as the configured text since they are
/// rendered into SQL as string literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStaging {
    pub log_data: String,
    pub song_data: String,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and the TOML file config.
    /// CLI values override the file where present.
    pub fn resolve(cli: &CliConfig, file: FileConfig) -> Result<Self, ConfigError> {
        let engine = match cli.engine {
            Some(engine) => engine,
            None => file
                .warehouse
                .as_ref()
                .and_then(|w| w.engine.as_deref())
                .map(parse_engine)
                .transpose()?
                .unwrap_or(WarehouseEngine::Redshift),
        };

        let warehouse = match engine {
            WarehouseEngine::Redshift => WarehouseSettings::Redshift {
                cluster: resolve_cluster(file.cluster)?,
                staging: resolve_s3_staging(file.s3, file.iam_role)?,
            },
            WarehouseEngine::Sqlite => {
                let local = file.local.unwrap_or_default();
                let db_path = cli
                    .sqlite_path
                    .clone()
                    .or_else(|| local.db_path.as_deref().map(PathBuf::from))
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SQLITE_PATH));
                let log_data = local.log_data.ok_or(ConfigError::MissingKey {
                    section: "LOCAL",
                    key: "LOG_DATA",
                })?;
                let song_data = local.song_data.ok_or(ConfigError::MissingKey {
                    section: "LOCAL",
                    key: "SONG_DATA",
                })?;
                WarehouseSettings::Sqlite {
                    db_path,
                    staging: LocalStaging {
                        log_data,
                        song_data,
                    },
                }
            }
        };

        Ok(Self { warehouse })
    }

    /// Load the file named by `cli.config_path` and resolve against it.
    pub fn load(cli: &CliConfig) -> Result<Self, ConfigError> {
        let file = FileConfig::load(&cli.config_path)?;
        Self::resolve(cli, file)
    }

    pub fn dialect(&self) -> Dialect {
        match self.warehouse {
            WarehouseSettings::Redshift { .. } => Dialect::Redshift,
            WarehouseSettings::Sqlite { .. } => Dialect::Sqlite,
        }
    }
}

fn parse_engine(s: &str) -> Result<WarehouseEngine, ConfigError> {
    WarehouseEngine::from_str(s, true).map_err(|_| ConfigError::InvalidValue {
        key: "ENGINE",
        reason: format!("unknown engine {:?}, expected redshift or sqlite", s),
    })
}

fn resolve_cluster(cluster: Option<ClusterConfig>) -> Result<ClusterSettings, ConfigError> {
    let cluster = cluster.ok_or(ConfigError::MissingSection("CLUSTER"))?;
    let missing = |key| ConfigError::MissingKey {
        section: "CLUSTER",
        key,
    };
    Ok(ClusterSettings {
        host: cluster.host.ok_or_else(|| missing("HOST"))?,
        db_name: cluster.db_name.ok_or_else(|| missing("DB_NAME"))?,
        db_user: cluster.db_user.ok_or_else(|| missing("DB_USER"))?,
        db_password: cluster.db_password.ok_or_else(|| missing("DB_PASSWORD"))?,
        db_port: cluster.db_port.ok_or_else(|| missing("DB_PORT"))?,
    })
}

fn resolve_s3_staging(
    s3: Option<S3Config>,
    iam_role: Option<IamRoleConfig>,
) -> Result<S3Staging, ConfigError> {
    let s3 = s3.ok_or(ConfigError::MissingSection("S3"))?;
    let iam_role = iam_role.ok_or(ConfigError::MissingSection("IAM_ROLE"))?;
    let missing = |key| ConfigError::MissingKey { section: "S3", key };
    Ok(S3Staging {
        log_data: s3.log_data.ok_or_else(|| missing("LOG_DATA"))?,
        log_jsonpath: s3.log_jsonpath.ok_or_else(|| missing("LOG_JSONPATH"))?,
        song_data: s3.song_data.ok_or_else(|| missing("SONG_DATA"))?,
        iam_role_arn: iam_role.arn.ok_or(ConfigError::MissingKey {
            section: "IAM_ROLE",
            key: "ARN",
        })?,
        region: s3.region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
    })
}
