use super::ConfigError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    #[serde(rename = "CLUSTER")]
    pub cluster: Option<ClusterConfig>,
    #[serde(rename = "S3")]
    pub s3: Option<S3Config>,
    #[serde(rename = "IAM_ROLE")]
    pub iam_role: Option<IamRoleConfig>,

    // Local development engine
    #[serde(rename = "WAREHOUSE")]
    pub warehouse: Option<WarehouseConfig>,
    #[serde(rename = "LOCAL")]
    pub local: Option<LocalConfig>,
}

#[derive(Deserialize, Default, Clone)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ClusterConfig {
    pub host: Option<String>,
    pub db_name: Option<String>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_port: Option<u16>,
}

impl std::fmt::Debug for ClusterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterConfig")
            .field("host", &self.host)
            .field("db_name", &self.db_name)
            .field("db_user", &self.db_user)
            .field("db_password", &self.db_password.as_ref().map(|_| "<redacted>"))
            .field("db_port", &self.db_port)
            .finish()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct S3Config {
    pub log_data: Option<String>,
    pub log_jsonpath: Option<String>,
    pub song_data: Option<String>,
    /// Region of the source bucket, "us-west-2" when absent.
    pub region: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct IamRoleConfig {
    pub arn: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct WarehouseConfig {
    /// "redshift" or "sqlite"
    pub engine: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LocalConfig {
    pub db_path: Option<String>,
    pub log_data: Option<String>,
    pub song_data: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
