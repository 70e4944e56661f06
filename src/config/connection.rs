use crate::config::toml_config::TomlConfig;
use crate::config::ConnectionArgs;
use crate::domain::ports::ConnectionProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_required_field, validate_url,
    Validate,
};

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Resolved connection settings for the reporting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub project: String,
    pub uuid: String,
    pub timeout_seconds: u64,
}

impl ConnectionConfig {
    /// 讀取 `--config` 指定的檔案（若有），再以旗標覆蓋
    pub fn resolve(args: &ConnectionArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => {
                tracing::debug!("Loading config file: {}", path);
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };
        Self::merge(args, file)
    }

    pub fn merge(args: &ConnectionArgs, file: Option<TomlConfig>) -> Result<Self> {
        let server = file.map(|f| f.server).unwrap_or_default();

        let host = args.host.clone().or(server.host);
        let project = args.project.clone().or(server.project);
        let uuid = args.uuid.clone().or(server.uuid);
        let timeout_seconds = args
            .timeout
            .or(server.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        let config = Self {
            host: validate_required_field("host", &host)?
                .trim_end_matches('/')
                .to_string(),
            project: validate_required_field("project", &project)?.clone(),
            uuid: validate_required_field("uuid", &uuid)?.clone(),
            timeout_seconds,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Validate for ConnectionConfig {
    fn validate(&self) -> Result<()> {
        validate_url("host", &self.host)?;
        validate_non_empty_string("project", &self.project)?;
        validate_non_empty_string("uuid", &self.uuid)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

impl ConnectionProvider for ConnectionConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn project(&self) -> &str {
        &self.project
    }

    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}
