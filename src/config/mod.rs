pub mod connection;
pub mod toml_config;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "rp-launch")]
#[command(about = "Command-line client for ReportPortal launches")]
pub struct CliConfig {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, env = "RP_LOG_JSON", help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 連線設定，旗標與環境變數優先於設定檔
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    #[arg(long, global = true, env = "RP_HOST", help = "ReportPortal base URL")]
    pub host: Option<String>,

    #[arg(short, long, global = true, env = "RP_PROJECT", help = "Project name")]
    pub project: Option<String>,

    #[arg(short, long, global = true, env = "RP_UUID", help = "API access token")]
    pub uuid: Option<String>,

    #[arg(short, long, global = true, env = "RP_CONFIG", help = "Path to TOML config file")]
    pub config: Option<String>,

    #[arg(long, global = true, env = "RP_TIMEOUT", help = "Request timeout in seconds")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Operations over launches
    #[command(subcommand)]
    Launch(LaunchCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum LaunchCommand {
    /// List launches
    List(ListArgs),
    /// Merge launches
    Merge(MergeArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    #[arg(
        long = "filter-name",
        visible_alias = "fn",
        env = "FILTER_NAME",
        help = "Filter Name (`-fn` is spelled `--fn`)"
    )]
    pub filter_name: Option<String>,

    /// Raw filter expressions, joined with `&`
    #[arg(short = 'f', long = "filter", env = "Filter", help = "Filter")]
    pub filters: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct MergeArgs {
    #[arg(short = 'f', long, env = "MERGE_LAUNCH_FILTER", help = "Launches Filter")]
    pub filter: Option<String>,

    #[arg(
        long,
        env = "MERGE_LAUNCH_IDS",
        value_delimiter = ',',
        value_parser = parse_launch_id,
        help = "Launch IDS to Merge"
    )]
    pub ids: Vec<String>,

    #[arg(short, long, env = "MERGE_LAUNCH_NAME", default_value = "", help = "New Launch Name")]
    pub name: String,

    #[arg(
        short = 't',
        long = "type",
        env = "MERGE_TYPE",
        default_value = "DEEP",
        help = "Merge Type"
    )]
    pub merge_type: String,
}

/// 逗號切開後的每個 ID 去除前後空白
fn parse_launch_id(value: &str) -> Result<String, String> {
    Ok(value.trim().to_string())
}

impl Default for MergeArgs {
    fn default() -> Self {
        Self {
            filter: None,
            ids: Vec::new(),
            name: String::new(),
            merge_type: crate::domain::model::MergeType::DEEP.to_string(),
        }
    }
}
