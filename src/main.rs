use clap::Parser;
use rp_launch::app::dispatch;
use rp_launch::utils::logger;
use rp_launch::{CliConfig, ConnectionConfig, RpClient, RpError};

async fn run(config: &CliConfig) -> Result<(), RpError> {
    let connection = ConnectionConfig::resolve(&config.connection)?;
    tracing::debug!(
        "Connecting to {} (project: {})",
        connection.host,
        connection.project
    );

    let client = RpClient::new(&connection)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatch(&config.command, &client, &mut out).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if config.verbose {
        tracing::debug!("CLI command: {}", config.command.name());
    }

    if let Err(e) = run(&config).await {
        tracing::debug!(
            "`{}` failed: {} (Category: {:?})",
            config.command.name(),
            e,
            e.category()
        );
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}
