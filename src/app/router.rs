use crate::app::launch::{list_launches, merge_launches};
use crate::config::{Commands, LaunchCommand};
use crate::domain::ports::LaunchService;
use crate::utils::error::Result;
use std::io::Write;

impl Commands {
    /// 指令路徑，例如 `launch list`
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Launch(LaunchCommand::List(_)) => "launch list",
            Commands::Launch(LaunchCommand::Merge(_)) => "launch merge",
        }
    }
}

pub async fn dispatch<S, W>(command: &Commands, service: &S, out: &mut W) -> Result<()>
where
    S: LaunchService + ?Sized,
    W: Write,
{
    tracing::debug!("Dispatching `{}`", command.name());
    match command {
        Commands::Launch(LaunchCommand::List(args)) => list_launches(service, args, out).await,
        Commands::Launch(LaunchCommand::Merge(args)) => merge_launches(service, args, out).await,
    }
}
