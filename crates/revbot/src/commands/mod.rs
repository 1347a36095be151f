//! Commands.

use anyhow::Result;
use async_trait::async_trait;
use clap::Subcommand;
use revbot_config::Config;
use revbot_core::CoreModule;
use revbot_database_interface::DbService;

use self::server::ServerCommand;

mod server;

pub(crate) struct CommandContext {
    pub config: Config,
    pub db_service: Box<dyn DbService + Send + Sync>,
    pub core_module: CoreModule,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
        }
    }
}
