use clap::{Args, Subcommand};

mod check;
mod restore;
mod seed;

use crate::cli::Runtime;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Write every default service, bundle and the settings to the store
    Seed,

    /// Insert default services missing from the store by name
    Restore,

    /// Report what the store holds
    Check,
}

pub(crate) async fn run(runtime: &Runtime, command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Seed => seed::run(runtime).await,
        DbSubcommand::Restore => restore::run(runtime).await,
        DbSubcommand::Check => check::run(runtime).await,
    }
}
