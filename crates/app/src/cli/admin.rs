use clap::{Args, Subcommand};
use jobstack_app::context::AppContext;

use crate::cli::Runtime;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Unlock catalog edits
    Login(LoginArgs),

    /// Lock catalog edits
    Logout,
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// Admin password
    #[arg(long)]
    password: String,
}

pub(crate) async fn run(runtime: &Runtime, command: AdminCommand) -> Result<(), String> {
    let gate = AppContext::admin_gate(&runtime.config);

    match command.command {
        AdminSubcommand::Login(args) => {
            gate.login(&args.password)
                .await
                .map_err(|error| format!("login failed: {error}"))?;

            println!("admin: unlocked");
        }
        AdminSubcommand::Logout => {
            gate.logout()
                .await
                .map_err(|error| format!("logout failed: {error}"))?;

            println!("admin: locked");
        }
    }

    Ok(())
}
