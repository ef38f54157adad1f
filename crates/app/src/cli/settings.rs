use clap::{Args, Subcommand};
use jobstack::fields::SETTINGS_FIELDS;

use crate::cli::Runtime;

#[derive(Debug, Args)]
pub(crate) struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Debug, Subcommand)]
enum SettingsSubcommand {
    /// Print every setting
    Show,

    /// Change one setting
    Set(SetArgs),
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Setting name, e.g. site_title or siteTitle
    name: String,

    /// New value
    value: String,
}

pub(crate) async fn run(runtime: &Runtime, command: SettingsCommand) -> Result<(), String> {
    match command.command {
        SettingsSubcommand::Show => {
            let state = runtime.state().await?;
            let settings = state.catalog.settings();

            for field in SETTINGS_FIELDS {
                println!(
                    "{}: {}",
                    field.store,
                    settings.get(field.store).unwrap_or_default()
                );
            }
        }
        SettingsSubcommand::Set(args) => {
            let authorized = runtime.authorized().await?;
            let mut state = runtime.state().await?;

            runtime
                .context
                .admin()
                .set_setting(&authorized, &mut state, &args.name, &args.value)
                .await
                .map_err(|error| format!("failed to save settings: {error}"))?;

            println!("{}: {}", args.name, args.value);
        }
    }

    Ok(())
}
