use clap::{Parser, Subcommand};
use jobstack_app::{
    admin::Authorized,
    config::AppConfig,
    context::AppContext,
    observability,
    state::AppState,
};

mod admin;
mod bundle;
mod catalog;
mod checkout;
mod db;
mod service;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "jobstack", about = "Service catalog storefront", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Catalog(catalog::CatalogCommand),
    Service(service::ServiceCommand),
    Bundle(bundle::BundleCommand),
    Settings(settings::SettingsCommand),
    Admin(admin::AdminCommand),
    Checkout(checkout::CheckoutArgs),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let runtime = Runtime::new(self.config)?;

        match self.command {
            Commands::Catalog(command) => catalog::run(&runtime, command).await,
            Commands::Service(command) => service::run(&runtime, command).await,
            Commands::Bundle(command) => bundle::run(&runtime, command).await,
            Commands::Settings(command) => settings::run(&runtime, command).await,
            Commands::Admin(command) => admin::run(&runtime, command).await,
            Commands::Checkout(args) => checkout::run(&runtime, args).await,
            Commands::Db(command) => db::run(&runtime, command).await,
        }
    }
}

/// Configuration and wiring shared by every command.
pub(crate) struct Runtime {
    config: AppConfig,
    context: AppContext,
}

impl Runtime {
    fn new(config: AppConfig) -> Result<Self, String> {
        let context = AppContext::from_config(&config)
            .map_err(|error| format!("failed to initialise: {error}"))?;

        Ok(Self { config, context })
    }

    async fn state(&self) -> Result<AppState, String> {
        let (state, _) = self
            .context
            .load_state(self.config.pricing.bundle_pricing.into())
            .await
            .map_err(|error| format!("failed to load catalog: {error}"))?;

        Ok(state)
    }

    async fn authorized(&self) -> Result<Authorized, String> {
        AppContext::admin_gate(&self.config)
            .require()
            .await
            .map_err(|error| format!("{error}; run `jobstack admin login` first"))
    }
}
