use clap::{Args, Subcommand};
use jobstack::{pricing::format_grouped, services::ServiceId};
use jobstack_app::{reconcile::Origin, state::AppState};

use crate::cli::Runtime;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// List services and bundles
    Show,

    /// Put services in the given order
    Reorder(ReorderArgs),

    /// Move the service at one position to another
    Move(MoveArgs),
}

#[derive(Debug, Args)]
struct ReorderArgs {
    /// Every service id, in the new order
    #[arg(required = true)]
    ids: Vec<ServiceId>,
}

#[derive(Debug, Args)]
struct MoveArgs {
    /// Current position, from zero
    from: usize,

    /// New position, from zero
    to: usize,
}

pub(crate) async fn run(runtime: &Runtime, command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::Show => show(runtime).await,
        CatalogSubcommand::Reorder(args) => {
            let authorized = runtime.authorized().await?;
            let mut state = runtime.state().await?;

            runtime
                .context
                .admin()
                .reorder(&authorized, &mut state, args.ids)
                .await
                .map_err(|error| format!("failed to reorder services: {error}"))?;

            print_order(&state);

            Ok(())
        }
        CatalogSubcommand::Move(args) => {
            let authorized = runtime.authorized().await?;
            let mut state = runtime.state().await?;

            runtime
                .context
                .admin()
                .move_service(&authorized, &mut state, args.from, args.to)
                .await
                .map_err(|error| format!("failed to move service: {error}"))?;

            print_order(&state);

            Ok(())
        }
    }
}

async fn show(runtime: &Runtime) -> Result<(), String> {
    let pricing = runtime.config.pricing.bundle_pricing.into();
    let (state, provenance) = runtime
        .context
        .load_state(pricing)
        .await
        .map_err(|error| format!("failed to load catalog: {error}"))?;

    let catalog = &state.catalog;

    println!("{}", catalog.settings().page_title());
    println!();
    println!("services ({}):", origin(provenance.services));

    for service in catalog.services() {
        println!(
            "  [{}] {} - {} ({})",
            service.id,
            service.name(),
            service.price_label(),
            service.data.timeline
        );
    }

    println!();
    println!("bundles ({}):", origin(provenance.bundles));

    let bundles = catalog
        .priced_bundles(pricing)
        .map_err(|error| format!("failed to price bundles: {error}"))?;

    for bundle in &bundles {
        let original = bundle
            .original_price(catalog.services())
            .map_err(|error| format!("failed to price bundle: {error}"))?;

        println!(
            "  [{}] {} - ${} (was ${}, {}% off)",
            bundle.id,
            bundle.name(),
            format_grouped(bundle.price()),
            format_grouped(original),
            bundle.data.discount
        );
    }

    Ok(())
}

fn print_order(state: &AppState) {
    for (id, sort_order) in state.catalog.sort_orders() {
        println!("{sort_order}: {id}");
    }
}

fn origin(origin: Origin) -> &'static str {
    match origin {
        Origin::Store => "store",
        Origin::Defaults => "defaults",
    }
}
