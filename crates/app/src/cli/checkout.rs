use clap::Args;
use jobstack::{
    bundles::BundleId,
    checkout::{ContactDetails, OrderSummary},
    pricing::format_grouped,
    services::ServiceId,
};

use crate::cli::Runtime;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Service to add to the scope; repeat to add more
    #[arg(long = "service")]
    services: Vec<ServiceId>,

    /// Bundle to add to the scope; repeat to add more
    #[arg(long = "bundle")]
    bundles: Vec<BundleId>,

    /// Contact first name
    #[arg(long)]
    first_name: String,

    /// Contact last name
    #[arg(long)]
    last_name: String,

    /// Contact email
    #[arg(long)]
    email: String,
}

pub(crate) async fn run(runtime: &Runtime, args: CheckoutArgs) -> Result<(), String> {
    let mut state = runtime.state().await?;

    for id in args.services {
        state
            .add_service_to_scope(id)
            .map_err(|error| format!("failed to add service: {error}"))?;
    }

    for id in args.bundles {
        state
            .add_bundle_to_scope(id)
            .map_err(|error| format!("failed to add bundle: {error}"))?;
    }

    for item in state.scope.items() {
        println!("{}", OrderSummary::entry_line(item));
    }

    let contact = ContactDetails {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
    };

    let receipt = runtime
        .context
        .checkout(&runtime.config)
        .submit(&mut state, &contact)
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    println!("total: ${}", format_grouped(receipt.total));
    println!(
        "thanks {}, we will be in touch at {}",
        receipt.first_name, receipt.email
    );

    Ok(())
}
