use clap::{Args, Subcommand};
use jobstack::{
    bundles::{BundleDraft, BundleId},
    pricing::format_grouped,
    services::ServiceId,
};
use rust_decimal::Decimal;

use crate::cli::Runtime;

#[derive(Debug, Args)]
pub(crate) struct BundleCommand {
    #[command(subcommand)]
    command: BundleSubcommand,
}

#[derive(Debug, Subcommand)]
enum BundleSubcommand {
    /// Add a bundle priced from its member services
    Add(BundleFields),

    /// Change a bundle and reprice it; omitted fields keep their current value
    Edit(EditBundleArgs),

    /// Delete a bundle
    Delete(DeleteBundleArgs),
}

#[derive(Debug, Args)]
struct BundleFields {
    /// Display name
    #[arg(long)]
    name: Option<String>,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Discount in percent
    #[arg(long)]
    discount: Option<Decimal>,

    /// Member service id; repeat for each one
    #[arg(long = "service")]
    services: Vec<ServiceId>,
}

#[derive(Debug, Args)]
struct EditBundleArgs {
    /// Bundle to change
    id: BundleId,

    #[command(flatten)]
    fields: BundleFields,
}

#[derive(Debug, Args)]
struct DeleteBundleArgs {
    /// Bundle to delete
    id: BundleId,
}

impl BundleFields {
    fn apply_to(self, mut draft: BundleDraft) -> BundleDraft {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(discount) = self.discount {
            draft.discount = discount;
        }
        if !self.services.is_empty() {
            draft.service_ids = self.services.into_iter().collect();
        }

        draft
    }
}

pub(crate) async fn run(runtime: &Runtime, command: BundleCommand) -> Result<(), String> {
    let authorized = runtime.authorized().await?;
    let mut state = runtime.state().await?;
    let admin = runtime.context.admin();

    let bundle = match command.command {
        BundleSubcommand::Add(fields) => {
            let draft = fields.apply_to(BundleDraft {
                name: String::new(),
                description: String::new(),
                discount: Decimal::ZERO,
                service_ids: Default::default(),
            });

            admin
                .add_bundle(&authorized, &mut state, draft)
                .await
                .map_err(|error| format!("failed to add bundle: {error}"))?
        }
        BundleSubcommand::Edit(args) => {
            let current = state
                .catalog
                .bundle(args.id)
                .map(|bundle| BundleDraft {
                    name: bundle.data.name.clone(),
                    description: bundle.data.description.clone(),
                    discount: bundle.data.discount,
                    service_ids: bundle.data.service_ids.clone(),
                })
                .ok_or_else(|| format!("unknown bundle: {}", args.id))?;

            admin
                .edit_bundle(&authorized, &mut state, args.id, args.fields.apply_to(current))
                .await
                .map_err(|error| format!("failed to edit bundle: {error}"))?
        }
        BundleSubcommand::Delete(args) => {
            admin
                .delete_bundle(&authorized, &mut state, args.id)
                .await
                .map_err(|error| format!("failed to delete bundle: {error}"))?;

            println!("deleted bundle {}", args.id);

            return Ok(());
        }
    };

    println!("bundle_id: {}", bundle.id);
    println!("price: ${}", format_grouped(bundle.price()));

    Ok(())
}
