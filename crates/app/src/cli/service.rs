use clap::{Args, Subcommand, ValueEnum};
use jobstack::services::{PricingModel, ServiceData, ServiceId};
use rust_decimal::Decimal;

use crate::cli::Runtime;

#[derive(Debug, Args)]
pub(crate) struct ServiceCommand {
    #[command(subcommand)]
    command: ServiceSubcommand,
}

#[derive(Debug, Subcommand)]
enum ServiceSubcommand {
    /// Add a service at the end of the catalog
    Add(ServiceFields),

    /// Change a service; omitted fields keep their current value
    Edit(EditServiceArgs),

    /// Delete a service
    Delete(DeleteServiceArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Pricing {
    Fixed,
    Variable,
    Hybrid,
}

impl From<Pricing> for PricingModel {
    fn from(pricing: Pricing) -> Self {
        match pricing {
            Pricing::Fixed => Self::Fixed,
            Pricing::Variable => Self::Variable,
            Pricing::Hybrid => Self::Hybrid,
        }
    }
}

#[derive(Debug, Args)]
struct ServiceFields {
    /// Display name
    #[arg(long)]
    name: Option<String>,

    /// Price, or setup price for hybrid pricing
    #[arg(long)]
    price: Option<Decimal>,

    /// Monthly price for hybrid pricing
    #[arg(long)]
    monthly_price: Option<Decimal>,

    /// Pricing model
    #[arg(long, value_enum)]
    pricing_model: Option<Pricing>,

    /// One-line description
    #[arg(long)]
    description: Option<String>,

    /// Rich-text details
    #[arg(long)]
    details: Option<String>,

    /// Deliverable; repeat for each one
    #[arg(long = "deliverable")]
    deliverables: Vec<String>,

    /// Timeline, e.g. "5 business days"
    #[arg(long)]
    timeline: Option<String>,

    /// Video reference
    #[arg(long)]
    youtube_video_id: Option<String>,

    /// Display colour theme
    #[arg(long)]
    color_theme: Option<String>,

    /// SEO title override
    #[arg(long)]
    seo_title: Option<String>,

    /// SEO description override
    #[arg(long)]
    seo_description: Option<String>,
}

#[derive(Debug, Args)]
struct EditServiceArgs {
    /// Service to change
    id: ServiceId,

    #[command(flatten)]
    fields: ServiceFields,
}

#[derive(Debug, Args)]
struct DeleteServiceArgs {
    /// Service to delete
    id: ServiceId,
}

impl ServiceFields {
    fn apply_to(self, mut data: ServiceData) -> ServiceData {
        if let Some(name) = self.name {
            data.name = name;
        }
        if let Some(price) = self.price {
            data.price = price;
        }
        if self.monthly_price.is_some() {
            data.monthly_price = self.monthly_price;
        }
        if let Some(model) = self.pricing_model {
            data.pricing_model = model.into();
        }
        if let Some(description) = self.description {
            data.description = description;
        }
        if let Some(details) = self.details {
            data.details = details;
        }
        if !self.deliverables.is_empty() {
            data.deliverables = self.deliverables;
        }
        if let Some(timeline) = self.timeline {
            data.timeline = timeline;
        }
        if self.youtube_video_id.is_some() {
            data.youtube_video_id = self.youtube_video_id;
        }
        if let Some(theme) = self.color_theme {
            data.color_theme = theme;
        }
        if let Some(title) = self.seo_title {
            data.seo_title = title;
        }
        if let Some(description) = self.seo_description {
            data.seo_description = description;
        }

        data
    }
}

pub(crate) async fn run(runtime: &Runtime, command: ServiceCommand) -> Result<(), String> {
    let authorized = runtime.authorized().await?;
    let mut state = runtime.state().await?;
    let admin = runtime.context.admin();

    match command.command {
        ServiceSubcommand::Add(fields) => {
            let data = fields.apply_to(ServiceData::new(String::new(), Decimal::ZERO));

            let service = admin
                .add_service(&authorized, &mut state, data)
                .await
                .map_err(|error| format!("failed to add service: {error}"))?;

            println!("service_id: {}", service.id);
            println!("sort_order: {}", service.sort_order);
        }
        ServiceSubcommand::Edit(args) => {
            let current = state
                .catalog
                .service(args.id)
                .map(|service| service.data.clone())
                .ok_or_else(|| format!("unknown service: {}", args.id))?;

            let service = admin
                .edit_service(&authorized, &mut state, args.id, args.fields.apply_to(current))
                .await
                .map_err(|error| format!("failed to edit service: {error}"))?;

            println!("service_id: {}", service.id);
            println!("price: {}", service.price_label());
        }
        ServiceSubcommand::Delete(args) => {
            admin
                .delete_service(&authorized, &mut state, args.id)
                .await
                .map_err(|error| format!("failed to delete service: {error}"))?;

            println!("deleted service {}", args.id);
        }
    }

    Ok(())
}
