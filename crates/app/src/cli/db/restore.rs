use jobstack_app::seed;

use crate::cli::Runtime;

pub(crate) async fn run(runtime: &Runtime) -> Result<(), String> {
    let context = &runtime.context;
    let outcomes = seed::restore(context.gateway.as_ref(), &context.defaults)
        .await
        .map_err(|error| format!("failed to list services: {error}"))?;

    if outcomes.inserted.is_empty() && outcomes.failed.is_empty() {
        println!("no default services are missing");
        return Ok(());
    }

    for name in &outcomes.inserted {
        println!("restored: {name}");
    }

    for name in &outcomes.failed {
        println!("failed: {name}");
    }

    Ok(())
}
