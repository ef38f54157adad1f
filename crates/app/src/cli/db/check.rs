use jobstack_app::seed;

use crate::cli::Runtime;

pub(crate) async fn run(runtime: &Runtime) -> Result<(), String> {
    let report = seed::check(runtime.context.gateway.as_ref())
        .await
        .map_err(|error| format!("failed to reach store: {error}"))?;

    println!("services in store: {}", report.service_ids.len());

    if report.serving_defaults() {
        println!("store is empty; defaults are being served");
    } else {
        let ids: Vec<String> = report.service_ids.iter().map(ToString::to_string).collect();

        println!("service ids: {}", ids.join(", "));
    }

    Ok(())
}
