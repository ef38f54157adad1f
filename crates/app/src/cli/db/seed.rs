use jobstack_app::seed;

use crate::cli::Runtime;

pub(crate) async fn run(runtime: &Runtime) -> Result<(), String> {
    let context = &runtime.context;
    let report = seed::seed(context.gateway.as_ref(), &context.defaults).await;

    println!("services inserted: {}", report.services.inserted.len());
    println!("bundles inserted: {}", report.bundles.inserted.len());
    println!("settings saved: {}", report.settings_saved);

    let failed: Vec<&String> = report
        .services
        .failed
        .iter()
        .chain(&report.bundles.failed)
        .collect();

    if failed.is_empty() {
        Ok(())
    } else {
        for name in &failed {
            println!("failed: {name}");
        }

        Err(format!("{} rows could not be seeded", failed.len()))
    }
}
