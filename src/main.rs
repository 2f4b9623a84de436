use ems_core::ports::AppDirsPort;
use ems_infra::DirsAppDirsAdapter;
use ems_runtime::bootstrap::{load_startup_config, run_app};
use ems_runtime::bootstrap::tracing::init_tracing_subscriber;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    // .env is optional; SENTRY_DSN / RUST_LOG / EARNMYSCROLL_CONFIG may come from it.
    dotenvy::dotenv().ok();

    let app_dirs = match DirsAppDirsAdapter::new().get_app_dirs() {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to resolve app directories: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing_subscriber(&app_dirs) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let config = load_startup_config(&app_dirs)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let report = match runtime.block_on(run_app(config, app_dirs)) {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Startup failed");
            return Err(e);
        }
    };

    info!(state = ?report.state, "Startup finished");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
