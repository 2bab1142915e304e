//! Hookchain demo: wires the registry, plugins, and wrapped core
//! functions, then drives a few calls through them.

use serde_json::json;

use hookchain::App;
use hookchain::logging::init_logging;
use hookchain::users::{User, UserDirectory};
use hookchain_core::config::AppConfig;
use hookchain_core::error::AppError;
use hookchain_plugin::HookArgs;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = run(config).await {
        tracing::error!("Demo error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("HOOKCHAIN_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

fn sample_directory() -> UserDirectory {
    let mut bob = User::new(2, "bob");
    bob.affiliation = Some("Blue Team".to_string());
    let mut eve = User::new(3, "eve");
    eve.banned = true;

    UserDirectory::new(vec![User::new(1, "alice"), bob, eve])
}

/// Main demo run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Hookchain demo v{}", env!("CARGO_PKG_VERSION"));

    let app = App::bootstrap(config, sample_directory()).await?;

    for info in app.plugins.list_plugins().await {
        tracing::info!(plugin_id = %info.id, hooks = ?info.hooks, "Plugin active");
    }

    let charged = app
        .checkout
        .call(HookArgs::new().with("price", 100))
        .await?;
    tracing::info!(requested = 100, charged = %charged, "Checkout processed");

    let listing = app
        .users
        .listing
        .call(HookArgs::new().with("q", "b").with("field", "name"))
        .await?;
    tracing::info!(result = %listing, "User listing");

    match app
        .users
        .public
        .call(HookArgs::new().with("user_id", 3))
        .await
    {
        Ok(profile) => tracing::info!(result = %profile, "Public profile"),
        Err(e) => tracing::warn!(error = %e, "Public profile unavailable"),
    }

    let audit = app.audit.records().await;
    tracing::info!(records = %json!(audit), "Audit trail");

    app.shutdown().await;
    Ok(())
}
