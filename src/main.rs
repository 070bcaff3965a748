/// Skillpath Records - blob-backed record store
///
/// Backend for the Skillpath learning platform demo: accepts login, signup,
/// onboarding, and course-note records over HTTP and persists each one as a
/// JSON object in external blob storage.

mod api;
mod config;
mod context;
mod error;
mod metrics;
mod object_store;
mod rate_limit;
mod record_store;
mod server;
mod session;

use config::ServerConfig;
use context::AppContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skillpath_records=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    print_banner();

    // Load configuration
    let config = ServerConfig::from_env()?;

    // Create application context
    let ctx = AppContext::new(config).await?;

    // Start server
    server::serve(ctx).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
   _____ __   _ ____            __  __
  / ___// /__(_) / /___  ____ _/ /_/ /_
  \__ \/ //_/ / / / __ \/ __ `/ __/ __ \
 ___/ / ,< / / / / /_/ / /_/ / /_/ / / /
/____/_/|_/_/_/_/ .___/\__,_/\__/_/ /_/
               /_/
        Records service v{}
        "#,
        env!("CARGO_PKG_VERSION")
    );
}
