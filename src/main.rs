use anyhow::Result;
use clap::Parser;
use snapcrop::application::serve;
use snapcrop::infrastructure::client::SnapcropClient;
use snapcrop::presentation::cli::{Cli, Commands, images};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => serve(cmd.into_config()?).await,
        Commands::Upload(cmd) => {
            let client = SnapcropClient::from_base_url(&cli.api_url)?;
            images::upload(&client, cmd).await
        }
        Commands::List => {
            let client = SnapcropClient::from_base_url(&cli.api_url)?;
            images::list(&client).await
        }
    }
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if logging cannot be initialized
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Logs go to stderr so `upload`/`list` output stays pipeable JSON.
    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
