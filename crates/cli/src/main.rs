use clap::Parser;
use secretsd::secrets;
use secretsd::server::{self, AppState};
use secretsd_core::{ServiceConfig, GCP_PROJECT_VAR, SECRETSD_BIND_VAR};
use std::env;
use std::net::SocketAddr;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "secretsd")]
#[command(
    about = "Serve secrets from the environment or Google Secret Manager",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Address to listen on (overrides SECRETSD_BIND)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Google Cloud project to read secrets from (overrides GCP_PROJECT);
    /// an empty value forces environment lookups
    #[arg(long)]
    project: Option<String>,
}

impl Cli {
    /// Value a flag supplies for the environment variable `key`
    fn flag_value(&self, key: &str) -> Option<String> {
        match key {
            SECRETSD_BIND_VAR => self.bind.map(|bind| bind.to_string()),
            GCP_PROJECT_VAR => self.project.clone(),
            _ => None,
        }
    }

    /// Build the service configuration; flags shadow the environment, so an
    /// invalid variable is never read when its flag is given
    fn config_with<F>(&self, env_lookup: F) -> secretsd_core::Result<ServiceConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        ServiceConfig::from_lookup(|key| self.flag_value(key).or_else(|| env_lookup(key)))
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Parse command-line arguments
    let cli = Cli::parse();

    secretsd_utils::tracing::init().map_err(|err| eyre::eyre!(err))?;

    let config = cli.config_with(|key| env::var(key).ok())?;
    let resolver = secrets::from_config(&config.resolver)?;

    info!(
        source = resolver.source(),
        project = config.resolver.project().unwrap_or(""),
        bind = %config.bind,
        "starting secretsd"
    );

    let listener = match server::bind(config.bind).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(error = %err, "failed to start listener");
            return Err(err.into());
        }
    };

    server::serve(listener, AppState::new(resolver), server::shutdown_signal()).await?;

    info!("secretsd stopped");
    Ok(())
}
