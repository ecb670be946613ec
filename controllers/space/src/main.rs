//! Space Controller CLI
//!
//! Drives one Heroku private space from the command line:
//! - `apply`: create the space, or rename it when only the name changed
//! - `refresh`: re-read the space; forget it if it no longer exists
//! - `destroy`: delete the space
//! - `import`: adopt an existing space
//! - `show` / `schema`: inspect the state file or the desired-state schema

use anyhow::Context;
use clap::{Parser, Subcommand};
use space_controller::{commands, ControllerConfig, DeletePolicy, FileStateStore, SpaceController};
use space_state::SpaceDesiredState;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "space-controller", version, about = "Reconcile a Heroku private space")]
struct Cli {
    /// Platform API base URL (overrides HEROKU_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// API key (overrides HEROKU_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Per-request timeout in seconds (overrides HEROKU_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Delete policy: idempotent or strict (overrides SPACE_DELETE_POLICY)
    #[arg(long, global = true)]
    delete_policy: Option<DeletePolicy>,

    /// State file (overrides SPACE_STATE_FILE)
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the space or bring its name in line
    Apply {
        #[arg(long)]
        name: String,
        #[arg(long)]
        organization: String,
        #[arg(long)]
        region: String,
        #[arg(long, default_value_t = false)]
        shield: bool,
    },
    /// Re-read the space from Heroku
    Refresh,
    /// Delete the space
    Destroy,
    /// Adopt an existing space by id or name
    Import {
        id: String,
    },
    /// Print the state file
    Show,
    /// Print the JSON schema of the desired state
    Schema,
}

impl Cli {
    fn config(&self) -> anyhow::Result<ControllerConfig> {
        let mut config = ControllerConfig::from_env().context("loading configuration from environment")?;
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(secs) = self.timeout_secs {
            anyhow::ensure!(secs > 0, "--timeout-secs must be greater than zero");
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(policy) = self.delete_policy {
            config.delete_policy = policy;
        }
        if let Some(path) = &self.state_file {
            config.state_file = path.clone();
        }
        Ok(config)
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn controller(config: &ControllerConfig) -> anyhow::Result<SpaceController> {
    let client = config.build_client().context("building Heroku client")?;
    Ok(SpaceController::new(Box::new(client)).with_delete_policy(config.delete_policy))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;
    let store = FileStateStore::new(&config.state_file);

    info!("Configuration:");
    info!("  Heroku API URL: {}", config.api_url);
    info!("  State file: {}", config.state_file.display());
    info!("  Delete policy: {:?}", config.delete_policy);

    match cli.command {
        Command::Apply { name, organization, region, shield } => {
            let controller = controller(&config)?;
            let desired = SpaceDesiredState::new(name, organization, region).with_shield(shield);
            let observed = commands::apply(&controller, &store, desired).await?;
            print_json(&observed)?;
        }
        Command::Refresh => {
            let controller = controller(&config)?;
            match commands::refresh(&controller, &store).await? {
                Some(observed) => print_json(&observed)?,
                None => println!("space no longer exists; state cleared"),
            }
        }
        Command::Destroy => {
            let controller = controller(&config)?;
            let id = commands::destroy(&controller, &store).await?;
            println!("destroyed space {}", id);
        }
        Command::Import { id } => {
            let controller = controller(&config)?;
            let observed = commands::import(&controller, &store, &id).await?;
            print_json(&observed)?;
        }
        Command::Show => {
            let record = store
                .load()
                .with_context(|| format!("reading {}", store.path().display()))?;
            print_json(&record)?;
        }
        Command::Schema => {
            print_json(&space_state::desired_state_schema()?)?;
        }
    }

    Ok(())
}
