//! ucprov - interactive CSF device provisioning for Cisco Unified CM.
//!
//! Prompts for AXL credentials once at startup, then loops over a small
//! menu: provision one user, bulk-provision from a CSV file, or quit.
//! Command failures print and return to the menu; only credential
//! acquisition and configuration loading end the process.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ucprov_axl::AxlClient;
use ucprov_core::{run_batch, sanitize_user_id, DirectoryOps, Provisioner};

mod bulk;
mod config;
mod error;
mod prompts;

use config::CliConfig;
use error::{CliError, CliResult};
use prompts::MenuChoice;

/// CSF device provisioning for Cisco Unified CM
#[derive(Parser)]
#[command(name = "ucprov")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, env = "UCPROV_CONFIG", default_value = "ucprov.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => {}
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(&cli.config)?;
    info!(
        config = %cli.config.display(),
        endpoint = %config.axl.endpoint,
        "configuration loaded"
    );

    let credentials = prompts::prompt_credentials()?;
    let client = AxlClient::new(config.axl.clone(), credentials)
        .map_err(|e| CliError::Config(e.to_string()))?;
    let provisioner = Provisioner::new(client, config.provisioning.clone());

    loop {
        match prompts::prompt_menu()? {
            MenuChoice::ProvisionSingle => {
                if let Err(e) = provision_single(&provisioner).await {
                    warn!(error = %e, "command failed, returning to menu");
                    e.print();
                }
            }
            MenuChoice::ProvisionBulk => {
                if let Err(e) = provision_bulk(&provisioner, &config).await {
                    warn!(error = %e, "command failed, returning to menu");
                    e.print();
                }
            }
            MenuChoice::Quit => break,
        }
    }

    Ok(())
}

async fn provision_single<D: DirectoryOps>(provisioner: &Provisioner<D>) -> CliResult<()> {
    let raw = prompts::prompt_user_id()?;
    let user_id = sanitize_user_id(&raw).map_err(|e| CliError::Validation(e.to_string()))?;

    let outcome = provisioner.provision_user(&user_id).await;
    println!("{user_id}: {outcome}");
    Ok(())
}

async fn provision_bulk<D: DirectoryOps>(
    provisioner: &Provisioner<D>,
    config: &CliConfig,
) -> CliResult<()> {
    let path = match &config.csv_input {
        Some(path) => path.clone(),
        None => PathBuf::from(prompts::prompt_csv_path()?),
    };

    let ids = bulk::read_user_ids_from_path(&path)?;
    println!("Provisioning {} users from {}", ids.len(), path.display());

    let summary = run_batch(provisioner, ids).await;
    println!("{summary}");
    Ok(())
}
