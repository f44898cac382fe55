//! Command execution

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::options::CliArgs;
use crate::deploy::pipeline::InstallReport;
use crate::deploy::{DeployOptions, Deployer};
use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::http::client::HttpClient;
use crate::logs::{init_logging, LogOptions};
use crate::settings::Settings;

/// Which pipeline to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Install,
    Uninstall,
}

impl Command {
    pub fn from_args(cli: &CliArgs) -> Result<Self, DeployError> {
        match (cli.has("install"), cli.has("uninstall")) {
            (true, false) => Ok(Command::Install),
            (false, true) => Ok(Command::Uninstall),
            (true, true) => Err(DeployError::Validation(
                "--install and --uninstall are mutually exclusive".to_string(),
            )),
            (false, false) => Err(DeployError::Validation(
                "Specify --install or --uninstall".to_string(),
            )),
        }
    }
}

/// Result of a command
#[derive(Debug, Clone)]
pub enum Outcome {
    Installed(InstallReport),
    Uninstalled(bool),
}

/// Load settings, set up logging and run the requested pipeline
pub async fn run(cli: &CliArgs) -> Result<Outcome, DeployError> {
    let command = Command::from_args(cli)?;

    let mut settings = Settings::load(&File::new(cli.settings_path())).await?;
    cli.apply_to(&mut settings)?;

    if let Err(e) = init_logging(LogOptions::from(&settings)) {
        eprintln!("Failed to initialize logging: {e}");
    }
    debug!("Running {:?} with settings {:?}", command, settings);

    let env = |key: &str| std::env::var(key).ok();
    let client = HttpClient::new(&settings.endpoints, settings.request_timeout())?;
    info!(
        "Using login endpoint {} and API endpoint {}",
        client.login_url(),
        client.api_url()
    );
    let deployer = Deployer::new(Arc::new(client), DeployOptions::from(&settings));

    match command {
        Command::Install => {
            let params = cli.install_params(env)?;
            deployer.install(&params).await.map(Outcome::Installed)
        }
        Command::Uninstall => {
            let params = cli.uninstall_params(env);
            deployer.uninstall(&params).await.map(Outcome::Uninstalled)
        }
    }
}
