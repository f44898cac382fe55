//! cf-deployer - Entry Point
//!
//! Installs or uninstalls one application on a Cloud Foundry style platform.

use std::env;
use std::process::ExitCode;

use cf_deployer::app::options::CliArgs;
use cf_deployer::app::run::{run, Outcome};
use cf_deployer::utils::version_info;

use colored::Colorize;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CliArgs::parse(env::args());

    if cli.has("version") {
        match serde_json::to_string_pretty(&version_info()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{e}"),
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli).await {
        Ok(Outcome::Installed(report)) => {
            eprintln!(
                "{} {} resources, {} already cached on the platform",
                "[DEPLOYED]".green().bold(),
                report.resources,
                report.cached_resources
            );
            println!("{}", report.address);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Uninstalled(success)) => {
            eprintln!("{}", "[REMOVED]".green().bold());
            println!("{}", success);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Run failed: {:?}", e);
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
