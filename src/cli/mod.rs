use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

pub mod info;
pub mod serve;

use crate::core::AppConfig;

/// Where to read configuration from
#[derive(Args, Clone)]
struct ConfigArgs {
    /// Path to the configuration TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the Google client secret JSON file
    #[arg(long)]
    google_client: Option<PathBuf>,
}

impl ConfigArgs {
    fn load(&self) -> Result<AppConfig> {
        AppConfig::load(self.config.as_deref(), self.google_client.as_deref())
    }

    /// Loads the config for `serve`. Debug logging is on when either the
    /// flag or the config file asks for it.
    fn load_for_serve(&self, debug: bool) -> Result<AppConfig> {
        let mut config = self.load()?;
        config.debug |= debug;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "5000")]
        port: String,

        /// Enable debug logging
        #[arg(long, action, default_value = "false")]
        debug: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Show application information and exit
    Info {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve {
            host,
            port,
            debug,
            config,
        }) => {
            let config = config.load_for_serve(debug)?;
            crate::api::init_tracing(config.debug);
            serve::run(host, port, config).await?;
        }
        Some(Command::Info { config }) => {
            info::run(&config.load()?);
        }
        None => {}
    }

    Ok(())
}
