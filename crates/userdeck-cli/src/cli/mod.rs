//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use userdeck_core::Route;
use userdeck_core::config::Config;
use userdeck_core::logging::{self, LogTarget};

mod commands;

use commands::records::Credentials;

#[derive(Parser)]
#[command(name = "userdeck")]
#[command(version)]
#[command(about = "Manage a Firebase-backed user list from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Screen to open (register, login, records)
    #[arg(long, value_name = "SCREEN")]
    screen: Option<Route>,

    /// Use in-process auth and storage instead of Firebase
    #[arg(long)]
    memory: bool,
}

/// Optional sign-in for commands that touch the collection.
#[derive(clap::Args, Debug, Clone, Default)]
struct SignInArgs {
    /// Sign in with this email before running the command
    #[arg(long, env = "USERDECK_EMAIL", requires = "password")]
    email: Option<String>,

    /// Password for --email
    #[arg(long, env = "USERDECK_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl SignInArgs {
    fn into_credentials(self) -> Option<Credentials> {
        match (self.email, self.password) {
            (Some(email), Some(password)) => Some(Credentials { email, password }),
            _ => None,
        }
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Create an account
    Register {
        #[arg(long, env = "USERDECK_EMAIL")]
        email: String,

        #[arg(long, env = "USERDECK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Manage entries of the collection
    Records {
        #[command(flatten)]
        sign_in: SignInArgs,

        #[command(subcommand)]
        command: RecordsCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

#[derive(clap::Subcommand)]
enum RecordsCommands {
    /// List every entry
    List,
    /// Add an entry
    Add {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Rename an entry
    Rename {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Delete an entry
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    let Cli {
        command,
        screen,
        memory,
    } = cli;

    // default to the interactive UI
    let Some(command) = command else {
        let _log = logging::init(&config.log.level, &LogTarget::File(config.log_file()))?;
        return commands::ui::run(&config, screen, memory).await;
    };

    let _log = logging::init(&config.log.level, &LogTarget::Stderr)?;

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },

        Commands::Register { email, password } => {
            commands::register::run(&config, &email, &password).await
        }

        Commands::Records { sign_in, command } => {
            let credentials = sign_in.into_credentials();
            let session = commands::records::connect(&config, credentials.as_ref()).await?;
            match command {
                RecordsCommands::List => session.list().await,
                RecordsCommands::Add { name } => session.add(&name).await,
                RecordsCommands::Rename { id, name } => session.rename(&id, &name).await,
                RecordsCommands::Delete { id } => session.delete(&id).await,
            }
        }
    }
}
