use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "certify", about = "Certificate verification backed by Google Sheets", version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "certify.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
    /// Start the certificate verification web server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,
    },
    /// Look up one certificate and print it
    Lookup {
        /// Certificate ID, matched exactly
        #[arg(long)]
        id: String,
        /// Sheet to search (defaults to Sheet1)
        #[arg(long)]
        sheet: Option<String>,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            commands::init::run(&cli.config, force).await?;
        }
        Commands::Serve { port } => {
            commands::serve::run(&cli.config, port).await?;
        }
        Commands::Lookup { id, sheet, json } => {
            commands::lookup::run(&cli.config, &id, sheet, json).await?;
        }
    }

    Ok(())
}
