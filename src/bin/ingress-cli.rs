use std::path::PathBuf;

use clap::{Parser, Subcommand};
use origin_sdk::OriginClient;

use origin_server::tunnel::{load_tunnel_config, validate_ingress, TunnelConfig, TunnelConfigError};

#[derive(Parser)]
#[command(name = "ingress-cli")]
#[command(about = "Tunnel ingress helper for the origin server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a tunnel agent config file
    Check {
        /// Path to the YAML config
        path: PathBuf,
    },
    /// Print a tunnel agent config routing hostnames to the origin
    Render {
        #[arg(long)]
        tunnel: String,

        #[arg(long)]
        credentials_file: PathBuf,

        /// Public hostname to route (repeatable)
        #[arg(long = "hostname", required = true)]
        hostnames: Vec<String>,

        #[arg(long, default_value = "http://localhost:8000")]
        origin: String,
    },
    /// Call every origin route and print the responses
    Probe {
        #[arg(short, long, default_value = "http://localhost:8000")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { path } => match load_tunnel_config(&path) {
            Ok(config) => {
                println!(
                    "{}: tunnel {} with {} ingress rule(s) is valid",
                    path.display(),
                    config.tunnel,
                    config.ingress.len()
                );
                for rule in &config.ingress {
                    let target = rule.target()?;
                    println!(
                        "  {} -> {}",
                        rule.hostname.as_deref().unwrap_or("*"),
                        target
                    );
                }
            }
            Err(TunnelConfigError::Invalid(errors)) => {
                eprintln!("{}: invalid", path.display());
                for error in &errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Render {
            tunnel,
            credentials_file,
            hostnames,
            origin,
        } => {
            let config = TunnelConfig::for_origin(tunnel, credentials_file, hostnames, &origin);
            if let Err(errors) = validate_ingress(&config) {
                for error in &errors {
                    eprintln!("Error: {}", error);
                }
                std::process::exit(1);
            }
            print!("{}", config.to_yaml()?);
        }
        Commands::Probe { url } => probe(&url).await?,
    }

    Ok(())
}

async fn probe(url: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let client = OriginClient::new(url);

    let status = client.status().await?;
    println!("GET /        {}", serde_json::to_string_pretty(&status)?);

    let headers = client.headers(&[("X-Probe", "ingress-cli")]).await?;
    println!("GET /headers {}", serde_json::to_string_pretty(&headers)?);

    let error = client.error().await?;
    println!("GET /error   {}", serde_json::to_string_pretty(&error)?);

    let missing = client.get("/does-not-exist").await?;
    println!("GET /does-not-exist -> {}", missing.status());

    println!("GET /slow    (waiting)");
    let slow = client.slow().await?;
    println!("GET /slow    {}", serde_json::to_string_pretty(&slow)?);

    Ok(())
}
