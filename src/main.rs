use clap::Parser;
use fincalc::api::{Cli, Command};
use fincalc::config::{DEFAULT_LOG_FILTER, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Command::Serve(args) = &cli.command {
        let config = match ServerConfig::from_env() {
            Ok(config) => args.apply(config),
            Err(e) => {
                eprintln!("Configuration error: {e}");
                std::process::exit(1);
            }
        };
        if let Err(e) = fincalc::api::run_http_server(config).await {
            eprintln!("Server error: {e}");
            std::process::exit(1);
        }
        return;
    }

    match fincalc::api::run_calculator(&cli.command) {
        Some(Ok(json)) => println!("{json}"),
        Some(Err(e)) => {
            eprintln!("Invalid input: {e}");
            std::process::exit(1);
        }
        None => {}
    }
}
