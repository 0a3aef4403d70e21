use chrono::Local;
use clap::Parser;
use nestegg::api::{Cli, Command, run_command, run_http_server};
use nestegg::config::Config;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port } => {
            let mut config = Config::load();
            if let Some(port) = port {
                config.port = port;
            }
            if let Err(e) = run_http_server(&config).await {
                error!("Server error: {e}");
                std::process::exit(1);
            }
        }
        command => match run_command(command, Local::now().date_naive()) {
            Ok(output) => println!("{output}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
    }
}
