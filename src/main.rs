use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "whatif=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = whatif::api::Cli::parse();
    if let Err(e) = whatif::api::run(cli).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
