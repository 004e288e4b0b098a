use kaggle_datasets::{default_data_dir, default_datasets, Fetcher, KaggleApi, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run().await {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let fetcher = Fetcher::new(KaggleApi::from_env()?);
    fetcher
        .run(&default_data_dir(), &default_datasets(), &mut std::io::stdout())
        .await
}
