use anyhow::Result;
use bigcal::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
