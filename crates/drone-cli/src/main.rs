//! dronectl entry point

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    drone_cli::run().await?;
    Ok(())
}
