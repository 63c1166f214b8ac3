use anyhow::Result;
use learnhub::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let (globals, action) = cli::start()?;

    action.execute(&globals).await?;

    Ok(())
}
