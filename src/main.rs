use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    sentai::run().await
}
