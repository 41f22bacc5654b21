#[tokio::main]
async fn main() -> anyhow::Result<()> {
    phrase_drill_backend::run().await
}
