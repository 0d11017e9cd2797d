#[tokio::main]
async fn main() -> anyhow::Result<()> {
    specimen_trainer_backend::run().await
}
