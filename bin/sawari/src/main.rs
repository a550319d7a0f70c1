#[tokio::main]
async fn main() -> Result<(), eyre::Report> {
    sawari::run().await
}
