#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    society_events::run().await
}
