#[tokio::main]
async fn main() -> std::io::Result<()> {
    shooter_server::run_with_config().await
}
