#[tokio::main]
async fn main() -> postercache::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("postercache=info,tower_http=warn"),
    )
    .init();
    log::info!("Starting postercache");

    match postercache::run().await {
        Ok(()) => {
            log::info!("Server shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Server encountered an error: {}", e);
            Err(e)
        }
    }
}
