#[tokio::main]
async fn main() {
    if let Err(err) = fw_api::run().await {
        tracing::error!(error = %err, "fw-api failed");
        std::process::exit(1);
    }
}
