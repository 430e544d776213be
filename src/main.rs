#[tokio::main]
async fn main() {
    if let Err(e) = ratings_gateway::start_server().await {
        tracing::error!("Ratings gateway stopped: {}", e);
        eprintln!("ratings gateway error: {e}");
        std::process::exit(1);
    }
}
