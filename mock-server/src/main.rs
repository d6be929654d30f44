use mock_server::ListEnvelope;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let envelope = ListEnvelope::from_env();
    let listener = TcpListener::bind(&addr).await?;
    log::info!("listening on {addr} ({envelope:?} list responses)");
    mock_server::run_with(listener, envelope).await
}
