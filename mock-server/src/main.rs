use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let kv_port = std::env::var("KV_PORT").unwrap_or_else(|_| "6380".to_string());

    let addr = format!("127.0.0.1:{port}");
    let kv_addr = format!("127.0.0.1:{kv_port}");
    let listener = TcpListener::bind(&addr).await?;
    let kv_listener = TcpListener::bind(&kv_addr).await?;
    tracing::info!(%addr, %kv_addr, "listening");

    tokio::try_join!(mock_server::run(listener), mock_server::run_kv(kv_listener))?;
    Ok(())
}
