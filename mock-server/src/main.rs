use anyhow::Context;
use mock_store::Board;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let board = match std::env::var("MOCK_STORE_SEED") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path).with_context(|| format!("reading seed {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing seed {path}"))?
        }
        Err(_) => Board::sample(),
    };

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, lists = board.lists.len(), "mock store listening");
    mock_store::run(listener, board).await?;
    Ok(())
}
