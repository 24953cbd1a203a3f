use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wellcare_mock_server=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("WELLCARE_MOCK_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".into());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("mock patient service listening on http://{addr}/api");
    wellcare_mock_server::run(listener).await?;
    Ok(())
}
