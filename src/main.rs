use accounts_api::{
    database::{self, PostgreDatabase, Storage},
    routes::make_app,
    AppState, Config,
};
use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::init()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .init();

    info!("Connecting to PostgreSQL...");
    let sqlx_db_connection = database::connect_sqlx(&config.db_url)
        .await
        .context("could not connect to the database")?;
    info!("Connected to PostgreSQL!");

    let db = PostgreDatabase::new(sqlx_db_connection);
    db.init().await.context("could not create the account table")?;

    let state = Arc::new(AppState { db: Arc::new(db) });
    let app = make_app(state);

    let listener = TcpListener::bind(&config.listen_addr).await?;
    info!("🚀 Server started successfully on {}", config.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
