//! sessiond entry point.
//!
//! ```bash
//! export JWT_SECRET=your_jwt_secret
//! sessiond --config sessiond.toml
//! ```

use std::sync::Arc;

use clap::Parser;
use session_auth::jwt::JwtTokenService;
use sessiond::{
    api::router, cli::Cli, config::SessiondConfig, prelude::*, users::StaticIdentityStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,session_web=debug,tower_http=debug",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SessiondConfig::from_file(path)?,
        None => SessiondConfig::default(),
    };
    let secret = cli.jwt_secret.ok_or(Error::MissingSecret)?;

    let tokens = Arc::new(JwtTokenService::new(
        secret.as_bytes(),
        config.token_ttl_seconds(),
    )?);
    let users = StaticIdentityStore::new(config.users.clone());
    tracing::info!("Loaded {} users", users.len());

    let app = router(&config, tokens, Arc::new(users))?;

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
    }
}
