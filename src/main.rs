//! The backend for the campus club network.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clubhouse::config::Config;
use clubhouse::models::admin::Admin;
use clubhouse::models::session::Session;
use clubhouse::routes;
use clubhouse::store::Store;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load();
    let store = Store::new();

    seed_admin(&config, &store).await?;

    let app = routes::app(Arc::clone(&store));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .context("server exited unexpectedly")
}

/// Creates the bootstrap admin account if both `BOOTSTRAP_ADMIN_EMAIL` and
/// `BOOTSTRAP_ADMIN_TOKEN` are configured, reusing the account on restart.
async fn seed_admin(config: &Config, store: &Arc<Store>) -> anyhow::Result<()> {
    let (email, token) = match (
        config.bootstrap_admin_email.as_ref(),
        config.bootstrap_admin_token.as_ref(),
    ) {
        (Some(email), Some(token)) => (email, token),
        _ => return Ok(()),
    };

    let admin = match Admin::with_email_opt(email, store).await {
        Some(admin) => admin,
        None => Admin::create("Administrator", email, store)
            .await
            .context("failed to seed the bootstrap admin")?,
    };
    Session::install(token, admin.id, &admin.email, admin.role, store)
        .await
        .context("failed to install the bootstrap admin session")?;

    info!("bootstrap admin ready: {}", admin.email);

    Ok(())
}
