use std::{net::SocketAddr, sync::Arc};

use tokio::signal;
use tracing::{error, info};

use storefront_checkout_api as api;

use api::payment_provider::{PaymentProvider, StripeGateway};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Init DB
    let db = api::db::establish_connection_from_app_config(&cfg).await?;
    if cfg.auto_migrate {
        api::db::run_migrations(&db).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }

    // Payment provider gateway (secret presence was enforced at config load)
    let payment_provider: Arc<dyn PaymentProvider> = Arc::new(StripeGateway::new(
        cfg.stripe_secret_key.clone(),
        cfg.stripe_api_base.clone(),
    ));

    // Compose shared app state
    let state = api::AppState {
        db: Arc::new(db),
        config: cfg.clone(),
        payment_provider,
    };

    let app = api::app(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    info!("🚀 storefront-checkout-api listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
