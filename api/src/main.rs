use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use boxportal_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(120);

fn init_logger(args: &Args) {
    let filter = EnvFilter::try_new(&args.log.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if args.log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args);

    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        warn!("a rustls crypto provider was already installed");
    }

    let app_state = state(args.clone())?;

    let sessions = app_state.sessions.clone();
    let service = app_state.service.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CACHE_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let sessions_purged = sessions.purge_expired();
            let entries_purged = service.purge_expired_caches();
            if sessions_purged + entries_purged > 0 {
                debug!(sessions_purged, entries_purged, "expired cache entries removed");
            }
        }
    });

    let app = router(app_state)?;

    let addr: SocketAddr = format!("{}:{}", args.server.host, args.server.port)
        .parse()
        .with_context(|| "invalid server host or port")?;

    match (&args.server.tls_cert, &args.server.tls_key) {
        (Some(cert), Some(key)) => {
            info!("listening on https://{}", addr);
            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(cert, key)
                .await
                .with_context(|| "failed to load TLS certificate or key")?;
            let handle = axum_server::Handle::new();
            let shutdown_handle = handle.clone();
            tokio::spawn(async move {
                wait_for_signal().await;
                shutdown_handle.graceful_shutdown(Some(Duration::from_secs(10)));
            });
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        (None, None) => {
            info!("listening on http://{}", addr);
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app)
                .with_graceful_shutdown(wait_for_signal())
                .await?;
        }
        _ => anyhow::bail!("both TLS_CERT and TLS_KEY must be set to serve HTTPS"),
    }

    Ok(())
}
