use adapter::{database::connect_database_with, redis::RedisClient};
use anyhow::{Context, Result};
use api::route::v1;
use axum::Router;
use chrono::Utc;
use kernel::model::outbox::retry_delay;
use registry::AppRegistry;
use shared::config::AppConfig;
use shared::env::{which, Environment};
use shared::error::AppResult;
use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};
use tokio::net::TcpListener;
use tokio::time::sleep;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Emails picked up per delivery pass.
const OUTBOX_BATCH_SIZE: i64 = 20;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;
    let pool = connect_database_with(&app_config.database);
    let kv = Arc::new(RedisClient::new(&app_config.redis)?);

    let registry = AppRegistry::new(pool, kv, app_config);

    tokio::spawn(outbox_delivery_loop(registry.clone()));

    let app = Router::new()
        .merge(v1::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let addr = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 8080);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e, error.message = %e, "Unexpected error"
            )
        })
}

/// Polls the email outbox and hands due rows to the mail client. Failures
/// are rescheduled with exponential backoff until the attempt budget runs
/// out, then the row is parked as failed for an operator to look at.
async fn outbox_delivery_loop(registry: AppRegistry) {
    let poll_interval = Duration::from_secs(registry.outbox_config().poll_interval_secs);
    let max_attempts = registry.outbox_config().max_attempts;

    loop {
        if let Err(cause) = deliver_due_emails(&registry, max_attempts).await {
            tracing::error!(%cause, "outbox delivery pass failed");
        }
        sleep(poll_interval).await;
    }
}

async fn deliver_due_emails(registry: &AppRegistry, max_attempts: i32) -> AppResult<()> {
    let due = registry.outbox_repository().fetch_due(OUTBOX_BATCH_SIZE).await?;

    for email in due {
        match registry.mailer().send(&email).await {
            Ok(()) => {
                registry.outbox_repository().mark_sent(email.id).await?;
            }
            Err(cause) => {
                let attempts = email.attempts + 1;
                let retry_at = (attempts < max_attempts).then(|| Utc::now() + retry_delay(attempts));
                match retry_at {
                    Some(at) => tracing::warn!(
                        %cause, email_id = %email.id, attempts, retry_at = %at,
                        "email delivery failed, rescheduled"
                    ),
                    None => tracing::error!(
                        %cause, email_id = %email.id, attempts,
                        "email delivery failed permanently"
                    ),
                }
                registry
                    .outbox_repository()
                    .mark_failure(email.id, &cause.to_string(), retry_at)
                    .await?;
            }
        }
    }

    Ok(())
}
