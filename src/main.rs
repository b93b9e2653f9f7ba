use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer};
use anyhow::Context;
use payrelay::config::Config;
use payrelay::middleware::RequestId;
use payrelay::{configure, AppState};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(log_format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "payrelay=debug,actix_web=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    init_tracing(&config.app.log_format);

    tracing::info!("Starting payrelay");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!(
        timeout_secs = config.http.timeout_secs,
        "Outbound gateway timeout"
    );

    let state = AppState::from_config(&config).context("Failed to initialize gateways")?;
    let static_dir = config.server.static_dir.clone();

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .configure(configure(state.clone()))
            .service(Files::new("/", &static_dir).index_file("index.html"))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
