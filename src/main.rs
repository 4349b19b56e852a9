// src/main.rs

use exam_proctor::config::Config;
use exam_proctor::routes;
use exam_proctor::state::AppState;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let addr = config.bind_addr;
    let state = AppState::from_config(config)?;

    // Warm the question bank. The server still starts without it so students
    // can log in; starting an exam reports the bank as unavailable.
    match state.bank.load().await {
        Ok(questions) => tracing::info!("Question bank ready ({} questions)", questions.len()),
        Err(e) => tracing::error!(
            "Question bank {} unavailable: {}",
            state.bank.path().display(),
            e
        ),
    }
    tracing::info!("Results are appended to {}", state.results.path().display());

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start the server
    axum::serve(listener, app).await?;
    Ok(())
}
