use tracing::info;
use tracing_subscriber::EnvFilter;

use notes_gateway::config::Config;
use notes_gateway::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting notes-gateway");

    let config = Config::from_env()?;
    info!(
        bind = %config.bind,
        chat_url = %config.inference.chat_url,
        model = %config.inference.model,
        max_body_bytes = config.max_body_bytes,
        "configuration loaded"
    );

    server::run_server(&config).await.inspect_err(|e| {
        tracing::error!(error = %e, "gateway error");
    })?;

    info!("gateway shut down");
    Ok(())
}
