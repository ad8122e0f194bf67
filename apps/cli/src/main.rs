use anyhow::Context;
use kicad_presence_context::{platform, PresenceConfig, PresencePoller};
use kicad_presence_discord::DiscordPublisher;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,kicad_presence=debug")),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting kicad-presence");

    let config = PresenceConfig::load().context("failed to load configuration")?;
    let source = platform::detect().context("cannot list windows on this system")?;
    let publisher = DiscordPublisher::connect(&config.client_id)
        .context("failed to connect to Discord (is it running?)")?;

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("stop requested");
                    shutdown.cancel();
                }
                Err(err) => tracing::warn!(error = %err, "failed to listen for Ctrl+C"),
            }
        });
    }

    let mut poller = PresencePoller::new(source, publisher, config);
    let reason = poller.run(shutdown).await;

    tracing::info!(%reason, "exiting");
    Ok(())
}
