use crate::core::Pipeline;
use crate::domain::model::DeliverySummary;
use crate::utils::error::Result;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub struct NotifierEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> NotifierEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Run a single extract/transform/load cycle.
    pub async fn run_once(&self) -> Result<DeliverySummary> {
        tracing::debug!("Polling for notifications");
        let notifications = self.pipeline.extract().await?;
        tracing::debug!("Fetched {} notifications", notifications.len());

        let pending = self.pipeline.transform(notifications).await?;
        if !pending.messages.is_empty() {
            tracing::info!("{} new notification(s) to forward", pending.messages.len());
        }

        let summary = self.pipeline.load(pending).await?;
        if summary.delivered > 0 {
            tracing::info!("Delivered {} message(s) to Telegram", summary.delivered);
        }

        Ok(summary)
    }

    /// Poll until SIGTERM or Ctrl-C. A failed cycle is logged and the next
    /// tick retries; only shutdown ends the loop.
    pub async fn run(&self, interval: Duration) -> Result<()> {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.run_once().await {
                        tracing::error!(
                            "Poll cycle failed: {} (suggestion: {})",
                            e,
                            e.recovery_suggestion()
                        );
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Received shutdown signal, stopping...");
                    return Ok(());
                }
            }
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!("Could not install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
