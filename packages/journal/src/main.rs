// packages/journal/src/main.rs
//! Event Journal demo host
//!
//! Runs a foreground journal fed from stdin. Each line is one event:
//! `click`, `touch`, `up` and `down` go through the matching adapters,
//! anything else is recorded verbatim. EOF or Ctrl-C tears the host down.

use anyhow::Result;
use event_journal::observability::{describe_metrics, init_tracing};
use event_journal::runtime::{
    ClickSource, ConnectivitySource, EventSource, HostKind, JournalHost, TouchAction, TouchSource,
};
use event_journal::JournalConfig;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = JournalConfig::load()?;
    init_tracing(&config.log)?;
    describe_metrics();

    info!("Starting Event Journal v{}", env!("CARGO_PKG_VERSION"));

    let click = Arc::new(ClickSource::new());
    let touch = Arc::new(TouchSource::new());
    let net = Arc::new(ConnectivitySource::new());

    let host = JournalHost::start(
        HostKind::Foreground,
        &config,
        vec![
            click.clone() as Arc<dyn EventSource>,
            touch.clone() as Arc<dyn EventSource>,
            net.clone() as Arc<dyn EventSource>,
        ],
    )?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match line.trim() {
                    "" => {}
                    "click" => click.clicked(),
                    "touch" => touch.on_touch(TouchAction::Down),
                    "up" => net.on_available(),
                    "down" => net.on_lost(),
                    other => host.recorder().record(other),
                },
                Ok(None) => {
                    info!("Input closed");
                    break;
                }
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    break;
                }
            },

            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal, flushing...");
                break;
            }
        }
    }

    match host.shutdown().await {
        Ok(report) => {
            info!("Journal stopped ({} records in final flush)", report.records);
            Ok(())
        }
        Err(e) => {
            error!("Journal shutdown failed: {}", e);
            Err(e.into())
        }
    }
}
