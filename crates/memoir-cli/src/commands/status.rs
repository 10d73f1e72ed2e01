//! Storage status: one probe, or follow the probe until interrupted

use anyhow::Result;
use colored::{ColoredString, Colorize};
use memoir_core::{AvailabilityProbe, ServerStatus, StorageBadge, SyncGateway};
use std::sync::Arc;
use std::time::Duration;

fn badge_label(badge: StorageBadge) -> ColoredString {
    let label = badge.to_string();
    match badge {
        StorageBadge::CloudSync => label.green().bold(),
        StorageBadge::LocalOnly => label.yellow().bold(),
        StorageBadge::Checking => label.dimmed(),
    }
}

fn describe(status: ServerStatus) -> &'static str {
    match status {
        ServerStatus::Checking => "checking remote storage",
        ServerStatus::Available => "remote storage reachable, changes sync to the cloud",
        ServerStatus::Unavailable => "remote storage unreachable, changes stay on this device",
    }
}

pub async fn execute(
    gateway: Arc<SyncGateway>,
    remote: &str,
    interval: Duration,
    watch: bool,
) -> Result<()> {
    println!("{} {}", "Remote:".cyan(), remote);

    if !gateway.is_remote_configured() {
        println!(
            "{} {}",
            badge_label(StorageBadge::LocalOnly),
            "no remote configured"
        );
        return Ok(());
    }

    let probe = Arc::new(AvailabilityProbe::new(gateway).with_interval(interval));

    if !watch {
        let status = probe.check_now().await;
        println!("{} {}", badge_label(probe.badge()), describe(status));
        return Ok(());
    }

    let mut status_rx = probe.server_status();
    let handle = probe.spawn();
    println!("{}", "Watching storage status (Ctrl-C to stop)".dimmed());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = status_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = *status_rx.borrow_and_update();
                println!("{} {}", badge_label(probe.badge()), describe(status));
            }
        }
    }

    handle.stop().await;
    Ok(())
}
