// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The scheduled retention job.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use crate::config::AuditConfig;
use crate::service::AuditService;

/// Periodically invokes the retention pruner until shut down.
///
/// The first prune runs immediately on spawn; later runs follow the
/// configured interval. A failed cycle is logged and retried on the next
/// tick — events it could not remove are still older than the horizon and
/// remain eligible.
pub struct RetentionJob {
	shutdown_tx: broadcast::Sender<()>,
	handle: JoinHandle<()>,
}

impl RetentionJob {
	pub fn spawn(service: Arc<AuditService>, interval: Duration, retention_days: i64) -> Self {
		let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
		let handle = tokio::spawn(async move {
			let mut ticker = tokio::time::interval(interval);
			ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
			loop {
				tokio::select! {
					_ = ticker.tick() => {
						if let Err(err) = service.prune_old_events(retention_days).await {
							warn!(error = %err, "scheduled audit prune failed");
						}
					}
					_ = shutdown_rx.recv() => break,
				}
			}
		});
		Self {
			shutdown_tx,
			handle,
		}
	}

	pub fn from_config(service: Arc<AuditService>, config: &AuditConfig) -> Self {
		Self::spawn(
			service,
			Duration::from_secs(config.prune_interval_secs),
			config.retention_days,
		)
	}

	/// Stop the job and wait for the loop to exit.
	pub async fn shutdown(self) {
		let _ = self.shutdown_tx.send(());
		let _ = self.handle.await;
	}
}
