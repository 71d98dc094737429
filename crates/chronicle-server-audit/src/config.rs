// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Audit trail configuration section.

use serde::{Deserialize, Serialize};

use chronicle_core::DEFAULT_AUDIT_RETENTION_DAYS;

const DEFAULT_PRUNE_INTERVAL_SECS: u64 = 3600;

fn default_retention_days() -> i64 {
	DEFAULT_AUDIT_RETENTION_DAYS
}

fn default_prune_interval_secs() -> u64 {
	DEFAULT_PRUNE_INTERVAL_SECS
}

/// How the service reacts to store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
	/// Swallow store failures: a degraded record on write, an empty set on
	/// query. The production posture — audit logging never blocks or
	/// crashes the action it is auditing.
	#[default]
	BestEffort,
	/// Propagate store failures to the caller so they surface immediately.
	MustSucceed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditConfigLayer {
	pub enabled: Option<bool>,
	pub retention_days: Option<i64>,
	pub write_policy: Option<WritePolicy>,
	pub prune_interval_secs: Option<u64>,
}

impl AuditConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.retention_days.is_some() {
			self.retention_days = other.retention_days;
		}
		if other.write_policy.is_some() {
			self.write_policy = other.write_policy;
		}
		if other.prune_interval_secs.is_some() {
			self.prune_interval_secs = other.prune_interval_secs;
		}
	}

	pub fn finalize(self) -> AuditConfig {
		AuditConfig {
			enabled: self.enabled.unwrap_or(true),
			retention_days: self.retention_days.unwrap_or_else(default_retention_days),
			write_policy: self.write_policy.unwrap_or_default(),
			prune_interval_secs: self
				.prune_interval_secs
				.unwrap_or_else(default_prune_interval_secs),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditConfig {
	pub enabled: bool,
	pub retention_days: i64,
	pub write_policy: WritePolicy,
	pub prune_interval_secs: u64,
}

impl Default for AuditConfig {
	fn default() -> Self {
		AuditConfigLayer::default().finalize()
	}
}
