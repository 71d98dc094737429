// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Audit event records and severity levels.
//!
//! This module provides the foundational types for the audit trail:
//!
//! - [`AuditSeverity`]: four ordered severity levels
//! - [`AuditEvent`]: the immutable persisted record
//! - [`AuditEventInput`]: caller-supplied fields, completed by the writer
//! - [`AuditEventInputBuilder`]: fluent API for constructing inputs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::AuditAction;

/// Default retention period for audit events in days.
pub const DEFAULT_AUDIT_RETENTION_DAYS: i64 = 90;

/// Reserved tenant id for system-wide events that belong to no tenant.
pub const GLOBAL_TENANT: &str = "global";

/// Reserved tenant id a global admin passes to query across all tenants.
pub const ALL_TENANTS: &str = "all";

/// Actor id recorded when the caller could not resolve the user.
pub const UNKNOWN_USER: &str = "unknown";

/// Severity levels for audit events, ordered least to most severe.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
	#[default]
	Info,
	Warning,
	Error,
	Critical,
}

impl fmt::Display for AuditSeverity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			AuditSeverity::Info => "info",
			AuditSeverity::Warning => "warning",
			AuditSeverity::Error => "error",
			AuditSeverity::Critical => "critical",
		};
		write!(f, "{s}")
	}
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown severity: {0}")]
pub struct ParseSeverityError(String);

impl FromStr for AuditSeverity {
	type Err = ParseSeverityError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"info" => Ok(AuditSeverity::Info),
			"warning" => Ok(AuditSeverity::Warning),
			"error" => Ok(AuditSeverity::Error),
			"critical" => Ok(AuditSeverity::Critical),
			other => Err(ParseSeverityError(other.to_string())),
		}
	}
}

/// A record in the audit trail. Immutable once written; corrections are new
/// events, never updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
	/// Opaque unique id, generated at write time, never reused.
	pub id: String,
	/// When the event was recorded. Doubles (as epoch millis) as the sort
	/// key for every index.
	pub timestamp: DateTime<Utc>,
	/// Actor identifier, or [`UNKNOWN_USER`] if the caller could not
	/// resolve one.
	pub user_id: String,
	/// Owning tenant, or [`GLOBAL_TENANT`] for system-wide events.
	pub tenant_id: String,
	/// What happened.
	pub action: AuditAction,
	/// Severity, defaulted per-action when the input omitted it.
	pub severity: AuditSeverity,
	/// The type of resource acted upon, if any.
	pub resource_type: Option<String>,
	/// The id of the resource acted upon, if any.
	pub resource_id: Option<String>,
	/// IP address of the request origin.
	pub ip_address: Option<String>,
	/// User agent string from the request.
	pub user_agent: Option<String>,
	/// Action-specific context.
	pub details: serde_json::Value,
	/// Whether the audited action succeeded.
	pub success: bool,
}

/// Caller-supplied fields of an audit event. The writer supplies `id` and
/// `timestamp` and resolves a missing `severity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEventInput {
	pub user_id: String,
	pub tenant_id: String,
	pub action: AuditAction,
	pub severity: Option<AuditSeverity>,
	pub resource_type: Option<String>,
	pub resource_id: Option<String>,
	pub ip_address: Option<String>,
	pub user_agent: Option<String>,
	pub details: serde_json::Value,
	pub success: bool,
}

impl AuditEventInput {
	/// Create a new input builder for the given action.
	pub fn builder(action: AuditAction) -> AuditEventInputBuilder {
		AuditEventInputBuilder::new(action)
	}
}

/// Builder for constructing audit event inputs with a fluent API.
#[derive(Debug, Clone)]
pub struct AuditEventInputBuilder {
	action: AuditAction,
	user_id: Option<String>,
	tenant_id: Option<String>,
	severity: Option<AuditSeverity>,
	resource_type: Option<String>,
	resource_id: Option<String>,
	ip_address: Option<String>,
	user_agent: Option<String>,
	details: serde_json::Value,
	success: bool,
}

impl AuditEventInputBuilder {
	pub fn new(action: AuditAction) -> Self {
		Self {
			action,
			user_id: None,
			tenant_id: None,
			severity: None,
			resource_type: None,
			resource_id: None,
			ip_address: None,
			user_agent: None,
			details: serde_json::Value::Null,
			success: true,
		}
	}

	/// Set the actor. Defaults to [`UNKNOWN_USER`].
	pub fn user(mut self, user_id: impl Into<String>) -> Self {
		self.user_id = Some(user_id.into());
		self
	}

	/// Set the owning tenant. Defaults to [`GLOBAL_TENANT`].
	pub fn tenant(mut self, tenant_id: impl Into<String>) -> Self {
		self.tenant_id = Some(tenant_id.into());
		self
	}

	/// Override the severity. Defaults to the action's default severity at
	/// write time.
	pub fn severity(mut self, severity: AuditSeverity) -> Self {
		self.severity = Some(severity);
		self
	}

	/// Set the resource type without a specific instance.
	pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
		self.resource_type = Some(resource_type.into());
		self
	}

	/// Set the resource type and instance id acted upon.
	pub fn resource(
		mut self,
		resource_type: impl Into<String>,
		resource_id: impl Into<String>,
	) -> Self {
		self.resource_type = Some(resource_type.into());
		self.resource_id = Some(resource_id.into());
		self
	}

	/// Set the IP address of the request origin.
	pub fn ip_address(mut self, ip: impl Into<String>) -> Self {
		self.ip_address = Some(ip.into());
		self
	}

	/// Set the user agent string from the request.
	pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
		self.user_agent = Some(ua.into());
		self
	}

	/// Set action-specific details.
	pub fn details(mut self, details: serde_json::Value) -> Self {
		self.details = details;
		self
	}

	/// Set the outcome. Defaults to `true`.
	pub fn success(mut self, success: bool) -> Self {
		self.success = success;
		self
	}

	pub fn build(self) -> AuditEventInput {
		AuditEventInput {
			user_id: self.user_id.unwrap_or_else(|| UNKNOWN_USER.to_string()),
			tenant_id: self.tenant_id.unwrap_or_else(|| GLOBAL_TENANT.to_string()),
			action: self.action,
			severity: self.severity,
			resource_type: self.resource_type,
			resource_id: self.resource_id,
			ip_address: self.ip_address,
			user_agent: self.user_agent,
			details: self.details,
			success: self.success,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	mod audit_severity {
		use super::*;

		#[test]
		fn ordering_higher_severity_is_greater() {
			assert!(AuditSeverity::Critical > AuditSeverity::Error);
			assert!(AuditSeverity::Error > AuditSeverity::Warning);
			assert!(AuditSeverity::Warning > AuditSeverity::Info);
		}

		#[test]
		fn display() {
			assert_eq!(AuditSeverity::Info.to_string(), "info");
			assert_eq!(AuditSeverity::Warning.to_string(), "warning");
			assert_eq!(AuditSeverity::Error.to_string(), "error");
			assert_eq!(AuditSeverity::Critical.to_string(), "critical");
		}

		#[test]
		fn parses_from_str() {
			assert_eq!("warning".parse::<AuditSeverity>(), Ok(AuditSeverity::Warning));
			assert_eq!("critical".parse::<AuditSeverity>(), Ok(AuditSeverity::Critical));
			assert!("fatal".parse::<AuditSeverity>().is_err());
		}

		#[test]
		fn serializes_snake_case() {
			assert_eq!(
				serde_json::to_string(&AuditSeverity::Warning).unwrap(),
				"\"warning\""
			);
		}

		#[test]
		fn default_is_info() {
			assert_eq!(AuditSeverity::default(), AuditSeverity::Info);
		}
	}

	mod audit_event {
		use super::*;

		#[test]
		fn serde_roundtrip() {
			let event = AuditEvent {
				id: "e-1".to_string(),
				timestamp: Utc::now(),
				user_id: "u-1".to_string(),
				tenant_id: "t-1".to_string(),
				action: AuditAction::AccessDenied,
				severity: AuditSeverity::Warning,
				resource_type: Some("doc".to_string()),
				resource_id: Some("d-1".to_string()),
				ip_address: Some("10.0.0.1".to_string()),
				user_agent: None,
				details: json!({"permission": "read"}),
				success: false,
			};

			let serialized = serde_json::to_string(&event).unwrap();
			let restored: AuditEvent = serde_json::from_str(&serialized).unwrap();
			assert_eq!(restored, event);
		}

		#[test]
		fn timestamp_serializes_iso8601() {
			let event = AuditEvent {
				id: "e-1".to_string(),
				timestamp: "2025-06-01T12:00:00Z".parse().unwrap(),
				user_id: UNKNOWN_USER.to_string(),
				tenant_id: GLOBAL_TENANT.to_string(),
				action: AuditAction::ConfigUpdated,
				severity: AuditSeverity::Info,
				resource_type: None,
				resource_id: None,
				ip_address: None,
				user_agent: None,
				details: serde_json::Value::Null,
				success: true,
			};

			let json = serde_json::to_string(&event).unwrap();
			assert!(json.contains("\"timestamp\":\"2025-06-01T12:00:00Z\""));
		}
	}

	mod input_builder {
		use super::*;

		#[test]
		fn builds_minimal_input() {
			let input = AuditEventInput::builder(AuditAction::Logout).build();

			assert_eq!(input.action, AuditAction::Logout);
			assert_eq!(input.user_id, UNKNOWN_USER);
			assert_eq!(input.tenant_id, GLOBAL_TENANT);
			assert!(input.severity.is_none());
			assert!(input.resource_type.is_none());
			assert!(input.resource_id.is_none());
			assert!(input.success);
			assert_eq!(input.details, serde_json::Value::Null);
		}

		#[test]
		fn builds_full_input() {
			let input = AuditEventInput::builder(AuditAction::AccessDenied)
				.user("u-1")
				.tenant("t-1")
				.severity(AuditSeverity::Critical)
				.resource("doc", "d-1")
				.ip_address("10.0.0.1")
				.user_agent("Mozilla/5.0")
				.details(json!({"permission": "write"}))
				.success(false)
				.build();

			assert_eq!(input.user_id, "u-1");
			assert_eq!(input.tenant_id, "t-1");
			assert_eq!(input.severity, Some(AuditSeverity::Critical));
			assert_eq!(input.resource_type, Some("doc".to_string()));
			assert_eq!(input.resource_id, Some("d-1".to_string()));
			assert_eq!(input.ip_address, Some("10.0.0.1".to_string()));
			assert_eq!(input.user_agent, Some("Mozilla/5.0".to_string()));
			assert_eq!(input.details["permission"], "write");
			assert!(!input.success);
		}

		#[test]
		fn resource_type_without_id() {
			let input = AuditEventInput::builder(AuditAction::AccessGranted)
				.resource_type("doc")
				.build();

			assert_eq!(input.resource_type, Some("doc".to_string()));
			assert!(input.resource_id.is_none());
		}
	}

	mod proptest_tests {
		use super::*;

		fn arb_severity() -> impl Strategy<Value = AuditSeverity> {
			prop_oneof![
				Just(AuditSeverity::Info),
				Just(AuditSeverity::Warning),
				Just(AuditSeverity::Error),
				Just(AuditSeverity::Critical),
			]
		}

		proptest! {
			#[test]
			fn severity_ordering_is_total(a in arb_severity(), b in arb_severity()) {
				prop_assert!(a <= b || b <= a);
			}

			#[test]
			fn severity_serde_roundtrip(severity in arb_severity()) {
				let json = serde_json::to_string(&severity).unwrap();
				let roundtrip: AuditSeverity = serde_json::from_str(&json).unwrap();
				prop_assert_eq!(severity, roundtrip);
			}

			#[test]
			fn severity_display_parses_back(severity in arb_severity()) {
				let parsed: AuditSeverity = severity.to_string().parse().unwrap();
				prop_assert_eq!(severity, parsed);
			}
		}
	}
}
