// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed convenience loggers.
//!
//! Each helper validates its inputs, constructs the specific
//! [`AuditEventInput`] for one kind of security-relevant action, and
//! delegates to [`AuditService::log_event`]. Validation happens before any
//! store call is attempted.

use serde_json::{json, Map, Value};

use chronicle_core::{
	AuditAction, AuditEvent, AuditEventInput, AuditSeverity, MembershipAction, RoleAction,
};

use crate::error::{AuditError, AuditResult};
use crate::service::AuditService;

impl AuditService {
	/// Record the outcome of a permission check against a resource.
	pub async fn log_permission_event(
		&self,
		user_id: &str,
		tenant_id: &str,
		resource_type: &str,
		permission: &str,
		success: bool,
		resource_id: Option<&str>,
		details: Option<Value>,
	) -> AuditResult<AuditEvent> {
		require_non_blank("user_id", user_id)?;
		require_non_blank("tenant_id", tenant_id)?;
		require_non_blank("resource_type", resource_type)?;
		require_non_blank("permission", permission)?;

		let action = if success {
			AuditAction::AccessGranted
		} else {
			AuditAction::AccessDenied
		};

		let mut builder = AuditEventInput::builder(action)
			.user(user_id)
			.tenant(tenant_id)
			.success(success)
			.details(merge_details(details, [("permission", json!(permission))]));
		builder = match resource_id {
			Some(resource_id) => builder.resource(resource_type, resource_id),
			None => builder.resource_type(resource_type),
		};

		self.log_event(builder.build()).await
	}

	/// Record a login attempt. Failed attempts are raised to warning
	/// severity.
	pub async fn log_auth_event(
		&self,
		user_id: &str,
		tenant_id: &str,
		success: bool,
		details: Option<Value>,
	) -> AuditResult<AuditEvent> {
		require_non_blank("user_id", user_id)?;
		require_non_blank("tenant_id", tenant_id)?;

		let mut builder = AuditEventInput::builder(AuditAction::Login)
			.user(user_id)
			.tenant(tenant_id)
			.success(success)
			.details(details.unwrap_or(Value::Null));
		if !success {
			builder = builder.severity(AuditSeverity::Warning);
		}

		self.log_event(builder.build()).await
	}

	/// Record a role lifecycle change.
	pub async fn log_role_event(
		&self,
		user_id: &str,
		tenant_id: &str,
		action: RoleAction,
		role_id: &str,
		details: Option<Value>,
	) -> AuditResult<AuditEvent> {
		require_non_blank("user_id", user_id)?;
		require_non_blank("tenant_id", tenant_id)?;
		require_non_blank("role_id", role_id)?;

		let input = AuditEventInput::builder(action.as_audit_action())
			.user(user_id)
			.tenant(tenant_id)
			.resource("role", role_id)
			.details(details.unwrap_or(Value::Null))
			.build();

		self.log_event(input).await
	}

	/// Record a user being added to or removed from a tenant. The actor is
	/// the administrator; the affected user is the resource.
	pub async fn log_tenant_membership_event(
		&self,
		admin_user_id: &str,
		tenant_id: &str,
		target_user_id: &str,
		action: MembershipAction,
		details: Option<Value>,
	) -> AuditResult<AuditEvent> {
		require_non_blank("admin_user_id", admin_user_id)?;
		require_non_blank("tenant_id", tenant_id)?;
		require_non_blank("target_user_id", target_user_id)?;

		let input = AuditEventInput::builder(action.as_audit_action())
			.user(admin_user_id)
			.tenant(tenant_id)
			.resource("user", target_user_id)
			.details(merge_details(
				details,
				[("target_user_id", json!(target_user_id))],
			))
			.build();

		self.log_event(input).await
	}

	/// Record an attempt to reach another tenant's data. The event is owned
	/// by the tenant the caller came from.
	pub async fn log_cross_tenant_access_attempt(
		&self,
		user_id: &str,
		source_tenant_id: &str,
		target_tenant_id: &str,
		details: Option<Value>,
	) -> AuditResult<AuditEvent> {
		require_non_blank("user_id", user_id)?;
		require_non_blank("source_tenant_id", source_tenant_id)?;
		require_non_blank("target_tenant_id", target_tenant_id)?;

		let input = AuditEventInput::builder(AuditAction::CrossTenantAccessAttempt)
			.user(user_id)
			.tenant(source_tenant_id)
			.success(false)
			.details(merge_details(
				details,
				[("target_tenant_id", json!(target_tenant_id))],
			))
			.build();

		self.log_event(input).await
	}

	/// Record an attempt to reach another site's data within a tenant.
	pub async fn log_cross_site_access_attempt(
		&self,
		user_id: &str,
		tenant_id: &str,
		source_site_id: &str,
		target_site_id: &str,
		details: Option<Value>,
	) -> AuditResult<AuditEvent> {
		require_non_blank("user_id", user_id)?;
		require_non_blank("tenant_id", tenant_id)?;
		require_non_blank("source_site_id", source_site_id)?;
		require_non_blank("target_site_id", target_site_id)?;

		let input = AuditEventInput::builder(AuditAction::CrossSiteAccessAttempt)
			.user(user_id)
			.tenant(tenant_id)
			.success(false)
			.details(merge_details(
				details,
				[
					("source_site_id", json!(source_site_id)),
					("target_site_id", json!(target_site_id)),
				],
			))
			.build();

		self.log_event(input).await
	}
}

fn require_non_blank(field: &'static str, value: &str) -> AuditResult<()> {
	if value.trim().is_empty() {
		return Err(AuditError::InvalidInput(format!(
			"{field} must not be blank"
		)));
	}
	Ok(())
}

/// Fold helper-supplied fields into caller details. Non-object caller
/// details are preserved under a `context` key.
fn merge_details<const N: usize>(base: Option<Value>, extra: [(&str, Value); N]) -> Value {
	let mut map = match base {
		Some(Value::Object(map)) => map,
		Some(Value::Null) | None => Map::new(),
		Some(other) => {
			let mut map = Map::new();
			map.insert("context".to_string(), other);
			map
		}
	};
	for (key, value) in extra {
		map.insert(key.to_string(), value);
	}
	Value::Object(map)
}
