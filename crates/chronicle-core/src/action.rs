// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The closed set of auditable actions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::AuditSeverity;

/// Actions that can be recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
	// Access control decisions
	/// Access to a resource was granted.
	AccessGranted,
	/// Access to a resource was denied.
	AccessDenied,

	// Role lifecycle
	/// A role was created.
	RoleCreated,
	/// A role definition was updated.
	RoleUpdated,
	/// A role was deleted.
	RoleDeleted,
	/// A role was assigned to a user.
	RoleAssigned,
	/// A role was removed from a user.
	RoleRemoved,

	// Tenant membership
	/// A user was added to a tenant.
	UserAddedToTenant,
	/// A user was removed from a tenant.
	UserRemovedFromTenant,

	// Tenant lifecycle
	/// A tenant was created.
	TenantCreated,
	/// A tenant was updated.
	TenantUpdated,
	/// A tenant was deleted.
	TenantDeleted,

	// Boundary violations
	/// A caller attempted to reach another tenant's data.
	CrossTenantAccessAttempt,
	/// A caller attempted to reach another site's data.
	CrossSiteAccessAttempt,

	// Authentication
	Login,
	Logout,
	PasswordChanged,

	// User lifecycle
	UserCreated,
	UserUpdated,
	UserDeleted,

	// Administration
	SettingsChanged,
	ConfigUpdated,
}

impl fmt::Display for AuditAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			AuditAction::AccessGranted => "access_granted",
			AuditAction::AccessDenied => "access_denied",
			AuditAction::RoleCreated => "role_created",
			AuditAction::RoleUpdated => "role_updated",
			AuditAction::RoleDeleted => "role_deleted",
			AuditAction::RoleAssigned => "role_assigned",
			AuditAction::RoleRemoved => "role_removed",
			AuditAction::UserAddedToTenant => "user_added_to_tenant",
			AuditAction::UserRemovedFromTenant => "user_removed_from_tenant",
			AuditAction::TenantCreated => "tenant_created",
			AuditAction::TenantUpdated => "tenant_updated",
			AuditAction::TenantDeleted => "tenant_deleted",
			AuditAction::CrossTenantAccessAttempt => "cross_tenant_access_attempt",
			AuditAction::CrossSiteAccessAttempt => "cross_site_access_attempt",
			AuditAction::Login => "login",
			AuditAction::Logout => "logout",
			AuditAction::PasswordChanged => "password_changed",
			AuditAction::UserCreated => "user_created",
			AuditAction::UserUpdated => "user_updated",
			AuditAction::UserDeleted => "user_deleted",
			AuditAction::SettingsChanged => "settings_changed",
			AuditAction::ConfigUpdated => "config_updated",
		};
		write!(f, "{s}")
	}
}

impl AuditAction {
	/// Returns the default severity for this action, applied when the caller
	/// does not supply one.
	pub fn default_severity(&self) -> AuditSeverity {
		match self {
			// Info: normal successful operations
			AuditAction::AccessGranted
			| AuditAction::RoleCreated
			| AuditAction::RoleUpdated
			| AuditAction::RoleAssigned
			| AuditAction::UserAddedToTenant
			| AuditAction::TenantCreated
			| AuditAction::TenantUpdated
			| AuditAction::Login
			| AuditAction::Logout
			| AuditAction::PasswordChanged
			| AuditAction::UserCreated
			| AuditAction::UserUpdated
			| AuditAction::SettingsChanged
			| AuditAction::ConfigUpdated => AuditSeverity::Info,

			// Warning: security-relevant denials and revocations
			AuditAction::AccessDenied
			| AuditAction::RoleRemoved
			| AuditAction::UserRemovedFromTenant => AuditSeverity::Warning,

			// Error: destructive actions and boundary violations
			AuditAction::RoleDeleted
			| AuditAction::UserDeleted
			| AuditAction::CrossTenantAccessAttempt
			| AuditAction::CrossSiteAccessAttempt => AuditSeverity::Error,

			// Critical: tenant destruction
			AuditAction::TenantDeleted => AuditSeverity::Critical,
		}
	}
}

/// Role lifecycle operations accepted by the role logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleAction {
	Created,
	Updated,
	Deleted,
}

impl RoleAction {
	pub fn as_audit_action(&self) -> AuditAction {
		match self {
			RoleAction::Created => AuditAction::RoleCreated,
			RoleAction::Updated => AuditAction::RoleUpdated,
			RoleAction::Deleted => AuditAction::RoleDeleted,
		}
	}
}

/// Tenant membership operations accepted by the membership logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipAction {
	Added,
	Removed,
}

impl MembershipAction {
	pub fn as_audit_action(&self) -> AuditAction {
		match self {
			MembershipAction::Added => AuditAction::UserAddedToTenant,
			MembershipAction::Removed => AuditAction::UserRemovedFromTenant,
		}
	}
}
