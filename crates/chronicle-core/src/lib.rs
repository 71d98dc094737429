// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod action;
pub mod event;
pub mod query;

pub use action::{AuditAction, MembershipAction, RoleAction};
pub use event::{
	AuditEvent, AuditEventInput, AuditEventInputBuilder, AuditSeverity, ParseSeverityError,
	ALL_TENANTS, DEFAULT_AUDIT_RETENTION_DAYS, GLOBAL_TENANT, UNKNOWN_USER,
};
pub use query::{ActionFilter, AuditEventQuery, SeverityFilter, DEFAULT_RECENT_LIMIT, MAX_QUERY_LIMIT};
