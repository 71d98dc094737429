// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod config;
pub mod error;
mod isolation;
mod keys;
mod loggers;
mod planner;
pub mod retention;
pub mod service;

pub use config::{AuditConfig, AuditConfigLayer, WritePolicy};
pub use error::{AuditError, AuditResult};
pub use retention::RetentionJob;
pub use service::{AuditService, DEGRADED_EVENT_ID};

pub use chronicle_core::{
	ActionFilter, AuditAction, AuditEvent, AuditEventInput, AuditEventInputBuilder,
	AuditEventQuery, AuditSeverity, MembershipAction, RoleAction, SeverityFilter, ALL_TENANTS,
	DEFAULT_AUDIT_RETENTION_DAYS, DEFAULT_RECENT_LIMIT, GLOBAL_TENANT, MAX_QUERY_LIMIT,
	UNKNOWN_USER,
};
