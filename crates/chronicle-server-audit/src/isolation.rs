// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The tenant isolation guard.

use tracing::warn;

use chronicle_core::AuditEvent;

/// Whether `event` is visible under the supplied tenant context.
///
/// A cross-tenant mismatch is logged and reported by callers as not-found,
/// never as a distinguishable error, so a scoped caller cannot probe for the
/// existence of another tenant's events. Callers with no context (global
/// admins, unscoped internal lookups) see everything.
pub(crate) fn tenant_visible(event: &AuditEvent, tenant_context: Option<&str>) -> bool {
	match tenant_context {
		Some(tenant) if tenant != event.tenant_id => {
			warn!(
				event_id = %event.id,
				event_tenant = %event.tenant_id,
				caller_tenant = %tenant,
				"tenant-scoped lookup crossed tenants, treating as not found"
			);
			false
		}
		_ => true,
	}
}
