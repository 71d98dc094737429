// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Index selection and post-hydration filtering for audit queries.
//!
//! Exactly one secondary index is scanned per query. Selection walks the
//! filter dimensions most selective first; whatever the chosen index cannot
//! express is applied in memory after hydration.

use chronicle_core::{AuditEvent, AuditEventQuery, ALL_TENANTS};

use crate::isolation;
use crate::keys;

/// A resolved scan: one index, an inclusive score window, and a clamped
/// offset/limit page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QueryPlan {
	pub index: String,
	pub min: i64,
	pub max: i64,
	pub offset: usize,
	pub limit: usize,
}

/// Pick the index for `query`, most selective first:
///
/// 1. resource type + id → resource-instance index
/// 2. resource type → resource-type index
/// 3. single-valued action → action index
/// 4. user → user index
/// 5. otherwise the tenant index, or the global index for a global admin
///    asking for all tenants
pub(crate) fn plan_query(
	query: &AuditEventQuery,
	caller_tenant: &str,
	is_global_admin: bool,
) -> QueryPlan {
	let index = if let (Some(resource_type), Some(resource_id)) =
		(&query.resource_type, &query.resource_id)
	{
		keys::resource_index(resource_type, resource_id)
	} else if let Some(resource_type) = &query.resource_type {
		keys::resource_type_index(resource_type)
	} else if let Some(action) = query.action.as_ref().and_then(|f| f.as_single()) {
		keys::action_index(action)
	} else if let Some(user_id) = &query.user_id {
		keys::user_index(user_id)
	} else {
		let tenant = query.tenant_id.as_deref().unwrap_or(caller_tenant);
		if is_global_admin && tenant == ALL_TENANTS {
			keys::GLOBAL_INDEX.to_string()
		} else {
			keys::tenant_index(tenant)
		}
	};

	let (min, max) = query.time_range();
	QueryPlan {
		index,
		min,
		max,
		offset: query.effective_offset(),
		limit: query.effective_limit(),
	}
}

/// The in-memory filter stage, applied to each hydrated record: the tenant
/// isolation safety net plus whatever the scanned index could not express.
pub(crate) fn matches_post_filters(
	event: &AuditEvent,
	query: &AuditEventQuery,
	caller_tenant: &str,
	is_global_admin: bool,
) -> bool {
	if !is_global_admin && !isolation::tenant_visible(event, Some(caller_tenant)) {
		return false;
	}
	if let Some(action) = &query.action {
		if !action.matches(event.action) {
			return false;
		}
	}
	if let Some(severity) = &query.severity {
		if !severity.matches(event.severity) {
			return false;
		}
	}
	if let Some(success) = query.success {
		if event.success != success {
			return false;
		}
	}
	true
}
