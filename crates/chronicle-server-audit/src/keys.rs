// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Key layout for the primary store and the secondary indexes.
//!
//! The primary record lives under `audit:event:{id}`. Each secondary index
//! is a sorted set holding bare event ids scored by creation-time epoch
//! millis; the primary store is the single source of truth for content.

use chronicle_core::{AuditAction, AuditEvent};

/// The append-only index of every event across all tenants.
pub(crate) const GLOBAL_INDEX: &str = "audit:index:all";

pub(crate) fn event_key(id: &str) -> String {
	format!("audit:event:{id}")
}

pub(crate) fn tenant_index(tenant_id: &str) -> String {
	format!("audit:index:tenant:{tenant_id}")
}

pub(crate) fn user_index(user_id: &str) -> String {
	format!("audit:index:user:{user_id}")
}

pub(crate) fn action_index(action: AuditAction) -> String {
	format!("audit:index:action:{action}")
}

pub(crate) fn resource_type_index(resource_type: &str) -> String {
	format!("audit:index:resource:{resource_type}")
}

pub(crate) fn resource_index(resource_type: &str, resource_id: &str) -> String {
	format!("audit:index:resource:{resource_type}:{resource_id}")
}

/// Every index that references `event`: tenant, user, action, the resource
/// indexes when applicable, and the global index.
pub(crate) fn index_keys_for(event: &AuditEvent) -> Vec<String> {
	let mut keys = vec![
		tenant_index(&event.tenant_id),
		user_index(&event.user_id),
		action_index(event.action),
	];
	if let Some(resource_type) = &event.resource_type {
		keys.push(resource_type_index(resource_type));
		if let Some(resource_id) = &event.resource_id {
			keys.push(resource_index(resource_type, resource_id));
		}
	}
	keys.push(GLOBAL_INDEX.to_string());
	keys
}
