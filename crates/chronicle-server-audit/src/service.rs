// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The audit trail service: denormalized writes, isolation-guarded reads,
//! planned queries, and retention pruning.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use chronicle_core::{
	AuditEvent, AuditEventInput, AuditEventQuery, AuditSeverity, DEFAULT_RECENT_LIMIT,
};
use chronicle_server_kv::KvStore;

use crate::config::{AuditConfig, WritePolicy};
use crate::error::{AuditError, AuditResult};
use crate::isolation;
use crate::keys;
use crate::planner;

/// Id carried by the degraded record returned when a best-effort write
/// could not reach the store.
pub const DEGRADED_EVENT_ID: &str = "error";

/// Durably records security-relevant events and answers filtered,
/// time-ranged queries over them.
///
/// The service holds no mutable state of its own; all operations are
/// independent asynchronous calls against the shared store. Concurrent
/// writers never contend: every event gets a fresh unique id. There is no
/// atomicity across the up-to-six keys a single write touches; a crash
/// between steps leaves an accepted eventual-consistency window.
pub struct AuditService {
	store: Arc<dyn KvStore>,
	write_policy: WritePolicy,
}

impl AuditService {
	pub fn new(store: Arc<dyn KvStore>, write_policy: WritePolicy) -> Self {
		Self {
			store,
			write_policy,
		}
	}

	pub fn from_config(store: Arc<dyn KvStore>, config: &AuditConfig) -> Self {
		Self::new(store, config.write_policy)
	}

	/// Record an event: generate an id, stamp the timestamp, resolve the
	/// severity, persist the record, and add its id to every applicable
	/// index.
	///
	/// Under [`WritePolicy::BestEffort`] a store failure yields a degraded
	/// record (id [`DEGRADED_EVENT_ID`], severity raised to `Error`, the
	/// failure folded into `details`) instead of an error; audit logging
	/// must never take down the action it is auditing.
	#[instrument(skip(self, input), fields(action = %input.action, tenant = %input.tenant_id))]
	pub async fn log_event(&self, input: AuditEventInput) -> AuditResult<AuditEvent> {
		let severity = input
			.severity
			.unwrap_or_else(|| input.action.default_severity());
		let event = AuditEvent {
			id: Uuid::new_v4().to_string(),
			timestamp: Utc::now(),
			user_id: input.user_id,
			tenant_id: input.tenant_id,
			action: input.action,
			severity,
			resource_type: input.resource_type,
			resource_id: input.resource_id,
			ip_address: input.ip_address,
			user_agent: input.user_agent,
			details: input.details,
			success: input.success,
		};

		match self.write_event(&event).await {
			Ok(()) => Ok(event),
			Err(err) => match self.write_policy {
				WritePolicy::MustSucceed => Err(err),
				WritePolicy::BestEffort => {
					warn!(error = %err, "audit write failed, returning degraded record");
					Ok(degraded_event(event, &err))
				}
			},
		}
	}

	async fn write_event(&self, event: &AuditEvent) -> AuditResult<()> {
		let payload = serde_json::to_string(event)?;
		let score = event.timestamp.timestamp_millis();

		self.store.set(&keys::event_key(&event.id), &payload).await?;
		for index in keys::index_keys_for(event) {
			self.store.zadd(&index, score, &event.id).await?;
		}
		Ok(())
	}

	/// Fetch a single event by id.
	///
	/// With a tenant context, a record owned by a different tenant reads as
	/// `None` — indistinguishable from a missing record, so existence does
	/// not leak across the boundary. A stored record that fails to
	/// deserialize also reads as `None`.
	#[instrument(skip(self))]
	pub async fn get_event_by_id(
		&self,
		id: &str,
		tenant_context: Option<&str>,
	) -> AuditResult<Option<AuditEvent>> {
		let Some(payload) = self.store.get(&keys::event_key(id)).await? else {
			return Ok(None);
		};
		let event: AuditEvent = match serde_json::from_str(&payload) {
			Ok(event) => event,
			Err(err) => {
				warn!(event_id = %id, error = %err, "corrupt audit record, treating as missing");
				return Ok(None);
			}
		};
		if !isolation::tenant_visible(&event, tenant_context) {
			return Ok(None);
		}
		Ok(Some(event))
	}

	/// Query events for a caller.
	///
	/// One secondary index is range-scanned per call (see
	/// [`planner`](crate::planner) selection order), each id is hydrated
	/// through the isolation guard, and residual filters run in memory.
	/// Results are in the index's ascending timestamp order; callers that
	/// want newest-first reverse client-side.
	///
	/// Under [`WritePolicy::BestEffort`] a failed index scan returns an
	/// empty set instead of an error.
	#[instrument(skip(self, query))]
	pub async fn query_events(
		&self,
		query: &AuditEventQuery,
		caller_tenant: &str,
		is_global_admin: bool,
	) -> AuditResult<Vec<AuditEvent>> {
		let plan = planner::plan_query(query, caller_tenant, is_global_admin);
		let ids = match self
			.store
			.zrange_by_score(&plan.index, plan.min, plan.max, Some((plan.offset, plan.limit)))
			.await
		{
			Ok(ids) => ids,
			Err(err) => match self.write_policy {
				WritePolicy::MustSucceed => return Err(err.into()),
				WritePolicy::BestEffort => {
					warn!(index = %plan.index, error = %err, "audit query scan failed, returning empty set");
					return Ok(Vec::new());
				}
			},
		};

		let tenant_context = (!is_global_admin).then_some(caller_tenant);
		let mut events = Vec::with_capacity(ids.len());
		for id in &ids {
			// Hydration misses (gone, corrupt, or isolation-hidden) drop
			// silently; the scan already bounded the page.
			match self.get_event_by_id(id, tenant_context).await {
				Ok(Some(event)) => {
					if planner::matches_post_filters(&event, query, caller_tenant, is_global_admin)
					{
						events.push(event);
					}
				}
				Ok(None) => {}
				Err(err) => {
					warn!(event_id = %id, error = %err, "hydration failed, dropping event");
				}
			}
		}
		Ok(events)
	}

	/// The most recent events for one tenant, isolation pre-satisfied.
	pub async fn get_recent_events(
		&self,
		tenant_id: &str,
		limit: Option<usize>,
		offset: Option<i64>,
	) -> AuditResult<Vec<AuditEvent>> {
		let query = AuditEventQuery {
			tenant_id: Some(tenant_id.to_string()),
			limit: Some(limit.unwrap_or(DEFAULT_RECENT_LIMIT)),
			offset,
			..Default::default()
		};
		self.query_events(&query, tenant_id, false).await
	}

	/// Remove every event older than the retention horizon.
	///
	/// Sweeps the global index unbounded (this path, unlike interactive
	/// queries, is allowed a full historical scan), then removes each event
	/// from its indexes and the primary store. Each event's removal is
	/// independent: one failure leaves that event for the next sweep and
	/// never aborts the batch. The returned count covers only events whose
	/// full removal sequence succeeded.
	#[instrument(skip(self))]
	pub async fn prune_old_events(&self, retention_days: i64) -> AuditResult<u64> {
		let cutoff = Utc::now().timestamp_millis() - retention_days * 86_400_000;
		let ids = self
			.store
			.zrange_by_score(keys::GLOBAL_INDEX, 0, cutoff, None)
			.await?;

		let mut removed = 0u64;
		for id in &ids {
			match self.remove_event(id).await {
				Ok(true) => removed += 1,
				// Primary record already gone: without it the applicable
				// index set is unknowable, so the id is left for a later
				// reconciliation sweep.
				Ok(false) => {}
				Err(err) => {
					warn!(event_id = %id, error = %err, "prune failed for event, leaving in place");
				}
			}
		}

		info!(removed, retention_days, "audit retention prune completed");
		Ok(removed)
	}

	async fn remove_event(&self, id: &str) -> AuditResult<bool> {
		let Some(payload) = self.store.get(&keys::event_key(id)).await? else {
			return Ok(false);
		};
		let event: AuditEvent = match serde_json::from_str(&payload) {
			Ok(event) => event,
			Err(err) => {
				warn!(event_id = %id, error = %err, "corrupt audit record, skipping prune");
				return Ok(false);
			}
		};

		for index in keys::index_keys_for(&event) {
			self.store.zrem(&index, &[id.to_string()]).await?;
		}
		self.store.del(&[keys::event_key(id)]).await?;
		Ok(true)
	}
}

fn degraded_event(mut event: AuditEvent, error: &AuditError) -> AuditEvent {
	event.id = DEGRADED_EVENT_ID.to_string();
	event.severity = AuditSeverity::Error;

	let mut map = match event.details {
		serde_json::Value::Object(map) => map,
		serde_json::Value::Null => serde_json::Map::new(),
		other => {
			let mut map = serde_json::Map::new();
			map.insert("context".to_string(), other);
			map
		}
	};
	map.insert(
		"error".to_string(),
		serde_json::Value::String(error.to_string()),
	);
	event.details = serde_json::Value::Object(map);
	event
}
