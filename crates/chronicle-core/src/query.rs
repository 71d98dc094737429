// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Filtered, time-ranged queries over the audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::action::AuditAction;
use crate::event::AuditSeverity;

/// Hard ceiling on results returned by a single interactive query.
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Default page size for recent-events lookups.
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// An action filter: a single action or a set of them.
///
/// Only a single-valued filter is eligible for the action index; a set is
/// applied in memory after hydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionFilter {
	One(AuditAction),
	Any(Vec<AuditAction>),
}

impl ActionFilter {
	pub fn matches(&self, action: AuditAction) -> bool {
		match self {
			ActionFilter::One(a) => *a == action,
			ActionFilter::Any(set) => set.contains(&action),
		}
	}

	/// The single action, when this filter is not a set.
	pub fn as_single(&self) -> Option<AuditAction> {
		match self {
			ActionFilter::One(a) => Some(*a),
			ActionFilter::Any(_) => None,
		}
	}
}

/// A severity filter: a single severity or a set of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeverityFilter {
	One(AuditSeverity),
	Any(Vec<AuditSeverity>),
}

impl SeverityFilter {
	pub fn matches(&self, severity: AuditSeverity) -> bool {
		match self {
			SeverityFilter::One(s) => *s == severity,
			SeverityFilter::Any(set) => set.contains(&severity),
		}
	}
}

/// Filter set for audit trail queries. All fields are optional; an empty
/// query scans the caller's tenant index over all time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditEventQuery {
	pub tenant_id: Option<String>,
	pub user_id: Option<String>,
	pub action: Option<ActionFilter>,
	pub resource_type: Option<String>,
	pub resource_id: Option<String>,
	pub severity: Option<SeverityFilter>,
	pub success: Option<bool>,
	pub start_date: Option<DateTime<Utc>>,
	pub end_date: Option<DateTime<Utc>>,
	pub limit: Option<usize>,
	pub offset: Option<i64>,
}

impl AuditEventQuery {
	/// Requested limit clamped to [`MAX_QUERY_LIMIT`]; the ceiling applies
	/// when no limit is given.
	pub fn effective_limit(&self) -> usize {
		self.limit.unwrap_or(MAX_QUERY_LIMIT).min(MAX_QUERY_LIMIT)
	}

	/// Requested offset clamped to be non-negative.
	pub fn effective_offset(&self) -> usize {
		self.offset.unwrap_or(0).max(0) as usize
	}

	/// The scan window as epoch-millisecond scores. An absent start is `0`;
	/// an absent end is the open upper bound.
	pub fn time_range(&self) -> (i64, i64) {
		let min = self.start_date.map(|d| d.timestamp_millis()).unwrap_or(0);
		let max = self
			.end_date
			.map(|d| d.timestamp_millis())
			.unwrap_or(i64::MAX);
		(min, max)
	}
}
