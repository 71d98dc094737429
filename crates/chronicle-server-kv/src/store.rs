// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::KvResult;

/// Interface to the remote key-value store.
///
/// Operations are independent asynchronous calls with no cross-key
/// atomicity; callers that touch several keys per logical operation accept
/// eventual-consistency windows between them.
#[async_trait]
pub trait KvStore: Send + Sync {
	/// Fetch the value at `key`, or `None` if absent or expired.
	async fn get(&self, key: &str) -> KvResult<Option<String>>;

	/// Set the value at `key`, replacing any previous value.
	async fn set(&self, key: &str, value: &str) -> KvResult<()>;

	/// Delete the given keys. Missing keys are not an error.
	async fn del(&self, keys: &[String]) -> KvResult<()>;

	/// Add `member` to the sorted set at `key` with the given score,
	/// replacing the member's score if it is already present.
	async fn zadd(&self, key: &str, score: i64, member: &str) -> KvResult<()>;

	/// Members of the sorted set at `key` with scores in `[min, max]`,
	/// ascending by score. `limit` is an `(offset, count)` page; `None`
	/// returns the entire range.
	async fn zrange_by_score(
		&self,
		key: &str,
		min: i64,
		max: i64,
		limit: Option<(usize, usize)>,
	) -> KvResult<Vec<String>>;

	/// Remove the given members from the sorted set at `key`. Missing
	/// members are not an error.
	async fn zrem(&self, key: &str, members: &[String]) -> KvResult<()>;

	/// Expire `key` after `seconds`. A no-op if the key does not exist.
	async fn expire(&self, key: &str, seconds: u64) -> KvResult<()>;
}
