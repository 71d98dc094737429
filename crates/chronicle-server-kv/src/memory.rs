// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory [`KvStore`] used by tests and local development.

use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::KvResult;
use crate::store::KvStore;

#[derive(Default)]
struct Shared {
	strings: HashMap<String, String>,
	zsets: HashMap<String, BTreeSet<(i64, String)>>,
	expiries: HashMap<String, Instant>,
}

impl Shared {
	fn is_expired(&self, key: &str) -> bool {
		self.expiries
			.get(key)
			.is_some_and(|deadline| *deadline <= Instant::now())
	}
}

/// An in-memory store with the same observable semantics as the remote one.
/// Expirations are honored lazily on read.
#[derive(Default)]
pub struct MemoryKvStore {
	inner: RwLock<Shared>,
}

impl MemoryKvStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl KvStore for MemoryKvStore {
	async fn get(&self, key: &str) -> KvResult<Option<String>> {
		let inner = self.inner.read().await;
		if inner.is_expired(key) {
			return Ok(None);
		}
		Ok(inner.strings.get(key).cloned())
	}

	async fn set(&self, key: &str, value: &str) -> KvResult<()> {
		let mut inner = self.inner.write().await;
		inner.expiries.remove(key);
		inner.strings.insert(key.to_string(), value.to_string());
		Ok(())
	}

	async fn del(&self, keys: &[String]) -> KvResult<()> {
		let mut inner = self.inner.write().await;
		for key in keys {
			inner.strings.remove(key);
			inner.zsets.remove(key);
			inner.expiries.remove(key);
		}
		Ok(())
	}

	async fn zadd(&self, key: &str, score: i64, member: &str) -> KvResult<()> {
		let mut inner = self.inner.write().await;
		let set = inner.zsets.entry(key.to_string()).or_default();
		let existing = set
			.iter()
			.find(|(_, m)| m == member)
			.cloned();
		if let Some(entry) = existing {
			set.remove(&entry);
		}
		set.insert((score, member.to_string()));
		Ok(())
	}

	async fn zrange_by_score(
		&self,
		key: &str,
		min: i64,
		max: i64,
		limit: Option<(usize, usize)>,
	) -> KvResult<Vec<String>> {
		let inner = self.inner.read().await;
		if inner.is_expired(key) {
			return Ok(Vec::new());
		}
		let Some(set) = inner.zsets.get(key) else {
			return Ok(Vec::new());
		};

		let in_range = set
			.iter()
			.filter(|(score, _)| *score >= min && *score <= max)
			.map(|(_, member)| member.clone());

		let members = match limit {
			Some((offset, count)) => in_range.skip(offset).take(count).collect(),
			None => in_range.collect(),
		};
		Ok(members)
	}

	async fn zrem(&self, key: &str, members: &[String]) -> KvResult<()> {
		let mut inner = self.inner.write().await;
		if let Some(set) = inner.zsets.get_mut(key) {
			set.retain(|(_, m)| !members.contains(m));
		}
		Ok(())
	}

	async fn expire(&self, key: &str, seconds: u64) -> KvResult<()> {
		let mut inner = self.inner.write().await;
		if inner.strings.contains_key(key) || inner.zsets.contains_key(key) {
			inner
				.expiries
				.insert(key.to_string(), Instant::now() + Duration::from_secs(seconds));
		}
		Ok(())
	}
}
