// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

use chronicle_server_kv::KvError;

pub type AuditResult<T> = Result<T, AuditError>;

#[derive(Error, Debug)]
pub enum AuditError {
	#[error("store error: {0}")]
	Store(#[from] KvError),

	#[error("invalid input: {0}")]
	InvalidInput(String),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}
