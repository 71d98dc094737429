// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

pub type KvResult<T> = Result<T, KvError>;

#[derive(Error, Debug)]
pub enum KvError {
	#[error("store unavailable: {0}")]
	Unavailable(String),
}
