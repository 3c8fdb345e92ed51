// Copyright 2024 Irreducible Inc.

use crate::blake2s::{KEY_LEN, OUT_LEN};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("digest length must be between 1 and {} bytes, got {0}", OUT_LEN)]
	InvalidDigestLength(usize),
	#[error("key length must be between 1 and {} bytes, got {0}", KEY_LEN)]
	InvalidKeyLength(usize),
	#[error("compression backend {0:?} is unknown or not supported on this CPU")]
	UnsupportedBackend(String),
	#[error("failed to read input: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	/// Whether the error was caused by an out-of-range digest or key length.
	pub fn is_invalid_parameter(&self) -> bool {
		matches!(self, Self::InvalidDigestLength(_) | Self::InvalidKeyLength(_))
	}
}
