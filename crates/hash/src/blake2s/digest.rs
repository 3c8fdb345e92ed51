// Copyright 2025 Irreducible Inc.

use core::fmt;

use ::digest::{
	typenum::U32, FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update,
};

use super::hasher::Blake2s;

/// Unkeyed BLAKE2s-256 as a RustCrypto [`digest::Digest`](::digest::Digest).
#[derive(Clone, Default)]
pub struct Blake2s256 {
	inner: Blake2s,
}

impl HashMarker for Blake2s256 {}

impl OutputSizeUser for Blake2s256 {
	type OutputSize = U32;
}

impl Update for Blake2s256 {
	#[inline]
	fn update(&mut self, data: &[u8]) {
		self.inner.update(data);
	}
}

impl FixedOutput for Blake2s256 {
	fn finalize_into(self, out: &mut Output<Self>) {
		out.copy_from_slice(self.inner.finalize().as_bytes());
	}
}

impl FixedOutputReset for Blake2s256 {
	fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
		let inner = std::mem::take(&mut self.inner);
		out.copy_from_slice(inner.finalize().as_bytes());
	}
}

impl Reset for Blake2s256 {
	fn reset(&mut self) {
		self.inner = Blake2s::init();
	}
}

impl fmt::Debug for Blake2s256 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Blake2s256 { ... }")
	}
}
