// Copyright 2024 Irreducible Inc.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{
	compress::{Backend, Compress},
	params::ParamBlock,
	ChainingValue, BLOCK_LEN,
};

/// The streaming context of one sequential BLAKE2s computation.
///
/// The buffer always holds the most recent input block uncompressed (up to a full 64 bytes), so
/// that finalization can flag it as the last one. The whole context is wiped on
/// [`Blake2sState::finalize_into`] and again on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct Blake2sState {
	h: ChainingValue,
	t: [u32; 2],
	f: [u32; 2],
	buf: [u8; BLOCK_LEN],
	buf_len: usize,
	digest_len: usize,
	#[zeroize(skip)]
	backend: Backend,
}

impl Blake2sState {
	pub fn new(params: &ParamBlock, backend: Backend) -> Self {
		Self {
			h: params.chaining_value(),
			t: [0; 2],
			f: [0; 2],
			buf: [0; BLOCK_LEN],
			buf_len: 0,
			digest_len: params.digest_len(),
			backend,
		}
	}

	pub fn digest_len(&self) -> usize {
		self.digest_len
	}

	pub fn backend(&self) -> Backend {
		self.backend
	}

	/// Adds `inc` to the 64-bit byte counter held as two 32-bit words.
	#[inline]
	fn increment_counter(&mut self, inc: u32) {
		self.t[0] = self.t[0].wrapping_add(inc);
		self.t[1] = self.t[1].wrapping_add((self.t[0] < inc) as u32);
	}

	pub fn update(&mut self, mut input: &[u8]) {
		if self.buf_len + input.len() <= BLOCK_LEN {
			self.buf[self.buf_len..self.buf_len + input.len()].copy_from_slice(input);
			self.buf_len += input.len();
			return;
		}

		let (head, rest) = input.split_at(BLOCK_LEN - self.buf_len);
		self.buf[self.buf_len..].copy_from_slice(head);
		self.increment_counter(BLOCK_LEN as u32);
		self.backend.compress(&mut self.h, &self.buf, self.t, self.f);
		input = rest;

		// Stop one block early: the tail, even a full block, stays buffered.
		while let Some((block, rest)) = input.split_first_chunk::<BLOCK_LEN>() {
			if rest.is_empty() {
				break;
			}
			self.increment_counter(BLOCK_LEN as u32);
			self.backend.compress(&mut self.h, block, self.t, self.f);
			input = rest;
		}

		self.buf[..input.len()].copy_from_slice(input);
		self.buf_len = input.len();
	}

	/// Compresses the final block, writes the digest into `out` and wipes the context.
	///
	/// `out` must be exactly [`Self::digest_len`] bytes long.
	pub fn finalize_into(&mut self, out: &mut [u8]) {
		debug_assert_eq!(out.len(), self.digest_len);

		self.buf[self.buf_len..].fill(0);
		self.increment_counter(self.buf_len as u32);
		self.f[0] = u32::MAX;
		self.backend.compress(&mut self.h, &self.buf, self.t, self.f);

		for (chunk, word) in out.chunks_mut(4).zip(self.h) {
			chunk.copy_from_slice(&word.to_le_bytes()[..chunk.len()]);
		}

		self.zeroize();
	}
}
