// Copyright 2024 Irreducible Inc.

use std::fmt;

use blake2s_utils::ensure;
use tracing::trace;
use zeroize::Zeroizing;

use super::{
	compress::Backend, hasher::Blake2s, state::Blake2sState, ChainingValue, BLOCK_LEN, IV,
	KEY_LEN, OUT_LEN, PERSONAL_LEN, SALT_LEN,
};
use crate::Error;

/// Fanout and maximal depth are both 1 in sequential mode.
const FANOUT: u8 = 1;
const MAX_DEPTH: u8 = 1;

const PERSONAL: [u8; PERSONAL_LEN] = [0; PERSONAL_LEN];

/// The 32-byte BLAKE2s parameter block of a sequential hash instance.
///
/// Layout, in little-endian words: word 0 packs digest length, key length, fanout and depth;
/// words 1-3 (leaf length, node offset, node depth, inner length) are zero; words 4-5 hold the
/// salt and words 6-7 the personalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParamBlock {
	digest_len: u8,
	key_len: u8,
	salt: [u8; SALT_LEN],
}

impl ParamBlock {
	/// Unkeyed, unsalted, 32-byte digest.
	pub const DEFAULT: Self = Self {
		digest_len: OUT_LEN as u8,
		key_len: 0,
		salt: [0; SALT_LEN],
	};

	pub fn new(digest_len: usize, key_len: usize, salt: &[u8; SALT_LEN]) -> Result<Self, Error> {
		ensure!((1..=OUT_LEN).contains(&digest_len), Error::InvalidDigestLength(digest_len));
		ensure!(key_len <= KEY_LEN, Error::InvalidKeyLength(key_len));
		Ok(Self {
			digest_len: digest_len as u8,
			key_len: key_len as u8,
			salt: *salt,
		})
	}

	pub fn digest_len(&self) -> usize {
		self.digest_len as usize
	}

	pub fn key_len(&self) -> usize {
		self.key_len as usize
	}

	pub fn is_salted(&self) -> bool {
		self.salt != [0; SALT_LEN]
	}

	pub fn words(&self) -> [u32; 8] {
		let [s0, s1, s2, s3, s4, s5, s6, s7] = self.salt;
		let [p0, p1, p2, p3, p4, p5, p6, p7] = PERSONAL;
		[
			u32::from_le_bytes([self.digest_len, self.key_len, FANOUT, MAX_DEPTH]),
			0,
			0,
			0,
			u32::from_le_bytes([s0, s1, s2, s3]),
			u32::from_le_bytes([s4, s5, s6, s7]),
			u32::from_le_bytes([p0, p1, p2, p3]),
			u32::from_le_bytes([p4, p5, p6, p7]),
		]
	}

	/// The initial chaining value: the IV masked with the parameter words.
	pub fn chaining_value(&self) -> ChainingValue {
		let mut h = IV;
		for (h, word) in h.iter_mut().zip(self.words()) {
			*h ^= word;
		}
		h
	}
}

/// Builder for a [`Blake2s`] hasher with a non-default digest length, key, salt or backend.
///
/// ```
/// use blake2s_hash::Params;
///
/// let digest = Params::new()
/// 	.digest_len(16)
/// 	.key(b"secret key")
/// 	.salt(b"NaClNaCl")
/// 	.to_hasher()
/// 	.unwrap()
/// 	.chain_update(b"message")
/// 	.finalize();
/// assert_eq!(digest.len(), 16);
/// ```
#[derive(Clone)]
pub struct Params {
	digest_len: usize,
	/// The key zero-padded to a full block, which is the first block hashed in keyed mode.
	key_block: Zeroizing<[u8; BLOCK_LEN]>,
	key_len: Option<usize>,
	salt: [u8; SALT_LEN],
	backend: Option<Backend>,
}

impl Params {
	pub fn new() -> Self {
		Self {
			digest_len: OUT_LEN,
			key_block: Zeroizing::new([0; BLOCK_LEN]),
			key_len: None,
			salt: [0; SALT_LEN],
			backend: None,
		}
	}

	/// Digest length in bytes, 1 to [`OUT_LEN`].
	pub fn digest_len(&mut self, digest_len: usize) -> &mut Self {
		self.digest_len = digest_len;
		self
	}

	/// Key for keyed hashing (MAC mode), 1 to [`KEY_LEN`] bytes.
	pub fn key(&mut self, key: &[u8]) -> &mut Self {
		self.key_block.fill(0);
		if key.len() <= KEY_LEN {
			self.key_block[..key.len()].copy_from_slice(key);
		}
		self.key_len = Some(key.len());
		self
	}

	pub fn salt(&mut self, salt: &[u8; SALT_LEN]) -> &mut Self {
		self.salt = *salt;
		self
	}

	/// Overrides the process-wide detected compression backend.
	pub fn backend(&mut self, backend: Backend) -> &mut Self {
		self.backend = Some(backend);
		self
	}

	/// Validates the parameters and returns a hasher ready for input.
	///
	/// In keyed mode the padded key block is buffered as the first block of input.
	pub fn to_hasher(&self) -> Result<Blake2s, Error> {
		let key_len = match self.key_len {
			Some(len) => {
				ensure!((1..=KEY_LEN).contains(&len), Error::InvalidKeyLength(len));
				len
			}
			None => 0,
		};
		let block = ParamBlock::new(self.digest_len, key_len, &self.salt)?;
		let backend = self.backend.unwrap_or_else(Backend::detect);
		trace!(
			digest_len = block.digest_len(),
			key_len = block.key_len(),
			salted = block.is_salted(),
			backend = backend.name(),
			"initialized BLAKE2s context"
		);

		let mut state = Blake2sState::new(&block, backend);
		if key_len > 0 {
			state.update(&self.key_block[..]);
		}
		Ok(Blake2s::from_state(state))
	}
}

impl Default for Params {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Params {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Params")
			.field("digest_len", &self.digest_len)
			.field("key_len", &self.key_len)
			.field("salt", &self.salt)
			.field("backend", &self.backend)
			.finish_non_exhaustive()
	}
}
