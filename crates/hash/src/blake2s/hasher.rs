// Copyright 2024 Irreducible Inc.

use std::{
	fmt,
	io::{self, Read},
	ops::Deref,
};

use subtle::ConstantTimeEq;
use tracing::{debug, instrument};

use super::{
	compress::Backend, params::ParamBlock, state::Blake2sState, Params, OUT_LEN, SALT_LEN,
};
use crate::Error;

/// Read size used by [`hash_stream`] and [`Blake2s::update_reader`].
pub const STREAM_CHUNK_LEN: usize = 8 * 1024;

/// Incremental BLAKE2s hasher.
///
/// [`Blake2s::finalize`] consumes the hasher, so a finalized context cannot be updated again.
/// The internal state is zeroized when the hasher is finalized or dropped.
#[derive(Clone)]
pub struct Blake2s {
	state: Blake2sState,
}

impl Blake2s {
	/// Unkeyed, unsalted hasher with a 32-byte digest.
	pub fn init() -> Self {
		Self::from_state(Blake2sState::new(&ParamBlock::DEFAULT, Backend::detect()))
	}

	/// Unkeyed hasher with an optional salt and a digest of `digest_len` bytes.
	pub fn init_salted(salt: Option<&[u8; SALT_LEN]>, digest_len: usize) -> Result<Self, Error> {
		let mut params = Params::new();
		params.digest_len(digest_len);
		if let Some(salt) = salt {
			params.salt(salt);
		}
		params.to_hasher()
	}

	/// Keyed hasher (MAC mode). `key` must be 1 to 32 bytes long.
	pub fn init_keyed(
		salt: Option<&[u8; SALT_LEN]>,
		key: &[u8],
		digest_len: usize,
	) -> Result<Self, Error> {
		let mut params = Params::new();
		params.digest_len(digest_len).key(key);
		if let Some(salt) = salt {
			params.salt(salt);
		}
		params.to_hasher()
	}

	pub(crate) fn from_state(state: Blake2sState) -> Self {
		Self { state }
	}

	pub fn update(&mut self, data: impl AsRef<[u8]>) {
		self.state.update(data.as_ref());
	}

	#[must_use]
	pub fn chain_update(mut self, data: impl AsRef<[u8]>) -> Self {
		self.update(data);
		self
	}

	/// Feeds everything `reader` yields until end of stream, reading 8 KiB at a time.
	///
	/// Reads interrupted by a signal are retried. Returns the number of bytes hashed.
	pub fn update_reader(&mut self, mut reader: impl Read) -> io::Result<u64> {
		let mut chunk = [0u8; STREAM_CHUNK_LEN];
		let mut total = 0u64;
		loop {
			match reader.read(&mut chunk) {
				Ok(0) => return Ok(total),
				Ok(n) => {
					self.update(&chunk[..n]);
					total += n as u64;
				}
				Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
				Err(err) => return Err(err),
			}
		}
	}

	pub fn finalize(mut self) -> Blake2sOutput {
		let len = self.state.digest_len();
		let mut bytes = [0u8; OUT_LEN];
		self.state.finalize_into(&mut bytes[..len]);
		Blake2sOutput { bytes, len }
	}

	pub fn digest_len(&self) -> usize {
		self.state.digest_len()
	}

	pub fn backend(&self) -> Backend {
		self.state.backend()
	}
}

impl Default for Blake2s {
	fn default() -> Self {
		Self::init()
	}
}

impl fmt::Debug for Blake2s {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Blake2s")
			.field("digest_len", &self.digest_len())
			.field("backend", &self.backend().name())
			.finish_non_exhaustive()
	}
}

impl io::Write for Blake2s {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.update(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// A finalized digest of 1 to 32 bytes.
///
/// Equality is checked in constant time, so comparing a received MAC against a computed one does
/// not leak the position of the first mismatch.
#[derive(Clone, Copy)]
pub struct Blake2sOutput {
	bytes: [u8; OUT_LEN],
	len: usize,
}

impl Blake2sOutput {
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes[..self.len]
	}

	#[allow(clippy::len_without_is_empty)]
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn to_hex(&self) -> String {
		format!("{self:x}")
	}
}

impl AsRef<[u8]> for Blake2sOutput {
	fn as_ref(&self) -> &[u8] {
		self.as_bytes()
	}
}

impl Deref for Blake2sOutput {
	type Target = [u8];

	fn deref(&self) -> &[u8] {
		self.as_bytes()
	}
}

impl ConstantTimeEq for Blake2sOutput {
	fn ct_eq(&self, other: &Self) -> subtle::Choice {
		self.as_bytes().ct_eq(other.as_bytes())
	}
}

impl PartialEq for Blake2sOutput {
	fn eq(&self, other: &Self) -> bool {
		self.ct_eq(other).into()
	}
}

impl Eq for Blake2sOutput {}

impl fmt::LowerHex for Blake2sOutput {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for byte in self.as_bytes() {
			write!(f, "{byte:02x}")?;
		}
		Ok(())
	}
}

impl fmt::Display for Blake2sOutput {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::LowerHex::fmt(self, f)
	}
}

impl fmt::Debug for Blake2sOutput {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Blake2sOutput({self:x})")
	}
}

/// Unkeyed 32-byte BLAKE2s digest of `data`.
pub fn hash(data: &[u8]) -> [u8; OUT_LEN] {
	let mut out = [0u8; OUT_LEN];
	out.copy_from_slice(Blake2s::init().chain_update(data).finalize().as_bytes());
	out
}

/// Keyed BLAKE2s (MAC) of `data` with a digest of `digest_len` bytes.
pub fn hash_keyed(key: &[u8], data: &[u8], digest_len: usize) -> Result<Blake2sOutput, Error> {
	Ok(Blake2s::init_keyed(None, key, digest_len)?
		.chain_update(data)
		.finalize())
}

/// Unkeyed 32-byte digest of everything `reader` yields, read in 8 KiB chunks.
///
/// A read error aborts hashing and is returned instead of a digest.
#[instrument(skip_all, level = "debug")]
pub fn hash_stream(reader: impl Read) -> Result<[u8; OUT_LEN], Error> {
	let mut hasher = Blake2s::init();
	let total = hasher.update_reader(reader)?;
	debug!(bytes = total, "hashed stream");

	let mut out = [0u8; OUT_LEN];
	out.copy_from_slice(hasher.finalize().as_bytes());
	Ok(out)
}
