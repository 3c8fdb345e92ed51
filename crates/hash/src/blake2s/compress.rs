// Copyright 2024 Irreducible Inc.

use std::{fmt, str::FromStr};

use blake2s_utils::env::boolean_env_flag_set;
use lazy_static::lazy_static;
use tracing::debug;

use super::{
	arch::{Lanes, Portable, SoftU32x4},
	ChainingValue, BLOCK_LEN,
};
use crate::Error;

/// Environment flag that pins [`Backend::detect`] to the scalar backend.
pub const FORCE_PORTABLE_ENV: &str = "BLAKE2S_FORCE_PORTABLE";

/// The BLAKE2s compression function F.
///
/// Mixes one 64-byte block into the chaining value `h`. `t` is the byte counter including this
/// block, `f` the finalization flags (`f[0]` is all ones for the last block, `f[1]` is always
/// zero in sequential mode). Every implementation produces bit-identical results.
pub trait Compress {
	fn compress(&self, h: &mut ChainingValue, block: &[u8; BLOCK_LEN], t: [u32; 2], f: [u32; 2]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
	Portable,
	SoftLanes,
	#[cfg(target_arch = "x86_64")]
	Ssse3,
	#[cfg(target_arch = "aarch64")]
	Neon,
}

/// A compression backend that is known to run on the current CPU.
///
/// Hardware backends can only be obtained through [`Backend::detect`], [`Backend::available`]
/// or [`FromStr`], all of which check CPU support first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backend(Kind);

lazy_static! {
	static ref DETECTED: Backend = {
		let backend = Backend::select(boolean_env_flag_set(FORCE_PORTABLE_ENV));
		debug!(backend = backend.name(), "selected BLAKE2s compression backend");
		backend
	};
}

impl Backend {
	/// The scalar reference implementation.
	pub const PORTABLE: Self = Self(Kind::Portable);
	/// The lane-vector formulation over plain integers.
	pub const SOFT_LANES: Self = Self(Kind::SoftLanes);

	/// The fastest backend supported by this CPU, detected once per process.
	///
	/// Setting `BLAKE2S_FORCE_PORTABLE=1` selects [`Backend::PORTABLE`] instead.
	pub fn detect() -> Self {
		*DETECTED
	}

	fn select(force_portable: bool) -> Self {
		if force_portable {
			return Self::PORTABLE;
		}
		Self::hardware().unwrap_or(Self::PORTABLE)
	}

	fn hardware() -> Option<Self> {
		#[cfg(target_arch = "x86_64")]
		if super::arch::x86_64::is_supported() {
			return Some(Self(Kind::Ssse3));
		}
		#[cfg(target_arch = "aarch64")]
		if super::arch::aarch64::is_supported() {
			return Some(Self(Kind::Neon));
		}
		None
	}

	/// Every backend usable on this CPU, the portable one first.
	pub fn available() -> Vec<Self> {
		let mut backends = vec![Self::PORTABLE, Self::SOFT_LANES];
		backends.extend(Self::hardware());
		backends
	}

	pub fn name(&self) -> &'static str {
		match self.0 {
			Kind::Portable => "portable",
			Kind::SoftLanes => "soft-lanes",
			#[cfg(target_arch = "x86_64")]
			Kind::Ssse3 => "ssse3",
			#[cfg(target_arch = "aarch64")]
			Kind::Neon => "neon",
		}
	}

	pub fn is_hardware(&self) -> bool {
		!matches!(self.0, Kind::Portable | Kind::SoftLanes)
	}
}

impl Compress for Backend {
	#[inline]
	fn compress(&self, h: &mut ChainingValue, block: &[u8; BLOCK_LEN], t: [u32; 2], f: [u32; 2]) {
		match self.0 {
			Kind::Portable => Portable.compress(h, block, t, f),
			Kind::SoftLanes => Lanes::<SoftU32x4>::new().compress(h, block, t, f),
			// SAFETY: `Kind::Ssse3` is only constructed after runtime detection succeeded.
			#[cfg(target_arch = "x86_64")]
			Kind::Ssse3 => unsafe { super::arch::x86_64::compress_ssse3(h, block, t, f) },
			// SAFETY: `Kind::Neon` is only constructed after runtime detection succeeded.
			#[cfg(target_arch = "aarch64")]
			Kind::Neon => unsafe { super::arch::aarch64::compress_neon(h, block, t, f) },
		}
	}
}

impl fmt::Display for Backend {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Backend {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s == "auto" {
			return Ok(Self::detect());
		}
		Self::available()
			.into_iter()
			.find(|backend| backend.name() == s)
			.ok_or_else(|| Error::UnsupportedBackend(s.to_string()))
	}
}
