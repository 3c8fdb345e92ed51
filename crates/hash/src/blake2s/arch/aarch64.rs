// Copyright 2024 Irreducible Inc.

use std::arch::aarch64::*;

use super::lanes::{compress_lanes, LaneVector};
use crate::blake2s::{ChainingValue, BLOCK_LEN};

/// 128-bit NEON register viewed as four 32-bit lanes.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub(crate) struct M128(uint32x4_t);

pub(crate) fn is_supported() -> bool {
	std::arch::is_aarch64_feature_detected!("neon")
}

/// Compresses one block with NEON registers.
///
/// # Safety
///
/// The CPU must support NEON, see [`is_supported`].
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compress_neon(
	h: &mut ChainingValue,
	block: &[u8; BLOCK_LEN],
	t: [u32; 2],
	f: [u32; 2],
) {
	compress_lanes::<M128>(h, block, t, f)
}

impl M128 {
	#[inline(always)]
	fn bytes(self) -> uint8x16_t {
		unsafe { vreinterpretq_u8_u32(self.0) }
	}

	#[inline(always)]
	fn halves(self) -> uint16x8_t {
		unsafe { vreinterpretq_u16_u32(self.0) }
	}
}

impl LaneVector for M128 {
	#[inline(always)]
	fn from_lanes(lanes: [u32; 4]) -> Self {
		Self(unsafe { vld1q_u32(lanes.as_ptr()) })
	}

	#[inline(always)]
	fn to_lanes(self) -> [u32; 4] {
		let mut out = [0u32; 4];
		unsafe { vst1q_u32(out.as_mut_ptr(), self.0) };
		out
	}

	#[inline(always)]
	fn from_bytes(bytes: [u8; 16]) -> Self {
		Self(unsafe { vreinterpretq_u32_u8(vld1q_u8(bytes.as_ptr())) })
	}

	#[inline(always)]
	fn add(self, rhs: Self) -> Self {
		Self(unsafe { vaddq_u32(self.0, rhs.0) })
	}

	#[inline(always)]
	fn xor(self, rhs: Self) -> Self {
		Self(unsafe { veorq_u32(self.0, rhs.0) })
	}

	#[inline(always)]
	fn rotate_right(self, n: u32) -> Self {
		unsafe {
			let right = vshlq_u32(self.0, vdupq_n_s32(-(n as i32)));
			let left = vshlq_u32(self.0, vdupq_n_s32(32 - n as i32));
			Self(vorrq_u32(right, left))
		}
	}

	#[inline(always)]
	fn rotate_lanes_1(self) -> Self {
		Self(unsafe { vextq_u32(self.0, self.0, 1) })
	}

	#[inline(always)]
	fn rotate_lanes_2(self) -> Self {
		Self(unsafe { vextq_u32(self.0, self.0, 2) })
	}

	#[inline(always)]
	fn rotate_lanes_3(self) -> Self {
		Self(unsafe { vextq_u32(self.0, self.0, 3) })
	}

	#[inline(always)]
	fn permute_bytes(self, hi: Self, table: &[u8; 16]) -> Self {
		unsafe {
			let idx = vld1q_u8(table.as_ptr());
			let bytes = vqtbl2q_u8(uint8x16x2_t(self.bytes(), hi.bytes()), idx);
			Self(vreinterpretq_u32_u8(bytes))
		}
	}

	#[inline(always)]
	fn zip_lo_u16(self, rhs: Self) -> Self {
		Self(unsafe { vreinterpretq_u32_u16(vzip1q_u16(self.halves(), rhs.halves())) })
	}

	#[inline(always)]
	fn zip_hi_u16(self, rhs: Self) -> Self {
		Self(unsafe { vreinterpretq_u32_u16(vzip2q_u16(self.halves(), rhs.halves())) })
	}
}
