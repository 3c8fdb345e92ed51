// Copyright 2024 Irreducible Inc.

use std::arch::x86_64::*;

use super::lanes::{compress_lanes, LaneVector};
use crate::blake2s::{ChainingValue, BLOCK_LEN};

/// 128-bit SSE register viewed as four 32-bit lanes.
///
/// [`LaneVector::permute_bytes`] uses `pshufb`, so this type must only be used on CPUs with SSSE3.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub(crate) struct M128(__m128i);

pub(crate) fn is_supported() -> bool {
	is_x86_feature_detected!("ssse3")
}

/// Compresses one block with SSE registers.
///
/// # Safety
///
/// The CPU must support SSSE3, see [`is_supported`].
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn compress_ssse3(
	h: &mut ChainingValue,
	block: &[u8; BLOCK_LEN],
	t: [u32; 2],
	f: [u32; 2],
) {
	compress_lanes::<M128>(h, block, t, f)
}

impl LaneVector for M128 {
	#[inline(always)]
	fn from_lanes(lanes: [u32; 4]) -> Self {
		Self(unsafe { _mm_loadu_si128(lanes.as_ptr() as *const __m128i) })
	}

	#[inline(always)]
	fn to_lanes(self) -> [u32; 4] {
		let mut out = [0u32; 4];
		unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, self.0) };
		out
	}

	#[inline(always)]
	fn from_bytes(bytes: [u8; 16]) -> Self {
		Self(unsafe { _mm_loadu_si128(bytes.as_ptr() as *const __m128i) })
	}

	#[inline(always)]
	fn add(self, rhs: Self) -> Self {
		Self(unsafe { _mm_add_epi32(self.0, rhs.0) })
	}

	#[inline(always)]
	fn xor(self, rhs: Self) -> Self {
		Self(unsafe { _mm_xor_si128(self.0, rhs.0) })
	}

	#[inline(always)]
	fn rotate_right(self, n: u32) -> Self {
		unsafe {
			let right = _mm_srl_epi32(self.0, _mm_cvtsi32_si128(n as i32));
			let left = _mm_sll_epi32(self.0, _mm_cvtsi32_si128(32 - n as i32));
			Self(_mm_or_si128(right, left))
		}
	}

	#[inline(always)]
	fn rotate_lanes_1(self) -> Self {
		Self(unsafe { _mm_shuffle_epi32(self.0, 0b00_11_10_01) })
	}

	#[inline(always)]
	fn rotate_lanes_2(self) -> Self {
		Self(unsafe { _mm_shuffle_epi32(self.0, 0b01_00_11_10) })
	}

	#[inline(always)]
	fn rotate_lanes_3(self) -> Self {
		Self(unsafe { _mm_shuffle_epi32(self.0, 0b10_01_00_11) })
	}

	#[inline(always)]
	fn permute_bytes(self, hi: Self, table: &[u8; 16]) -> Self {
		unsafe {
			let idx = _mm_loadu_si128(table.as_ptr() as *const __m128i);
			// `pshufb` zeroes bytes whose index has the top bit set, so each source only
			// contributes the bytes that select it.
			let from_hi = _mm_cmpgt_epi8(idx, _mm_set1_epi8(15));
			let lo_bytes = _mm_shuffle_epi8(self.0, _mm_or_si128(idx, from_hi));
			let hi_mask = _mm_andnot_si128(from_hi, _mm_set1_epi8(i8::MIN));
			let hi_bytes = _mm_shuffle_epi8(hi.0, _mm_or_si128(idx, hi_mask));
			Self(_mm_or_si128(lo_bytes, hi_bytes))
		}
	}

	#[inline(always)]
	fn zip_lo_u16(self, rhs: Self) -> Self {
		Self(unsafe { _mm_unpacklo_epi16(self.0, rhs.0) })
	}

	#[inline(always)]
	fn zip_hi_u16(self, rhs: Self) -> Self {
		Self(unsafe { _mm_unpackhi_epi16(self.0, rhs.0) })
	}
}
