// Copyright 2024 Irreducible Inc.

use std::array;

use super::lanes::LaneVector;

/// Four 32-bit lanes in plain integers, for targets without a SIMD register type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoftU32x4(pub [u32; 4]);

impl SoftU32x4 {
	#[inline(always)]
	fn to_bytes(self) -> [u8; 16] {
		let mut out = [0u8; 16];
		for (chunk, lane) in out.chunks_exact_mut(4).zip(self.0) {
			chunk.copy_from_slice(&lane.to_le_bytes());
		}
		out
	}

	#[inline(always)]
	fn to_u16s(self) -> [u16; 8] {
		array::from_fn(|i| (self.0[i / 2] >> (16 * (i % 2))) as u16)
	}

	#[inline(always)]
	fn from_u16s(elems: [u16; 8]) -> Self {
		Self(array::from_fn(|i| elems[2 * i] as u32 | (elems[2 * i + 1] as u32) << 16))
	}

	#[inline(always)]
	fn zip_u16(self, rhs: Self, offset: usize) -> Self {
		let (a, b) = (self.to_u16s(), rhs.to_u16s());
		Self::from_u16s(array::from_fn(|i| {
			let src = if i % 2 == 0 { &a } else { &b };
			src[offset + i / 2]
		}))
	}
}

impl LaneVector for SoftU32x4 {
	#[inline(always)]
	fn from_lanes(lanes: [u32; 4]) -> Self {
		Self(lanes)
	}

	#[inline(always)]
	fn to_lanes(self) -> [u32; 4] {
		self.0
	}

	#[inline(always)]
	fn from_bytes(bytes: [u8; 16]) -> Self {
		Self(array::from_fn(|i| {
			u32::from_le_bytes([bytes[4 * i], bytes[4 * i + 1], bytes[4 * i + 2], bytes[4 * i + 3]])
		}))
	}

	#[inline(always)]
	fn add(self, rhs: Self) -> Self {
		Self(array::from_fn(|i| self.0[i].wrapping_add(rhs.0[i])))
	}

	#[inline(always)]
	fn xor(self, rhs: Self) -> Self {
		Self(array::from_fn(|i| self.0[i] ^ rhs.0[i]))
	}

	#[inline(always)]
	fn rotate_right(self, n: u32) -> Self {
		Self(self.0.map(|lane| lane.rotate_right(n)))
	}

	#[inline(always)]
	fn rotate_lanes_1(self) -> Self {
		let [x0, x1, x2, x3] = self.0;
		Self([x1, x2, x3, x0])
	}

	#[inline(always)]
	fn rotate_lanes_2(self) -> Self {
		let [x0, x1, x2, x3] = self.0;
		Self([x2, x3, x0, x1])
	}

	#[inline(always)]
	fn rotate_lanes_3(self) -> Self {
		let [x0, x1, x2, x3] = self.0;
		Self([x3, x0, x1, x2])
	}

	#[inline(always)]
	fn permute_bytes(self, hi: Self, table: &[u8; 16]) -> Self {
		let (lo, hi) = (self.to_bytes(), hi.to_bytes());
		Self::from_bytes(array::from_fn(|i| {
			let idx = (table[i] & 0x1f) as usize;
			if idx < 16 {
				lo[idx]
			} else {
				hi[idx - 16]
			}
		}))
	}

	#[inline(always)]
	fn zip_lo_u16(self, rhs: Self) -> Self {
		self.zip_u16(rhs, 0)
	}

	#[inline(always)]
	fn zip_hi_u16(self, rhs: Self) -> Self {
		self.zip_u16(rhs, 4)
	}
}
