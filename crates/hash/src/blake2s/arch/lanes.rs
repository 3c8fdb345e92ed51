// Copyright 2024 Irreducible Inc.

use std::marker::PhantomData;

use super::super::{compress::Compress, ChainingValue, BLOCK_LEN, IV, ROUNDS};

/// A 128-bit register viewed as four 32-bit lanes.
///
/// Byte `i` of the register is byte `i % 4` (little-endian) of lane `i / 4`, independent of the
/// native byte order of the target.
pub trait LaneVector: Copy {
	fn from_lanes(lanes: [u32; 4]) -> Self;
	fn to_lanes(self) -> [u32; 4];
	fn from_bytes(bytes: [u8; 16]) -> Self;

	/// Lane-wise wrapping addition.
	fn add(self, rhs: Self) -> Self;
	fn xor(self, rhs: Self) -> Self;
	/// Lane-wise rotation to the right by `n` bits, `0 < n < 32`.
	fn rotate_right(self, n: u32) -> Self;

	/// Lane `i` of the result is lane `(i + 1) % 4` of `self`.
	fn rotate_lanes_1(self) -> Self;
	/// Lane `i` of the result is lane `(i + 2) % 4` of `self`.
	fn rotate_lanes_2(self) -> Self;
	/// Lane `i` of the result is lane `(i + 3) % 4` of `self`.
	fn rotate_lanes_3(self) -> Self;

	/// Byte `i` of the result is byte `table[i]` of the 32-byte concatenation `self || hi`.
	///
	/// Every entry of `table` is below 32.
	fn permute_bytes(self, hi: Self, table: &[u8; 16]) -> Self;

	/// Interleaves the low four 16-bit elements: `a0 b0 a1 b1 a2 b2 a3 b3`.
	fn zip_lo_u16(self, rhs: Self) -> Self;
	/// Interleaves the high four 16-bit elements: `a4 b4 a5 b5 a6 b6 a7 b7`.
	fn zip_hi_u16(self, rhs: Self) -> Self;
}

/// Message selection tables for the first operand of every G application.
///
/// Entry `2j` of round `r` is `SIGMA[r][2j]` and entry `2j + 1` is `SIGMA[r][2j] + 16`. Permuting
/// the byte-0 and byte-1 planes of the message with this table yields, as 16-bit elements, the
/// low halves of the words `SIGMA[r][0], SIGMA[r][2], .., SIGMA[r][14]`; the same table over the
/// byte-2 and byte-3 planes yields the high halves. A 16-bit zip of the two then rebuilds the
/// words, columns in the low zip and diagonals in the high zip.
pub(crate) const SIGMA_EVEN: [[u8; 16]; ROUNDS] = [
	[0, 16, 2, 18, 4, 20, 6, 22, 8, 24, 10, 26, 12, 28, 14, 30],
	[14, 30, 4, 20, 9, 25, 13, 29, 1, 17, 0, 16, 11, 27, 5, 21],
	[11, 27, 12, 28, 5, 21, 15, 31, 10, 26, 3, 19, 7, 23, 9, 25],
	[7, 23, 3, 19, 13, 29, 11, 27, 2, 18, 5, 21, 4, 20, 15, 31],
	[9, 25, 5, 21, 2, 18, 10, 26, 14, 30, 11, 27, 6, 22, 3, 19],
	[2, 18, 6, 22, 0, 16, 8, 24, 4, 20, 7, 23, 15, 31, 1, 17],
	[12, 28, 1, 17, 14, 30, 4, 20, 0, 16, 6, 22, 9, 25, 8, 24],
	[13, 29, 7, 23, 12, 28, 3, 19, 5, 21, 15, 31, 8, 24, 2, 18],
	[6, 22, 14, 30, 11, 27, 0, 16, 12, 28, 13, 29, 1, 17, 10, 26],
	[10, 26, 8, 24, 7, 23, 1, 17, 15, 31, 9, 25, 3, 19, 13, 29],
];

/// Same as [`SIGMA_EVEN`] for the second operand, built from `SIGMA[r][2j + 1]`.
pub(crate) const SIGMA_ODD: [[u8; 16]; ROUNDS] = [
	[1, 17, 3, 19, 5, 21, 7, 23, 9, 25, 11, 27, 13, 29, 15, 31],
	[10, 26, 8, 24, 15, 31, 6, 22, 12, 28, 2, 18, 7, 23, 3, 19],
	[8, 24, 0, 16, 2, 18, 13, 29, 14, 30, 6, 22, 1, 17, 4, 20],
	[9, 25, 1, 17, 12, 28, 14, 30, 6, 22, 10, 26, 0, 16, 8, 24],
	[0, 16, 7, 23, 4, 20, 15, 31, 1, 17, 12, 28, 8, 24, 13, 29],
	[12, 28, 10, 26, 11, 27, 3, 19, 13, 29, 5, 21, 14, 30, 9, 25],
	[5, 21, 15, 31, 13, 29, 10, 26, 7, 23, 3, 19, 2, 18, 11, 27],
	[11, 27, 14, 30, 1, 17, 9, 25, 0, 16, 4, 20, 6, 22, 10, 26],
	[15, 31, 9, 25, 3, 19, 8, 24, 2, 18, 7, 23, 4, 20, 5, 21],
	[2, 18, 4, 20, 6, 22, 5, 21, 11, 27, 14, 30, 12, 28, 0, 16],
];

/// The compression function over four-lane registers.
///
/// The sixteen state words live in four registers, one row each:
///
/// ```text
///   a: v0  v1  v2  v3
///   b: v4  v5  v6  v7
///   c: v8  v9  v10 v11
///   d: v12 v13 v14 v15
/// ```
///
/// so one G over the registers mixes the four columns at once. Rotating `b`, `c` and `d` left by
/// one, two and three lanes lines the diagonals up as columns for the second half of the round.
#[derive(Debug, Clone, Copy)]
pub struct Lanes<V>(PhantomData<V>);

impl<V> Lanes<V> {
	pub const fn new() -> Self {
		Self(PhantomData)
	}
}

impl<V> Default for Lanes<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V: LaneVector> Compress for Lanes<V> {
	#[inline]
	fn compress(&self, h: &mut ChainingValue, block: &[u8; BLOCK_LEN], t: [u32; 2], f: [u32; 2]) {
		compress_lanes::<V>(h, block, t, f)
	}
}

/// Splits the block into four byte planes: byte `w` of plane `k` is byte `k` of message word `w`.
#[inline(always)]
fn byte_planes<V: LaneVector>(block: &[u8; BLOCK_LEN]) -> [V; 4] {
	let mut planes = [[0u8; 16]; 4];
	for (word, chunk) in block.chunks_exact(4).enumerate() {
		for (plane, &byte) in planes.iter_mut().zip(chunk) {
			plane[word] = byte;
		}
	}
	planes.map(V::from_bytes)
}

#[inline(always)]
fn g<V: LaneVector>(a: &mut V, b: &mut V, c: &mut V, d: &mut V, x: V, y: V) {
	*a = a.add(*b).add(x);
	*d = d.xor(*a).rotate_right(16);
	*c = c.add(*d);
	*b = b.xor(*c).rotate_right(12);
	*a = a.add(*b).add(y);
	*d = d.xor(*a).rotate_right(8);
	*c = c.add(*d);
	*b = b.xor(*c).rotate_right(7);
}

#[inline(always)]
pub(crate) fn compress_lanes<V: LaneVector>(
	h: &mut ChainingValue,
	block: &[u8; BLOCK_LEN],
	t: [u32; 2],
	f: [u32; 2],
) {
	let [p0, p1, p2, p3] = byte_planes::<V>(block);

	let h_lo = V::from_lanes([h[0], h[1], h[2], h[3]]);
	let h_hi = V::from_lanes([h[4], h[5], h[6], h[7]]);
	let mut a = h_lo;
	let mut b = h_hi;
	let mut c = V::from_lanes([IV[0], IV[1], IV[2], IV[3]]);
	let mut d = V::from_lanes([IV[4] ^ t[0], IV[5] ^ t[1], IV[6] ^ f[0], IV[7] ^ f[1]]);

	for r in 0..ROUNDS {
		let even_lo = p0.permute_bytes(p1, &SIGMA_EVEN[r]);
		let even_hi = p2.permute_bytes(p3, &SIGMA_EVEN[r]);
		let odd_lo = p0.permute_bytes(p1, &SIGMA_ODD[r]);
		let odd_hi = p2.permute_bytes(p3, &SIGMA_ODD[r]);

		g(
			&mut a,
			&mut b,
			&mut c,
			&mut d,
			even_lo.zip_lo_u16(even_hi),
			odd_lo.zip_lo_u16(odd_hi),
		);

		b = b.rotate_lanes_1();
		c = c.rotate_lanes_2();
		d = d.rotate_lanes_3();
		g(
			&mut a,
			&mut b,
			&mut c,
			&mut d,
			even_lo.zip_hi_u16(even_hi),
			odd_lo.zip_hi_u16(odd_hi),
		);
		b = b.rotate_lanes_3();
		c = c.rotate_lanes_2();
		d = d.rotate_lanes_1();
	}

	let lo = h_lo.xor(a).xor(c).to_lanes();
	let hi = h_hi.xor(b).xor(d).to_lanes();
	h[..4].copy_from_slice(&lo);
	h[4..].copy_from_slice(&hi);
}

#[cfg(test)]
mod tests {
	use rand::{rngs::StdRng, Rng, SeedableRng};

	use super::*;
	use crate::blake2s::{arch::Portable, SoftU32x4, SIGMA};

	#[test]
	fn test_tables_follow_sigma() {
		for r in 0..ROUNDS {
			for j in 0..8 {
				assert_eq!(SIGMA_EVEN[r][2 * j], SIGMA[r][2 * j]);
				assert_eq!(SIGMA_EVEN[r][2 * j + 1], SIGMA[r][2 * j] + 16);
				assert_eq!(SIGMA_ODD[r][2 * j], SIGMA[r][2 * j + 1]);
				assert_eq!(SIGMA_ODD[r][2 * j + 1], SIGMA[r][2 * j + 1] + 16);
			}
		}
	}

	#[test]
	fn test_fused_tables_rebuild_message_words() {
		let block: [u8; BLOCK_LEN] = std::array::from_fn(|i| (i as u8).wrapping_mul(29) ^ 0x5a);
		let m = super::super::portable::message_words(&block);
		let [p0, p1, p2, p3] = byte_planes::<SoftU32x4>(&block);

		for r in 0..ROUNDS {
			let even_lo = p0.permute_bytes(p1, &SIGMA_EVEN[r]);
			let even_hi = p2.permute_bytes(p3, &SIGMA_EVEN[r]);
			let odd_lo = p0.permute_bytes(p1, &SIGMA_ODD[r]);
			let odd_hi = p2.permute_bytes(p3, &SIGMA_ODD[r]);

			let s = |i: usize| m[SIGMA[r][i] as usize];
			assert_eq!(even_lo.zip_lo_u16(even_hi).to_lanes(), [s(0), s(2), s(4), s(6)]);
			assert_eq!(odd_lo.zip_lo_u16(odd_hi).to_lanes(), [s(1), s(3), s(5), s(7)]);
			assert_eq!(even_lo.zip_hi_u16(even_hi).to_lanes(), [s(8), s(10), s(12), s(14)]);
			assert_eq!(odd_lo.zip_hi_u16(odd_hi).to_lanes(), [s(9), s(11), s(13), s(15)]);
		}
	}

	#[test]
	fn test_matches_portable_on_random_blocks() {
		let mut rng = StdRng::seed_from_u64(0x626c616b653273);
		for _ in 0..256 {
			let h: ChainingValue = rng.gen();
			let block: [u8; BLOCK_LEN] = std::array::from_fn(|_| rng.gen());
			let t: [u32; 2] = rng.gen();
			let f = if rng.gen() { [u32::MAX, 0] } else { [0, 0] };

			let mut expected = h;
			Portable.compress(&mut expected, &block, t, f);
			let mut actual = h;
			Lanes::<SoftU32x4>::new().compress(&mut actual, &block, t, f);
			assert_eq!(actual, expected);
		}
	}
}
