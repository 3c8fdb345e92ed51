// Copyright 2025 Irreducible Inc.

use super::super::{compress::Compress, ChainingValue, BLOCK_LEN, IV, ROUNDS, SIGMA};

/// Scalar reference implementation of the compression function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Portable;

impl Compress for Portable {
	#[inline]
	fn compress(&self, h: &mut ChainingValue, block: &[u8; BLOCK_LEN], t: [u32; 2], f: [u32; 2]) {
		compress(h, block, t, f)
	}
}

#[inline(always)]
fn g(v: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize, x: u32, y: u32) {
	v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
	v[d] = (v[d] ^ v[a]).rotate_right(16);
	v[c] = v[c].wrapping_add(v[d]);
	v[b] = (v[b] ^ v[c]).rotate_right(12);
	v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
	v[d] = (v[d] ^ v[a]).rotate_right(8);
	v[c] = v[c].wrapping_add(v[d]);
	v[b] = (v[b] ^ v[c]).rotate_right(7);
}

pub(crate) fn message_words(block: &[u8; BLOCK_LEN]) -> [u32; 16] {
	let mut m = [0u32; 16];
	for (word, chunk) in m.iter_mut().zip(block.chunks_exact(4)) {
		*word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
	}
	m
}

fn compress(h: &mut ChainingValue, block: &[u8; BLOCK_LEN], t: [u32; 2], f: [u32; 2]) {
	let m = message_words(block);

	let mut v = [0u32; 16];
	v[..8].copy_from_slice(h);
	v[8..12].copy_from_slice(&IV[..4]);
	v[12] = IV[4] ^ t[0];
	v[13] = IV[5] ^ t[1];
	v[14] = IV[6] ^ f[0];
	v[15] = IV[7] ^ f[1];

	for s in &SIGMA[..ROUNDS] {
		let msg = |i: usize| m[s[i] as usize];

		// columns
		g(&mut v, 0, 4, 8, 12, msg(0), msg(1));
		g(&mut v, 1, 5, 9, 13, msg(2), msg(3));
		g(&mut v, 2, 6, 10, 14, msg(4), msg(5));
		g(&mut v, 3, 7, 11, 15, msg(6), msg(7));

		// diagonals
		g(&mut v, 0, 5, 10, 15, msg(8), msg(9));
		g(&mut v, 1, 6, 11, 12, msg(10), msg(11));
		g(&mut v, 2, 7, 8, 13, msg(12), msg(13));
		g(&mut v, 3, 4, 9, 14, msg(14), msg(15));
	}

	for i in 0..8 {
		h[i] ^= v[i] ^ v[i + 8];
	}
}
