// Copyright 2024 Irreducible Inc.

//! This module implements the sequential (non-tree) mode of [BLAKE2s](https://www.blake2.net/blake2.pdf)

mod compress;
mod digest;
mod hasher;
mod params;
mod state;

pub mod arch;


pub use arch::{LaneVector, Lanes, Portable, SoftU32x4};
pub use compress::{Backend, Compress, FORCE_PORTABLE_ENV};
pub use self::digest::Blake2s256;
pub use hasher::*;
pub use params::Params;

/// Size of one message block in bytes.
pub const BLOCK_LEN: usize = 64;
/// Maximum (and default) digest length in bytes.
pub const OUT_LEN: usize = 32;
/// Maximum key length in bytes.
pub const KEY_LEN: usize = 32;
/// Salt length in bytes.
pub const SALT_LEN: usize = 8;
/// Personalization length in bytes.
pub const PERSONAL_LEN: usize = 8;

/// The running eight-word hash state carried between blocks.
pub type ChainingValue = [u32; 8];

pub(crate) const IV: ChainingValue = [
	0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Message word schedule, one permutation of `0..16` per round.
pub(crate) const SIGMA: [[u8; 16]; 10] = [
	[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
	[14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
	[11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
	[7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
	[9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
	[2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
	[12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
	[13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
	[6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
	[10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

/// Number of rounds applied by the compression function.
pub(crate) const ROUNDS: usize = 10;
