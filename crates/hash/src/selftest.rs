// Copyright 2024 Irreducible Inc.

//! Known-answer self-tests.
//!
//! Two checks run on the chosen backend. The RFC 7693 Appendix E test absorbs unkeyed and keyed
//! digests of every combination of the lengths below into one outer BLAKE2s-256 hash, which must
//! match a fixed value. A handful of entries from the reference known-answer tables
//! (`input[i] = i`, `key[i] = i`) are then checked directly.

use tracing::{debug, instrument};

use crate::{Backend, Blake2s, Blake2sOutput, Error, Params, KEY_LEN, OUT_LEN};

const DIGEST_LENS: [usize; 4] = [16, 20, 28, 32];
const INPUT_LENS: [usize; 6] = [0, 3, 64, 65, 255, 1024];

const RFC_GRAND_HASH: &str = "6a411f08ce25adcdfb02aba641451cec53c598b24f4fc787fbdc88797f4c1dfe";

/// `(input length, unkeyed digest, keyed digest)` from the 256-entry known-answer tables.
const KNOWN_ANSWERS: [(usize, &str, &str); 5] = [
	(
		0,
		"69217a3079908094e11121d042354a7c1f55b6482ca1a51e1b250dfd1ed0eef9",
		"48a8997da407876b3d79c0d92325ad3b89cbb754d86ab71aee047ad345fd2c49",
	),
	(
		3,
		"e8f91c6ef232a041452ab0e149070cdd7dd1769e75b3a5921be37876c45c9900",
		"1d220dbe2ee134661fdf6d9e74b41704710556f2f6e5a091b227697445dbea6b",
	),
	(
		64,
		"56f34e8b96557e90c1f24b52d0c89d51086acf1b00f634cf1dde9233b8eaaa3e",
		"8975b0577fd35566d750b362b0897a26c399136df07bababbde6203ff2954ed4",
	),
	(
		65,
		"1b53ee94aaf34e4b159d48de352c7f0661d0a40edff95a0b1639b4090e974472",
		"21fe0ceb0052be7fb0f004187cacd7de67fa6eb0938d927677f2398c132317a8",
	),
	(
		255,
		"f03f5789d3336b80d002d59fdf918bdb775b00956ed5528e86aa994acb38fe2d",
		"3fb735061abc519dfe979e54c1ee5bfad0a9d858b3315bad34bde999efd724dd",
	),
];

#[derive(Debug, thiserror::Error)]
pub enum SelfTestError {
	#[error("{check} mismatch on backend {backend}: expected {expected}, got {actual}")]
	Mismatch {
		backend: Backend,
		check: String,
		expected: &'static str,
		actual: String,
	},
	#[error("self-test could not initialize a hasher: {0}")]
	Init(#[from] Error),
}

/// Deterministic test bytes: a Fibonacci-style sequence seeded by `seed`, top byte of each term.
fn sequence(len: usize, seed: u32) -> Vec<u8> {
	let mut a = 0xDEAD4BADu32.wrapping_mul(seed);
	let mut b = 1u32;
	(0..len)
		.map(|_| {
			let t = a.wrapping_add(b);
			a = b;
			b = t;
			(t >> 24) as u8
		})
		.collect()
}

fn hasher(backend: Backend, digest_len: usize, key: Option<&[u8]>) -> Result<Blake2s, Error> {
	let mut params = Params::new();
	params.backend(backend).digest_len(digest_len);
	if let Some(key) = key {
		params.key(key);
	}
	params.to_hasher()
}

/// Compares `actual` against a lowercase hex digest.
fn verify(
	backend: Backend,
	check: impl FnOnce() -> String,
	expected: &'static str,
	actual: &Blake2sOutput,
) -> Result<(), SelfTestError> {
	let actual = actual.to_hex();
	if actual != expected {
		return Err(SelfTestError::Mismatch {
			backend,
			check: check(),
			expected,
			actual,
		});
	}
	Ok(())
}

/// Runs the self-test on the detected backend.
pub fn run() -> Result<(), SelfTestError> {
	run_with_backend(Backend::detect())
}

#[instrument(level = "debug", skip_all, fields(backend = %backend))]
pub fn run_with_backend(backend: Backend) -> Result<(), SelfTestError> {
	run_rfc_grand_hash(backend)?;
	run_known_answers(backend)?;
	debug!("self-test passed");
	Ok(())
}

fn run_rfc_grand_hash(backend: Backend) -> Result<(), SelfTestError> {
	let mut outer = hasher(backend, OUT_LEN, None)?;

	for digest_len in DIGEST_LENS {
		for input_len in INPUT_LENS {
			let input = sequence(input_len, input_len as u32);
			let unkeyed = hasher(backend, digest_len, None)?
				.chain_update(&input)
				.finalize();
			outer.update(unkeyed);

			let key = sequence(digest_len, digest_len as u32);
			let keyed = hasher(backend, digest_len, Some(&key))?
				.chain_update(&input)
				.finalize();
			outer.update(keyed);
		}
	}

	verify(backend, || "RFC 7693 grand hash".to_string(), RFC_GRAND_HASH, &outer.finalize())
}

fn run_known_answers(backend: Backend) -> Result<(), SelfTestError> {
	let input: Vec<u8> = (0..=u8::MAX).collect();
	let key: Vec<u8> = (0..KEY_LEN as u8).collect();

	for (len, unkeyed, keyed) in KNOWN_ANSWERS {
		let digest = hasher(backend, OUT_LEN, None)?
			.chain_update(&input[..len])
			.finalize();
		verify(backend, || format!("unkeyed known answer of length {len}"), unkeyed, &digest)?;

		let digest = hasher(backend, OUT_LEN, Some(&key))?
			.chain_update(&input[..len])
			.finalize();
		verify(backend, || format!("keyed known answer of length {len}"), keyed, &digest)?;
	}
	Ok(())
}
