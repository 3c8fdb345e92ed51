// Copyright 2024 Irreducible Inc.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use blake2s_hash::{Backend, Params, OUT_LEN, SALT_LEN};
use clap::{value_parser, Parser};
use zeroize::Zeroizing;

#[derive(Debug, Parser)]
#[command(name = "b2s", version, about = "Print BLAKE2s checksums")]
pub struct Args {
	/// Files to hash. With no file, or when a file is `-`, read standard input.
	pub files: Vec<PathBuf>,
	/// Digest length in bytes.
	#[arg(short, long, default_value_t = OUT_LEN as u8, value_parser = value_parser!(u8).range(1..=OUT_LEN as i64))]
	pub length: u8,
	/// Hex-encoded key of 1 to 32 bytes, for keyed hashing.
	#[arg(long)]
	pub key: Option<String>,
	/// Hex-encoded 8-byte salt.
	#[arg(long)]
	pub salt: Option<String>,
	/// Compression backend: auto, portable, soft-lanes, ssse3 or neon.
	#[arg(long, default_value = "auto")]
	pub backend: Backend,
	/// Run the RFC 7693 and known-answer self-tests on every available backend and exit.
	#[arg(long)]
	pub self_test: bool,
}

impl Args {
	/// Hasher parameters, validated once so that bad options fail before any input is read.
	pub fn params(&self) -> Result<Params> {
		let mut params = Params::new();
		params
			.digest_len(self.length as usize)
			.backend(self.backend);
		if let Some(key) = &self.key {
			let key = Zeroizing::new(hex::decode(key).context("--key is not valid hex")?);
			params.key(&key);
		}
		if let Some(salt) = &self.salt {
			params.salt(&parse_salt(salt)?);
		}
		params.to_hasher()?;
		Ok(params)
	}
}

fn parse_salt(salt: &str) -> Result<[u8; SALT_LEN]> {
	hex::decode(salt)
		.context("--salt is not valid hex")?
		.try_into()
		.map_err(|salt: Vec<u8>| anyhow!("--salt must be {SALT_LEN} bytes, got {}", salt.len()))
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;

	fn parse(args: &[&str]) -> Args {
		Args::try_parse_from(std::iter::once("b2s").chain(args.iter().copied())).unwrap()
	}

	#[test]
	fn test_defaults() {
		let args = parse(&[]);
		assert!(args.files.is_empty());
		assert_eq!(args.length, 32);
		assert_eq!(args.backend, Backend::detect());
		assert!(!args.self_test);
		assert_eq!(args.params().unwrap().to_hasher().unwrap().digest_len(), 32);
	}

	#[test]
	fn test_length_range() {
		assert_eq!(parse(&["-l", "20"]).length, 20);
		assert!(Args::try_parse_from(["b2s", "--length", "0"]).is_err());
		assert!(Args::try_parse_from(["b2s", "--length", "33"]).is_err());
	}

	#[test]
	fn test_backend_names() {
		assert_eq!(parse(&["--backend", "portable"]).backend, Backend::PORTABLE);
		assert!(Args::try_parse_from(["b2s", "--backend", "quantum"]).is_err());
	}

	#[test]
	fn test_key_and_salt() {
		let args = parse(&["--key", "000102", "--salt", "0001020304050607"]);
		assert_matches!(args.params(), Ok(_));

		assert!(parse(&["--key", "zz"]).params().is_err());
		assert!(parse(&["--key", ""]).params().is_err());
		assert!(parse(&["--salt", "0001"]).params().is_err());
		assert_eq!(parse_salt("0001020304050607").unwrap(), [0, 1, 2, 3, 4, 5, 6, 7]);
	}
}
