// Copyright 2024 Irreducible Inc.

//! `b2s`: prints BLAKE2s checksums of files or standard input, one `<hex>  <name>` line each.

mod args;

use std::{
	fs::File,
	io::{self, BufWriter, Read, Write},
	path::Path,
	process::ExitCode,
};

use anyhow::{Context, Result};
use args::Args;
use blake2s_hash::{selftest, Backend, Blake2sOutput, Params};
use blake2s_utils::tracing::init_tracing;
use clap::Parser;
use tracing::{debug, info};

fn hash_reader(params: &Params, reader: impl Read) -> Result<Blake2sOutput> {
	let mut hasher = params.to_hasher()?;
	let len = hasher.update_reader(reader)?;
	debug!(bytes = len, backend = %hasher.backend(), "hashed input");
	Ok(hasher.finalize())
}

fn hash_path(params: &Params, path: &Path) -> Result<Blake2sOutput> {
	if path == Path::new("-") {
		return hash_reader(params, io::stdin().lock());
	}
	let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
	hash_reader(params, file).with_context(|| format!("failed to read {}", path.display()))
}

/// Hashes every path, reporting failures on stderr. Returns whether all of them succeeded.
fn run_files(args: &Args, params: &Params, out: &mut impl Write) -> Result<bool> {
	let stdin = [Path::new("-").to_path_buf()];
	let files = if args.files.is_empty() {
		&stdin[..]
	} else {
		&args.files[..]
	};

	let mut all_ok = true;
	for path in files {
		match hash_path(params, path) {
			Ok(digest) => writeln!(out, "{digest}  {}", path.display())?,
			Err(err) => {
				eprintln!("b2s: {err:#}");
				all_ok = false;
			}
		}
	}
	out.flush()?;
	Ok(all_ok)
}

/// Runs the self-test on every available backend. Returns whether all of them passed.
fn run_self_test(out: &mut impl Write) -> Result<bool> {
	let mut all_ok = true;
	for backend in Backend::available() {
		match selftest::run_with_backend(backend) {
			Ok(()) => {
				info!(%backend, "self-test passed");
				writeln!(out, "{backend}: OK")?;
			}
			Err(err) => {
				eprintln!("b2s: {err}");
				all_ok = false;
			}
		}
	}
	if all_ok {
		writeln!(out, "Self-test ok.")?;
	}
	out.flush()?;
	Ok(all_ok)
}

fn main() -> Result<ExitCode> {
	init_tracing();
	let args = Args::parse();

	let ok = if args.self_test {
		run_self_test(&mut io::stdout().lock())?
	} else {
		let params = args.params()?;
		run_files(&args, &params, &mut BufWriter::new(io::stdout().lock()))?
	};
	Ok(if ok {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	})
}
