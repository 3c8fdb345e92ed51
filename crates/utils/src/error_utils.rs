// Copyright 2024-2025 Irreducible Inc.

//! Early-return helpers for `Result`-returning functions.
//!
//! With the `bail_panic` feature enabled, [`bail!`] panics instead of returning, which gives a
//! backtrace at the exact point where a parameter was rejected.

/// Returns early with the given error, converted with [`Into`].
#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		panic!("{}", $err);
	};
}

/// Returns early with the given error, converted with [`Into`].
#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

/// Returns early with the given error unless the condition holds.
#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}
