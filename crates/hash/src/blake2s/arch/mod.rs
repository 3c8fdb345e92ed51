// Copyright 2024 Irreducible Inc.

//! Compression function implementations.
//!
//! [`Portable`] is the scalar reference. [`Lanes`] is the four-lane vector formulation, generic
//! over a [`LaneVector`]; [`SoftU32x4`] runs it on any target, the architecture modules provide
//! SIMD registers for it.

use cfg_if::cfg_if;

mod lanes;
mod portable;
mod soft;

cfg_if! {
	if #[cfg(target_arch = "x86_64")] {
		pub(crate) mod x86_64;
	} else if #[cfg(target_arch = "aarch64")] {
		pub(crate) mod aarch64;
	}
}

pub use lanes::{LaneVector, Lanes};
pub use portable::Portable;
pub use soft::SoftU32x4;
