// Copyright 2023 Ulvetanna Inc.

//! BLAKE2s (RFC 7693): keyed and unkeyed hashing with 1 to 32 byte digests.
//!
//! The streaming interface is [`Blake2s`]; [`hash`], [`hash_keyed`] and [`hash_stream`] are
//! one-shot helpers. [`Blake2s256`] plugs the fixed 32-byte variant into the RustCrypto
//! [`digest`] traits.
//!
//! ```
//! use blake2s_hash::{hash, Blake2s};
//!
//! let one_shot = hash(b"abc");
//! let streamed = Blake2s::init().chain_update(b"a").chain_update(b"bc").finalize();
//! assert_eq!(streamed.as_bytes(), &one_shot);
//! ```

pub mod blake2s;
pub mod error;
pub mod selftest;

pub use ::digest::{self, Digest};
pub use blake2s::*;
pub use error::Error;
