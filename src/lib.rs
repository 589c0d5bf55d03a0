//! Hardware AES block-cipher kernel: key expansion for 128- and 256-bit
//! keys, a 4-way interleaved encryption pipeline with tail-safe batch
//! dispatch, and the branchless GF(2^128) doubling step used by
//! authenticators built on top.

#[cfg(not(target_arch = "x86_64"))]
compile_error!("aesq drives the x86-64 AES instruction set and only builds for that target");

mod batch;
mod block;
mod context;
mod error;
mod gf;
mod kernel;
mod key;

pub use batch::{encrypt_blocks, encrypt_blocks_par, encrypt_bytes};
pub use block::Block;
pub use context::CipherContext;
pub use error::{Error, Result};
pub use gf::{REDUCTION_POLY, gf_double};
pub use kernel::{encrypt1, encrypt4};
pub use key::Key;
