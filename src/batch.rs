//! Tail-safe dispatch over buffers of any block count.

use rayon::prelude::*;

use crate::block::Block;
use crate::context::CipherContext;
use crate::error::{Error, Result};
use crate::kernel::{encrypt1, encrypt4, encrypt_chunk_unaligned};

/// Blocks per rayon work item, and the size below which forking is not worth
/// it (4 KiB of blocks). A multiple of the kernel width, so only the final
/// chunk can take the tail path.
const PARALLEL_THRESHOLD: usize = 256;

/// Encrypts every block of `blocks` in place, for any length including zero.
///
/// Full groups of four go through [`encrypt4`]; the 0-3 leftover blocks each
/// take the scalar lane. The 4-way kernel is never handed a window smaller
/// than four slots, so no access ever lands outside the caller's buffer.
pub fn encrypt_blocks(ctx: &CipherContext, blocks: &mut [Block]) {
    let mut groups = blocks.chunks_exact_mut(4);
    for group in &mut groups {
        encrypt4(ctx, group.try_into().unwrap()); // safe unwrap, chunks_exact_mut guarantees four slots
    }
    for block in groups.into_remainder() {
        encrypt1(ctx, block);
    }
}

/// [`encrypt_blocks`] fanned out over a rayon pool.
///
/// The context is shared read-only and each worker gets a disjoint window,
/// so no synchronization is needed beyond the fork-join itself. Output is
/// bit-identical to the serial path. Inputs at or below the threshold stay
/// on the calling thread.
pub fn encrypt_blocks_par(ctx: &CipherContext, blocks: &mut [Block]) {
    if blocks.len() <= PARALLEL_THRESHOLD {
        return encrypt_blocks(ctx, blocks);
    }

    blocks
        .par_chunks_mut(PARALLEL_THRESHOLD)
        .for_each(|chunk| encrypt_blocks(ctx, chunk));
}

/// Encrypts a raw byte buffer in place, 16 bytes per block.
///
/// This is the unaligned-access variant: the buffer carries no alignment
/// guarantee, so every block moves through unaligned loads and stores.
/// Returns [`Error::InvalidBufferLength`] unless `buf.len()` is a multiple
/// of 16.
pub fn encrypt_bytes(ctx: &CipherContext, buf: &mut [u8]) -> Result<()> {
    if buf.len() % 16 != 0 {
        return Err(Error::InvalidBufferLength { len: buf.len() });
    }

    for chunk in buf.chunks_exact_mut(16) {
        // Safety: `ctx` construction verified AES support.
        unsafe { encrypt_chunk_unaligned(ctx, chunk) };
    }
    Ok(())
}
