//! Encryption pipelines: the 4-way interleaved kernel and the scalar lane.

use core::arch::x86_64::*;

use crate::block::Block;
use crate::context::CipherContext;

/// Encrypts exactly four blocks in place, in lockstep.
///
/// Each AES round instruction has multi-cycle latency; advancing four
/// independent blocks one round at a time keeps the pipeline fed instead of
/// stalling on a single block's dependency chain. The ordering is a
/// throughput choice only, the result is bit-identical to four sequential
/// [`encrypt1`] calls.
pub fn encrypt4(ctx: &CipherContext, blocks: &mut [Block; 4]) {
    // Safety: `ctx` can only come from `CipherContext::expand`, which
    // verified AES support at run time.
    unsafe { encrypt4_impl(ctx, blocks) }
}

/// Encrypts a single block in place.
///
/// Same round sequence as [`encrypt4`], one lane wide; the tail path of
/// [`encrypt_blocks`](crate::encrypt_blocks) and timing-audit callers use it
/// directly.
pub fn encrypt1(ctx: &CipherContext, block: &mut Block) {
    // Safety: as in `encrypt4`.
    unsafe { encrypt1_impl(ctx, block) }
}

/// Whitening, `rounds - 1` full rounds, and the final MixColumns-free round
/// for one state register.
#[inline]
#[target_feature(enable = "aes")]
fn run_rounds(ctx: &CipherContext, mut b: __m128i) -> __m128i {
    b = _mm_xor_si128(b, ctx.round_key(0));
    for r in 1..ctx.rounds() {
        b = _mm_aesenc_si128(b, ctx.round_key(r));
    }
    _mm_aesenclast_si128(b, ctx.round_key(ctx.rounds()))
}

#[target_feature(enable = "aes")]
fn encrypt4_impl(ctx: &CipherContext, blocks: &mut [Block; 4]) {
    debug_assert!(ctx.rounds() == 10 || ctx.rounds() == 14);

    let p = blocks.as_mut_ptr().cast::<__m128i>();
    // Safety: `Block` is 16-byte aligned and the array holds four slots.
    let (mut b0, mut b1, mut b2, mut b3) = unsafe {
        (
            _mm_load_si128(p),
            _mm_load_si128(p.add(1)),
            _mm_load_si128(p.add(2)),
            _mm_load_si128(p.add(3)),
        )
    };

    let rk0 = ctx.round_key(0);
    b0 = _mm_xor_si128(b0, rk0);
    b1 = _mm_xor_si128(b1, rk0);
    b2 = _mm_xor_si128(b2, rk0);
    b3 = _mm_xor_si128(b3, rk0);

    // Round-major: every lane takes round r before any lane takes r + 1, so
    // lane 0's aesenc result is not needed until three more have issued.
    for r in 1..ctx.rounds() {
        let rk = ctx.round_key(r);
        b0 = _mm_aesenc_si128(b0, rk);
        b1 = _mm_aesenc_si128(b1, rk);
        b2 = _mm_aesenc_si128(b2, rk);
        b3 = _mm_aesenc_si128(b3, rk);
    }

    let last = ctx.round_key(ctx.rounds());
    b0 = _mm_aesenclast_si128(b0, last);
    b1 = _mm_aesenclast_si128(b1, last);
    b2 = _mm_aesenclast_si128(b2, last);
    b3 = _mm_aesenclast_si128(b3, last);

    // Safety: same four aligned slots as the loads above.
    unsafe {
        _mm_store_si128(p, b0);
        _mm_store_si128(p.add(1), b1);
        _mm_store_si128(p.add(2), b2);
        _mm_store_si128(p.add(3), b3);
    }
}

#[target_feature(enable = "aes")]
fn encrypt1_impl(ctx: &CipherContext, block: &mut Block) {
    debug_assert!(ctx.rounds() == 10 || ctx.rounds() == 14);

    let p = (block as *mut Block).cast::<__m128i>();
    // Safety: `Block` is 16-byte aligned.
    let b = unsafe { _mm_load_si128(p) };
    let b = run_rounds(ctx, b);
    unsafe { _mm_store_si128(p, b) };
}

/// Unaligned single-block lane for caller-supplied byte buffers.
#[target_feature(enable = "aes")]
pub(crate) fn encrypt_chunk_unaligned(ctx: &CipherContext, chunk: &mut [u8]) {
    debug_assert_eq!(chunk.len(), 16);

    // Safety: the caller hands exactly 16 bytes; loadu/storeu carry no
    // alignment requirement.
    let b = unsafe { _mm_loadu_si128(chunk.as_ptr().cast()) };
    let b = run_rounds(ctx, b);
    unsafe { _mm_storeu_si128(chunk.as_mut_ptr().cast(), b) };
}
