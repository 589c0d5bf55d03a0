//! Round-key schedule, expanded once per key and immutable afterward.

use core::arch::x86_64::*;

use crate::error::{Error, Result};
use crate::key::Key;

pub(crate) const ROUNDS_128: usize = 10;
pub(crate) const ROUNDS_256: usize = 14;
const MAX_ROUND_KEYS: usize = ROUNDS_256 + 1;

/// Expanded round keys plus the round count they were derived for.
///
/// Built once by [`expand`](CipherContext::expand) and never mutated; the
/// same context may be reused for any number of encryption calls and shared
/// read-only across threads. Storage is sized for the larger schedule, and
/// [`round_keys`](CipherContext::round_keys) exposes only the populated
/// `rounds + 1` prefix (11 entries for a 128-bit key, 15 for a 256-bit key).
///
/// Key material is not zeroized on drop; callers holding long-lived contexts
/// are responsible for disposal.
#[derive(Clone, Copy)]
pub struct CipherContext {
    round_keys: [__m128i; MAX_ROUND_KEYS],
    rounds: usize,
}

impl CipherContext {
    /// Expands `key` into a full round-key schedule.
    ///
    /// A 16-byte key yields a 10-round schedule, a 32-byte key a 14-round
    /// one; [`Key`] admits no other length. Returns
    /// [`Error::UnsupportedCpu`] when the CPU lacks the AES instruction set.
    /// Every kernel entry point relies on that check having passed, so a
    /// context is proof that the instructions are available.
    pub fn expand(key: &Key) -> Result<Self> {
        if !is_x86_feature_detected!("aes") {
            return Err(Error::UnsupportedCpu);
        }

        let bytes = key.as_bytes();
        // Safety: AES support was verified above.
        let ctx = unsafe {
            match bytes.len() {
                16 => expand_128(bytes.try_into().unwrap()), // Key guarantees 16 or 32 bytes
                _ => expand_256(bytes.try_into().unwrap()),
            }
        };
        Ok(ctx)
    }

    /// Number of encryption rounds this schedule drives (10 or 14).
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// The populated round keys, `rounds + 1` entries.
    pub fn round_keys(&self) -> &[__m128i] {
        &self.round_keys[..=self.rounds]
    }

    #[inline(always)]
    pub(crate) fn round_key(&self, r: usize) -> __m128i {
        self.round_keys[r]
    }
}

/// Cascading left-shift-and-XOR over the running key word. Each step shifts
/// by 4 bytes and folds back in, replicating the transformed high word's
/// contribution across all four lanes.
#[inline]
#[target_feature(enable = "aes")]
fn fold(mut w: __m128i) -> __m128i {
    w = _mm_xor_si128(w, _mm_slli_si128::<4>(w));
    w = _mm_xor_si128(w, _mm_slli_si128::<4>(w));
    w = _mm_xor_si128(w, _mm_slli_si128::<4>(w));
    w
}

/// Round-constant assist: RotWord + SubWord of `generator`'s high word under
/// `RCON`, broadcast from the high lane, XORed into the folded running word.
#[inline]
#[target_feature(enable = "aes")]
fn assist_rcon<const RCON: i32>(word: __m128i, generator: __m128i) -> __m128i {
    let t = _mm_shuffle_epi32::<0xFF>(_mm_aeskeygenassist_si128::<RCON>(generator));
    _mm_xor_si128(fold(word), t)
}

/// Round-constant-free assist for the odd 256-bit slots: SubWord only, no
/// rotation, which is lane 2 of the keygen result.
#[inline]
#[target_feature(enable = "aes")]
fn assist_sub(word: __m128i, generator: __m128i) -> __m128i {
    let t = _mm_shuffle_epi32::<0xAA>(_mm_aeskeygenassist_si128::<0x00>(generator));
    _mm_xor_si128(fold(word), t)
}

#[target_feature(enable = "aes")]
fn expand_128(key: &[u8; 16]) -> CipherContext {
    let mut rk = [_mm_setzero_si128(); MAX_ROUND_KEYS];
    // Safety: one unaligned 16-byte load from a 16-byte array.
    rk[0] = unsafe { _mm_loadu_si128(key.as_ptr().cast()) };

    macro_rules! round {
        ($i:expr, $rcon:literal) => {
            rk[$i] = assist_rcon::<$rcon>(rk[$i - 1], rk[$i - 1]);
        };
    }

    round!(1, 0x01);
    round!(2, 0x02);
    round!(3, 0x04);
    round!(4, 0x08);
    round!(5, 0x10);
    round!(6, 0x20);
    round!(7, 0x40);
    round!(8, 0x80);
    round!(9, 0x1B);
    round!(10, 0x36);

    CipherContext {
        round_keys: rk,
        rounds: ROUNDS_128,
    }
}

/// Two interleaved generations: even slots take the round-constant assist,
/// odd slots the substitution-only assist applied to the fresh even word.
#[target_feature(enable = "aes")]
fn expand_256(key: &[u8; 32]) -> CipherContext {
    let mut rk = [_mm_setzero_si128(); MAX_ROUND_KEYS];
    // Safety: two unaligned 16-byte loads from a 32-byte array.
    unsafe {
        rk[0] = _mm_loadu_si128(key.as_ptr().cast());
        rk[1] = _mm_loadu_si128(key.as_ptr().add(16).cast());
    }

    macro_rules! round_pair {
        ($i:expr, $rcon:literal) => {
            rk[$i] = assist_rcon::<$rcon>(rk[$i - 2], rk[$i - 1]);
            rk[$i + 1] = assist_sub(rk[$i - 1], rk[$i]);
        };
    }

    round_pair!(2, 0x01);
    round_pair!(4, 0x02);
    round_pair!(6, 0x04);
    round_pair!(8, 0x08);
    round_pair!(10, 0x10);
    round_pair!(12, 0x20);
    // The final generation produces only the even word.
    rk[14] = assist_rcon::<0x40>(rk[12], rk[13]);

    CipherContext {
        round_keys: rk,
        rounds: ROUNDS_256,
    }
}
