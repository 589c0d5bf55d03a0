#![cfg(feature = "test-vectors")]

// all test vectors from
// https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38a.pdf
// (ECB-AES128.Encrypt and ECB-AES256.Encrypt; ECB blocks are independent, so
// any arrangement of these plaintext blocks has a known expected ciphertext)

use hex_literal::hex;

use aesq::{Block, CipherContext, Error, Key, encrypt_blocks};

const KEY_128: [u8; 16] = hex!("2b7e151628aed2a6abf7158809cf4f3c");
const KEY_256: [u8; 32] =
    hex!("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4");

const PLAINTEXT: [[u8; 16]; 4] = [
    hex!("6bc1bee22e409f96e93d7e117393172a"),
    hex!("ae2d8a571e03ac9c9eb76fac45af8e51"),
    hex!("30c81c46a35ce411e5fbc1191a0a52ef"),
    hex!("f69f2445df4f9b17ad2b417be66c3710"),
];

const CIPHERTEXT_128: [[u8; 16]; 4] = [
    hex!("3ad77bb40d7a3660a89ecaf32466ef97"),
    hex!("f5d3d58503b9699de785895a96fdbaaf"),
    hex!("43b1cd7f598ece23881b00e3ed030688"),
    hex!("7b0c785e27e8ad3f8223207104725dd4"),
];

const CIPHERTEXT_256: [[u8; 16]; 4] = [
    hex!("f3eed1bdb5d2a03c064b5a7e3db181f8"),
    hex!("591ccb10d410ed26dc5ba74a31362870"),
    hex!("b6ed21b99ca6f4f9f153e7b1beafed1d"),
    hex!("23304b7a39f9f3ff067d8d8f9e24ecc7"),
];

fn ctx_or_skip(key_bytes: &[u8]) -> Option<CipherContext> {
    let key = Key::try_from_slice(key_bytes).expect("valid test key");
    match CipherContext::expand(&key) {
        Ok(ctx) => Some(ctx),
        Err(Error::UnsupportedCpu) => {
            eprintln!("AES instructions not detected on this machine; skipping test.");
            None
        }
        Err(e) => panic!("unexpected expansion error: {e}"),
    }
}

/// Runs `encrypt_blocks` over the plaintext blocks selected by `indices` and
/// checks each against the expected per-block ciphertext.
fn check_arrangement(ctx: &CipherContext, expected: &[[u8; 16]; 4], indices: &[usize]) {
    let mut blocks: Vec<Block> = indices.iter().map(|&i| Block::from(PLAINTEXT[i])).collect();

    encrypt_blocks(ctx, &mut blocks);

    for (pos, (&i, block)) in indices.iter().zip(&blocks).enumerate() {
        assert_eq!(
            block.as_bytes(),
            &expected[i],
            "block {pos} (vector {i}) does not match for n = {}",
            indices.len()
        );
    }
}

#[test]
fn aes_128_single_block() {
    let Some(ctx) = ctx_or_skip(&KEY_128) else {
        return;
    };
    check_arrangement(&ctx, &CIPHERTEXT_128, &[0]);
}

#[test]
fn aes_256_single_block() {
    let Some(ctx) = ctx_or_skip(&KEY_256) else {
        return;
    };
    check_arrangement(&ctx, &CIPHERTEXT_256, &[0]);
}

#[test]
fn aes_128_tail_only_lengths() {
    let Some(ctx) = ctx_or_skip(&KEY_128) else {
        return;
    };
    check_arrangement(&ctx, &CIPHERTEXT_128, &[0, 1]);
    check_arrangement(&ctx, &CIPHERTEXT_128, &[0, 1, 2]);
}

#[test]
fn aes_128_full_group() {
    // exactly one 4-way group, no tail
    let Some(ctx) = ctx_or_skip(&KEY_128) else {
        return;
    };
    check_arrangement(&ctx, &CIPHERTEXT_128, &[0, 1, 2, 3]);
}

#[test]
fn aes_256_full_group() {
    let Some(ctx) = ctx_or_skip(&KEY_256) else {
        return;
    };
    check_arrangement(&ctx, &CIPHERTEXT_256, &[0, 1, 2, 3]);
}

#[test]
fn aes_128_group_plus_tail() {
    // seven blocks: one full group and a three-block tail
    let Some(ctx) = ctx_or_skip(&KEY_128) else {
        return;
    };
    check_arrangement(&ctx, &CIPHERTEXT_128, &[0, 1, 2, 3, 0, 1, 2]);
}

#[test]
fn aes_256_group_plus_tail() {
    let Some(ctx) = ctx_or_skip(&KEY_256) else {
        return;
    };
    check_arrangement(&ctx, &CIPHERTEXT_256, &[0, 1, 2, 3, 0, 1, 2]);
}
