//! Seekable stream semantics.
//!
//! The wrapper's wire format is pure counter mode: the keystream byte at
//! absolute position p depends only on (key, base IV, p). These tests pin
//! random access, write additivity and block-boundary behavior.

#![allow(missing_docs)]

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use attractor::{ChaosError, ChaosStream, Primitive};

const KEY: [u8; 32] = [0x11; 32];
const IV: [u8; 16] = [0x22; 16];

fn encrypt_all(map: Primitive, plaintext: &[u8]) -> Vec<u8> {
    let mut stream = ChaosStream::new(Cursor::new(Vec::new()), map, &KEY, &IV).unwrap();
    stream.write_all(plaintext).unwrap();
    stream.flush().unwrap();
    stream.get_ref().get_ref().clone()
}

// =============================================================================
// RANDOM ACCESS
// =============================================================================

/// Literal scenario: write 10000 zero bytes through stream A; a second
/// stream over the same positions must produce identical bytes for the
/// window [5000, 6000) reached by seeking, with no history replay.
#[test]
fn lorenz_random_access_matches_sequential_output() {
    let ciphertext = encrypt_all(Primitive::Lorenz, &[0u8; 10000]);
    assert_eq!(ciphertext.len(), 10000);

    // Stream B encrypts the same zero plaintext but only the seeked window.
    let mut b = ChaosStream::new(
        Cursor::new(vec![0u8; 10000]),
        Primitive::Lorenz,
        &KEY,
        &IV,
    )
    .unwrap();
    b.seek(SeekFrom::Start(5000)).unwrap();
    let mut window = vec![0u8; 1000];
    b.read_exact(&mut window).unwrap();
    assert_eq!(window, ciphertext[5000..6000]);
}

#[test]
fn any_byte_decrypts_from_position_alone() {
    let plaintext: Vec<u8> = (0..9000u32).map(|i| (i % 251) as u8).collect();
    let ciphertext = encrypt_all(Primitive::Tent, &plaintext);

    let mut whole = ChaosStream::new(Cursor::new(ciphertext.clone()), Primitive::Tent, &KEY, &IV)
        .unwrap();
    let mut decrypted = Vec::new();
    whole.read_to_end(&mut decrypted).unwrap();
    assert_eq!(decrypted, plaintext);

    for &pos in &[0u64, 1, 4095, 4096, 4097, 8191, 8192, 8999] {
        let mut one = ChaosStream::new(
            Cursor::new(ciphertext.clone()),
            Primitive::Tent,
            &KEY,
            &IV,
        )
        .unwrap();
        one.seek(SeekFrom::Start(pos)).unwrap();
        let mut byte = [0u8; 1];
        one.read_exact(&mut byte).unwrap();
        assert_eq!(byte[0], plaintext[pos as usize], "position {pos}");
    }
}

#[test]
fn seek_keeps_the_cached_block_valid() {
    let plaintext: Vec<u8> = (0..5000u32).map(|i| (i * 7 % 256) as u8).collect();
    let ciphertext = encrypt_all(Primitive::Henon, &plaintext);

    let mut s =
        ChaosStream::new(Cursor::new(ciphertext), Primitive::Henon, &KEY, &IV).unwrap();
    // Bounce within one block and across blocks.
    for &pos in &[10u64, 2000, 10, 4500, 100] {
        s.seek(SeekFrom::Start(pos)).unwrap();
        assert_eq!(s.position(), pos);
        let mut got = [0u8; 16];
        s.read_exact(&mut got).unwrap();
        assert_eq!(got[..], plaintext[pos as usize..pos as usize + 16]);
    }
}

// =============================================================================
// WRITE ADDITIVITY
// =============================================================================

#[test]
fn contiguous_writes_match_one_write() {
    let plaintext: Vec<u8> = (0..10000u32).map(|i| (i % 256) as u8).collect();
    let single = encrypt_all(Primitive::Chen, &plaintext);

    let mut split =
        ChaosStream::new(Cursor::new(Vec::new()), Primitive::Chen, &KEY, &IV).unwrap();
    split.write_all(&plaintext[..3000]).unwrap();
    split.write_all(&plaintext[3000..]).unwrap();
    assert_eq!(*split.get_ref().get_ref(), single);
}

#[test]
fn write_spanning_a_block_boundary_matches_split_writes() {
    let payload: Vec<u8> = (0..12u8).collect();
    let offset = 4090u64;

    let mut spanning =
        ChaosStream::new(Cursor::new(Vec::new()), Primitive::Logistic, &KEY, &IV).unwrap();
    spanning.seek(SeekFrom::Start(offset)).unwrap();
    spanning.write_all(&payload).unwrap();

    let mut split =
        ChaosStream::new(Cursor::new(Vec::new()), Primitive::Logistic, &KEY, &IV).unwrap();
    split.seek(SeekFrom::Start(offset)).unwrap();
    split.write_all(&payload[..6]).unwrap();
    split.write_all(&payload[6..]).unwrap();

    assert_eq!(spanning.get_ref().get_ref(), split.get_ref().get_ref());
}

// =============================================================================
// ROUNDTRIP & POSITION TRACKING
// =============================================================================

#[test]
fn write_then_read_roundtrips() {
    let plaintext: Vec<u8> = (0..6000u32).map(|i| (i * 13 % 256) as u8).collect();
    let mut s =
        ChaosStream::new(Cursor::new(Vec::new()), Primitive::Sine, &KEY, &IV).unwrap();
    s.write_all(&plaintext).unwrap();
    s.seek(SeekFrom::Start(0)).unwrap();
    let mut back = Vec::new();
    s.read_to_end(&mut back).unwrap();
    assert_eq!(back, plaintext);
}

#[test]
fn position_advances_with_io() {
    let mut s =
        ChaosStream::new(Cursor::new(Vec::new()), Primitive::Tent, &KEY, &IV).unwrap();
    assert_eq!(s.position(), 0);
    s.write_all(&[0u8; 100]).unwrap();
    assert_eq!(s.position(), 100);
    s.seek(SeekFrom::Start(40)).unwrap();
    assert_eq!(s.position(), 40);
    let mut buf = [0u8; 10];
    s.read_exact(&mut buf).unwrap();
    assert_eq!(s.position(), 50);
}

#[test]
fn short_key_is_rejected() {
    assert!(matches!(
        ChaosStream::new(Cursor::new(Vec::<u8>::new()), Primitive::Tent, &[1, 2], &IV),
        Err(ChaosError::InvalidKey)
    ));
}
