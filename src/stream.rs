//! Counter-mode seekable stream wrapper.
//!
//! Partitions the byte stream into fixed 4096-byte blocks. Block b's
//! keystream is the cipher output for a derived IV — the base IV with the
//! little-endian encoding of b XORed into its first 8 bytes — so any
//! absolute position can be decrypted from (key, base IV, position) alone,
//! with no dependence on stream history. One block buffer is the only
//! allocation the wrapper ever makes; seed derivation is amortized across
//! the 4096 bytes of each block.

use std::io::{self, Read, Seek, SeekFrom, Write};

use zeroize::Zeroize;

use crate::cipher;
use crate::kernels::constants::{BLOCK_SIZE, IV_LEN, MAX_KEY_LEN, MIN_KEY_LEN};
use crate::types::{ChaosError, Primitive};

// =============================================================================
// STREAM WRAPPER
// =============================================================================

/// Transparent XOR-stream layer over an inner byte stream.
///
/// Reads decrypt, writes encrypt, and seeking is free: the keystream byte
/// for absolute position p is `B[p / 4096][p % 4096]` where block b is
/// regenerated on demand from `(key, iv ⊕ le64(b))`.
pub struct ChaosStream<S> {
    inner: S,
    primitive: Primitive,
    key: [u8; MAX_KEY_LEN],
    key_len: usize,
    base_iv: [u8; IV_LEN],
    pos: u64,
    block: Box<[u8; BLOCK_SIZE]>,
    cached: Option<u64>,
}

impl<S> ChaosStream<S> {
    /// Wrap `inner` with the keystream for `(key, iv)`.
    ///
    /// The IV is normalized to 16 bytes (truncated or zero-padded); keys
    /// longer than 32 bytes are truncated.
    ///
    /// # Errors
    /// [`ChaosError::InvalidKey`] when the key is shorter than 4 bytes.
    pub fn new(inner: S, primitive: Primitive, key: &[u8], iv: &[u8]) -> Result<Self, ChaosError> {
        if key.len() < MIN_KEY_LEN {
            return Err(ChaosError::InvalidKey);
        }
        let key_len = key.len().min(MAX_KEY_LEN);
        let mut key_buf = [0u8; MAX_KEY_LEN];
        key_buf[..key_len].copy_from_slice(&key[..key_len]);
        let mut iv_buf = [0u8; IV_LEN];
        let iv_len = iv.len().min(IV_LEN);
        iv_buf[..iv_len].copy_from_slice(&iv[..iv_len]);
        Ok(Self {
            inner,
            primitive,
            key: key_buf,
            key_len,
            base_iv: iv_buf,
            pos: 0,
            block: Box::new([0u8; BLOCK_SIZE]),
            cached: None,
        })
    }

    /// Current absolute stream position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Shared access to the wrapped stream.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Mutable access to the wrapped stream. Reading or writing through
    /// it bypasses the keystream layer.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Regenerate the block buffer for block index `b`.
    fn regenerate_block(&mut self, b: u64) {
        let mut iv = self.base_iv;
        for (slot, ctr) in iv.iter_mut().zip(b.to_le_bytes()) {
            *slot ^= ctr;
        }
        self.block.fill(0);
        cipher::process_inner(
            self.primitive,
            &mut self.block[..],
            &self.key[..self.key_len],
            &iv,
        );
        self.cached = Some(b);
    }

    /// XOR keystream over `payload`, which covers absolute positions
    /// `pos .. pos + payload.len()`.
    fn apply(&mut self, payload: &mut [u8], mut pos: u64) {
        let mut cur = 0usize;
        while cur < payload.len() {
            let b = pos / BLOCK_SIZE as u64;
            let inb = (pos % BLOCK_SIZE as u64) as usize;
            if self.cached != Some(b) {
                self.regenerate_block(b);
            }
            let n = (payload.len() - cur).min(BLOCK_SIZE - inb);
            for (dst, ks) in payload[cur..cur + n].iter_mut().zip(&self.block[inb..inb + n]) {
                *dst ^= ks;
            }
            cur += n;
            pos += n as u64;
        }
    }
}

impl<S: Read> Read for ChaosStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        let pos = self.pos;
        self.apply(&mut buf[..n], pos);
        self.pos += n as u64;
        Ok(n)
    }
}

impl<S: Write> Write for ChaosStream<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut scratch = [0u8; BLOCK_SIZE];
        let mut written = 0usize;
        for chunk in buf.chunks(BLOCK_SIZE) {
            scratch[..chunk.len()].copy_from_slice(chunk);
            let pos = self.pos;
            self.apply(&mut scratch[..chunk.len()], pos);
            let n = self.inner.write(&scratch[..chunk.len()])?;
            self.pos += n as u64;
            written += n;
            if n < chunk.len() {
                break;
            }
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<S: Seek> Seek for ChaosStream<S> {
    /// Seeks the inner stream and adopts its absolute position. The cached
    /// keystream block is kept; a later access may reuse it.
    fn seek(&mut self, target: SeekFrom) -> io::Result<u64> {
        let pos = self.inner.seek(target)?;
        self.pos = pos;
        Ok(pos)
    }
}

impl<S> Drop for ChaosStream<S> {
    fn drop(&mut self) {
        self.key.zeroize();
        self.base_iv.zeroize();
        self.block.zeroize();
    }
}
