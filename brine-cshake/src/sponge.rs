//! Sponge state machine and the hashing facade.
//!
//! A streaming cSHAKE256 hasher. Input is XORed into the 136-byte rate
//! region of the Keccak state, which is permuted at every full block;
//! output is read back out of the same region. The transition from
//! absorbing to squeezing happens exactly once, on the first squeeze,
//! and applies the domain-separation padding.

use crate::encoding::{bit_length, left_encode};
use crate::error::Error;
use crate::params::{DELIM_CSHAKE, DELIM_SHAKE, RATE_BYTES};
use crate::permutation::{self, STATE_WORDS};

#[cfg(feature = "zeroize-on-drop")]
use zeroize::Zeroize;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Absorbing,
    Squeezing,
}

/// Raw Keccak sponge with a byte-granular cursor into the rate region.
///
/// Lanes are packed little-endian, so byte `i` of the state lives in
/// bits `8 * (i % 8) ..` of lane `i / 8`.
#[derive(Clone)]
struct Sponge {
    lanes: [u64; STATE_WORDS],
    offset: usize,
    delim: u8,
    phase: Phase,
}

#[cfg(feature = "zeroize-on-drop")]
impl Drop for Sponge {
    fn drop(&mut self) {
        self.lanes.zeroize();
        self.offset = 0;
    }
}

impl Sponge {
    fn new(delim: u8) -> Self {
        Sponge {
            lanes: [0; STATE_WORDS],
            offset: 0,
            delim,
            phase: Phase::Absorbing,
        }
    }

    fn xor_byte(&mut self, index: usize, byte: u8) {
        self.lanes[index / 8] ^= u64::from(byte) << ((index % 8) * 8);
    }

    fn byte_at(&self, index: usize) -> u8 {
        (self.lanes[index / 8] >> ((index % 8) * 8)) as u8
    }

    fn permute_block(&mut self) {
        permutation::permute(&mut self.lanes);
        self.offset = 0;
    }

    /// XOR input into the rate region, permuting at each full block.
    ///
    /// Permutes eagerly, so `offset < RATE_BYTES` holds between calls
    /// and padding always lands inside the current block.
    fn absorb(&mut self, input: &[u8]) {
        debug_assert_eq!(self.phase, Phase::Absorbing);
        let mut rest = input;
        while !rest.is_empty() {
            let take = usize::min(RATE_BYTES - self.offset, rest.len());
            for (i, &byte) in rest[..take].iter().enumerate() {
                self.xor_byte(self.offset + i, byte);
            }
            self.offset += take;
            rest = &rest[take..];
            if self.offset == RATE_BYTES {
                self.permute_block();
            }
        }
    }

    /// Zero-pad the current partial block and permute.
    ///
    /// No-op on a block boundary, matching SP 800-185 `bytepad`.
    fn fill_block(&mut self) {
        if self.offset != 0 {
            self.permute_block();
        }
    }

    /// Apply the domain suffix and multi-rate padding, then switch phase.
    ///
    /// The suffix lands at the cursor and 0x80 in the last rate byte;
    /// the two coincide in the same byte when the block is one short.
    fn finalize_absorption(&mut self) {
        debug_assert_eq!(self.phase, Phase::Absorbing);
        self.xor_byte(self.offset, self.delim);
        self.xor_byte(RATE_BYTES - 1, 0x80);
        self.permute_block();
        self.phase = Phase::Squeezing;
    }

    /// Walk `len` bytes of the output stream, handing each to `emit`.
    ///
    /// Finalizes absorption on first use. While squeezing, bytes
    /// `offset..RATE_BYTES` of the current block are exactly the
    /// produced-but-unconsumed output, so continuation across calls is
    /// free.
    fn squeeze_with(&mut self, len: usize, mut emit: impl FnMut(usize, u8)) {
        if self.phase == Phase::Absorbing {
            self.finalize_absorption();
        }
        for i in 0..len {
            if self.offset == RATE_BYTES {
                self.permute_block();
            }
            emit(i, self.byte_at(self.offset));
            self.offset += 1;
        }
    }

    fn is_squeezing(&self) -> bool {
        self.phase == Phase::Squeezing
    }
}

/// Domain-separation parameters for cSHAKE256.
///
/// Holds the function name `N` and customization string `S` of
/// SP 800-185. With both strings empty the construction is plain
/// SHAKE256, bit-for-bit. Parameters are validated once, at
/// construction; [`Custom::create`] then primes as many hashers as
/// needed, each reproducing the identical prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Custom {
    name: Vec<u8>,
    custom_string: Vec<u8>,
}

impl Custom {
    /// Plain SHAKE256: no function name, no customization.
    pub fn shake() -> Custom {
        Custom {
            name: Vec::new(),
            custom_string: Vec::new(),
        }
    }

    /// cSHAKE256 parameters.
    ///
    /// Fails when a string is too long for its bit-length field.
    /// Both strings empty is the same as [`Custom::shake`].
    pub fn new(name: &[u8], custom_string: &[u8]) -> Result<Custom, Error> {
        if bit_length(name.len()).is_none() {
            return Err(Error::NameTooLong { len: name.len() });
        }
        if bit_length(custom_string.len()).is_none() {
            return Err(Error::CustomizationTooLong {
                len: custom_string.len(),
            });
        }
        Ok(Custom {
            name: name.to_vec(),
            custom_string: custom_string.to_vec(),
        })
    }

    fn is_empty(&self) -> bool {
        self.name.is_empty() && self.custom_string.is_empty()
    }

    /// Create a fresh hasher primed with these parameters.
    ///
    /// In cSHAKE mode this absorbs
    /// `bytepad(encode_string(N) || encode_string(S), 136)` before any
    /// user data, per SP 800-185 §3.3.
    pub fn create(&self) -> Hasher {
        if self.is_empty() {
            return Hasher {
                sponge: Sponge::new(DELIM_SHAKE),
            };
        }
        let mut sponge = Sponge::new(DELIM_CSHAKE);
        sponge.absorb(left_encode(RATE_BYTES as u64).value());
        // Lengths were validated in `new`, so the bit counts fit in u64.
        sponge.absorb(left_encode(self.name.len() as u64 * 8).value());
        sponge.absorb(&self.name);
        sponge.absorb(left_encode(self.custom_string.len() as u64 * 8).value());
        sponge.absorb(&self.custom_string);
        sponge.fill_block();
        Hasher { sponge }
    }

    /// One-shot hash: absorb `message`, squeeze `output_len` bytes.
    pub fn once_to_bytes(&self, message: &[u8], output_len: usize) -> Vec<u8> {
        let mut hasher = self.create();
        hasher.sponge.absorb(message);
        hasher.squeeze(output_len)
    }

    /// One-shot hash into a fixed-size array.
    pub fn once_to_array<const N: usize>(&self, message: &[u8]) -> [u8; N] {
        let mut hasher = self.create();
        hasher.sponge.absorb(message);
        let mut output = [0u8; N];
        hasher.squeeze_into(&mut output);
        output
    }
}

/// An incremental cSHAKE256 hasher.
///
/// Created already primed by [`Custom::create`]. Absorption and
/// squeezing form a one-way state machine: the first squeeze finalizes
/// the input, and absorbing afterwards is an error rather than a
/// silent restart. Each instance is exclusively owned; clones are
/// fully independent copies of the state.
#[derive(Clone)]
pub struct Hasher {
    sponge: Sponge,
}

impl Hasher {
    /// Absorb more input.
    ///
    /// Chunk boundaries never matter: any sequence of calls whose
    /// concatenation equals `m` produces the same stream as absorbing
    /// `m` at once. Fails with [`Error::AbsorbAfterSqueeze`] once any
    /// squeeze method has run.
    pub fn absorb(&mut self, input: &[u8]) -> Result<(), Error> {
        if self.sponge.is_squeezing() {
            return Err(Error::AbsorbAfterSqueeze);
        }
        self.sponge.absorb(input);
        Ok(())
    }

    /// Absorb more input, returning the hasher for call chaining.
    pub fn chain_absorb(mut self, input: &[u8]) -> Result<Hasher, Error> {
        self.absorb(input)?;
        Ok(self)
    }

    /// Squeeze the next `output_len` bytes of the output stream.
    ///
    /// The stream is deterministic and continues across calls:
    /// `squeeze(a)` followed by `squeeze(b)` yields the same bytes as
    /// one `squeeze(a + b)`.
    pub fn squeeze(&mut self, output_len: usize) -> Vec<u8> {
        let mut output = vec![0u8; output_len];
        self.squeeze_into(&mut output);
        output
    }

    /// Fill `output` with the next bytes of the stream.
    pub fn squeeze_into(&mut self, output: &mut [u8]) {
        self.sponge
            .squeeze_with(output.len(), |i, byte| output[i] = byte);
    }

    /// XOR the next bytes of the stream into `output` in place.
    ///
    /// Equivalent to XORing with the result of a same-length
    /// [`Hasher::squeeze`], without allocating it.
    pub fn squeeze_xor(&mut self, output: &mut [u8]) {
        self.sponge
            .squeeze_with(output.len(), |i, byte| output[i] ^= byte);
    }

    /// Advance the output stream without copying anything out.
    pub fn squeeze_skip(&mut self, len: usize) {
        self.sponge.squeeze_with(len, |_, _| {});
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_chunking_matches_one_shot() {
        let data = b"hello world, this is a test of streaming consistency!";
        let one_shot = Custom::shake().once_to_bytes(data, 32);
        let mut hasher = Custom::shake().create();
        hasher.absorb(&data[..5]).unwrap();
        hasher.absorb(&data[5..20]).unwrap();
        hasher.absorb(&data[20..]).unwrap();
        assert_eq!(hasher.squeeze(32), one_shot);
    }

    #[test]
    fn absorb_byte_at_a_time_across_rate_boundary() {
        // 136 bytes is one rate block, so 300 crosses two boundaries.
        let data = vec![0x42u8; 300];
        let one_shot = Custom::shake().once_to_bytes(&data, 32);
        let mut hasher = Custom::shake().create();
        for byte in &data {
            hasher.absorb(std::slice::from_ref(byte)).unwrap();
        }
        assert_eq!(hasher.squeeze(32), one_shot);
    }

    #[test]
    fn squeeze_streams_continuously() {
        let reference = Custom::shake().once_to_bytes(b"stream", 96);
        let mut hasher = Custom::shake().create().chain_absorb(b"stream").unwrap();
        let mut split = hasher.squeeze(10);
        split.extend(hasher.squeeze(50));
        split.extend(hasher.squeeze(36));
        assert_eq!(split, reference);
    }

    #[test]
    fn squeeze_across_rate_boundary() {
        // 300 output bytes span three rate blocks.
        let reference = Custom::shake().once_to_bytes(b"long output", 300);
        let mut hasher = Custom::shake().create().chain_absorb(b"long output").unwrap();
        let head = hasher.squeeze(135);
        let tail = hasher.squeeze(165);
        assert_eq!([head, tail].concat(), reference);
    }

    #[test]
    fn squeeze_xor_matches_squeeze() {
        let keystream = Custom::shake().once_to_bytes(b"mask me", 64);
        let mut buffer = [0xa5u8; 64];
        let mut hasher = Custom::shake().create().chain_absorb(b"mask me").unwrap();
        hasher.squeeze_xor(&mut buffer);
        for (i, byte) in buffer.iter().enumerate() {
            assert_eq!(*byte, 0xa5 ^ keystream[i]);
        }
    }

    #[test]
    fn squeeze_skip_advances_the_stream() {
        let reference = Custom::shake().once_to_bytes(b"skip", 200);
        let mut hasher = Custom::shake().create().chain_absorb(b"skip").unwrap();
        hasher.squeeze_skip(137);
        assert_eq!(hasher.squeeze(63), reference[137..]);
    }

    #[test]
    fn absorb_after_squeeze_fails() {
        let mut hasher = Custom::shake().create();
        hasher.absorb(b"data").unwrap();
        let _ = hasher.squeeze(1);
        assert_eq!(hasher.absorb(b"more"), Err(Error::AbsorbAfterSqueeze));
        assert_eq!(
            hasher.chain_absorb(b"more").err(),
            Some(Error::AbsorbAfterSqueeze)
        );
    }

    #[test]
    fn zero_length_output() {
        assert!(Custom::shake().once_to_bytes(b"m", 0).is_empty());
        // A zero-length squeeze still finalizes; the stream continues after it.
        let reference = Custom::shake().once_to_bytes(b"m", 16);
        let mut hasher = Custom::shake().create().chain_absorb(b"m").unwrap();
        assert!(hasher.squeeze(0).is_empty());
        assert_eq!(hasher.squeeze(16), reference);
    }

    #[test]
    fn empty_custom_is_plain_shake() {
        let plain = Custom::shake().once_to_bytes(b"payload", 48);
        let degenerate = Custom::new(b"", b"").unwrap().once_to_bytes(b"payload", 48);
        assert_eq!(plain, degenerate);
    }

    #[test]
    fn customization_separates_domains() {
        let msg = b"same message";
        let a = Custom::new(b"proto", b"a").unwrap().once_to_bytes(msg, 32);
        let b = Custom::new(b"proto", b"b").unwrap().once_to_bytes(msg, 32);
        let c = Custom::new(b"other", b"a").unwrap().once_to_bytes(msg, 32);
        let plain = Custom::shake().once_to_bytes(msg, 32);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, plain);
    }

    #[test]
    fn create_reproduces_the_prefix() {
        let custom = Custom::new(b"proto", b"v1").unwrap();
        let first = custom.create().chain_absorb(b"m").unwrap().squeeze(32);
        let second = custom.create().chain_absorb(b"m").unwrap().squeeze(32);
        assert_eq!(first, second);
    }

    #[test]
    fn clones_do_not_share_state() {
        let mut original = Custom::shake().create().chain_absorb(b"fork").unwrap();
        let mut fork = original.clone();
        let a = original.squeeze(32);
        fork.absorb(b" diverged").unwrap();
        let b = fork.squeeze(32);
        assert_ne!(a, b);
        // The original is unaffected by the fork's absorption.
        assert_eq!(a, Custom::shake().once_to_bytes(b"fork", 32));
    }

    #[test]
    fn once_to_array_matches_once_to_bytes() {
        let bytes = Custom::shake().once_to_bytes(b"array", 16);
        let array: [u8; 16] = Custom::shake().once_to_array(b"array");
        assert_eq!(bytes, array);
    }
}
